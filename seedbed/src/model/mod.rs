// Fixture tree: tables own rows, rows own fields and child tables

use crate::value::{Field, Value};
use serde::Serialize;

/// One record's worth of fields plus the child tables nested under it.
///
/// Field order is significant: it fixes the column order of the generated
/// statement. Duplicate keys are kept, but lookups by key see only the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub(crate) fields: Vec<Field>,
    pub(crate) children: Vec<Table>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: Vec<Field>) -> Self {
        Row {
            fields,
            children: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn children(&self) -> &[Table] {
        &self.children
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.push(Field::new(key, value));
    }

    pub fn add_child(&mut self, table: Table) {
        self.children.push(table);
    }

    /// First field with this key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// Rendered value of the first field with this key, or an empty string.
    pub fn get_str(&self, key: &str) -> String {
        self.get(key).map(Value::to_string).unwrap_or_default()
    }

    /// First child table with this name.
    pub fn child(&self, table_name: &str) -> Option<&Table> {
        self.children.iter().find(|t| t.name == table_name)
    }

    /// Rows of the first child table with this name.
    pub fn child_rows(&self, table_name: &str) -> &[Row] {
        self.child(table_name).map(|t| t.rows.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named group of rows. Root tables have an empty `parent_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub parent_name: String,
    pub(crate) rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            parent_name: String::new(),
            rows: Vec::new(),
        }
    }

    pub fn child_of(name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            parent_name: parent_name.into(),
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn is_child(&self) -> bool {
        !self.parent_name.is_empty()
    }

    /// Names of every table nested below this one, deepest first, each once.
    pub fn descendant_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_descendant_names(&mut names);
        names
    }

    fn collect_descendant_names(&self, names: &mut Vec<String>) {
        for row in &self.rows {
            for child in &row.children {
                child.collect_descendant_names(names);
                if !names.contains(&child.name) {
                    names.push(child.name.clone());
                }
            }
        }
    }
}

/// All rows of every child table called `name`, across `rows`, in order.
pub fn child_rows_by_name<'a>(rows: &'a [Row], name: &str) -> Vec<&'a Row> {
    rows.iter()
        .flat_map(|row| row.children.iter())
        .filter(|child| child.name == name)
        .flat_map(|child| child.rows.iter())
        .collect()
}

/// Merge every child table called `name` across `rows` into one table.
/// Name and parent come from the first match.
pub fn child_table_by_name(rows: &[Row], name: &str) -> Option<Table> {
    let mut merged: Option<Table> = None;

    for child in rows
        .iter()
        .flat_map(|row| row.children.iter())
        .filter(|child| child.name == name)
    {
        merged
            .get_or_insert_with(|| Table::child_of(&child.name, &child.parent_name))
            .rows
            .extend(child.rows.iter().cloned());
    }

    merged
}
