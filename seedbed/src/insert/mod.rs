// Insert generator - walks the fixture tree and renders INSERT statements

use crate::config::SeedConfig;
use crate::error::Result;
use crate::hash;
use crate::model::{Row, Table};
use crate::value::{Field, Value};
use std::borrow::Cow;

/// Key of the boolean field that marks a row as skipped.
pub const INVALID_KEY: &str = "invalid";

/// Renders statements for a forest of tables, parents before children.
pub struct InsertGenerator<'a> {
    config: &'a SeedConfig,
}

impl<'a> InsertGenerator<'a> {
    pub fn new(config: &'a SeedConfig) -> Self {
        InsertGenerator { config }
    }

    /// Depth-first, pre-order: each row's statement is followed by the
    /// statements of its child tables. The tree itself is never modified.
    pub fn generate(&self, tables: &[Table]) -> Result<Vec<String>> {
        let mut inserts = Vec::new();
        for table in tables {
            self.walk(table, None, &mut inserts)?;
        }
        Ok(inserts)
    }

    fn walk(&self, table: &Table, parent: Option<&Row>, inserts: &mut Vec<String>) -> Result<()> {
        for stored in table.rows() {
            let row = match parent {
                Some(parent) if table.is_child() => {
                    Cow::Owned(self.with_foreign_key(stored, table, parent))
                }
                _ => Cow::Borrowed(stored),
            };

            // A skipped row takes its whole subtree with it
            let Some(insert) = self.insert_statement(&table.name, &row)? else {
                continue;
            };
            inserts.push(insert);

            for child in row.children() {
                self.walk(child, Some(&*row), inserts)?;
            }
        }
        Ok(())
    }

    /// Copy of `row` with a column pointing at the parent row's `id`.
    /// A parent without an `id` field yields an empty value.
    fn with_foreign_key(&self, row: &Row, table: &Table, parent: &Row) -> Row {
        let column = self
            .config
            .foreign_key_column(&table.parent_name, &table.name);
        let mut row = row.clone();
        row.add_field(column, Value::String(parent.get_str("id")));
        row
    }

    /// Render one row, or `None` when it has no fields or carries `invalid: true`.
    pub fn insert_statement(&self, table_name: &str, row: &Row) -> Result<Option<String>> {
        if row.is_empty() || is_invalid(row) {
            return Ok(None);
        }

        let mut columns = Vec::with_capacity(row.fields().len());
        let mut values = Vec::with_capacity(row.fields().len());
        for field in row.fields() {
            columns.push(field.key.as_str());
            values.push(self.render_value(field)?);
        }

        Ok(Some(format!(
            "INSERT INTO {}({}) VALUES ({})",
            table_name,
            columns.join(", "),
            values.join(", ")
        )))
    }

    fn render_value(&self, field: &Field) -> Result<String> {
        match &field.value {
            Value::Integer(i) => Ok(i.to_string()),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::String(s) => {
                if self.config.hash_passwords && field.key.eq_ignore_ascii_case("password") {
                    Ok(quote(&hash::hash_password(s)?))
                } else {
                    Ok(quote(s))
                }
            }
        }
    }
}

fn is_invalid(row: &Row) -> bool {
    row.fields()
        .iter()
        .any(|f| f.key == INVALID_KEY && f.value == Value::Boolean(true))
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
