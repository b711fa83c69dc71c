// Tree builder - interprets a decoded YAML document as tables, rows and fields

use crate::config::{FieldOrder, SeedConfig};
use crate::model::{Row, Table};
use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// Something in the document the builder could not use. Building never
/// fails; skipped items are reported here instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Dotted location inside the document, e.g. `users[0].posts[1].score`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Recursively turns mappings into rows and sequences into repeated rows.
pub struct TreeBuilder<'a> {
    config: &'a SeedConfig,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(config: &'a SeedConfig) -> Self {
        TreeBuilder {
            config,
            diagnostics: Vec::new(),
        }
    }

    /// Append the rows described by `value` to `table`.
    pub fn build(&mut self, table: &mut Table, value: &serde_yaml::Value) {
        let path = table.name.clone();
        self.crawl(table, value, &path);
    }

    pub fn report(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            path: path.into(),
            message: message.into(),
        };
        log::warn!("Skipping fixture item {diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn crawl(&mut self, table: &mut Table, value: &serde_yaml::Value, path: &str) {
        match value {
            serde_yaml::Value::Mapping(mapping) => {
                let mut row = Row::new();

                for (key, entry) in mapping {
                    let Some(key) = key.as_str() else {
                        log::debug!("Unusable mapping key: {key:?}");
                        self.report(path, format!("mapping key {} is not a string", describe(key)));
                        continue;
                    };
                    let entry_path = join_key(path, key);

                    match entry {
                        serde_yaml::Value::Mapping(_) | serde_yaml::Value::Sequence(_) => {
                            if table.name.is_empty() && table.rows.is_empty() {
                                // Top-level key names the table itself
                                table.name = key.to_string();
                                self.crawl(table, entry, &entry_path);
                            } else {
                                let mut child = Table::child_of(key, &table.name);
                                self.crawl(&mut child, entry, &entry_path);
                                log::debug!(
                                    "Attached child table '{}' ({} rows) under '{}'",
                                    child.name,
                                    child.rows.len(),
                                    table.name
                                );
                                row.add_child(child);
                            }
                        }
                        scalar => match Value::from_yaml(scalar) {
                            Some(value) => {
                                let value = self.substitute_placeholder(value);
                                row.add_field(key, value);
                            }
                            None => {
                                log::debug!("Unsupported value at {entry_path}: {scalar:?}");
                                self.report(
                                    entry_path,
                                    format!("unsupported value {}", describe(scalar)),
                                );
                            }
                        },
                    }
                }

                if self.config.field_order == FieldOrder::Sorted {
                    row.fields.sort_by(|a, b| a.key.cmp(&b.key));
                }
                table.rows.push(row);
            }
            serde_yaml::Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.crawl(table, item, &format!("{path}[{index}]"));
                }
            }
            other => {
                log::debug!("Unsupported value at {path}: {other:?}");
                self.report(path, format!("expected a mapping or sequence, got {}", describe(other)));
            }
        }
    }

    fn substitute_placeholder(&self, value: Value) -> Value {
        match value {
            Value::String(s) if s == self.config.placeholder => {
                Value::String(uuid::Uuid::new_v4().to_string())
            }
            other => other,
        }
    }
}

/// Build a table from a document fragment without a preset name. The first
/// nested key of the first mapping becomes the table's name.
pub fn build_table(value: &serde_yaml::Value, config: &SeedConfig) -> (Table, Vec<Diagnostic>) {
    let mut table = Table::default();
    let mut builder = TreeBuilder::new(config);
    builder.build(&mut table, value);
    (table, builder.finish())
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

pub(crate) fn describe(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".into(),
        serde_yaml::Value::Bool(b) => format!("boolean {b}"),
        serde_yaml::Value::Number(n) => format!("number {n}"),
        serde_yaml::Value::String(s) => format!("string '{s}'"),
        serde_yaml::Value::Sequence(_) => "sequence".into(),
        serde_yaml::Value::Mapping(_) => "mapping".into(),
        serde_yaml::Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}
