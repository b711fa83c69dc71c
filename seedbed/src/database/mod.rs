use crate::builder::{describe, Diagnostic, TreeBuilder};
use crate::config::SeedConfig;
use crate::error::Result;
use crate::insert::InsertGenerator;
use crate::model::{Row, Table};
use std::path::Path;

/// Registry of root tables built from one or more fixture documents.
#[derive(Debug, Default)]
pub struct Database {
    config: SeedConfig,
    tables: Vec<Table>,
    diagnostics: Vec<Diagnostic>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SeedConfig) -> Self {
        Database {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Everything skipped so far, across all populate/load calls.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Add one root table per top-level key, in document order.
    /// Returns the diagnostics produced by this document only.
    pub fn populate(&mut self, document: &serde_yaml::Value) -> &[Diagnostic] {
        let start = self.diagnostics.len();
        let mut builder = TreeBuilder::new(&self.config);

        match document {
            serde_yaml::Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    let Some(name) = key.as_str() else {
                        builder.report("", format!("table name {} is not a string", describe(key)));
                        continue;
                    };
                    let mut table = Table::new(name);
                    builder.build(&mut table, value);
                    log::debug!("Built table '{}' with {} rows", table.name, table.rows().len());
                    self.tables.push(table);
                }
            }
            other => {
                log::debug!("Unsupported fixture document: {other:?}");
                builder.report(
                    "",
                    format!("fixture document must be a mapping, got {}", describe(other)),
                );
            }
        }

        self.diagnostics.extend(builder.finish());
        &self.diagnostics[start..]
    }

    /// Decode a YAML string and populate from it.
    pub fn load_str(&mut self, content: &str) -> Result<&[Diagnostic]> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;
        Ok(self.populate(&document))
    }

    /// Read and decode a fixture file. Fails only on IO or YAML errors.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&[Diagnostic]> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let before = self.tables.len();
        let skipped = self.load_str(&content)?.len();
        log::info!(
            "Loaded {} tables from {} ({} skipped items)",
            self.tables.len() - before,
            path.display(),
            skipped
        );
        Ok(&self.diagnostics[self.diagnostics.len() - skipped..])
    }

    /// Load every file matching a glob pattern, in sorted path order.
    /// Returns the number of files loaded.
    pub fn load_glob(&mut self, pattern: &str) -> Result<usize> {
        let mut paths = glob::glob(pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
        paths.sort();
        for path in &paths {
            self.load(path)?;
        }
        Ok(paths.len())
    }

    /// Rows of the first root table with this name.
    pub fn get(&self, name: &str) -> &[Row] {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.rows())
            .unwrap_or(&[])
    }

    /// Every table name, children before their parents, each once.
    /// Usable as a delete/truncate order.
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for table in &self.tables {
            for name in table
                .descendant_names()
                .into_iter()
                .chain(std::iter::once(table.name.clone()))
            {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// INSERT statements for every root table, parents before children.
    pub fn generate_inserts(&self) -> Result<Vec<String>> {
        InsertGenerator::new(&self.config).generate(&self.tables)
    }
}
