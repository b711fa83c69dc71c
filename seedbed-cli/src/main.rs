use clap::{Parser, Subcommand, ValueEnum};
use seedbed::{Database, SeedConfig};
use std::path::PathBuf;
use std::process;

/// Turn YAML fixtures into SQL INSERT statements
#[derive(Parser)]
#[command(name = "seedbed", version, about)]
struct Cli {
    /// Generator settings (placeholder, foreign keys, field order)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "sql")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Print INSERT statements for the given fixture files
    Generate {
        /// Fixture files, loaded in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print table names, children before parents
    Tables {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the parsed fixture tree as JSON
    Tree {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Report fixture items that were skipped; exits 1 if there are any
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("ERROR:{e}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => SeedConfig::from_path(path)
            .map_err(|e| format!("Failed to read config '{}': {e}", path.display()))?,
        None => SeedConfig::default(),
    };

    match cli.command {
        Command::Generate { files } => {
            let db = load(config, &files)?;
            let inserts = db.generate_inserts()?;
            match cli.format {
                OutputFormat::Sql => {
                    for insert in &inserts {
                        println!("{insert};");
                    }
                }
                OutputFormat::Json => print_json(&serde_json::json!(inserts))?,
            }
        }

        Command::Tables { files } => {
            let db = load(config, &files)?;
            let names = db.table_names();
            match cli.format {
                OutputFormat::Sql => {
                    for name in &names {
                        println!("{name}");
                    }
                }
                OutputFormat::Json => print_json(&serde_json::json!(names))?,
            }
        }

        Command::Tree { files } => {
            let db = load(config, &files)?;
            print_json(&serde_json::to_value(db.tables())?)?;
        }

        Command::Check { files } => {
            let db = load(config, &files)?;
            let diagnostics = db.diagnostics();
            match cli.format {
                OutputFormat::Sql => {
                    for diagnostic in diagnostics {
                        println!("{diagnostic}");
                    }
                }
                OutputFormat::Json => print_json(&serde_json::to_value(diagnostics)?)?,
            }
            if !diagnostics.is_empty() {
                return Ok(1);
            }
        }
    }

    Ok(0)
}

fn load(config: SeedConfig, files: &[PathBuf]) -> Result<Database, Box<dyn std::error::Error>> {
    let mut db = Database::with_config(config);
    for file in files {
        db.load(file)
            .map_err(|e| format!("Failed to load fixture '{}': {e}", file.display()))?;
    }
    log::info!("Loaded {} root tables from {} files", db.tables().len(), files.len());
    Ok(db)
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
