//! splice-dialect CLI - Browse a Splice Machine catalog.

use clap::{Parser, Subcommand};
use serde::Serialize;
use splice_dialect::{
    Config, Connection, Inspector, ReflectError, ReflectedTable, SpliceDialect, TableDescriptor,
    TableKind,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "splice-dialect")]
#[command(about = "Schema reflection for Splice Machine")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List non-system schemas
    Schemas,

    /// List tables in a schema
    Tables {
        /// Schema to list (default: the connection's schema)
        #[arg(long)]
        schema: Option<String>,
    },

    /// List views in a schema
    Views {
        /// Schema to list (default: the connection's schema)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Show columns, keys, and indexes of a table
    Describe {
        /// Table name
        table: String,

        /// Schema of the table (default: the connection's schema)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Print the stored definition of a view
    ViewDefinition {
        /// View name
        view: String,

        /// Schema of the view (default: the connection's schema)
        #[arg(long)]
        schema: Option<String>,
    },

    /// Test the database connection
    HealthCheck,
}

#[derive(Debug, Serialize)]
struct HealthCheckResult {
    connected: bool,
    latency_ms: u64,
    driver: String,
    default_schema: Option<String>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), ReflectError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ReflectError::Config)?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let dialect = SpliceDialect::from_config(&config);

    if let Commands::HealthCheck = cli.command {
        return health_check(&config, &dialect, cli.output_json).await;
    }

    let mut conn = connect(&config).await?;
    let mut inspector = Inspector::new(&dialect, conn.as_mut());

    match cli.command {
        Commands::HealthCheck => unreachable!(), // Handled above

        Commands::Schemas => {
            let schemas = inspector.get_schema_names().await?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&schemas)?);
            } else {
                for schema in schemas {
                    println!("{}", schema);
                }
            }
        }

        Commands::Tables { schema } => {
            let names = inspector.get_table_names(schema.as_deref()).await?;
            print_relations(names, TableKind::Table, schema.as_deref(), &dialect, cli.output_json)?;
        }

        Commands::Views { schema } => {
            let names = inspector.get_view_names(schema.as_deref()).await?;
            print_relations(names, TableKind::View, schema.as_deref(), &dialect, cli.output_json)?;
        }

        Commands::Describe { table, schema } => {
            if !inspector.has_table(&table, schema.as_deref()).await? {
                return Err(ReflectError::Config(format!("Table not found: {}", table)));
            }
            let reflected = inspector.reflect_table(&table, schema.as_deref()).await?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&reflected)?);
            } else {
                print_table(&reflected);
            }
        }

        Commands::ViewDefinition { view, schema } => {
            let definition = inspector
                .get_view_definition(&view, schema.as_deref())
                .await?
                .ok_or_else(|| ReflectError::Config(format!("View not found: {}", view)))?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&definition)?);
            } else {
                println!("{}", definition);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "odbc")]
async fn connect(config: &Config) -> Result<Box<dyn Connection>, ReflectError> {
    let conn = splice_dialect::OdbcConnection::connect(&config.connection).await?;
    Ok(Box::new(conn))
}

#[cfg(not(feature = "odbc"))]
async fn connect(_config: &Config) -> Result<Box<dyn Connection>, ReflectError> {
    Err(ReflectError::Config(
        "built without ODBC support; rebuild with --features odbc".to_string(),
    ))
}

async fn health_check(
    config: &Config,
    dialect: &SpliceDialect,
    output_json: bool,
) -> Result<(), ReflectError> {
    let start = Instant::now();
    let check = async {
        let mut conn = connect(config).await?;
        dialect.default_schema_name(conn.as_mut()).await
    };
    let outcome = check.await;

    let result = HealthCheckResult {
        connected: outcome.is_ok(),
        latency_ms: start.elapsed().as_millis() as u64,
        driver: config.connection.driver.as_str().to_string(),
        default_schema: outcome.as_ref().ok().cloned(),
        error: outcome.as_ref().err().map(|e| e.to_string()),
    };

    if output_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Health Check Results:");
        println!(
            "  Splice Machine ({}): {} ({}ms)",
            result.driver,
            if result.connected { "OK" } else { "FAILED" },
            result.latency_ms
        );
        if let Some(ref schema) = result.default_schema {
            println!("    Default schema: {}", schema);
        }
        if let Some(ref err) = result.error {
            println!("    Error: {}", err);
        }
        println!(
            "\n  Overall: {}",
            if result.connected { "HEALTHY" } else { "UNHEALTHY" }
        );
    }

    if !result.connected {
        return Err(ReflectError::Config("Health check failed".to_string()));
    }
    Ok(())
}

fn print_relations(
    names: Vec<String>,
    kind: TableKind,
    schema: Option<&str>,
    dialect: &SpliceDialect,
    output_json: bool,
) -> Result<(), ReflectError> {
    let relations: Vec<TableDescriptor> = names
        .into_iter()
        .map(|name| TableDescriptor {
            name,
            kind,
            schema: schema.map(|s| dialect.normalize_name(s)),
        })
        .collect();

    if output_json {
        println!("{}", serde_json::to_string_pretty(&relations)?);
    } else {
        for relation in &relations {
            match &relation.schema {
                Some(schema) => println!("{}.{}", schema, relation.name),
                None => println!("{}", relation.name),
            }
        }
    }
    Ok(())
}

fn print_table(table: &ReflectedTable) {
    println!("Table: {}", table.full_name());

    println!("  Columns:");
    for col in &table.columns {
        let mut line = format!(
            "    {} {}{}",
            col.name,
            col.column_type,
            if col.nullable { "" } else { " NOT NULL" }
        );
        if let Some(ref default) = col.default {
            line.push_str(&format!(" DEFAULT {}", default));
        }
        if col.autoincrement {
            line.push_str(" AUTOINCREMENT");
        }
        println!("{}", line);
    }

    if !table.primary_key.is_empty() {
        println!(
            "  Primary key{}: {}",
            table
                .primary_key
                .name
                .as_ref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default(),
            table.primary_key.constrained_columns.join(", ")
        );
    }

    if !table.foreign_keys.is_empty() {
        println!("  Foreign keys:");
        for fk in &table.foreign_keys {
            let referred = match &fk.referred_schema {
                Some(schema) => format!("{}.{}", schema, fk.referred_table),
                None => fk.referred_table.clone(),
            };
            let mut line = format!(
                "    {} ({}) -> {} ({})",
                fk.name,
                fk.constrained_columns.join(", "),
                referred,
                fk.referred_columns.join(", ")
            );
            if let Some(ref action) = fk.options.onupdate {
                line.push_str(&format!(" ON UPDATE {}", action));
            }
            if let Some(ref action) = fk.options.ondelete {
                line.push_str(&format!(" ON DELETE {}", action));
            }
            println!("{}", line);
        }
    }

    if !table.incoming_foreign_keys.is_empty() {
        println!("  Referenced by:");
        for fk in &table.incoming_foreign_keys {
            let constrained = match &fk.constrained_schema {
                Some(schema) => format!("{}.{}", schema, fk.constrained_table),
                None => fk.constrained_table.clone(),
            };
            println!(
                "    {} ({}) via {}",
                constrained,
                fk.constrained_columns.join(", "),
                fk.name
            );
        }
    }

    if !table.indexes.is_empty() {
        println!("  Indexes:");
        for idx in &table.indexes {
            println!(
                "    {}{} ({})",
                idx.name,
                if idx.unique { " UNIQUE" } else { "" },
                idx.column_names.join(", ")
            );
        }
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
