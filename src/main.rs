use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dsmodel::commands;
use dsmodel::config::Config;
use dsmodel::format::{encode, Format};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Validate and select datasource resources
#[derive(Parser, Debug)]
#[command(name = "dsctl", version, about, long_about = None)]
struct Args {
    /// Document format; guessed from the file extension when omitted
    #[arg(short, long, global = true, value_enum)]
    format: Option<Format>,

    /// Log level for debugging
    #[arg(long, global = true, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every datasource in the given files is valid
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the datasources matching a plugin kind and default flag
    List {
        /// Plugin kind, exact match
        #[arg(short, long)]
        kind: Option<String>,

        /// Keep only datasources whose default flag equals this value
        #[arg(short, long)]
        default: Option<bool>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "yaml")]
        output: Format,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show or change the saved defaults
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Store defaults for later runs; `--format` sets the default format
    Set {
        /// Plugin kind applied by `list`; an empty value clears it
        #[arg(short, long)]
        kind: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(
    level: LogLevel,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("dsctl started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("dsctl").join("dsctl.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".dsctl").join("dsctl.log");
    }
    PathBuf::from("dsctl.log")
}

fn validate(config: &Config, format: Option<Format>, files: &[PathBuf]) -> Result<()> {
    let report = commands::validate_files(config, format, files);

    for outcome in &report.files {
        let path = outcome.path.display();
        match &outcome.result {
            Ok(documents) => {
                for doc in documents {
                    match doc.project() {
                        Some(project) => {
                            println!("ok {} {}/{} ({})", doc.kind(), project, doc.name(), path)
                        }
                        None => println!("ok {} {} ({})", doc.kind(), doc.name(), path),
                    }
                }
            }
            Err(e) => eprintln!("error {}: {:#}", path, e),
        }
    }

    report.ensure_ok()
}

fn configure(mut config: Config, format: Option<Format>, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { kind } => {
            config.apply(format, kind.as_deref());
            config.save()?;
            tracing::info!("Saved config: {:?}", config);
        }
        ConfigAction::Show => {}
    }
    print!("{}", encode(Format::Yaml, &config)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let config = Config::load();

    match &args.command {
        Command::Validate { files } => validate(&config, args.format, files),
        Command::List {
            kind,
            default,
            output,
            files,
        } => {
            let rendered = commands::list(
                &config,
                args.format,
                kind.as_deref(),
                *default,
                *output,
                files,
            )?;
            print!("{}", rendered);
            Ok(())
        }
        Command::Config { action } => configure(config, args.format, action),
    }
}
