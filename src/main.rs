use clap::{Parser, Subcommand};
use clipconv::config::Config;
use clipconv::convert::{Conversion, ConversionEvent, ConversionManager, ConvertResult};
use clipconv::units;
use clipconv::watch::ClipboardWatcher;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

const DEFAULT_CONFIG_FILE: &str = "clipconv.toml";

#[derive(Parser)]
#[command(name = "clipconv")]
#[command(about = "Convert timestamps and unit quantities found in clipboard text", long_about = None)]
struct Cli {
    /// Config file (default: ./clipconv.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log clipboard changes and detections
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single piece of text
    Convert {
        /// Text to convert (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Treat every stdin line as a new clipboard snapshot
    Watch {
        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List enabled converters and registered unit ids
    Units,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.debug || config.debug);

    let result = match cli.command {
        Commands::Convert { text, json } => convert_text(&config, &text.join(" "), json),
        Commands::Watch { json } => watch_stdin(&config, json),
        Commands::Units => list_units(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Config::load_from_file(path)
            .map_err(|e| format!("{}: {}", path.display(), e).into()),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                Ok(Config::load_from_file(default_path)?)
            } else {
                Ok(Config::empty())
            }
        }
    }
}

fn convert_text(config: &Config, text: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConversionManager::from_config(config);

    match manager.process(text) {
        Conversion::Matched(result) => print_result(&result, json)?,
        Conversion::NoMatch => {
            if json {
                println!("null");
            } else {
                println!("No conversion");
            }
        }
    }

    Ok(())
}

fn watch_stdin(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (events_tx, events_rx) = mpsc::channel();
    let manager = ConversionManager::from_config(config).with_events(events_tx);
    let watcher = ClipboardWatcher::spawn(manager);

    // Presentation side: print events as they arrive
    let printer = std::thread::spawn(move || -> Result<(), serde_json::Error> {
        for event in events_rx {
            match event {
                ConversionEvent::Converted(result) => print_result(&result, json)?,
                ConversionEvent::Cleared => {
                    if json {
                        println!("null");
                    } else {
                        println!("-");
                    }
                }
            }
        }
        Ok(())
    });

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        watcher.push(line?)?;
    }

    let processed = watcher.finish()?;
    log::debug!("Processed {} clipboard changes", processed);

    printer
        .join()
        .map_err(|_| "Output thread panicked".to_string())??;

    Ok(())
}

fn list_units(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let manager = ConversionManager::from_config(config);
    println!("Converters: {}", manager.enabled_converters().join(", "));

    if !config.converters.simple_unit {
        return Ok(());
    }

    let registry = units::simple_unit_converter(&config.units);
    println!("\nUnits ({}):", registry.unit_ids().len());
    for unit_id in registry.unit_ids() {
        println!("  - {} ({})", unit_id, registry.owner_of(unit_id).unwrap_or("?"));
    }

    Ok(())
}

fn print_result(result: &ConvertResult, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(result)?);
    } else {
        println!("{} -> {}  [{}]", result.original(), result.output(), result.converter_name());
        for (key, value) in result.metadata() {
            if let Some(name) = key.strip_prefix("template.") {
                println!("  {}: {}", name, value);
            }
        }
    }
    Ok(())
}
