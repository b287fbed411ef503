mod logging;

use std::path::PathBuf;

use audiobook_terms::{
    SearchAlternative, SourceVerdicts, config::Config, metadata_cleaning::MetadataCleaner,
    search_terms::{best_search_term, generate},
};
use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use serde::Serialize;

use crate::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The config file to use
    #[arg(short, long, env = "AUDIOBOOK_TERMS_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level (default: off)
    #[arg(long, default_value = "off", global = true, env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug", global = true)]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "AUDIOBOOK_TERMS_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build ranked search terms from a folder name and tag values
    Extract {
        /// The audiobook folder (name or path, only the last component is used)
        #[arg(short, long)]
        folder: String,

        /// Title tag
        #[arg(short, long)]
        title: Option<String>,

        /// Author/artist tag
        #[arg(short, long)]
        author: Option<String>,

        /// Album tag
        #[arg(long)]
        album: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Check whether a single tag value is usable
    Check {
        /// The tag value to check
        text: String,
    },
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Create a default config file, if it doesn't exist
    CreateDefault,
    /// Print the path to the config file
    Path,
}

#[derive(Serialize)]
struct ExtractReport<'a> {
    verdicts: &'a SourceVerdicts,
    alternatives: &'a [SearchAlternative],
    search_term: String,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    text: &'a str,
    garbage: bool,
    cleaned: String,
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .wrap_err("Failed to serialize output")?;
    println!("{output}");
    Ok(())
}

fn load_cleaner(config: Option<PathBuf>) -> Result<MetadataCleaner> {
    let config = match config {
        Some(path) => Config::from_file(&path),
        None => Config::load(),
    }
    .wrap_err("Failed to load audiobook-terms config")?;

    config
        .cleaner()
        .wrap_err("Invalid cleaning configuration")
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    log::debug!("audiobook-terms starting");

    match args.command {
        Commands::Extract {
            folder,
            title,
            author,
            album,
            pretty,
        } => {
            let cleaner = load_cleaner(args.config)?;
            let verdicts = cleaner.extract(
                &folder,
                title.as_deref(),
                author.as_deref(),
                album.as_deref(),
            );
            let alternatives = generate(&verdicts);
            log::info!(
                "Generated {} search alternative(s) for {:?}",
                alternatives.len(),
                verdicts.folder.raw
            );

            print_json(
                &ExtractReport {
                    verdicts: &verdicts,
                    search_term: best_search_term(&alternatives, &folder),
                    alternatives: &alternatives,
                },
                pretty,
            )?;
        }
        Commands::Check { text } => {
            let cleaner = load_cleaner(args.config)?;
            print_json(
                &CheckReport {
                    garbage: cleaner.is_garbage(&text),
                    cleaned: cleaner.clean_id3_field(&text),
                    text: &text,
                },
                false,
            )?;
        }
        Commands::Config(config_commands) => match config_commands {
            ConfigCommands::CreateDefault => {
                log::debug!("Creating default config");
                let (path, written) = Config::create_default()?;
                if written {
                    log::info!("Default config created at: {}", path.display());
                } else {
                    log::info!("Config file already exists at: {}", path.display());
                }
            }
            ConfigCommands::Path => match Config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No default config path found"),
            },
        },
    }

    Ok(())
}
