use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use tally::LogLevel;
use tally::core::config::{self, CliOverrides, ResolvedConfig, TallyConfig};
use tally::core::replay::replay;
use tally::tui;

#[derive(Parser)]
#[command(name = "tally", about = "Keypad calculator for the terminal")]
struct Args {
    /// Press these keys without opening the UI and print the display
    /// (0-9 . + - * / =, C for AC, < for DEL)
    #[arg(short, long)]
    keys: Option<String>,

    /// Log verbosity
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,

    /// Title bar text
    #[arg(short, long)]
    title: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Loaded before the logger exists; its outcome is logged once it does
    let loaded = config::load_config();
    let default_config = TallyConfig::default();
    let file_config = loaded
        .as_ref()
        .map_or(&default_config, |loaded| &loaded.config);
    let resolved = config::resolve(
        file_config,
        &CliOverrides {
            title: args.title,
            log_level: args.log_level,
        },
    );

    init_logging(&resolved);
    match &loaded {
        Ok(loaded) => {
            loaded.origin.log();
            log::debug!("Config: {:?}", loaded.config);
        }
        Err(e) => log::warn!("Ignoring config file, using defaults: {}", e),
    }

    if let Some(keys) = args.keys {
        log::info!("Tally replaying {} keys", keys.len());
        println!("{}", replay(&keys).render());
        return Ok(());
    }

    log::info!("Tally starting up: {:?}", resolved);
    tui::run(resolved)
}

/// File logger - the terminal belongs to the UI.
fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level.filter(), log_config, log_file);
    }
}
