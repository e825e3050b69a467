use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use globetrotter::SourceKind;
use globetrotter::core::config::{self, CliOverrides, DEFAULT_LOG_LEVEL, GlobetrotterConfig};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "globetrotter", about = "Browse the world's countries by flag")]
struct Args {
    /// Country data source
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// JSON file in the REST Countries format (implies --source file)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Start with this continent selected (repeatable)
    #[arg(short, long = "continent")]
    continents: Vec<String>,

    /// Start with sovereign countries hidden
    #[arg(long)]
    hide_sovereign: bool,

    /// Start with dependent territories hidden
    #[arg(long)]
    hide_dependent: bool,
}

/// Installs the file logger before config loading so its warnings are kept.
///
/// The logger itself accepts everything; `log::set_max_level` narrows it once
/// the configured level is known.
fn init_logger(path: &Path) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(path) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    log::set_max_level(DEFAULT_LOG_LEVEL);
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to globetrotter.log in current directory
    init_logger(Path::new("globetrotter.log"));

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            eprintln!("Warning: {e}, using defaults");
            GlobetrotterConfig::default()
        }
    };

    let cli = CliOverrides {
        source: args.source.map(|s| s.as_str().to_string()),
        file: args.file,
        continents: args.continents,
        hide_sovereign: args.hide_sovereign,
        hide_dependent: args.hide_dependent,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::set_max_level(resolved.log_level);

    log::info!("Globetrotter starting up with source: {}", resolved.source);

    globetrotter::tui::run(resolved)
}
