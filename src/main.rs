use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use wayfinder::core::config::{self, CliOverrides};
use wayfinder::tui;

#[derive(Parser)]
#[command(name = "wayfinder", about = "Interactive explorer for the navigation router")]
struct Args {
    /// Run every transition without animation
    #[arg(long)]
    instant: bool,

    /// Duration of an animated transition, in milliseconds
    #[arg(long)]
    transition_ms: Option<u64>,

    /// Log level for wayfinder.log (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            config::WayfinderConfig::default()
        }
    };
    let cli = CliOverrides {
        instant: args.instant,
        transition_ms: args.transition_ms,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &cli);

    // Initialize file logger - writes to wayfinder.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("wayfinder.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Wayfinder starting (animated: {}, transition: {:?})",
        resolved.animated,
        resolved.transition
    );

    tui::run(resolved)
}
