use clap::Parser;
use hookchat::core::config::{self, CliOverrides};
use hookchat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hookchat", about = "Terminal chat widget backed by a webhook")]
struct Args {
    /// Webhook endpoint that receives `{"message": ...}` posts
    #[arg(short = 'u', long)]
    webhook_url: Option<String>,

    /// Config file to read instead of ~/.hookchat/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, default_value = "hookchat.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger; the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path, false),
        None => config::load_config(),
    };

    let resolved = match file_config.and_then(|c| {
        config::resolve(
            &c,
            &CliOverrides {
                webhook_url: args.webhook_url.clone(),
            },
        )
    }) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("hookchat: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Hookchat starting up against {}", resolved.webhook_url);

    tui::run(resolved)
}
