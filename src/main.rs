use clap::Parser;
use oss_atlas::app::{AtlasApp, StartOptions};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "catalog.json")]
    data: String,

    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    select: Option<String>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let _logger = match flexi_logger::Logger::try_with_env_or_str(&args.log_level)
        .and_then(|logger| logger.start())
    {
        Ok(handle) => Some(handle),
        Err(error) => {
            eprintln!("failed to initialize logging: {error}");
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let start = StartOptions {
        data_path: args.data,
        config_path: args.config,
        select: args.select,
    };

    eframe::run_native(
        "oss-atlas",
        options,
        Box::new(move |cc| Ok(Box::new(AtlasApp::new(cc, start)))),
    )
}
