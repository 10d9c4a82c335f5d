use anyhow::Context;
use clap::Parser;
use socket_monitor::{
    ConnectionState, ConsoleSurface, DEFAULT_ENDPOINT, MonitorBuilder, MonitorConfig,
};

/// Watch a WebSocket endpoint and print every JSON message it sends.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Endpoint to watch
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    url: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = MonitorConfig::new(&args.url).context("invalid --url")?;

    let engine = MonitorBuilder::new()
        .with_config(config)
        .with_surface(ConsoleSurface::stdout())
        .start()?;

    let report = engine.join()?;
    log::info!(
        "Monitor finished: state={}, decode errors={}",
        report.state,
        report.decode_errors
    );

    if report.state == ConnectionState::Errored {
        anyhow::bail!("connection failed: {}", report.document.text());
    }
    Ok(())
}
