use anyhow::Result;
use clap::{ArgAction, Parser};
use meleetags_core::{AddressingMode, TrackerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meleetags")]
#[command(about = "Writes Melee nametags from Dolphin to player1.txt .. player4.txt")]
struct Args {
    /// Read from 64-bit Dolphin (pass `--x64 false` for 32-bit builds)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    x64: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("meleetags=info".parse()?)
                .add_directive("meleetags_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = TrackerConfig::builder()
        .mode(AddressingMode::from_x64(args.x64))
        .build();

    info!(
        "Running meleetags with {} Dolphin compatibility",
        config.mode
    );

    let mut tracker = meleetags_core::attach(&config)?;
    tracker.run(config.poll_rate_hz)?;

    Ok(())
}
