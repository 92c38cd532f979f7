use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod preview;
mod routes;
mod state;

use state::ServerState;

#[derive(Parser, Debug)]
#[command(
    name = "footprint-server",
    version,
    about = "Upload/download gateway for the packaging footprint tool"
)]
struct CliArgs {
    /// Directory for uploaded files and generated output.
    #[clap(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5007)]
    pub port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let state = ServerState::new(cli_args.data_dir)?;
    info!("Listening on port {}", cli_args.port);
    routes::run_server(state, cli_args.port).await
}
