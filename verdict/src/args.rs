use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Verdict error reporting server
#[derive(Debug, Parser)]
#[command(name = "verdict", about = "Serve JSON:API error documents for HTTP error responses")]
pub struct Args {
    /// Path to configuration file (defaults to `verdict.toml` when present)
    #[arg(short, long, env = "VERDICT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "VERDICT_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info", env = "VERDICT_LOG")]
    pub log: String,
}
