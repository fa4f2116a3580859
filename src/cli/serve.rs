//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("{}", startup_banner(&config));

    server::run(config).await
}

fn startup_banner(config: &Config) -> String {
    format!(
        "peak-finder v{} on {} querying {} (radii in {}, on failure: {})",
        env!("CARGO_PKG_VERSION"),
        config.server_addr(),
        config.search.endpoint,
        config.search.unit,
        config.search.failure_policy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peaks::FailurePolicy;

    #[test]
    fn test_startup_banner_names_overpass_endpoint() {
        let mut config = Config::default();
        config.search.endpoint = "http://overpass.local/api/interpreter".to_string();
        config.search.failure_policy = FailurePolicy::Abort;

        let banner = startup_banner(&config);

        assert!(banner.contains(&config.server_addr()));
        assert!(banner.contains("querying http://overpass.local/api/interpreter"));
        assert!(banner.contains("radii in miles"));
        assert!(banner.contains("on failure: abort"));
    }
}
