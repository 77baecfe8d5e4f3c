use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use demo_api::config::Config;
use demo_api::server;

#[derive(Debug, Parser)]
#[command(name = "demo-api", version, about = "A simple demo API")]
struct Cli {
    /// Path to the YAML config file. A missing file falls back to defaults.
    #[arg(short, long, default_value = "demo-api.yaml")]
    config: PathBuf,

    /// Address to listen on (overrides the config file)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);

    server::serve(config).await.context("HTTP server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::try_parse_from(["demo-api"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("demo-api.yaml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from(["demo-api", "--host", "127.0.0.1", "-p", "9090"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["demo-api", "--port", "99999"]).is_err());
    }
}
