use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use weather_core::Config;

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "City weather facade over OpenWeather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP facade.
    Serve(ServeArgs),

    /// Store the OpenWeather API key in the config file.
    Configure {
        /// Config file to write instead of the platform default.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Config file to read instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// OpenWeather API key; overrides the one in the config file.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl ServeArgs {
    /// Merge command-line overrides over the file configuration.
    pub fn resolve(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }
        config
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Serve(args) => {
                let config = load_config(args.config.as_ref())?;
                let config = args.resolve(config);
                server::serve(&config).await
            }
            Command::Configure { config } => configure(config),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn configure(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_file_path()?,
    };

    let mut config = if path.exists() { Config::load_from(&path)? } else { Config::default() };

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key);
    config.save_to(&path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Serve(args) => args,
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn overrides_replace_file_values() {
        let args = serve_args(&[
            "weather-server",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--api-key",
            "CLI_KEY",
        ]);

        let mut file = Config::default();
        file.set_api_key("FILE_KEY".into());

        let cfg = args.resolve(file);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.api_key(), Some("CLI_KEY"));
    }

    #[test]
    fn absent_overrides_keep_file_values() {
        let args = ServeArgs { config: None, host: None, port: None, api_key: None };

        let mut file = Config::default();
        file.set_api_key("FILE_KEY".into());
        file.server.port = 8181;

        let cfg = args.resolve(file);
        assert_eq!(cfg.server.port, 8181);
        assert_eq!(cfg.api_key(), Some("FILE_KEY"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["weather-server", "serve", "--port", "http"]).is_err());
    }
}
