use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use uploader_engine::{ClientSettings, DEFAULT_DAEMON_URL, DEFAULT_PROFILE};

/// Batch-publish claims listed in a CSV or JSON file to a local LBRY daemon.
#[derive(Debug, Parser)]
#[command(name = "lbry-upload", version)]
pub struct Cli {
    /// File containing claims information (.csv or .json).
    #[arg(long)]
    pub input: PathBuf,

    /// Configuration profile providing default field values.
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub config: String,

    /// Directory holding `<profile>.toml` files.
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Ledger of already published claims.
    #[arg(long, default_value = "db.json", env = "LBRY_UPLOAD_LEDGER")]
    pub ledger: PathBuf,

    #[arg(long, default_value = DEFAULT_DAEMON_URL, env = "LBRY_DAEMON_URL")]
    pub daemon_url: String,

    /// Give up on a daemon call after this many seconds. Waits indefinitely when unset.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, default_value = "log")]
    pub log_dir: PathBuf,

    /// Log to the run's log file only.
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.daemon_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ClientSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn defaults_match_conventional_layout() {
        let cli = Cli::try_parse_from(["lbry-upload", "--input", "claims.csv"]).unwrap();
        assert_eq!(cli.config, "default");
        assert_eq!(cli.config_dir, std::path::Path::new("config"));
        assert_eq!(cli.log_dir, std::path::Path::new("log"));
        assert!(!cli.quiet);
        assert_eq!(cli.client_settings().request_timeout, None);
    }

    #[test]
    fn timeout_flag_sets_request_timeout() {
        let cli = Cli::try_parse_from([
            "lbry-upload",
            "--input",
            "claims.json",
            "--config",
            "music",
            "--request-timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.config, "music");
        assert_eq!(
            cli.client_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["lbry-upload"]).is_err());
    }
}
