use std::time::Duration;

use clap::Parser;
use transmission_rpc_client::{ClientConfig, DEFAULT_ADDRESS, TorrentFields};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Transmission address, e.g. `localhost:9091` or `https://host/transmission/rpc`.
    #[arg(long, env = "TRANSMISSION_ADDRESS", default_value = DEFAULT_ADDRESS)]
    pub address: String,

    /// Transmission username.
    #[arg(long, env = "TRANSMISSION_USERNAME", default_value = "")]
    pub username: String,

    /// Transmission password.
    #[arg(long, env = "TRANSMISSION_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// List all torrents.
    #[arg(long)]
    pub list: bool,

    /// Start the torrent with this id.
    #[arg(long, value_name = "ID")]
    pub start: Option<i64>,

    /// Start the torrent with this id now, bypassing the queue.
    #[arg(long = "startnow", value_name = "ID")]
    pub start_now: Option<i64>,

    /// Stop the torrent with this id.
    #[arg(long, value_name = "ID")]
    pub stop: Option<i64>,

    /// Remove the torrent with this id.
    #[arg(long, value_name = "ID")]
    pub remove: Option<i64>,

    /// Verify the local data of the torrent with this id.
    #[arg(long, value_name = "ID")]
    pub verify: Option<i64>,

    /// Reannounce the torrent with this id to its trackers.
    #[arg(long, value_name = "ID")]
    pub reannounce: Option<i64>,

    /// Delete the downloaded data too when removing.
    #[arg(long, default_value_t = false)]
    pub delete_local_data: bool,

    /// Also request this normally omitted field when listing (repeatable).
    #[arg(long = "include-field", value_name = "FIELD")]
    pub include_fields: Vec<String>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// The single operation an invocation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print every torrent.
    List,
    /// Start a torrent.
    Start(i64),
    /// Start a torrent now.
    StartNow(i64),
    /// Stop a torrent.
    Stop(i64),
    /// Remove a torrent, optionally with its data.
    Remove {
        /// Torrent id.
        id: i64,
        /// Whether the downloaded data is deleted too.
        delete_local_data: bool,
    },
    /// Verify a torrent.
    Verify(i64),
    /// Reannounce a torrent.
    Reannounce(i64),
}

impl Cli {
    /// The action to take, checked in a fixed priority order. `None` when no action flag is set.
    pub fn action(&self) -> Option<Action> {
        if self.list {
            return Some(Action::List);
        }
        self.start
            .map(Action::Start)
            .or_else(|| self.start_now.map(Action::StartNow))
            .or_else(|| self.stop.map(Action::Stop))
            .or_else(|| {
                self.remove.map(|id| Action::Remove {
                    id,
                    delete_local_data: self.delete_local_data,
                })
            })
            .or_else(|| self.verify.map(Action::Verify))
            .or_else(|| self.reannounce.map(Action::Reannounce))
    }

    /// Client configuration built from the connection flags.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.address.as_str())
            .with_credentials(&self.username, &self.password)
            .with_fields(TorrentFields::default().include_all(self.include_fields.iter().cloned()));
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("transmission-cli").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_action_flag() {
        assert_eq!(parse(&[]).action(), None);
    }

    #[test]
    fn list_wins_over_everything() {
        let cli = parse(&["--list", "--start=1", "--stop=2", "--remove=3"]);
        assert_eq!(cli.action(), Some(Action::List));
    }

    #[test]
    fn priority_order() {
        assert_eq!(
            parse(&["--stop=2", "--start=1"]).action(),
            Some(Action::Start(1))
        );
        assert_eq!(
            parse(&["--remove=3", "--startnow=4"]).action(),
            Some(Action::StartNow(4))
        );
        assert_eq!(
            parse(&["--remove=3", "--stop", "5"]).action(),
            Some(Action::Stop(5))
        );
        assert_eq!(
            parse(&["--verify=6", "--remove=3"]).action(),
            Some(Action::Remove {
                id: 3,
                delete_local_data: false
            })
        );
        assert_eq!(
            parse(&["--reannounce=7", "--verify=6"]).action(),
            Some(Action::Verify(6))
        );
        assert_eq!(
            parse(&["--reannounce=7"]).action(),
            Some(Action::Reannounce(7))
        );
    }

    #[test]
    fn remove_with_data() {
        assert_eq!(
            parse(&["--remove=3", "--delete-local-data"]).action(),
            Some(Action::Remove {
                id: 3,
                delete_local_data: true
            })
        );
    }

    #[test]
    fn connection_flags_build_config() {
        let cli = parse(&[
            "--address=seedbox:9091",
            "--username=admin",
            "--password=secret",
            "--include-field=peers",
            "--include-field=trackers",
            "--timeout=5",
        ]);
        let config = cli.client_config();

        assert_eq!(config.address, "seedbox:9091");
        assert_eq!(
            config.credentials.as_ref().map(|c| c.username.as_str()),
            Some("admin")
        );
        assert!(config.fields.contains("peers"));
        assert!(config.fields.contains("trackers"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
