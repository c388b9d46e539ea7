//! Command-line arguments of the `mosaic-transmission` binary.

use std::convert::Infallible;

use clap::{Args, Parser, Subcommand};

use mosaic_transmission_rpc::ClientConfig;
use mosaic_transmission_types::{RpcError, TorrentRef, TorrentStatus};

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(name = "mosaic-transmission", version, about, long_about = None)]
pub struct Cli {
    /// Where the daemon lives and how to log in.
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection flags. Anything left unset comes from the `TRANSMISSION_*` environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Full RPC URL, e.g. `http://localhost:9091/transmission/rpc`. Replaces the environment.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Daemon host.
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Daemon RPC port.
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Basic-Auth user name.
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Basic-Auth password.
    #[arg(long, global = true)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    /// Resolves the client configuration, with flags overriding the environment.
    pub fn client_config(&self) -> Result<ClientConfig, RpcError> {
        let mut config = match &self.url {
            Some(url) => ClientConfig::from_url(url)?,
            None => ClientConfig::from_env()?,
        };
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        Ok(config)
    }
}

/// Subcommands. Torrents are given by numeric id or hash string.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List torrents, all of them when no ids are given.
    List {
        /// Torrent ids or hashes.
        #[arg(value_parser = parse_torrent_ref)]
        ids: Vec<TorrentRef>,
    },
    /// List recently active torrents and recently removed ids.
    Active,
    /// Add a torrent from a local .torrent file, a URL or a magnet link.
    Add {
        /// Path, URL or magnet link.
        source: String,
        /// Directory to download into.
        #[arg(long)]
        download_dir: Option<String>,
        /// Add without starting.
        #[arg(long)]
        paused: bool,
    },
    /// Start torrents, all of them when no ids are given.
    Start {
        /// Torrent ids or hashes.
        #[arg(value_parser = parse_torrent_ref)]
        ids: Vec<TorrentRef>,
    },
    /// Stop torrents, all of them when no ids are given.
    Stop {
        /// Torrent ids or hashes.
        #[arg(value_parser = parse_torrent_ref)]
        ids: Vec<TorrentRef>,
    },
    /// Remove torrents.
    Remove {
        /// Torrent ids or hashes.
        #[arg(value_parser = parse_torrent_ref, required = true)]
        ids: Vec<TorrentRef>,
        /// Also delete the downloaded data.
        #[arg(long)]
        delete_local_data: bool,
    },
    /// Show the session settings.
    Session,
    /// Show session statistics.
    Stats,
    /// Show the free space in a directory on the daemon's host.
    FreeSpace {
        /// Directory to check.
        path: String,
    },
    /// Wait until a torrent reaches a state, e.g. `seed` or `download`.
    Wait {
        /// Torrent id or hash.
        #[arg(value_parser = parse_torrent_ref)]
        id: TorrentRef,
        /// Target state.
        state: TorrentStatus,
        /// Milliseconds between two lookups.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Give up after this many seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

/// Numeric arguments are ids, everything else is a hash string.
fn parse_torrent_ref(raw: &str) -> Result<TorrentRef, Infallible> {
    Ok(raw
        .parse::<i64>()
        .map(TorrentRef::Id)
        .unwrap_or_else(|_| TorrentRef::Hash(raw.to_owned())))
}
