//! Waiting for a torrent to reach a lifecycle state.
//!
//! The poller re-reads the torrent until its status matches, the torrent disappears, or a
//! lookup fails. Lookup failures are not retried. Without a timeout it polls indefinitely;
//! dropping the future cancels both the pending request and the sleep between polls.

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::debug;

use mosaic_transmission_types::{RpcError, Torrent, TorrentRef, TorrentStatus};

use crate::{client::TransmissionClient, transport::Transport};

/// Delay between two status lookups unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How to wait for a torrent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between two status lookups.
    pub interval: Duration,
    /// Upper bound on the whole wait. `None` waits for as long as it takes.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Outcome of a single lookup that did not fail.
#[derive(Debug)]
enum PollState {
    Polling(TorrentStatus),
    Found(Torrent),
}

impl<T: Transport> TransmissionClient<T> {
    /// Blocks until the torrent reaches `target` and returns its latest snapshot.
    ///
    /// Polls once per second, indefinitely, until the state matches, the torrent is not found
    /// ([`RpcError::NotFound`]), or a lookup fails. Use [`Self::wait_for_state_with`] to bound
    /// the wait.
    pub async fn wait_for_state(
        &self,
        id: impl Into<TorrentRef>,
        target: TorrentStatus,
    ) -> Result<Torrent, RpcError> {
        self.wait_for_state_with(id, target, PollOptions::default())
            .await
    }

    /// Like [`Self::wait_for_state`], with an explicit interval and optional timeout.
    pub async fn wait_for_state_with(
        &self,
        id: impl Into<TorrentRef>,
        target: TorrentStatus,
        options: PollOptions,
    ) -> Result<Torrent, RpcError> {
        let id = id.into();
        debug!("Waiting for torrent {id} to reach {target}");
        let poll = self.poll_until(&id, target, options.interval);
        match options.timeout {
            Some(limit) => timeout(limit, poll)
                .await
                .map_err(|_| RpcError::Timeout(limit))?,
            None => poll.await,
        }
    }

    async fn poll_until(
        &self,
        id: &TorrentRef,
        target: TorrentStatus,
        interval: Duration,
    ) -> Result<Torrent, RpcError> {
        loop {
            match self.poll_once(id, target).await? {
                PollState::Found(torrent) => {
                    debug!("Torrent {id} reached {target}");
                    return Ok(torrent);
                }
                PollState::Polling(current) => {
                    debug!("Torrent {id} is {current}, waiting for {target}");
                    sleep(interval).await;
                }
            }
        }
    }

    async fn poll_once(
        &self,
        id: &TorrentRef,
        target: TorrentStatus,
    ) -> Result<PollState, RpcError> {
        let torrent = self
            .get(Some(id.into()), &[])
            .await?
            .torrents
            .into_iter()
            .find(|torrent| id.matches(torrent.id, torrent.hash_string.as_deref()))
            .ok_or_else(|| RpcError::NotFound(id.clone()))?;

        let current = torrent.lifecycle_state()?.ok_or_else(|| {
            RpcError::Protocol(format!("torrent {id} was returned without a status"))
        })?;

        if current == target {
            Ok(PollState::Found(torrent))
        } else {
            Ok(PollState::Polling(current))
        }
    }
}
