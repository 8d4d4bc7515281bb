//! The stream-source seam between this crate and the daemon transport.
//!
//! The real network client lives elsewhere; this crate consumes it only
//! through [`EventSource`]. Any implementation that can hand back a
//! readable byte stream of newline-delimited JSON records satisfies the
//! contract, including the synthetic sources used in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncRead;

#[cfg(test)]
use mockall::automock;

use crate::Result;

/// The readable byte stream one subscription yields. Dropping the handle
/// closes the underlying stream.
pub type EventStream = Box<dyn AsyncRead + Send + Unpin>;

/// Capability to open one event subscription against the daemon.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EventSource: Send + Sync + 'static {
    /// Open the stream. Fallible: the daemon may be unreachable or may
    /// reject the subscription.
    async fn events(
        &self,
        options: &EventsOptions,
    ) -> Result<EventStream>;
}

/// Subscription options forwarded to the stream source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsOptions {
    /// Only events recorded after this timestamp
    #[serde(default)]
    pub since: Option<String>,

    /// Only events recorded before this timestamp
    #[serde(default)]
    pub until: Option<String>,

    /// Server-side filters, e.g. "type" -> ["container", "network"]
    #[serde(default)]
    pub filters: HashMap<String, Vec<String>>,
}
