//! `RemoteLookup` over HTTP.
//!
//! Requests run on a tokio runtime; responses come back over a channel so
//! the thread that owns the widget can hand them to
//! [`InputController::deliver`] on its own schedule (see [`drain`]).

use anyhow::{anyhow, bail, Result};
use autosuggest_core::{FetchTicket, Host, InputController, RemoteLookup};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A response waiting to be delivered to the widget that asked for it.
#[derive(Debug)]
pub struct Delivery {
    pub ticket: FetchTicket,
    pub payload: Value,
}

pub struct HttpLookup {
    client: reqwest::Client,
    endpoint: String,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Delivery>,
    in_flight: Option<JoinHandle<()>>,
}

impl HttpLookup {
    /// Lookup against `endpoint` (e.g. `http://127.0.0.1:3000/suggestions`)
    /// using the current tokio runtime.
    pub fn new(endpoint: impl Into<String>) -> Result<(Self, mpsc::UnboundedReceiver<Delivery>)> {
        let runtime = Handle::try_current()
            .map_err(|e| anyhow!("HttpLookup needs a tokio runtime: {}", e))?;
        Ok(Self::with_runtime(endpoint, runtime))
    }

    pub fn with_runtime(
        endpoint: impl Into<String>,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let lookup = Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            runtime,
            tx,
            in_flight: None,
        };
        (lookup, rx)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RemoteLookup for HttpLookup {
    fn request(&mut self, query: &str, ticket: FetchTicket) {
        self.cancel();

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let tx = self.tx.clone();
        let query = query.to_string();
        self.in_flight = Some(self.runtime.spawn(async move {
            match fetch(&client, &endpoint, &query).await {
                Ok(payload) => {
                    // receiver gone means the widget is gone
                    let _ = tx.send(Delivery { ticket, payload });
                }
                Err(e) => tracing::warn!("suggestion fetch for {:?} failed: {}", query, e),
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl Drop for HttpLookup {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn fetch(client: &reqwest::Client, endpoint: &str, query: &str) -> Result<Value> {
    let resp = client.get(endpoint).query(&[("query", query)]).send().await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("suggestion endpoint returned {}", status);
    }
    Ok(resp.json().await?)
}

/// Hand every delivery received so far to `widget`. Returns how many there
/// were.
pub fn drain<H: Host>(rx: &mut mpsc::UnboundedReceiver<Delivery>, widget: &mut InputController<H>) -> usize {
    let mut delivered = 0;
    while let Ok(Delivery { ticket, payload }) = rx.try_recv() {
        widget.deliver(ticket, &payload);
        delivered += 1;
    }
    delivered
}
