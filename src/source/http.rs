//! HTTP data source.
//!
//! Fetches farm report documents from the backend with a single GET per
//! request trigger, run on a background tokio task so the render loop never
//! blocks on the network.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio::sync::mpsc;

use super::{DataSource, Document};

/// A data source that fetches documents over HTTP.
///
/// `spawn` starts a background task owning the HTTP client. One trigger on
/// the request channel produces exactly one GET; a trigger is queued at
/// spawn time so the initial fetch happens without further action. There is
/// no retry, no timeout and no cancellation: a failed fetch only records a
/// diagnostic, and a response that arrives after the consumer stopped
/// polling is dropped by the channel.
///
/// Must be created from within a tokio runtime.
///
/// # Example
///
/// ```no_run
/// use farmwatch::HttpSource;
///
/// # tokio_test::block_on(async {
/// let source = HttpSource::spawn("http://127.0.0.1:8000/farm-data/history?days=7");
/// # });
/// ```
#[derive(Debug)]
pub struct HttpSource {
    receiver: mpsc::Receiver<Document>,
    trigger: mpsc::Sender<()>,
    description: String,
    shared_error: Arc<Mutex<Option<String>>>,
    cached_error: Option<String>,
}

impl HttpSource {
    /// Spawn the fetch task for the given URL and queue the initial request.
    pub fn spawn(url: &str) -> Self {
        let (doc_tx, doc_rx) = mpsc::channel(4);
        let (trigger, mut trigger_rx) = mpsc::channel::<()>(4);
        let shared_error = Arc::new(Mutex::new(None));
        let errors = shared_error.clone();
        let endpoint = url.to_string();

        tokio::spawn(async move {
            // Client with defaults: no timeout, mirroring a bare fetch
            let client = reqwest::Client::new();

            while trigger_rx.recv().await.is_some() {
                match fetch_document(&client, &endpoint).await {
                    Ok(document) => {
                        *errors.lock().unwrap() = None;
                        if doc_tx.send(document).await.is_err() {
                            // Receiver dropped
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(url = %endpoint, error = %e, "failed to fetch farm report");
                        *errors.lock().unwrap() = Some(e.to_string());
                    }
                }
            }
        });

        let source = Self {
            receiver: doc_rx,
            trigger,
            description: format!("http: {}", url),
            shared_error,
            cached_error: None,
        };

        // Initial fetch
        let _ = source.trigger.try_send(());
        source
    }
}

/// One GET: transport failures and non-JSON bodies both surface as errors.
async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<Document> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    Ok(response.json().await?)
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<Document> {
        // Snapshot the fetch task's error cell so error() can hand out a
        // plain borrow.
        self.cached_error = self.shared_error.lock().unwrap().clone();

        match self.receiver.try_recv() {
            Ok(document) => Some(document),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.cached_error
                    .get_or_insert_with(|| "fetch task stopped".to_string());
                None
            }
        }
    }

    fn request(&mut self) {
        // If the trigger queue is full a fetch is already pending.
        let _ = self.trigger.try_send(());
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.cached_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_http_source_description() {
        let source = HttpSource::spawn("http://127.0.0.1:8000/farm-data");
        assert_eq!(source.description(), "http: http://127.0.0.1:8000/farm-data");
    }

    #[tokio::test]
    async fn test_http_source_fetches_document() {
        // Minimal one-shot HTTP server on an ephemeral port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = r#"{"history":[]}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        let mut source = HttpSource::spawn(&format!("http://{}/farm-data/history?days=7", addr));

        let mut document = None;
        for _ in 0..100 {
            if let Some(d) = source.poll() {
                document = Some(d);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let document = document.expect("document fetched");
        assert!(document["history"].as_array().unwrap().is_empty());
        assert!(source.error().is_none());
    }

    #[tokio::test]
    async fn test_http_source_connection_error_is_reported() {
        // Port 9 (discard) is closed on any sane test host
        let mut source = HttpSource::spawn("http://127.0.0.1:9/farm-data");

        let mut saw_error = false;
        for _ in 0..100 {
            assert!(source.poll().is_none());
            if source.error().is_some() {
                saw_error = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert!(saw_error, "connection failure should be recorded");
    }
}
