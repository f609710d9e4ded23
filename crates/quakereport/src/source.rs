//! Earthquake sources.
//!
//! A source performs one fetch and hands back the parsed list. There is no
//! retry and no cache: a failed fetch is reported to the caller as-is.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

use crate::earthquake::Earthquake;
use crate::error::{Error, Result};
use crate::feed::parse_feed_with_summary;

/// Default user agent sent to the event service.
pub const DEFAULT_USER_AGENT: &str = concat!("quakereport/", env!("CARGO_PKG_VERSION"));

/// Something that can produce a list of earthquakes.
#[async_trait]
pub trait QuakeSource: Send + Sync {
    /// The name of this source (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Fetch and parse the current list.
    ///
    /// # Errors
    ///
    /// Returns an error if the data can't be retrieved or isn't a feed.
    async fn fetch(&self) -> Result<Vec<Earthquake>>;
}

/// Client for the USGS event service.
#[derive(Debug, Clone)]
pub struct UsgsClient {
    http_client: reqwest::Client,
    url: Url,
}

impl UsgsClient {
    /// Create a client that fetches `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can't be built.
    pub fn new(url: Url, timeout: Duration, user_agent: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Network {
                url: url.to_string(),
                source,
            })?;

        Ok(Self { http_client, url })
    }

    /// Create a client around an already configured HTTP client.
    #[must_use]
    pub fn with_client(url: Url, http_client: reqwest::Client) -> Self {
        Self { http_client, url }
    }

    /// The URL this client requests.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuakeSource for UsgsClient {
    fn name(&self) -> &'static str {
        "usgs"
    }

    async fn fetch(&self) -> Result<Vec<Earthquake>> {
        debug!(url = %self.url, "Requesting earthquake feed");

        let network_error = |source| Error::Network {
            url: self.url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(network_error)?;
        debug!(bytes = body.len(), "Received feed body");

        parse_body(&body)
    }
}

/// A feed document saved on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuakeSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<Vec<Earthquake>> {
        debug!(path = %self.path.display(), "Reading earthquake feed");
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::FeedFile {
                path: self.path.clone(),
                source,
            })?;

        parse_body(&body)
    }
}

fn parse_body(body: &str) -> Result<Vec<Earthquake>> {
    let (quakes, summary) = parse_feed_with_summary(body)?;
    info!(
        parsed = summary.parsed(),
        skipped = summary.skipped,
        "Parsed earthquake feed"
    );
    Ok(quakes)
}

/// Run a single fetch against `source`.
///
/// An empty list is a successful load.
///
/// # Errors
///
/// Returns whatever error the source reports.
pub async fn load(source: &dyn QuakeSource) -> Result<Vec<Earthquake>> {
    let started = Instant::now();
    info!(source = source.name(), "Loading earthquakes");

    let quakes = source.fetch().await?;

    info!(
        source = source.name(),
        count = quakes.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Loaded earthquakes"
    );
    Ok(quakes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const ONE_QUAKE: &str = r#"{"type":"FeatureCollection","features":[
        {"id":"ci1","properties":{"mag":5.5,"place":"10 km SW of Ridgecrest, CA",
         "time":1562383193040,"url":"https://earthquake.usgs.gov/earthquakes/eventpage/ci1"}}
    ]}"#;

    /// Serve exactly one HTTP response on a local port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        Url::parse(&format!("http://{addr}/fdsnws/event/1/query?format=geojson")).unwrap()
    }

    fn client(url: Url) -> UsgsClient {
        let http_client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        UsgsClient::with_client(url, http_client)
    }

    #[tokio::test]
    async fn test_usgs_client_fetch() {
        let url = serve_once("200 OK", ONE_QUAKE).await;
        let quakes = client(url).fetch().await.unwrap();

        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].place, "10 km SW of Ridgecrest, CA");
    }

    #[tokio::test]
    async fn test_usgs_client_http_error() {
        let url = serve_once("503 Service Unavailable", "busy").await;
        let err = client(url).fetch().await.unwrap_err();

        assert!(matches!(err, Error::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_usgs_client_bad_body() {
        let url = serve_once("200 OK", "<html></html>").await;
        let err = client(url).fetch().await.unwrap_err();

        assert!(matches!(err, Error::Feed { .. }));
    }

    #[tokio::test]
    async fn test_usgs_client_connection_refused() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/query")).unwrap();
        let err = client(url).fetch().await.unwrap_err();
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_file_source_fetch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONE_QUAKE.as_bytes()).unwrap();

        let source = FileSource::new(file.path());
        let quakes = load(&source).await.unwrap();
        assert_eq!(quakes.len(), 1);
        assert_eq!(quakes[0].id.as_deref(), Some("ci1"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/feed.geojson");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, Error::FeedFile { .. }));
    }

    #[tokio::test]
    async fn test_load_empty_feed_is_ok() {
        let url = serve_once("200 OK", r#"{"features":[]}"#).await;
        let quakes = load(&client(url)).await.unwrap();
        assert!(quakes.is_empty());
    }

    #[test]
    fn test_usgs_client_new() {
        let url = Url::parse("https://earthquake.usgs.gov/fdsnws/event/1/query").unwrap();
        let client = UsgsClient::new(url.clone(), Duration::from_secs(30), DEFAULT_USER_AGENT);
        assert_eq!(client.unwrap().url(), &url);
    }

    #[test]
    fn test_source_names() {
        let url = Url::parse("http://localhost/").unwrap();
        assert_eq!(client(url).name(), "usgs");
        assert_eq!(FileSource::new("x").name(), "file");
    }
}
