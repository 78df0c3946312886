//! HTTP(S) loader — a single `GET` over a fresh HTTP/1.1 connection.
//!
//! The connection is driven by a background task owned by a
//! [`ConnectionGuard`]. Dropping the guard aborts the task and closes the
//! socket, so the connection is released on every way out of [`fetch`]:
//! success, error status, transport error, or the timeout cancelling the
//! in-flight future.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::client::conn::http1;
use hyper::{header, Request, Uri};
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_rustls::TlsConnector;

use crate::RetrievalError;

const USER_AGENT: &str = concat!("yamlconv/", env!("CARGO_PKG_VERSION"));

/// Fetch the body at `location`. The whole exchange, including connect and
/// TLS handshake, must finish within `timeout`.
pub async fn fetch(location: &str, timeout: Duration) -> Result<Bytes, RetrievalError> {
    let target = Target::parse(location)?;
    match tokio::time::timeout(timeout, get(location, &target)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(location, ?timeout, "fetch timed out");
            Err(RetrievalError::Timeout {
                location: location.to_string(),
                after: timeout,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// The pieces of a URL needed to open a connection and send the request.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    tls: bool,
    /// Host as written in the URL (IPv6 literals keep their brackets).
    host: String,
    port: u16,
    /// Value for the `Host` header.
    authority: String,
    path: String,
}

impl Target {
    fn parse(location: &str) -> Result<Self, RetrievalError> {
        let invalid = |reason: &str| RetrievalError::InvalidUrl {
            location: location.to_string(),
            reason: reason.to_string(),
        };

        let uri: Uri = location.parse().map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;
        let tls = match uri.scheme_str() {
            Some(s) if s.eq_ignore_ascii_case("https") => true,
            Some(s) if s.eq_ignore_ascii_case("http") => false,
            _ => return Err(invalid("expected an http or https URL")),
        };
        let host = match uri.host() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(invalid("missing host")),
        };
        let port = uri.port_u16().unwrap_or(if tls { 443 } else { 80 });
        let authority = match uri.port_u16() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|pq| !pq.is_empty())
            .unwrap_or("/")
            .to_string();

        Ok(Self {
            tls,
            host,
            port,
            authority,
            path,
        })
    }

    /// Host suitable for socket connect and TLS server name (no brackets).
    fn bare_host(&self) -> &str {
        self.host.trim_start_matches('[').trim_end_matches(']')
    }
}

// ---------------------------------------------------------------------------
// Exchange
// ---------------------------------------------------------------------------

async fn get(location: &str, target: &Target) -> Result<Bytes, RetrievalError> {
    let tcp = TcpStream::connect((target.bare_host(), target.port))
        .await
        .map_err(|source| RetrievalError::Connect {
            location: location.to_string(),
            source,
        })?;
    tracing::debug!(location, port = target.port, tls = target.tls, "connected");

    if target.tls {
        let stream = tls_connect(location, target, tcp).await?;
        exchange(location, target, stream).await
    } else {
        exchange(location, target, tcp).await
    }
}

async fn exchange<S>(location: &str, target: &Target, stream: S) -> Result<Bytes, RetrievalError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let request_error = |source| RetrievalError::Request {
        location: location.to_string(),
        source,
    };

    let (mut sender, conn) = http1::handshake::<_, Empty<Bytes>>(TokioIo::new(stream))
        .await
        .map_err(request_error)?;
    let _guard = ConnectionGuard(tokio::spawn(async move {
        if let Err(err) = conn.await {
            tracing::debug!(error = %err, "connection closed with error");
        }
    }));

    let request = Request::get(target.path.as_str())
        .header(header::HOST, target.authority.as_str())
        .header(header::USER_AGENT, USER_AGENT)
        .body(Empty::new())
        .map_err(|e| RetrievalError::InvalidUrl {
            location: location.to_string(),
            reason: e.to_string(),
        })?;

    let response = sender.send_request(request).await.map_err(request_error)?;
    let status = response.status();
    tracing::debug!(location, %status, "response received");
    if !status.is_success() {
        return Err(RetrievalError::Status {
            location: location.to_string(),
            status,
        });
    }

    let body = response
        .into_body()
        .collect()
        .await
        .map_err(request_error)?
        .to_bytes();
    Ok(body)
}

/// Owns the task driving a client connection; aborts it on drop.
struct ConnectionGuard(JoinHandle<()>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

// ---------------------------------------------------------------------------
// TLS
// ---------------------------------------------------------------------------

async fn tls_connect(
    location: &str,
    target: &Target,
    tcp: TcpStream,
) -> Result<tokio_rustls::client::TlsStream<TcpStream>, RetrievalError> {
    let tls_error = |source| RetrievalError::Tls {
        location: location.to_string(),
        source,
    };

    let config = client_config().map_err(|e| tls_error(std::io::Error::other(e)))?;
    let server_name = ServerName::try_from(target.bare_host().to_string()).map_err(|e| {
        RetrievalError::InvalidUrl {
            location: location.to_string(),
            reason: format!("invalid server name: {e}"),
        }
    })?;

    TlsConnector::from(config)
        .connect(server_name, tcp)
        .await
        .map_err(tls_error)
}

fn client_config() -> Result<Arc<rustls::ClientConfig>, rustls::Error> {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_root_certificates(roots)
    .with_no_client_auth();
    Ok(Arc::new(config))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
