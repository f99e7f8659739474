//! TCP listener and per-connection request loop.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use colorize::{debug_render, Colorizer, Language};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, trace, warn, Instrument};

use crate::config::Config;
use crate::framer::{FrameError, Framer};
use crate::protocol::{decode_request, encode_error, encode_reply};

const READ_CHUNK: usize = 64 * 1024;

/// Limits applied to every connection.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Largest message, in bytes, before the connection is closed
    pub max_message_bytes: usize,
    /// Close the connection after this long without data
    pub idle_timeout: Option<Duration>,
}

impl ConnectionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_message_bytes: config.server.max_message_bytes,
            idle_timeout: config.server.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Error terminating a single connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("failed to set up colorizer: {0}")]
    Colorizer(#[from] colorize::ColorizeError),
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Listening server owning the socket and its live connections.
pub struct Server {
    listener: TcpListener,
    language: Language,
    settings: ConnectionSettings,
}

impl Server {
    /// Bind the listener described by `config`.
    pub async fn bind(config: &Config) -> Result<Self> {
        let language = colorize::languages::by_name(&config.highlight.language)?;
        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to listen on {}", addr))?;
        Ok(Self {
            listener,
            language,
            settings: ConnectionSettings::from_config(config),
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to read listener address")
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes.
    ///
    /// Each connection runs in its own task. An accept failure stops the
    /// server and is returned; connection failures are only logged.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        info!(
            addr = %self.local_addr()?,
            language = self.language.name,
            "listening"
        );
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutting down");
                    break Ok(());
                }
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => break Err(anyhow::Error::new(e).context("failed to accept connection")),
                    };
                    info!(%peer, "connected");
                    let language = self.language.clone();
                    let settings = self.settings.clone();
                    let span = info_span!("conn", %peer);
                    connections.spawn(
                        async move {
                            match handle_connection(stream, language, &settings).await {
                                Ok(()) => info!("disconnected"),
                                Err(e) => warn!(error = %e, "connection closed"),
                            }
                        }
                        .instrument(span),
                    );
                }
                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            error!(error = %e, "connection task panicked");
                        }
                    }
                }
            }
        };

        connections.shutdown().await;
        result
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
        info!("received SIGINT");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("received SIGTERM");
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Serve one connection until the peer closes it.
///
/// Requests are handled strictly in arrival order: each is colorized and
/// answered before the next buffered message is looked at.
pub async fn handle_connection<S>(
    mut stream: S,
    language: Language,
    settings: &ConnectionSettings,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut colorizer = Colorizer::new(language)?;
    let mut framer = Framer::new(settings.max_message_bytes);
    let mut chunk = vec![0u8; READ_CHUNK];

    loop {
        let read = match settings.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, stream.read(&mut chunk)).await {
                Ok(read) => read?,
                Err(_) => {
                    info!(idle_secs = limit.as_secs(), "idle timeout");
                    return Ok(());
                }
            },
            None => stream.read(&mut chunk).await?,
        };
        if read == 0 {
            if !framer.is_empty() {
                debug!(bytes = framer.pending(), "discarding unterminated data");
            }
            return Ok(());
        }
        debug!(bytes = read, "received data");
        framer.push(&chunk[..read])?;

        while let Some(frame) = framer.next_frame() {
            if let Some(reply) = respond(&mut colorizer, &frame)? {
                stream.write_all(&reply).await?;
                stream.flush().await?;
                debug!(bytes = reply.len(), "replied");
            }
        }
    }
}

/// Build the reply for one request line, or `None` if it should be dropped.
fn respond(colorizer: &mut Colorizer, frame: &[u8]) -> Result<Option<Vec<u8>>, serde_json::Error> {
    let request = match decode_request(frame) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, bytes = frame.len(), "dropping undecodable request");
            return Ok(None);
        }
    };

    let reply = match colorizer.colorize(&request.source) {
        Ok(lines) => {
            trace!(id = %request.id, colors = %debug_render(&lines), "colorized");
            encode_reply(&request.id, &lines)?
        }
        Err(e) => {
            warn!(id = %request.id, error = %e, "colorize failed");
            encode_error(&request.id, &e.to_string())?
        }
    };
    Ok(Some(reply))
}
