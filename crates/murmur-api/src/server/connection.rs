//! One client connection: greeting, read loop and teardown.
//!
//! The socket is split in two. The read half stays with this task and feeds
//! lines to the router; the write half moves into a writer task that drains
//! the session's outbound channel, so other connections never block on this
//! client's socket.

use anyhow::Context;
use murmur_core::ai::TextGenerator;
use murmur_core::session::Session;
use murmur_core::transcript::TranscriptStore;
use murmur_types::protocol;
use murmur_types::session::SessionId;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::Relay;

/// Serve one client until it disconnects or `shutdown` fires.
pub async fn handle<S, G>(
    stream: TcpStream,
    relay: Relay<S, G>,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    S: TranscriptStore + 'static,
    G: TextGenerator + 'static,
{
    let (reader, mut writer) = stream.into_split();
    let (tx, rx) = mpsc::unbounded_channel();

    let session = relay.registry().register(tx).await;
    let id = session.id();
    info!(session_id = %id, "User {id} connected.");

    // Greeting goes straight to the socket, ahead of anything already queued
    // for this session by concurrent broadcasts.
    let greeting = greeting_lines(id, replay_history(&relay, id).await);
    if let Err(e) = write_lines(&mut writer, &greeting).await {
        relay.registry().unregister(id).await;
        info!(session_id = %id, "User {id} disconnected.");
        return Err(e).context("failed to send greeting");
    }

    let writer_task = tokio::spawn(pump_outbound(id, writer, rx));

    read_loop(&relay, &session, reader, &shutdown).await;

    relay.registry().unregister(id).await;
    drop(session);
    if let Err(e) = writer_task.await {
        warn!(session_id = %id, error = %e, "writer task failed");
    }
    info!(session_id = %id, "User {id} disconnected.");
    Ok(())
}

async fn read_loop<S, G>(
    relay: &Relay<S, G>,
    session: &Session,
    reader: tokio::net::tcp::OwnedReadHalf,
    shutdown: &CancellationToken,
) where
    S: TranscriptStore,
    G: TextGenerator,
{
    let id = session.id();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = reader.read_until(b'\n', &mut buf) => read,
        };

        match read {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(session_id = %id, error = %e, "read failed");
                break;
            }
        }

        // Bytes that are not UTF-8 become U+FFFD rather than ending the session.
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(session_id = %id, "received line");

        tokio::select! {
            _ = shutdown.cancelled() => break,
            () = relay.router().route(session, line) => {}
        }
    }
}

/// Replay `id`'s transcript, degrading to an empty history on failure.
async fn replay_history<S, G>(relay: &Relay<S, G>, id: SessionId) -> Vec<String>
where
    S: TranscriptStore,
    G: TextGenerator,
{
    match relay.transcripts().replay(id).await {
        Ok(history) => history,
        Err(e) => {
            warn!(session_id = %id, error = %e, "failed to replay transcript");
            Vec::new()
        }
    }
}

/// Id line followed by the framed history. The frame is sent even when the
/// history is empty.
fn greeting_lines(id: SessionId, history: Vec<String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(history.len() + 3);
    lines.push(protocol::user_id_line(id));
    lines.push(protocol::HISTORY_START.to_string());
    lines.extend(history);
    lines.push(protocol::HISTORY_END.to_string());
    lines
}

async fn write_lines(writer: &mut OwnedWriteHalf, lines: &[String]) -> anyhow::Result<()> {
    let mut buf = String::new();
    for line in lines {
        buf.push_str(line);
        buf.push('\n');
    }
    writer.write_all(buf.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Drain the outbound channel into the socket until every sender is gone or
/// the client stops accepting data.
async fn pump_outbound(
    id: SessionId,
    mut writer: OwnedWriteHalf,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    while let Some(line) = rx.recv().await {
        let mut framed = line;
        framed.push('\n');
        if let Err(e) = writer.write_all(framed.as_bytes()).await {
            debug!(session_id = %id, error = %e, "write failed, dropping outbound lines");
            return;
        }
    }
    let _ = writer.shutdown().await;
}
