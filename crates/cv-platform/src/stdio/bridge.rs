use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use cv_core::clipboard::decode_clip;
use cv_core::ports::{
    ClipStream, HistoryGatewayPort, HostInput, InputStream, ViewHostPort, CLIP_EVENT,
};
use cv_core::{ClipEntry, DisplayRow, GatewayError, InboundClip, MalformedPayload, ViewError};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use super::history_file::read_history_file;
use super::protocol::{BridgeEvent, HostMessage};

const CLIP_CHANNEL_CAPACITY: usize = 256;
const INPUT_CHANNEL_CAPACITY: usize = 64;
/// Renders a click may still refer to.
const RETAINED_RENDERS: usize = 8;

/// The most recent renders, keyed by the generation sent with each `rows` line.
#[derive(Default)]
struct Renders {
    next_generation: u64,
    recent: VecDeque<(u64, Vec<DisplayRow>)>,
}

impl Renders {
    fn record(&mut self, rows: Vec<DisplayRow>) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        if self.recent.len() == RETAINED_RENDERS {
            self.recent.pop_front();
        }
        self.recent.push_back((generation, rows));
        generation
    }

    fn row(&self, generation: u64, row: usize) -> Result<DisplayRow, String> {
        let (_, rows) = self
            .recent
            .iter()
            .find(|(kept, _)| *kept == generation)
            .ok_or_else(|| format!("rows generation {generation} is no longer displayed"))?;
        rows.get(row)
            .cloned()
            .ok_or_else(|| format!("no row {row} in rows generation {generation}"))
    }
}

type SharedRenders = Arc<Mutex<Renders>>;

/// Gateway and host surface over newline-delimited JSON.
///
/// The reader task owns the sending halves of the clip and filter channels, so
/// end of input closes both. The writer task ends once every handle to the
/// bridge and the reader are gone.
pub struct StdioBridge {
    history_path: PathBuf,
    outbound: mpsc::UnboundedSender<BridgeEvent>,
    clips: Mutex<Option<ClipStream>>,
    input: Mutex<Option<InputStream>>,
    renders: SharedRenders,
}

impl StdioBridge {
    /// Start the reader and writer tasks.
    ///
    /// Returns the bridge and the writer's handle; await the handle after
    /// dropping the bridge to flush every pending line.
    pub fn spawn<R, W>(
        reader: R,
        writer: W,
        history_path: PathBuf,
    ) -> (Arc<Self>, JoinHandle<Result<()>>)
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (clip_tx, clip_rx) = mpsc::channel(CLIP_CHANNEL_CAPACITY);
        let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let renders = SharedRenders::default();

        let writer_task = tokio::spawn(write_events(writer, outbound_rx));
        tokio::spawn(read_messages(
            reader,
            ReaderSinks {
                clips: clip_tx,
                input: input_tx,
                outbound: outbound_tx.clone(),
                renders: Arc::clone(&renders),
            },
        ));

        let bridge = Arc::new(Self {
            history_path,
            outbound: outbound_tx,
            clips: Mutex::new(Some(clip_rx)),
            input: Mutex::new(Some(input_rx)),
            renders,
        });
        (bridge, writer_task)
    }

    fn emit(&self, event: BridgeEvent) {
        if self.outbound.send(event).is_err() {
            warn!("Stdout writer stopped; event dropped");
        }
    }
}

#[async_trait]
impl HistoryGatewayPort for StdioBridge {
    async fn fetch_history(&self) -> Result<Vec<InboundClip>, GatewayError> {
        read_history_file(&self.history_path).await
    }

    async fn subscribe(&self, event_name: &str) -> Result<ClipStream, GatewayError> {
        if event_name != CLIP_EVENT {
            return Err(GatewayError::Subscribe {
                event: event_name.to_string(),
                reason: "unknown event".to_string(),
            });
        }
        self.clips
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| GatewayError::Subscribe {
                event: event_name.to_string(),
                reason: "already subscribed".to_string(),
            })
    }

    async fn restore(&self, entry: &ClipEntry) -> Result<(), GatewayError> {
        self.outbound
            .send(BridgeEvent::RestoreClip {
                entry: entry.clone(),
            })
            .map_err(|_| GatewayError::Closed)
    }
}

impl ViewHostPort for StdioBridge {
    fn subscribe_input(&self) -> Result<InputStream, GatewayError> {
        self.input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(GatewayError::Closed)
    }

    fn show_rows(&self, rows: Vec<DisplayRow>) {
        let mut renders = self.renders.lock().unwrap_or_else(PoisonError::into_inner);
        let event = BridgeEvent::rows(renders.next_generation, &rows);
        let generation = renders.record(rows);
        trace!(generation, "Rows recorded");
        // Emitted under the lock so lines leave in generation order.
        self.emit(event);
    }

    fn report(&self, error: &ViewError) {
        self.emit(BridgeEvent::error(error));
    }
}

struct ReaderSinks {
    clips: mpsc::Sender<InboundClip>,
    input: mpsc::Sender<HostInput>,
    outbound: mpsc::UnboundedSender<BridgeEvent>,
    renders: SharedRenders,
}

impl ReaderSinks {
    fn reject(&self, message: String) {
        let event = BridgeEvent::Error {
            kind: "malformed_payload".to_string(),
            message,
        };
        if self.outbound.send(event).is_err() {
            warn!("Stdout writer stopped; error notice dropped");
        }
    }

    async fn dispatch(&self, message: HostMessage) {
        match message {
            HostMessage::Clip { payload } => {
                if self.clips.send(decode_clip(payload)).await.is_err() {
                    debug!("Clip stream dropped; clip ignored");
                }
            }
            HostMessage::Filter { value } => {
                if self
                    .input
                    .send(HostInput::FilterChanged(value))
                    .await
                    .is_err()
                {
                    debug!("Filter input dropped; change ignored");
                }
            }
            HostMessage::Click { generation, row } => {
                let clicked = self
                    .renders
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .row(generation, row);
                match clicked {
                    Ok(clicked) => clicked.click(),
                    Err(message) => {
                        warn!(generation, row, "Click on a row that is not displayed");
                        self.reject(message);
                    }
                }
            }
        }
    }
}

async fn read_messages<R>(reader: R, sinks: ReaderSinks)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Host input reached end of stream");
                break;
            }
            Err(e) => {
                error!(error = %e, "Failed to read host input");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        trace!(len = line.len(), "Host line received");
        match serde_json::from_str::<HostMessage>(&line) {
            Ok(message) => sinks.dispatch(message).await,
            Err(e) => {
                warn!(error = %e, "Skipping malformed host line");
                sinks.reject(MalformedPayload::InvalidShape(e.to_string()).to_string());
            }
        }
    }
}

async fn write_events<W>(
    mut writer: W,
    mut events: mpsc::UnboundedReceiver<BridgeEvent>,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(event) = events.recv().await {
        let mut line = serde_json::to_vec(&event).context("serialize bridge event")?;
        line.push(b'\n');
        writer.write_all(&line).await.context("write bridge event")?;
        writer.flush().await.context("flush bridge event")?;
    }
    debug!("Bridge writer finished");
    Ok(())
}
