//! History controller
//! 历史控制器
//!
//! Owns the history log and the search term, and turns every backend or host
//! event into exactly one full re-render.
//!
//! ## Startup order / 启动顺序
//!
//! 1. Subscribe to the host's filter input.
//! 2. Window placement belongs to the host; nothing to do here.
//! 3. Spawn the bulk fetch, so the request is in flight immediately.
//! 4. Subscribe to the `"clip"` push stream.
//!
//! Because step 4 happens before step 3 resolves, clips can arrive before the
//! seed. They are appended and rendered like any other clip. Under
//! [`EarlyEventPolicy::Discard`] the seed then replaces the log and they are
//! gone; under [`EarlyEventPolicy::Replay`] they are appended again after the
//! seed.
//!
//! ## Scheduling / 调度
//!
//! One `tokio::select!` loop; each event is handled to completion before the
//! next. Renders never overlap and are never coalesced. When the host input
//! closes, clips and restore requests already queued are handled before the
//! loop exits.
use std::sync::Arc;

use anyhow::Context;
use cv_core::filter;
use cv_core::ports::{ClipStream, HistoryGatewayPort, HostInput, ViewHostPort, CLIP_EVENT};
use cv_core::{
    ClipEntry, EarlyEventPolicy, GatewayError, HistoryStore, InboundClip, RestoreFn, ViewError,
};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use super::render_rows::RenderPipeline;

type FetchOutcome = Result<Result<Vec<InboundClip>, GatewayError>, JoinError>;

/// Clips appended before the seed landed.
#[derive(Default)]
struct EarlyClips {
    count: usize,
    /// Filled only under [`EarlyEventPolicy::Replay`].
    replay: Vec<ClipEntry>,
}

impl EarlyClips {
    fn clear(&mut self) {
        self.count = 0;
        self.replay.clear();
    }
}

pub struct HistoryController {
    gateway: Arc<dyn HistoryGatewayPort>,
    host: Arc<dyn ViewHostPort>,
    pipeline: RenderPipeline,
    early_events: EarlyEventPolicy,
    store: HistoryStore,
    needle: String,
}

impl HistoryController {
    pub fn new(
        gateway: Arc<dyn HistoryGatewayPort>,
        host: Arc<dyn ViewHostPort>,
        pipeline: RenderPipeline,
        early_events: EarlyEventPolicy,
    ) -> Self {
        Self {
            gateway,
            host,
            pipeline,
            early_events,
            store: HistoryStore::new(),
            needle: String::new(),
        }
    }

    /// The log as it currently stands.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// The current search term.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Run the view until the host closes its input stream.
    ///
    /// # Errors
    ///
    /// Returns an error only if the host input cannot be subscribed. Backend
    /// failures are logged and reported to the host; they do not stop the loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Step 1: filter input
        let mut input = self
            .host
            .subscribe_input()
            .context("Failed to subscribe to host filter input")?;

        // Step 2: placement is a host concern
        debug!("Window placement delegated to host");

        // Step 3: bulk fetch, in flight before the push subscription
        let gateway = Arc::clone(&self.gateway);
        let mut fetch = tokio::spawn(async move { gateway.fetch_history().await });
        let mut seeded = false;

        // Step 4: live push stream
        let mut clips = match self.gateway.subscribe(CLIP_EVENT).await {
            Ok(stream) => Some(stream),
            Err(err) => {
                error!(error = %err, "Failed to subscribe to live clips");
                self.host.report(&ViewError::from(err));
                None
            }
        };

        let (restore_tx, mut restore_rx) = mpsc::unbounded_channel::<ClipEntry>();
        let on_restore: RestoreFn = Arc::new(move |entry| {
            if restore_tx.send(entry).is_err() {
                warn!("Row clicked after the view shut down; restore ignored");
            }
        });
        let mut early = EarlyClips::default();

        info!(early_events = %self.early_events, "History view started");

        loop {
            tokio::select! {
                outcome = &mut fetch, if !seeded => {
                    seeded = true;
                    self.on_history_fetched(outcome, &mut early, &on_restore);
                }
                clip = next_clip(&mut clips) => match clip {
                    Some(clip) => self.on_clip(clip, seeded, &mut early, &on_restore),
                    None => {
                        warn!("Live clip stream closed; view continues without updates");
                        clips = None;
                    }
                },
                event = input.recv() => match event {
                    Some(HostInput::FilterChanged(needle)) => {
                        self.needle = needle;
                        self.render(&on_restore);
                    }
                    None => {
                        self.drain_queued(&mut clips, &mut restore_rx, seeded, &mut early, &on_restore);
                        info!(entries = self.store.len(), "Host input closed, shutting down view");
                        break;
                    }
                },
                Some(entry) = restore_rx.recv() => self.spawn_restore(entry),
            }
        }

        if !seeded {
            fetch.abort();
        }
        Ok(())
    }

    fn on_history_fetched(
        &mut self,
        outcome: FetchOutcome,
        early: &mut EarlyClips,
        on_restore: &RestoreFn,
    ) {
        let batch = match outcome {
            Ok(Ok(batch)) => batch,
            Ok(Err(err)) => {
                self.fetch_failed(err, early);
                return;
            }
            Err(join_err) => {
                self.fetch_failed(GatewayError::Fetch(join_err.to_string()), early);
                return;
            }
        };

        let mut entries = Vec::with_capacity(batch.len());
        for clip in batch {
            match clip {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(error = %err, "Rejected malformed entry from history fetch");
                    self.host.report(&ViewError::from(err));
                }
            }
        }

        let seeded = entries.len();
        self.store.seed(entries);

        match self.early_events {
            EarlyEventPolicy::Discard => {
                if early.count > 0 {
                    warn!(
                        discarded = early.count,
                        "Clips received before the history load were replaced by it"
                    );
                }
            }
            EarlyEventPolicy::Replay => {
                debug!(
                    replayed = early.replay.len(),
                    "Replaying clips received before the history load"
                );
                for entry in early.replay.drain(..) {
                    self.store.append(entry);
                }
            }
        }
        early.clear();

        info!(seeded, total = self.store.len(), "History loaded");
        self.render(on_restore);
    }

    fn fetch_failed(&mut self, err: GatewayError, early: &mut EarlyClips) {
        // Clips already appended stay; only the seed is missing.
        error!(error = %err, kept = self.store.len(), "History fetch failed");
        early.clear();
        self.host.report(&ViewError::from(err));
    }

    fn on_clip(
        &mut self,
        clip: InboundClip,
        seeded: bool,
        early: &mut EarlyClips,
        on_restore: &RestoreFn,
    ) {
        let entry = match clip {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Rejected malformed live clip");
                self.host.report(&ViewError::from(err));
                return;
            }
        };

        debug!(
            kind = entry.content.kind(),
            bytes = entry.content.data_len(),
            seeded,
            "Live clip received"
        );
        if !seeded {
            early.count += 1;
            if self.early_events == EarlyEventPolicy::Replay {
                early.replay.push(entry.clone());
            }
        }
        self.store.append(entry);
        self.render(on_restore);
    }

    /// Handle what the clip stream and row clicks queued before the input closed.
    fn drain_queued(
        &mut self,
        clips: &mut Option<ClipStream>,
        restores: &mut mpsc::UnboundedReceiver<ClipEntry>,
        seeded: bool,
        early: &mut EarlyClips,
        on_restore: &RestoreFn,
    ) {
        let mut drained = 0usize;
        if let Some(stream) = clips.as_mut() {
            while let Ok(clip) = stream.try_recv() {
                self.on_clip(clip, seeded, early, on_restore);
                drained += 1;
            }
        }
        while let Ok(entry) = restores.try_recv() {
            self.spawn_restore(entry);
            drained += 1;
        }
        if drained > 0 {
            debug!(drained, "Handled events queued before input closed");
        }
    }

    fn render(&self, on_restore: &RestoreFn) {
        let snapshot = self.store.snapshot();
        let visible = filter::view(&snapshot, &self.needle);
        let rows = self.pipeline.render(&visible, on_restore);
        debug!(
            total = snapshot.len(),
            visible = rows.len(),
            needle_len = self.needle.len(),
            "Rendered history"
        );
        self.host.show_rows(rows);
    }

    fn spawn_restore(&self, entry: ClipEntry) {
        let gateway = Arc::clone(&self.gateway);
        let host = Arc::clone(&self.host);
        tokio::spawn(async move {
            debug!(kind = entry.content.kind(), "Requesting restore");
            if let Err(err) = gateway.restore(&entry).await {
                error!(error = %err, "Failed to restore clip");
                host.report(&ViewError::from(err));
            }
        });
    }
}

async fn next_clip(clips: &mut Option<ClipStream>) -> Option<InboundClip> {
    match clips {
        Some(stream) => stream.recv().await,
        None => std::future::pending().await,
    }
}
