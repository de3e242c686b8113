use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use twinlens_core::{Clipboard, SettingsStore, WindowController};
use twinlens_types::{WindowEvent, WindowId, WindowSettings};

use crate::events::{ClosedWindow, ExitRequest, LoopMessage, WindowLoop, window_loop};
use crate::surface::Surface;

const WINDOW_CHANNEL_CAPACITY: usize = 64;
const EXIT_CHANNEL_CAPACITY: usize = 8;

/// A controller together with the surface that renders it
pub struct PairMember {
    pub controller: WindowController,
    pub surface: Box<dyn Surface>,
}

/// The two overlay windows, persisted and torn down together
pub struct WindowPair {
    first: PairMember,
    second: PairMember,
    store: SettingsStore,
    clipboard: Arc<dyn Clipboard>,
    copy_label_delay: Duration,
}

/// Cloneable entry point for anything that feeds events into the pair
#[derive(Clone)]
pub struct PairInput {
    first: AsyncSender<LoopMessage>,
    second: AsyncSender<LoopMessage>,
    exit: AsyncSender<ExitRequest>,
}

impl PairInput {
    pub async fn send(&self, id: WindowId, event: WindowEvent) -> anyhow::Result<()> {
        let tx = match id {
            WindowId::FIRST => &self.first,
            WindowId::SECOND => &self.second,
            other => anyhow::bail!("Unknown window {}", other),
        };
        tx.send(LoopMessage::Event(event))
            .await
            .map_err(|e| anyhow::anyhow!("Window {} is not accepting events: {}", id, e))
    }

    pub async fn request_exit(&self, reason: ExitRequest) {
        if let Err(e) = self.exit.send(reason).await {
            tracing::debug!("Exit already in progress: {}", e);
        }
    }
}

pub struct PairHandle {
    input: PairInput,
    coordinator: JoinHandle<Vec<WindowSettings>>,
}

impl PairHandle {
    pub fn input(&self) -> PairInput {
        self.input.clone()
    }

    /// Waits for the joint shutdown; returns what each window last held, first then second
    pub async fn join(self) -> anyhow::Result<Vec<WindowSettings>> {
        Ok(self.coordinator.await?)
    }
}

struct RunningWindow {
    id: WindowId,
    tx: AsyncSender<LoopMessage>,
    task: JoinHandle<ClosedWindow>,
}

impl WindowPair {
    pub fn new(
        first: PairMember,
        second: PairMember,
        store: SettingsStore,
        clipboard: Arc<dyn Clipboard>,
        copy_label_delay: Duration,
    ) -> Self {
        Self {
            first,
            second,
            store,
            clipboard,
            copy_label_delay,
        }
    }

    /// Starts one loop per window plus the coordinator
    pub fn spawn(self, cancel: CancellationToken) -> PairHandle {
        let (exit_tx, exit_rx) = kanal::bounded_async(EXIT_CHANNEL_CAPACITY);

        let mut running = Vec::with_capacity(2);
        for member in [self.first, self.second] {
            let id = member.controller.id();
            let (tx, rx) = kanal::bounded_async(WINDOW_CHANNEL_CAPACITY);
            let ctx = WindowLoop {
                controller: member.controller,
                surface: member.surface,
                clipboard: self.clipboard.clone(),
                copy_label_delay: self.copy_label_delay,
                exit_tx: exit_tx.clone(),
            };
            running.push(RunningWindow {
                id,
                tx,
                task: tokio::spawn(window_loop(ctx, rx)),
            });
        }

        let input = PairInput {
            first: running[0].tx.clone(),
            second: running[1].tx.clone(),
            exit: exit_tx,
        };

        let coordinator = tokio::spawn(coordinate(exit_rx, running, self.store, cancel));

        PairHandle { input, coordinator }
    }
}

async fn coordinate(
    exit_rx: AsyncReceiver<ExitRequest>,
    running: Vec<RunningWindow>,
    store: SettingsStore,
    cancel: CancellationToken,
) -> Vec<WindowSettings> {
    match exit_rx.recv().await {
        Ok(reason) => tracing::info!("[PAIR] Exit requested: {:?}", reason),
        Err(_) => tracing::warn!("[PAIR] Exit channel closed, shutting down"),
    }
    // later exit requests must fail fast instead of filling the channel
    drop(exit_rx);

    for window in &running {
        if window.tx.send(LoopMessage::Shutdown).await.is_err() {
            tracing::debug!("[PAIR] Window {} loop already stopped", window.id);
        }
    }

    let mut closed = Vec::with_capacity(running.len());
    let mut persisted = Vec::with_capacity(running.len());
    for window in running {
        let finished = match window.task.await {
            Ok(finished) => finished,
            Err(e) => {
                tracing::error!("[PAIR] Window {} loop failed: {}", window.id, e);
                continue;
            }
        };

        let settings = finished.controller.settings();
        if let Err(e) = store.save(window.id, &settings) {
            tracing::error!("[PAIR] Could not persist window {}: {}", window.id, e);
        }
        persisted.push(settings);
        closed.push(finished);
    }

    for mut window in closed {
        window.surface.close();
    }

    cancel.cancel();
    tracing::info!("[PAIR] Both windows closed");
    persisted
}
