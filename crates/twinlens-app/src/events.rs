use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::time::{Instant, sleep};
use twinlens_core::{Clipboard, WindowController};
use twinlens_types::{WindowEvent, WindowId};

use crate::surface::Surface;

/// Message delivered to a window loop
#[derive(Debug, Clone, PartialEq)]
pub enum LoopMessage {
    Event(WindowEvent),
    Shutdown,
}

/// Why the pair is being torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitRequest {
    Window(WindowId),
    Signal,
    InputClosed,
}

/// What a finished loop hands back to the coordinator
pub struct ClosedWindow {
    pub controller: WindowController,
    pub surface: Box<dyn Surface>,
}

pub struct WindowLoop {
    pub controller: WindowController,
    pub surface: Box<dyn Surface>,
    pub clipboard: Arc<dyn Clipboard>,
    pub copy_label_delay: Duration,
    pub exit_tx: AsyncSender<ExitRequest>,
}

enum Followup {
    None,
    ArmCopyRevert,
}

/// One window's loop: events are handled strictly in arrival order
pub async fn window_loop(mut ctx: WindowLoop, rx: AsyncReceiver<LoopMessage>) -> ClosedWindow {
    let id = ctx.controller.id();
    tracing::info!("[WINDOW {}] Event loop started", id);

    let revert = sleep(Duration::ZERO);
    tokio::pin!(revert);
    let mut revert_armed = false;

    ctx.surface.present(&ctx.controller.view());

    loop {
        tokio::select! {
            message = rx.recv() => match message {
                Ok(LoopMessage::Event(event)) => {
                    if let Followup::ArmCopyRevert = ctx.handle_event(event).await {
                        revert.as_mut().reset(Instant::now() + ctx.copy_label_delay);
                        revert_armed = true;
                    }
                }
                Ok(LoopMessage::Shutdown) => {
                    tracing::info!("[WINDOW {}] Shutdown received", id);
                    break;
                }
                Err(e) => {
                    tracing::warn!("[WINDOW {}] Event channel closed: {}", id, e);
                    break;
                }
            },
            _ = &mut revert, if revert_armed => {
                revert_armed = false;
                ctx.handle_event(WindowEvent::CopyLabelExpired).await;
            }
        }
    }

    ClosedWindow {
        controller: ctx.controller,
        surface: ctx.surface,
    }
}

impl WindowLoop {
    async fn handle_event(&mut self, event: WindowEvent) -> Followup {
        let id = self.controller.id();
        tracing::trace!("[WINDOW {}] {:?}", id, event);

        let mut followup = Followup::None;
        match event {
            WindowEvent::PointerDown(p) => {
                let state = self.controller.pointer_down(p);
                tracing::debug!("[WINDOW {}] Grab at ({}, {}): {:?}", id, p.x, p.y, state);
            }
            WindowEvent::PointerMove(p) => {
                self.controller.pointer_move(p);
            }
            WindowEvent::PointerUp => self.controller.pointer_up(),
            WindowEvent::TakeScreenshot => {
                // Failures are logged and surfaced by the controller
                let _ = self.controller.take_screenshot().await;
            }
            WindowEvent::NextTranslation => {
                self.controller.next_translation();
            }
            WindowEvent::PreviousTranslation => {
                self.controller.previous_translation();
            }
            WindowEvent::CopySourceText => {
                match self.controller.copy_source_text(self.clipboard.as_ref()) {
                    Ok(true) => followup = Followup::ArmCopyRevert,
                    Ok(false) => tracing::debug!("[WINDOW {}] Nothing to copy yet", id),
                    Err(e) => tracing::error!("[WINDOW {}] Clipboard write failed: {:#}", id, e),
                }
            }
            WindowEvent::CopyLabelExpired => self.controller.reset_copy_label(),
            WindowEvent::ToggleVisibility => {
                self.controller.toggle_visibility();
            }
            WindowEvent::WindowMoved(position) => self.controller.set_position(position),
            WindowEvent::Exit => {
                tracing::info!("[WINDOW {}] Exit requested", id);
                if let Err(e) = self.exit_tx.send(ExitRequest::Window(id)).await {
                    tracing::debug!("[WINDOW {}] Shutdown already under way: {}", id, e);
                }
            }
        }

        self.surface.present(&self.controller.view());
        followup
    }
}
