use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::controllers::data::render_signals::RenderSignals;
use crate::controllers::events::pass_event::{AbortReason, PassEvent};
use crate::controllers::ports::render_controller::StartOutcome;
use crate::core::data::frame_buffer::FrameBuffer;
use crate::core::data::render_params::RenderParameters;

/// One-pass-at-a-time bookkeeping shared by the still-image controllers.
///
/// The worker thread owns progress while a pass runs and reports how it
/// ended over a channel. Everything else (the generating flag, the
/// `has_rendered` gate, the published image) is only touched here, on the
/// consumer side, when [`PassSession::poll`] drains that channel.
pub(crate) struct PassSession {
    label: &'static str,
    signals: Option<RenderSignals>,
    has_rendered: bool,
    events: Option<Receiver<PassEvent>>,
    worker: Option<JoinHandle<()>>,
    image: Option<Arc<FrameBuffer>>,
}

impl PassSession {
    pub(crate) fn new(label: &'static str) -> Self {
        Self {
            label,
            signals: None,
            has_rendered: false,
            events: None,
            worker: None,
            image: None,
        }
    }

    pub(crate) fn has_rendered(&self) -> bool {
        self.has_rendered
    }

    pub(crate) fn image(&self) -> Option<Arc<FrameBuffer>> {
        self.image.clone()
    }

    /// Spawns `pass` on a worker thread unless a session is already active.
    pub(crate) fn start<F>(
        &mut self,
        params: RenderParameters,
        signals: RenderSignals,
        pass: F,
    ) -> StartOutcome
    where
        F: FnOnce(&RenderParameters, &RenderSignals) -> Result<FrameBuffer, AbortReason>
            + Send
            + 'static,
    {
        if self.has_rendered {
            return StartOutcome::AlreadyActive;
        }

        signals.clear_cancel();
        signals.progress_sink().reset();
        signals.set_generating(true);

        self.has_rendered = true;
        self.image = None;

        info!(
            "{}: starting {}x{} pass at depth {}",
            self.label,
            params.width(),
            params.height(),
            params.iteration_depth()
        );

        let (sender, receiver) = mpsc::channel();
        let worker_signals = signals.clone();
        let label = self.label;

        self.worker = Some(thread::spawn(move || {
            let start = std::time::Instant::now();
            let event = match pass(&params, &worker_signals) {
                Ok(frame) => {
                    worker_signals.progress_sink().set(1.0);
                    PassEvent::Finished {
                        frame,
                        render_duration: start.elapsed(),
                    }
                }
                Err(reason) => {
                    worker_signals.progress_sink().reset();
                    if let AbortReason::Failed(message) = &reason {
                        warn!("{label}: pass failed: {message}");
                    }
                    PassEvent::Aborted(reason)
                }
            };
            let _ = sender.send(event);
        }));
        self.events = Some(receiver);
        self.signals = Some(signals);

        StartOutcome::Started
    }

    /// Applies at most one finished pass. Returns `true` if state changed.
    pub(crate) fn poll(&mut self) -> bool {
        let Some(events) = &self.events else {
            return false;
        };

        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                PassEvent::Aborted(AbortReason::Failed("render worker exited".to_owned()))
            }
        };

        self.events = None;
        self.join_worker();

        match event {
            PassEvent::Finished {
                frame,
                render_duration,
            } => {
                if self.cancel_requested() {
                    info!("{}: discarding pass finished after cancel", self.label);
                    self.abort();
                } else {
                    info!(
                        "{}: finished {}x{} in {:?}",
                        self.label,
                        frame.width(),
                        frame.height(),
                        render_duration
                    );
                    self.image = Some(Arc::new(frame));
                    if let Some(signals) = &self.signals {
                        signals.set_generating(false);
                    }
                }
            }
            PassEvent::Aborted(reason) => {
                if reason == AbortReason::Cancelled {
                    warn!("{}: pass cancelled", self.label);
                }
                self.abort();
            }
        }

        true
    }

    /// Cancels any running pass, waits for its worker, and forgets the image.
    pub(crate) fn dispose(&mut self) {
        if let Some(signals) = &self.signals {
            signals.request_cancel();
        }

        self.join_worker();
        self.events = None;
        self.abort();
    }

    fn abort(&mut self) {
        self.has_rendered = false;
        self.image = None;

        if let Some(signals) = &self.signals {
            signals.progress_sink().reset();
            signals.set_generating(false);
        }
    }

    fn cancel_requested(&self) -> bool {
        self.signals
            .as_ref()
            .is_some_and(RenderSignals::is_cancel_requested)
    }

    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("{}: render worker panicked", self.label);
            }
        }
    }
}

impl Drop for PassSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
