use std::time::Duration;

use crate::core::data::frame_buffer::FrameBuffer;

#[derive(Debug, Clone, PartialEq)]
pub enum AbortReason {
    Cancelled,
    Failed(String),
}

/// How a still-image pass ended, sent from the worker to the consumer side.
#[derive(Debug)]
pub enum PassEvent {
    Finished {
        frame: FrameBuffer,
        render_duration: Duration,
    },
    Aborted(AbortReason),
}
