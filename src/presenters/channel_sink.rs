use crate::controllers::pipeline::events::RenderEvent;
use crate::controllers::pipeline::ports::frame_sink::FrameSink;
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender};

/// Forwards completion events into an mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelFrameSink {
    sender: Sender<RenderEvent>,
}

impl ChannelFrameSink {
    #[must_use]
    pub fn new(sender: Sender<RenderEvent>) -> Self {
        Self { sender }
    }

    #[must_use]
    pub fn channel() -> (Self, Receiver<RenderEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }
}

impl FrameSink for ChannelFrameSink {
    fn submit(&self, event: RenderEvent) {
        if self.sender.send(event).is_err() {
            debug!("render event dropped, receiver is gone");
        }
    }
}
