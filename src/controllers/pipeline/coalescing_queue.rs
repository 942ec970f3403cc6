//! Depth-1 queue that holds back bursts of input.
//!
//! Every push replaces whatever is pending. The pending item becomes ready once
//! input has been quiet for the debounce window, or once it has been pending
//! for `max_wait` in total, whichever comes first. Time is passed in by the
//! caller so the rules can be exercised without sleeping.

use crate::config::PipelineConfig;
use std::time::{Duration, Instant};

#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    /// Something is pending; poll again at this instant.
    Waiting(Instant),
    Empty,
}

#[derive(Debug)]
struct Pending<T> {
    item: T,
    first_push: Instant,
    last_push: Instant,
    flushed: bool,
}

#[derive(Debug)]
pub struct CoalescingQueue<T> {
    debounce: Duration,
    max_wait: Duration,
    pending: Option<Pending<T>>,
}

impl<T> CoalescingQueue<T> {
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            debounce: config.debounce(),
            max_wait: config.max_wait(),
            pending: None,
        }
    }

    /// Stores `item`, handing back the one it superseded.
    ///
    /// A superseded item keeps its place in the max-wait window, so continuous
    /// input cannot postpone dispatch forever.
    pub fn push(&mut self, item: T, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some(previous) => {
                self.pending = Some(Pending {
                    item,
                    first_push: previous.first_push,
                    last_push: now,
                    flushed: previous.flushed,
                });
                Some(previous.item)
            }
            None => {
                self.pending = Some(Pending {
                    item,
                    first_push: now,
                    last_push: now,
                    flushed: false,
                });
                None
            }
        }
    }

    /// Makes the pending item ready on the next poll.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            pending.flushed = true;
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| {
            if pending.flushed {
                pending.last_push
            } else {
                (pending.last_push + self.debounce).min(pending.first_push + self.max_wait)
            }
        })
    }

    pub fn poll(&mut self, now: Instant) -> Poll<T> {
        match self.deadline() {
            None => Poll::Empty,
            Some(deadline) if now >= deadline => match self.pending.take() {
                Some(pending) => Poll::Ready(pending.item),
                None => Poll::Empty,
            },
            Some(deadline) => Poll::Waiting(deadline),
        }
    }

    /// Drops the pending item without dispatching it.
    pub fn clear(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.item)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
