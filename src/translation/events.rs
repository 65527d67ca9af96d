/*!
 * Events emitted by a translation job.
 *
 * A job reports `Initiate` once, any number of `Progress` updates, and then
 * exactly one of `Complete` or `Error`. A cancelled job goes silent: the
 * sink drops every event once its cancellation flag is set.
 */

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

use crate::translation::cancellation::CancellationFlag;

/// Message from a running job to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// The job has started
    Initiate {
        /// Identifier of the job
        job_id: Uuid,
    },

    /// Output so far
    Progress {
        /// Accumulated fragments; speculative updates append the in-flight sentence
        output: String,
        /// Sentences finished, successfully or not
        processed: usize,
        /// Sentences selected for translation
        total: usize,
        /// Whether `output` contains a partial decode that may still change
        speculative: bool,
    },

    /// The finished standalone document
    Complete {
        document: String,
    },

    /// The job failed before producing a document
    Error {
        reason: String,
    },
}

impl JobEvent {
    /// Whether this event ends the job
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobEvent::Complete { .. } | JobEvent::Error { .. })
    }
}

/// Sending half of a job's event stream, gated by its cancellation flag
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: UnboundedSender<JobEvent>,
    cancel: CancellationFlag,
}

impl EventSink {
    pub fn new(sender: UnboundedSender<JobEvent>, cancel: CancellationFlag) -> Self {
        Self { sender, cancel }
    }

    /// Create a sink together with its receiving half
    pub fn channel(cancel: CancellationFlag) -> (Self, UnboundedReceiver<JobEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender, cancel), receiver)
    }

    /// Forward an event unless the job was cancelled
    ///
    /// Returns whether the event was delivered. A dropped receiver is not an
    /// error; the job keeps running to completion without an audience.
    pub fn emit(&self, event: JobEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                debug!("Event receiver dropped, discarding event");
                false
            }
        }
    }
}
