/*!
 * Translation sessions.
 *
 * A session owns a translator and runs at most one job at a time on a
 * spawned task. Starting a new job cancels and aborts the previous one
 * before the new task is spawned, so events from an abandoned job never
 * interleave with the new job's events.
 */

use log::info;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{AbortHandle, JoinHandle};
use uuid::Uuid;

use crate::errors::JobError;
use crate::providers::Translator;
use crate::translation::cancellation::CancellationFlag;
use crate::translation::events::{EventSink, JobEvent};
use crate::translation::job::TranslationJob;
use crate::translation::orchestrator::{JobOutcome, TranslationOrchestrator};

/// Caller's view of a running job
#[derive(Debug)]
pub struct JobHandle {
    id: Uuid,
    events: UnboundedReceiver<JobEvent>,
    task: JoinHandle<JobOutcome>,
    cancel: CancellationFlag,
}

impl JobHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Next event, or `None` once the job has ended and the stream is drained
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        self.events.recv().await
    }

    /// Request cancellation of this job
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the job's outcome
    pub async fn outcome(self) -> JobOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => JobOutcome::Cancelled,
            Err(e) => JobOutcome::Failed(JobError::TaskFailed(e.to_string())),
        }
    }
}

#[derive(Debug)]
struct ActiveJob {
    id: Uuid,
    cancel: CancellationFlag,
    abort: AbortHandle,
}

/// Runs jobs one at a time against a shared translator
#[derive(Debug)]
pub struct TranslationSession {
    translator: Arc<dyn Translator>,
    orchestrator: Arc<TranslationOrchestrator>,
    active: Option<ActiveJob>,
}

impl TranslationSession {
    pub fn new(translator: Arc<dyn Translator>, orchestrator: TranslationOrchestrator) -> Self {
        Self {
            translator,
            orchestrator: Arc::new(orchestrator),
            active: None,
        }
    }

    /// Start a job, replacing any job still running
    pub fn start(&mut self, job: TranslationJob) -> JobHandle {
        self.cancel();

        let id = job.id;
        let cancel = CancellationFlag::new();
        let (sink, events) = EventSink::channel(cancel.clone());

        let translator = Arc::clone(&self.translator);
        let orchestrator = Arc::clone(&self.orchestrator);
        let flag = cancel.clone();
        let task = tokio::spawn(async move {
            orchestrator.run(&job, translator.as_ref(), &sink, &flag).await
        });

        self.active = Some(ActiveJob {
            id,
            cancel: cancel.clone(),
            abort: task.abort_handle(),
        });

        JobHandle {
            id,
            events,
            task,
            cancel,
        }
    }

    /// Cancel and abort the active job; returns whether one was running
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(active) if !active.abort.is_finished() => {
                active.cancel.cancel();
                active.abort.abort();
                info!("Cancelled translation job {}", active.id);
                true
            }
            _ => false,
        }
    }

    /// Whether a started job has not finished yet
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.abort.is_finished())
    }

    /// Identifier of the most recently started job
    pub fn active_job_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.id)
    }
}
