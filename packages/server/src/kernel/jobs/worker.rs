//! Worker task that executes queued jobs one at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{JobError, JobHandler};

pub(super) struct Envelope<H: JobHandler> {
    pub job_id: Uuid,
    pub job: H::Job,
    pub reply: oneshot::Sender<Result<H::Output, JobError>>,
}

/// Consumes the queue until every sender is gone
pub struct JobWorker<H: JobHandler> {
    handler: Arc<H>,
    rx: mpsc::Receiver<Envelope<H>>,
}

impl<H: JobHandler> JobWorker<H> {
    pub(super) fn new(handler: Arc<H>, rx: mpsc::Receiver<Envelope<H>>) -> Self {
        Self { handler, rx }
    }

    pub async fn run(mut self) {
        let job_type = self.handler.job_type();
        info!(job_type = %job_type, "Job worker started");

        while let Some(envelope) = self.rx.recv().await {
            self.process(envelope).await;
        }

        info!(job_type = %job_type, "Job worker stopped");
    }

    async fn process(&self, envelope: Envelope<H>) {
        let Envelope { job_id, job, reply } = envelope;
        let job_type = self.handler.job_type();

        debug!(job_id = %job_id, job_type = %job_type, job = ?job, "Processing job");
        let result = self.handler.handle(job).await;

        match &result {
            Ok(_) => debug!(job_id = %job_id, job_type = %job_type, "job succeeded"),
            Err(e) => warn!(job_id = %job_id, job_type = %job_type, error = %e, "job failed"),
        }

        // Nobody waiting is normal for fire-and-forget callers
        if reply.send(result).is_err() {
            debug!(job_id = %job_id, "Job handle dropped before completion");
        }
    }
}
