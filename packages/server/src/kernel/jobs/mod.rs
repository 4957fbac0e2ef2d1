//! In-process background jobs.
//!
//! ```text
//! workflow calls queue.enqueue(job) ──► JobHandle (oneshot receiver)
//!                 │
//!                 └─► bounded mpsc ──► JobWorker
//!                                         ├─► handler.handle(job)
//!                                         └─► reply on the job's oneshot
//! ```
//!
//! Jobs run one at a time, are not persisted and are never retried. Business
//! logic lives in the domain handlers; this module only moves jobs around.

mod queue;
mod worker;

pub use queue::{EnqueueError, JobError, JobHandle, JobQueue};
pub use worker::JobWorker;

use async_trait::async_trait;

/// Executes one kind of job
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    type Job: std::fmt::Debug + Send + 'static;
    type Output: Send + 'static;

    /// Job type used in logs
    fn job_type(&self) -> &'static str;

    async fn handle(&self, job: Self::Job) -> Result<Self::Output, JobError>;
}
