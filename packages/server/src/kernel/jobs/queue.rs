//! Bounded job queue with per-job completion channels.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use super::worker::{Envelope, JobWorker};
use super::JobHandler;

/// Failure reported on a job's completion channel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("job failed: {0}")]
    Failed(String),

    #[error("worker stopped before the job completed")]
    WorkerGone,
}

/// Failure to hand a job to the worker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("job queue is full")]
    Full,

    #[error("job queue is closed")]
    Closed,
}

/// Handle to a queued job
#[derive(Debug)]
pub struct JobHandle<T> {
    job_id: Uuid,
    rx: oneshot::Receiver<Result<T, JobError>>,
}

impl<T> JobHandle<T> {
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Wait for the job to finish
    pub async fn wait(self) -> Result<T, JobError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(JobError::WorkerGone),
        }
    }
}

/// Sending side of the queue. Cloning shares the same worker.
pub struct JobQueue<H: JobHandler> {
    tx: mpsc::Sender<Envelope<H>>,
}

impl<H: JobHandler> Clone for JobQueue<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<H: JobHandler> JobQueue<H> {
    /// Spawn a worker for `handler` and return the queue feeding it.
    ///
    /// The worker exits once every queue clone is dropped and the backlog is
    /// drained.
    pub fn start(handler: Arc<H>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = JobWorker::new(handler, rx);
        let handle = tokio::spawn(worker.run());
        (Self { tx }, handle)
    }

    /// Queue a job without waiting for capacity
    pub fn enqueue(&self, job: H::Job) -> Result<JobHandle<H::Output>, EnqueueError> {
        let job_id = Uuid::now_v7();
        let (reply, rx) = oneshot::channel();

        self.tx
            .try_send(Envelope { job_id, job, reply })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => EnqueueError::Full,
                mpsc::error::TrySendError::Closed(_) => EnqueueError::Closed,
            })?;

        debug!(job_id = %job_id, "Job enqueued");
        Ok(JobHandle { job_id, rx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Doubler {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl JobHandler for Doubler {
        type Job = i64;
        type Output = i64;

        fn job_type(&self) -> &'static str {
            "test:double"
        }

        async fn handle(&self, job: i64) -> Result<i64, JobError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if job < 0 {
                return Err(JobError::Failed("negative input".to_string()));
            }
            Ok(job * 2)
        }
    }

    fn doubler() -> Arc<Doubler> {
        Arc::new(Doubler {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_job_result_is_delivered() {
        let (queue, _worker) = JobQueue::start(doubler(), 4);
        let handle = queue.enqueue(21).unwrap();
        assert_eq!(handle.wait().await, Ok(42));
    }

    #[tokio::test]
    async fn test_failure_is_delivered_and_worker_keeps_running() {
        let handler = doubler();
        let (queue, _worker) = JobQueue::start(handler.clone(), 4);

        let failed = queue.enqueue(-1).unwrap();
        let ok = queue.enqueue(5).unwrap();

        assert_eq!(
            failed.wait().await,
            Err(JobError::Failed("negative input".to_string()))
        );
        assert_eq!(ok.wait().await, Ok(10));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_worker_drains_then_exits_when_queue_dropped() {
        let handler = doubler();
        let (queue, worker) = JobQueue::start(handler.clone(), 8);

        let handles: Vec<_> = (0..3).map(|i| queue.enqueue(i).unwrap()).collect();
        drop(queue);

        worker.await.unwrap();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.wait().await, Ok(i as i64 * 2));
        }
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_stopped_is_closed() {
        let (queue, worker) = JobQueue::start(doubler(), 1);
        worker.abort();
        let _ = worker.await;

        assert_eq!(queue.enqueue(1).unwrap_err(), EnqueueError::Closed);
    }
}
