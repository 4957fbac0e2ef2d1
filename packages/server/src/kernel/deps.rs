//! Server dependencies for actions (using traits for testability)
//!
//! Stores and the email sender are trait objects so the same actions run
//! against PostgreSQL/SMTP in production and in-memory fakes in tests. The
//! sender is owned by the notification worker; actions reach it only by
//! enqueueing jobs.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domains::auth::JwtService;
use crate::domains::customers::CustomerStore;
use crate::domains::installers::InstallerStore;
use crate::domains::intake::NotifyAssignee;
use crate::kernel::jobs::JobQueue;
use crate::kernel::BaseEmailSender;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub installers: Arc<dyn InstallerStore>,
    pub customers: Arc<dyn CustomerStore>,
    /// Assignee notification jobs, consumed by a single worker task
    pub notifications: JobQueue<NotifyAssignee>,
    /// JWT service for token verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Build the dependencies and spawn the notification worker.
    ///
    /// The worker stops after every clone of the returned deps is dropped.
    pub fn start(
        installers: Arc<dyn InstallerStore>,
        customers: Arc<dyn CustomerStore>,
        email: Arc<dyn BaseEmailSender>,
        jwt_service: Arc<JwtService>,
        queue_capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let handler = Arc::new(NotifyAssignee::new(customers.clone(), email));
        let (notifications, worker) = JobQueue::start(handler, queue_capacity);

        let deps = Self {
            installers,
            customers,
            notifications,
            jwt_service,
        };
        (deps, worker)
    }
}
