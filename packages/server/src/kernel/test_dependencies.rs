// TestDependencies - in-memory implementations for testing
//
// Builds ServerDeps over memory stores and a recording email sender.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use super::{BaseEmailSender, EmailError, ServerDeps};
use crate::domains::auth::JwtService;
use crate::domains::customers::MemoryCustomerStore;
use crate::domains::installers::MemoryInstallerStore;

// =============================================================================
// Mock Email Sender
// =============================================================================

/// Arguments captured from a send call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: AtomicBool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender whose every call fails with a transport error
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.set_failing(true);
        sender
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Captured calls, including failed ones
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl BaseEmailSender for MockEmailSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::Transport("mock transport failure".to_string()));
        }
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub const TEST_JWT_SECRET: &str = "test-secret";
pub const TEST_JWT_ISSUER: &str = "installer-dispatch-test";

/// Memory-backed dependencies with handles to every fake
pub struct TestDependencies {
    pub installers: Arc<MemoryInstallerStore>,
    pub customers: Arc<MemoryCustomerStore>,
    pub email: Arc<MockEmailSender>,
    pub jwt_service: Arc<JwtService>,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self::with_email(MockEmailSender::new())
    }

    pub fn with_email(email: MockEmailSender) -> Self {
        Self {
            installers: Arc::new(MemoryInstallerStore::new()),
            customers: Arc::new(MemoryCustomerStore::new()),
            email: Arc::new(email),
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
        }
    }

    /// Build `ServerDeps` and start the notification worker
    pub fn start_server_deps(&self, queue_capacity: usize) -> (ServerDeps, JoinHandle<()>) {
        ServerDeps::start(
            self.installers.clone(),
            self.customers.clone(),
            self.email.clone(),
            self.jwt_service.clone(),
            queue_capacity,
        )
    }
}
