//! Customer intake.
//!
//! ```text
//! intake(input)
//!   ├─► validate           (nothing persisted on failure)
//!   ├─► customers.insert
//!   ├─► resolve assignee   (NoAssignee keeps the customer)
//!   └─► enqueue NotifyAssigneeJob
//!          └─► worker: set assignee ─► send email ─► record sent/failed
//! ```

pub mod message;
pub mod notify;
pub mod workflow;

use thiserror::Error;

use crate::common::{AuthError, CustomerId, ValidationError};
use crate::kernel::jobs::EnqueueError;
use crate::kernel::StoreError;

pub use notify::{NotificationOutcome, NotifyAssignee, NotifyAssigneeJob};
pub use workflow::{intake, IntakeReceipt};

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The customer was stored but nobody can be assigned
    #[error("no installer available for customer {customer_id}: no fallback installer configured")]
    NoAssignee { customer_id: CustomerId },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("could not queue assignee notification: {0}")]
    Enqueue(#[from] EnqueueError),
}
