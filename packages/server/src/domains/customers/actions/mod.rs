//! Customer directory queries. Writes happen through intake and the
//! notification job.

mod queries;

pub use queries::*;
