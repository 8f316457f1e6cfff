//! Types shared by the Codeshelf error and logging facilities
//!
//! - **Correlation**: `RequestId` stamped on every coordinator operation
//! - **Schema constants**: canonical field keys and event names for
//!   structured logs

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
