//! Structured logging facility for Codeshelf
//!
//! - Single initialization point via `init(profile)`
//! - Boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Per-operation correlation via a `request_id` span field
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use codeshelf_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
