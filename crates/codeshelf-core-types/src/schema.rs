//! Canonical schema constants for structured logging
//!
//! Every log line emitted through the logging macros uses these keys so that
//! captured output can be asserted on field by field.

// Boundary fields
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_SNIPPET_ID: &str = "snippet_id";

// Listing
pub const FIELD_RESULT_LEN: &str = "result_len";
pub const FIELD_FILTER_LABEL: &str = "filter_label";

// Outcome of a coordinator operation (ok / validation_failed / not_found / conflict)
pub const FIELD_OUTCOME: &str = "outcome";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
