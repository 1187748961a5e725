//! Core message context types and the process-wide format registry

pub mod error;
pub mod field_value;
pub mod format;
pub mod message;
pub mod muid;
pub mod registry;

pub use error::{MessageError, Result};
pub use field_value::{ErrorTrace, FieldValue};
pub use format::{
    FieldSpec, FormatConfig, FormatField, FormatOptions, DEFAULT_FIELD_WIDTH, MIN_MUID_WIDTH,
    MUID_KEY, RMUID_KEY,
};
pub use message::Message;
pub use muid::{next_muid, next_rmuid};
pub use registry::{reset_default, set_format};
