//! # msgctx
//!
//! An ordered key-value logging context with columnar string formatting.
//!
//! A [`Message`] collects key-value pairs in insertion order, clones cheaply
//! so a context can follow a call stack, and renders as a single log line:
//! positional columns (aligned per the process-wide format) followed by
//! trailing `key=value` pairs.
//!
//! ## Features
//!
//! - **Ordered entries**: insertion order preserved, overwrite keeps position
//! - **Columnar output**: elastic or fixed-width positional columns
//! - **Call-stack propagation**: `clone_with` for nested-call contexts
//! - **Identifiers**: time-derived `muid`/`rmuid` assigned per the format
//!
//! ## Example
//!
//! ```
//! use msgctx::prelude::*;
//!
//! let ctx = msgctx::msg!("where" => "fetch_user", "user_id" => 42);
//! let nested = ctx.clone_with(&["where".into(), "fetch_roles".into()]).unwrap();
//! println!("{}", nested);
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        next_muid, next_rmuid, reset_default, set_format, ErrorTrace, FieldSpec, FieldValue,
        FormatConfig, FormatField, FormatOptions, Message, MessageError, Result,
    };
}

pub use crate::core::{
    next_muid, next_rmuid, reset_default, set_format, ErrorTrace, FieldSpec, FieldValue,
    FormatConfig, FormatField, FormatOptions, Message, MessageError, Result,
};
