//! Construction macro for message contexts
//!
//! `msg!` pairs keys with values at the call site, so the even-count rule of
//! the flat-list constructors holds by construction and the macro is
//! infallible.
//!
//! # Examples
//!
//! ```
//! use msgctx::msg;
//!
//! let ctx = msg!("where" => "handle_request", "attempt" => 2);
//! assert!(ctx.contains_key("where"));
//!
//! let empty = msg!();
//! ```

/// Build a [`Message`](crate::Message) from literal key => value pairs.
///
/// Values accept anything convertible to [`FieldValue`](crate::FieldValue).
///
/// # Examples
///
/// ```
/// use msgctx::msg;
///
/// let ctx = msg!("where" => "worker", "ok" => true);
/// assert_eq!(ctx.get("ok"), Some(&msgctx::FieldValue::Bool(true)));
/// ```
#[macro_export]
macro_rules! msg {
    () => {
        $crate::Message::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Message::from_entries([
            $((
                ::std::string::String::from($key),
                $crate::FieldValue::from($value),
            )),+
        ])
    };
}
