//! Error reporting for this crate.
//!
//! All error types in this crate implement the [`Error`] trait, which
//! extends [`std::error::Error`] with an optional `help` message that
//! front ends can display alongside the error itself.

use std::borrow::Cow;

/// Unified error interface for all errors in this crate.
pub trait Error: std::error::Error {
    /// A hint on how the user might resolve this error, if one exists.
    fn help(&self) -> Option<Cow<str>> {
        None
    }
}
