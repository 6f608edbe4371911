//! # Error Types
//!
//! Domain-specific error types for bookstall-core.
//!
//! ## Errors vs. Findings
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Two Failure Channels                                │
//! │                                                                         │
//! │  CoreError (this file)                                                  │
//! │  └── Programmer errors: a required association is missing, an          │
//! │      identity is attached twice. Fatal, returned as Err immediately.   │
//! │                                                                         │
//! │  ValidationFinding (validation module)                                  │
//! │  └── User-input problems: line number out of range, bulk quantity,     │
//! │      withdrawn book. Non-fatal, collected and shown on the form.       │
//! │                                                                         │
//! │  A line item NEVER returns Err for bad user input.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the id involved, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Core domain errors.
///
/// These represent bugs in the calling code, not bad user input. Bad user
/// input flows through [`crate::validation::ValidationFinding`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A line item was constructed without its required book.
    ///
    /// ## When This Occurs
    /// - The caller's catalog lookup came back empty and the result was
    ///   passed straight into `LineItem::new`
    ///
    /// This is never recoverable by validation: the price snapshot cannot
    /// be taken without a book.
    #[error("a line item requires a chosen book")]
    MissingBook,

    /// `attach_identity` was called on an already-persisted line item.
    ///
    /// Identity is assigned once by the persistence layer and is immutable
    /// afterwards.
    #[error("line item {id} already has its identity attached")]
    IdentityAttached { id: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================
