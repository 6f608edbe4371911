//! # bookstall-core: Pure Domain Logic for Bookstall
//!
//! This crate is the **heart** of Bookstall. It contains the domain rules for
//! selling books as pure functions and values with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bookstall Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Layer (out of scope)                     │   │
//! │  │    Catalog pages ──► Basket form ──► Checkout ──► Orders       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookstall-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────────────────────┐  │   │
//! │  │   │   money   │  │   types   │  │        validation         │  │   │
//! │  │   │   Money   │  │   Book    │  │  Validatable / findings   │  │   │
//! │  │   │           │  │  LineItem │  │  line-number rule         │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Persistence Layer (out of scope)                   │   │
//! │  │     assigns row ids / foreign keys via attach_identity          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, LineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation and the findings pipeline
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Snapshot Prices**: A line item freezes its price at creation and never
//!    recomputes it, so historical orders stay financially consistent
//! 5. **Findings, not faults**: Bad user input produces validation findings the
//!    web layer can display; only programmer errors are hard errors
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstall_core::{Book, LineItem, Money};
//! use bookstall_core::validation::{Validatable, ValidationContext};
//!
//! let book = Book::new(7, "The Rust Programming Language", Money::from_cents(3499)).shared();
//! let mut item = LineItem::new(2, Some(book)).unwrap();
//! item.assign_line_number(1);
//!
//! assert_eq!(item.captured_price(), Money::from_cents(3499));
//! assert!(item.validate(&ValidationContext::new()).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bookstall_core::Money` instead of
// `use bookstall_core::money::Money`

pub use error::CoreError;
pub use money::Money;
pub use types::*;
pub use validation::{Validatable, ValidationContext, ValidationFinding};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest position a line item may occupy within an order.
pub const MIN_LINE_NUMBER: u8 = 1;

/// Highest position a line item may occupy within an order.
///
/// ## Business Reason
/// A self-service order carries at most 5 lines. Larger orders go through
/// the order desk, so a line number outside this range is a data-entry
/// problem to report, not a fault.
pub const MAX_LINE_NUMBER: u8 = 5;

/// Quantity above which a line must be ordered by phone.
///
/// ## Business Reason
/// Bulk purchases (more than 100 copies) need stock and freight checks a
/// self-service checkout cannot make. Exceeding this yields an advisory
/// finding on the quantity field; it is not a hard rejection.
pub const PHONE_ORDER_THRESHOLD: i64 = 100;

/// The order desk phone line quoted in the bulk-order finding.
pub const PHONE_ORDER_LINE: &str = "01234-5678-90";
