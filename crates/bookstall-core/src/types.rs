//! # Domain Types
//!
//! Core domain types for selling books.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌──────────────────────────┐           │
//! │  │      Book       │            │        LineItem          │           │
//! │  │  ─────────────  │            │  ──────────────────────  │           │
//! │  │  id             │◄───────────│  chosen_book (required)  │           │
//! │  │  title          │   shared   │  quantity                │           │
//! │  │  price_cents    │   handle   │  captured_price (frozen) │           │
//! │  │  published_on   │            │  line_num [1..=5]        │           │
//! │  └─────────────────┘            │  id / order_id / book_id │           │
//! │                                 │  (persistence-assigned)  │           │
//! │                                 └──────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item copies the book's price at construction time and never
//! recomputes it. If the book is discounted next month, last month's orders
//! keep the price the customer actually paid.
//!
//! ## Two Lifecycle Phases
//! - **Unpersisted, fully specified**: built via [`LineItem::new`], no row id
//! - **Persisted**: the persistence layer calls [`LineItem::attach_identity`]
//!   exactly once to record the row id and foreign keys
//!
//! There are no further transitions; validation may be re-run on every save
//! attempt without changing the item.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;
use crate::validation::{validate_line_number, Validatable, ValidationContext, ValidationFinding};
use crate::{PHONE_ORDER_LINE, PHONE_ORDER_THRESHOLD};

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog, as consumed by order lines.
///
/// ## Withdrawn-From-Sale Sentinel
/// A negative current price marks a book that is temporarily not
/// purchasable. How the sentinel is set or cleared is the catalog's
/// business; line-item validation only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier, assigned by the persistence layer.
    pub id: i64,

    /// Display title, quoted in validation findings.
    pub title: String,

    /// Current sale price in cents. Negative = withdrawn from sale.
    pub price_cents: i64,

    /// When the book was published, if known.
    pub published_on: Option<DateTime<Utc>>,
}

impl Book {
    /// Creates a catalog book with a known identity and price.
    pub fn new(id: i64, title: impl Into<String>, price: Money) -> Self {
        Book {
            id,
            title: title.into(),
            price_cents: price.cents(),
            published_on: None,
        }
    }

    /// Sets the publication date.
    pub fn with_published_on(mut self, published_on: DateTime<Utc>) -> Self {
        self.published_on = Some(published_on);
        self
    }

    /// Returns the current sale price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Replaces the current sale price.
    #[inline]
    pub fn set_price(&mut self, price: Money) {
        self.price_cents = price.cents();
    }

    /// Checks whether the book is currently purchasable.
    #[inline]
    pub fn is_for_sale(&self) -> bool {
        self.price_cents >= 0
    }

    /// Wraps the book in a shared handle for order lines to reference.
    pub fn shared(self) -> SharedBook {
        Rc::new(RefCell::new(self))
    }
}

/// Shared handle to a live catalog book.
///
/// The order line and the surrounding application see the same book, so a
/// price change made after the line was created is visible at validation
/// time. Single-threaded by contract, hence `Rc` rather than `Arc`.
pub type SharedBook = Rc<RefCell<Book>>;

// =============================================================================
// Line Item
// =============================================================================

/// One line of an order: a book and how many copies of it.
///
/// Fields are private and set once at construction; the persistence layer
/// populates identifiers through [`LineItem::attach_identity`], never
/// through ambient setters.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Row identity, `None` until the persistence layer attaches it.
    id: Option<i64>,

    /// Position within the order, assigned by the order-building layer.
    /// Valid range is checked at validation time, not here.
    line_num: u8,

    /// Number of copies ordered on this line.
    quantity: i64,

    /// Price in cents at the moment the line was created (frozen).
    /// This is the authoritative snapshot: later catalog price changes
    /// must not rewrite order history.
    captured_price: Money,

    /// Owning order, populated at persistence time.
    order_id: Option<i64>,

    /// Referenced book row, populated at persistence time.
    book_id: Option<i64>,

    /// The live catalog book this line sells.
    chosen_book: SharedBook,
}

impl LineItem {
    /// Creates a line item for `quantity` copies of `book`, snapshotting
    /// the book's current price.
    ///
    /// ## Errors
    /// Returns [`CoreError::MissingBook`] when `book` is `None` - callers
    /// typically pass the result of a catalog lookup straight in, and a
    /// missing book is a bug in the calling code, not user input.
    pub fn new(quantity: i64, book: Option<SharedBook>) -> Result<Self, CoreError> {
        let chosen_book = book.ok_or(CoreError::MissingBook)?;
        let captured_price = chosen_book.borrow().price();

        Ok(LineItem {
            id: None,
            line_num: 0,
            quantity,
            captured_price,
            order_id: None,
            book_id: None,
            chosen_book,
        })
    }

    /// Reconstructs a persisted line item from its stored fields.
    ///
    /// This is the materialization path for the persistence layer: every
    /// field is supplied up front, so no partially-initialized item ever
    /// exists. The stored captured price is taken as-is - it is a snapshot,
    /// not something to recompute from the book.
    pub fn from_stored(
        id: i64,
        line_num: u8,
        quantity: i64,
        captured_price: Money,
        order_id: i64,
        book_id: i64,
        chosen_book: SharedBook,
    ) -> Self {
        LineItem {
            id: Some(id),
            line_num,
            quantity,
            captured_price,
            order_id: Some(order_id),
            book_id: Some(book_id),
            chosen_book,
        }
    }

    /// Records the identity assigned by the persistence layer.
    ///
    /// Transitions the item from "unpersisted" to "persisted": stores the
    /// row id and owning order, and records the chosen book's id as the
    /// foreign key. May be called exactly once.
    ///
    /// ## Errors
    /// Returns [`CoreError::IdentityAttached`] if the item is already
    /// persisted; the original identity is left untouched.
    pub fn attach_identity(&mut self, id: i64, order_id: i64) -> Result<(), CoreError> {
        if let Some(existing) = self.id {
            return Err(CoreError::IdentityAttached { id: existing });
        }

        self.id = Some(id);
        self.order_id = Some(order_id);
        self.book_id = Some(self.chosen_book.borrow().id);
        Ok(())
    }

    /// Sets this line's position within its order.
    pub fn assign_line_number(&mut self, line_num: u8) {
        self.line_num = line_num;
    }

    /// Row identity, if the item has been persisted.
    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Position within the order.
    #[inline]
    pub fn line_number(&self) -> u8 {
        self.line_num
    }

    /// Number of copies ordered.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// The price snapshot taken at construction.
    #[inline]
    pub fn captured_price(&self) -> Money {
        self.captured_price
    }

    /// Owning order id, if persisted.
    #[inline]
    pub fn order_id(&self) -> Option<i64> {
        self.order_id
    }

    /// Referenced book id, if persisted.
    #[inline]
    pub fn book_id(&self) -> Option<i64> {
        self.book_id
    }

    /// The live catalog book this line references.
    #[inline]
    pub fn chosen_book(&self) -> &SharedBook {
        &self.chosen_book
    }

    /// Whether the persistence layer has assigned this item its identity.
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The line total: captured price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.captured_price * self.quantity
    }
}

/// Business-rule validation for a line item.
///
/// All rules run on every pass - nothing short-circuits, so the purchaser
/// sees every problem at once. None of these are hard failures; the save
/// pipeline decides what blocks.
impl Validatable for LineItem {
    fn validate(&self, _ctx: &ValidationContext) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        // Declarative range constraint, run in the same pass as the
        // custom rules below.
        if let Some(finding) = validate_line_number(self.line_num) {
            findings.push(finding);
        }

        // Cross-entity check against the book's CURRENT price, not the
        // captured snapshot: a book can be withdrawn after the line was
        // created, and the order must not go through.
        let book = self.chosen_book.borrow();
        if book.price().is_negative() {
            findings.push(ValidationFinding::new(format!(
                "Sorry, the book '{}' is not for sale.",
                book.title
            )));
        }

        // Advisory bulk-order rule, scoped to the quantity field.
        if self.quantity > PHONE_ORDER_THRESHOLD {
            findings.push(ValidationFinding::for_field(
                "quantity",
                format!(
                    "If you want to order more than {} books please phone us on {}",
                    PHONE_ORDER_THRESHOLD, PHONE_ORDER_LINE
                ),
            ));
        }

        findings
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
