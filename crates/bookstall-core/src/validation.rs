//! # Validation Module
//!
//! Business-rule validation for Bookstall entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form (out of scope)                                      │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Entities implement Validatable and report findings                │
//! │  ├── validate_all aggregates findings across every entity saved        │
//! │  └── The caller decides whether findings block the save                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database constraints (out of scope)                          │
//! │                                                                         │
//! │  A finding is a message, never a panic or an Err. All rules run on     │
//! │  every pass; nothing is silently dropped.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{MAX_LINE_NUMBER, MIN_LINE_NUMBER};

// =============================================================================
// Validation Finding
// =============================================================================

/// A non-fatal, structured message describing why a record fails a business
/// rule, optionally scoped to one field.
///
/// Findings are collected, not thrown: the web layer shows them next to the
/// form and the save pipeline decides whether they block persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFinding {
    /// Human-readable description of the problem.
    pub message: String,

    /// The field the finding is scoped to, if any. `None` means the
    /// finding applies to the record as a whole.
    pub field: Option<String>,
}

impl ValidationFinding {
    /// Creates a finding that applies to the record as a whole.
    pub fn new(message: impl Into<String>) -> Self {
        ValidationFinding {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a finding scoped to a single field.
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationFinding {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

// =============================================================================
// Validation Context
// =============================================================================

/// Ambient services available to validation rules.
///
/// Rules receive the context to fit the standard validation signature; a
/// rule that needs, say, a persistence session can look it up by type. The
/// line-item rules themselves read only their own entity state.
#[derive(Default)]
pub struct ValidationContext {
    services: HashMap<TypeId, Box<dyn Any>>,
}

impl ValidationContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        ValidationContext::default()
    }

    /// Registers an ambient service, replacing any previous service of the
    /// same type.
    pub fn register<S: Any>(&mut self, service: S) {
        self.services.insert(TypeId::of::<S>(), Box::new(service));
    }

    /// Looks up an ambient service by type.
    pub fn service<S: Any>(&self) -> Option<&S> {
        self.services
            .get(&TypeId::of::<S>())
            .and_then(|service| service.downcast_ref())
    }
}

// =============================================================================
// Validatable
// =============================================================================

/// An entity that reports business-rule findings.
///
/// Implementations must evaluate every rule on every call - no
/// short-circuiting on the first failure - and must not mutate the entity,
/// so a save pipeline can re-run validation on each attempt.
pub trait Validatable {
    /// Runs every rule and returns the findings, possibly empty.
    fn validate(&self, ctx: &ValidationContext) -> Vec<ValidationFinding>;
}

/// Aggregates findings from every entity in a save set.
///
/// This is the seam a save pipeline consumes: findings come back
/// concatenated in entity order, and whether they block the save is the
/// caller's decision.
pub fn validate_all<'a, I>(ctx: &ValidationContext, entities: I) -> Vec<ValidationFinding>
where
    I: IntoIterator<Item = &'a dyn Validatable>,
{
    let mut findings = Vec::new();
    for entity in entities {
        findings.extend(entity.validate(ctx));
    }

    if findings.is_empty() {
        debug!("validation pass clean");
    } else {
        warn!(count = findings.len(), "validation pass produced findings");
    }

    findings
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line item's position within its order.
///
/// ## Rules
/// - Must be between 1 and 5 inclusive
///
/// Out-of-range positions come from orders that grew past the self-service
/// limit; this reports rather than rejects so the form can explain.
pub fn validate_line_number(line_num: u8) -> Option<ValidationFinding> {
    if (MIN_LINE_NUMBER..=MAX_LINE_NUMBER).contains(&line_num) {
        None
    } else {
        Some(ValidationFinding::for_field(
            "line_number",
            format!("This order is over the limit of {} books.", MAX_LINE_NUMBER),
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_line_number_range() {
        for n in 1..=5u8 {
            assert_eq!(validate_line_number(n), None);
        }

        for n in [0u8, 6, 200] {
            let finding = validate_line_number(n).unwrap();
            assert_eq!(finding.field.as_deref(), Some("line_number"));
            assert_eq!(finding.message, "This order is over the limit of 5 books.");
        }
    }

    #[test]
    fn test_finding_serializes_for_the_form() {
        let finding = ValidationFinding::for_field("quantity", "too many");
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "too many", "field": "quantity" })
        );

        let general = ValidationFinding::new("whole-record problem");
        let json = serde_json::to_value(&general).unwrap();
        assert_eq!(json["field"], serde_json::Value::Null);
    }

    #[test]
    fn test_context_service_lookup() {
        struct FakeSession {
            name: &'static str,
        }

        let mut ctx = ValidationContext::new();
        assert!(ctx.service::<FakeSession>().is_none());

        ctx.register(FakeSession { name: "session-1" });
        assert_eq!(ctx.service::<FakeSession>().unwrap().name, "session-1");

        // Lookup is by type; an unregistered type misses safely.
        assert!(ctx.service::<String>().is_none());

        // Re-registering replaces.
        ctx.register(FakeSession { name: "session-2" });
        assert_eq!(ctx.service::<FakeSession>().unwrap().name, "session-2");
    }

    #[test]
    fn test_validate_all_concatenates_in_entity_order() {
        struct FixedFindings(Vec<ValidationFinding>);

        impl Validatable for FixedFindings {
            fn validate(&self, _ctx: &ValidationContext) -> Vec<ValidationFinding> {
                self.0.clone()
            }
        }

        let clean = FixedFindings(vec![]);
        let one = FixedFindings(vec![ValidationFinding::new("first")]);
        let two = FixedFindings(vec![
            ValidationFinding::new("second"),
            ValidationFinding::for_field("quantity", "third"),
        ]);

        let ctx = ValidationContext::new();
        let findings = validate_all(
            &ctx,
            [
                &clean as &dyn Validatable,
                &one as &dyn Validatable,
                &two as &dyn Validatable,
            ],
        );

        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn test_validate_all_over_a_save_set_of_line_items() {
        use crate::{Book, LineItem, Money};

        let good_book = Book::new(1, "Refactoring", Money::from_cents(4200)).shared();
        let withdrawn = Book::new(2, "Vaporware", Money::from_cents(-100)).shared();

        let mut clean = LineItem::new(1, Some(good_book)).unwrap();
        clean.assign_line_number(1);
        let mut flagged = LineItem::new(2, Some(withdrawn)).unwrap();
        flagged.assign_line_number(2);

        let ctx = ValidationContext::new();
        let findings = validate_all(&ctx, [&clean as &dyn Validatable, &flagged]);

        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "Sorry, the book 'Vaporware' is not for sale."
        );
    }
}
