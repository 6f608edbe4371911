//! # bookstall-biz: Business-Action Contracts
//!
//! Typing contracts consumed by the business-logic dispatch framework. The
//! dispatch machinery itself lives outside this workspace; these traits only
//! pin down the shapes that registered actions must have.

/// A business action that consumes an input and produces no output.
///
/// A dispatcher holds registered actions behind this trait and feeds each
/// one the input value built from the incoming request.
pub trait ActionInOnly<In> {
    /// Runs the action against its input.
    fn perform(&mut self, input: In);
}

/// Marker for input-only actions fed an ordered batch of numeric ids.
///
/// Carries no behavior of its own; it exists so dispatch registration can
/// name this concrete input shape once.
pub trait IdBatchAction: ActionInOnly<Vec<i32>> {}
