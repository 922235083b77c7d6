//! Composition strategies for the rule algebra.
//!
//! Four sibling implementations of [`Specification`], one per way of
//! combining rules. [`Rule`](crate::Rule) wraps exactly one of these;
//! because each strategy is itself a specification, trees of arbitrary
//! depth fall out of ordinary composition. Nodes are shared behind `Arc`,
//! so a built tree is a DAG: the same sub-rule may appear in several
//! branches without being re-built.
//!
//! # Law sheet
//!
//! The laws the algebra commits to preserving. The first two are the whole
//! point of the crate: a composite that fails for several reasons must
//! report *all* of them, which rules out short-circuit evaluation.
//!
//! | Law | Statement |
//! |-----|-----------|
//! | AND-BOTH | [`Conjunction`] evaluates both operands for every candidate |
//! | OR-BOTH | [`Disjunction`] evaluates both operands for every candidate |
//! | NOT-TRANSPARENT | [`Negation`] never edits what the wrapped evaluation wrote |
//! | NOT-INVOL | double negation decides exactly like the wrapped specification |
//! | ID-VERBATIM | [`Identity`] is observationally identical to what it wraps |
//! | DETAIL-ORDER | details arrive in evaluation order: left operand first |
//!
//! AND-BOTH and OR-BOTH are deliberate deviations from ordinary boolean
//! evaluation and must never be "optimized" into short-circuit form.

use std::sync::Arc;

use crate::details::Details;
use crate::specification::Specification;

/// Delegates evaluation verbatim to the wrapped specification.
pub(crate) struct Identity<O: ?Sized, D> {
    spec: Arc<dyn Specification<O, D>>,
}

impl<O: ?Sized, D> Identity<O, D> {
    pub(crate) fn new(spec: Arc<dyn Specification<O, D>>) -> Self {
        Self { spec }
    }
}

impl<O: ?Sized, D> Specification<O, D> for Identity<O, D> {
    fn is_satisfied_by(&self, candidate: &O, details: &mut Details<D>) -> bool {
        self.spec.is_satisfied_by(candidate, details)
    }
}

/// Satisfied iff both operands are satisfied.
pub(crate) struct Conjunction<O: ?Sized, D> {
    left: Arc<dyn Specification<O, D>>,
    right: Arc<dyn Specification<O, D>>,
}

impl<O: ?Sized, D> Conjunction<O, D> {
    pub(crate) fn new(
        left: Arc<dyn Specification<O, D>>,
        right: Arc<dyn Specification<O, D>>,
    ) -> Self {
        Self { left, right }
    }
}

impl<O: ?Sized, D> Specification<O, D> for Conjunction<O, D> {
    fn is_satisfied_by(&self, candidate: &O, details: &mut Details<D>) -> bool {
        // Both operands run unconditionally (AND-BOTH): a false left side
        // must not suppress the right side's detail entries.
        let left = self.left.is_satisfied_by(candidate, details);
        let right = self.right.is_satisfied_by(candidate, details);
        left && right
    }
}

/// Satisfied iff either operand is satisfied.
pub(crate) struct Disjunction<O: ?Sized, D> {
    left: Arc<dyn Specification<O, D>>,
    right: Arc<dyn Specification<O, D>>,
}

impl<O: ?Sized, D> Disjunction<O, D> {
    pub(crate) fn new(
        left: Arc<dyn Specification<O, D>>,
        right: Arc<dyn Specification<O, D>>,
    ) -> Self {
        Self { left, right }
    }
}

impl<O: ?Sized, D> Specification<O, D> for Disjunction<O, D> {
    fn is_satisfied_by(&self, candidate: &O, details: &mut Details<D>) -> bool {
        // Both operands run unconditionally (OR-BOTH): a true left side
        // must not suppress the right side's detail entries.
        let left = self.left.is_satisfied_by(candidate, details);
        let right = self.right.is_satisfied_by(candidate, details);
        left || right
    }
}

/// Satisfied iff the wrapped specification is not.
///
/// Whatever the wrapped evaluation wrote stays in the sink untouched
/// (NOT-TRANSPARENT); only the boolean is inverted.
pub(crate) struct Negation<O: ?Sized, D> {
    spec: Arc<dyn Specification<O, D>>,
}

impl<O: ?Sized, D> Negation<O, D> {
    pub(crate) fn new(spec: Arc<dyn Specification<O, D>>) -> Self {
        Self { spec }
    }
}

impl<O: ?Sized, D> Specification<O, D> for Negation<O, D> {
    fn is_satisfied_by(&self, candidate: &O, details: &mut Details<D>) -> bool {
        !self.spec.is_satisfied_by(candidate, details)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
