//! The [`Rule`] decorator: evaluation entry points and combinators.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combinator::{Conjunction, Disjunction, Identity, Negation};
use crate::details::Details;
use crate::specification::{from_fn, Always, Never, Specification};

/// A combinable rule over candidates of type `O`, explaining itself with
/// detail entries of type `D`.
///
/// A `Rule` wraps one strategy node and is immutable once constructed:
/// every combinator returns a *new* rule and leaves its operands intact,
/// so sub-rules can be reused in several branches of several trees. The
/// only mutable state is the snapshot of the most recent
/// [`evaluate`](Rule::evaluate) call, which is owned exclusively by this
/// instance and replaced wholesale on each call.
///
/// Two evaluation forms exist:
///
/// - [`evaluate`](Rule::evaluate) takes `&mut self`, captures the details
///   of this one invocation, and makes them available through
///   [`last_details`](Rule::last_details). Exclusive access is required
///   precisely because the snapshot is per-instance state.
/// - the [`Specification`] impl takes `&self` and writes into a
///   caller-owned sink. It touches no state of this rule, so a built tree
///   can be evaluated from many threads at once through this form.
///
/// ```
/// use franken_rules::{Details, Rule};
///
/// let even = Rule::from_fn(|n: &u64, details: &mut Details<String>| {
///     if n % 2 == 0 {
///         true
///     } else {
///         details.push(format!("{n} is odd"));
///         false
///     }
/// });
/// let small = Rule::from_fn(|n: &u64, details: &mut Details<String>| {
///     if *n < 100 {
///         true
///     } else {
///         details.push(format!("{n} is too large"));
///         false
///     }
/// });
///
/// let mut even_and_small = even.and(small);
/// assert!(!even_and_small.evaluate(&123));
/// // Both reasons are reported, not just the first.
/// assert_eq!(even_and_small.last_details().len(), 2);
/// ```
pub struct Rule<O: ?Sized, D> {
    spec: Arc<dyn Specification<O, D>>,
    last_details: Details<D>,
}

impl<O, D> Rule<O, D>
where
    O: ?Sized + 'static,
    D: 'static,
{
    /// Wrap any [`Specification`] as a rule.
    #[must_use]
    pub fn new<S>(spec: S) -> Self
    where
        S: Specification<O, D> + 'static,
    {
        Self::from_strategy(Arc::new(Identity::new(Arc::new(spec))))
    }

    /// Wrap a closure as a leaf rule.
    #[must_use]
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&O, &mut Details<D>) -> bool + Send + Sync + 'static,
    {
        Self::new(from_fn(predicate))
    }

    /// The rule every candidate satisfies. Identity element of [`and`](Rule::and).
    #[must_use]
    pub fn always() -> Self {
        Self::new(Always)
    }

    /// The rule no candidate satisfies. Identity element of [`or`](Rule::or).
    #[must_use]
    pub fn never() -> Self {
        Self::new(Never)
    }

    /// Conjunction of every rule in `rules`. Empty input yields
    /// [`always`](Rule::always) (vacuous truth).
    #[must_use]
    pub fn all<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<O, D>>,
    {
        let mut iter = rules.into_iter();
        let Some(first) = iter.next() else {
            return Self::always();
        };
        iter.fold(first, |acc, rule| {
            Self::from_strategy(Arc::new(Conjunction::new(acc.spec, rule.spec)))
        })
    }

    /// Disjunction of every rule in `rules`. Empty input yields
    /// [`never`](Rule::never).
    #[must_use]
    pub fn any<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule<O, D>>,
    {
        let mut iter = rules.into_iter();
        let Some(first) = iter.next() else {
            return Self::never();
        };
        iter.fold(first, |acc, rule| {
            Self::from_strategy(Arc::new(Disjunction::new(acc.spec, rule.spec)))
        })
    }

    fn from_strategy(spec: Arc<dyn Specification<O, D>>) -> Self {
        Self {
            spec,
            last_details: Details::new(),
        }
    }

    /// Evaluate `candidate` and capture this invocation's details.
    ///
    /// A fresh empty sink is allocated for every call and replaces the
    /// previous snapshot before the tree is walked, so entries from an
    /// earlier invocation never leak into [`last_details`](Rule::last_details).
    /// Sub-rules used as operands keep their own snapshots untouched —
    /// only this composite records anything here.
    pub fn evaluate(&mut self, candidate: &O) -> bool {
        self.last_details = Details::new();
        let satisfied = self.spec.is_satisfied_by(candidate, &mut self.last_details);
        tracing::trace!(
            satisfied,
            details = self.last_details.len(),
            "rule evaluated"
        );
        satisfied
    }

    /// Details captured by the most recent [`evaluate`](Rule::evaluate)
    /// call. Empty if that evaluation fully succeeded or if no such call
    /// was ever made.
    #[must_use]
    pub fn last_details(&self) -> &Details<D> {
        &self.last_details
    }

    /// Evaluate `candidate` into an owned [`Verdict`], leaving this rule's
    /// snapshot untouched. The report form of choice when the rule is
    /// shared or evaluated concurrently.
    #[must_use]
    pub fn verdict(&self, candidate: &O) -> Verdict<D> {
        let mut details = Details::new();
        let satisfied = self.spec.is_satisfied_by(candidate, &mut details);
        Verdict { satisfied, details }
    }

    /// New rule satisfied when both `self` and `other` are.
    ///
    /// Both operands are evaluated for every candidate, so a rejection by
    /// `self` still lets `other` explain its own rejection.
    #[must_use]
    pub fn and<S>(&self, other: S) -> Self
    where
        S: Specification<O, D> + 'static,
    {
        Self::from_strategy(Arc::new(Conjunction::new(
            Arc::clone(&self.spec),
            Arc::new(other),
        )))
    }

    /// New rule satisfied when `self` is and `other` is not.
    #[must_use]
    pub fn and_not<S>(&self, other: S) -> Self
    where
        S: Specification<O, D> + 'static,
    {
        Self::from_strategy(Arc::new(Conjunction::new(
            Arc::clone(&self.spec),
            Arc::new(Negation::new(Arc::new(other))),
        )))
    }

    /// New rule satisfied when either `self` or `other` is.
    ///
    /// Both operands are evaluated for every candidate; acceptance by
    /// `self` does not suppress `other`'s detail entries.
    #[must_use]
    pub fn or<S>(&self, other: S) -> Self
    where
        S: Specification<O, D> + 'static,
    {
        Self::from_strategy(Arc::new(Disjunction::new(
            Arc::clone(&self.spec),
            Arc::new(other),
        )))
    }

    /// New rule satisfied when `self` is or `other` is not.
    #[must_use]
    pub fn or_not<S>(&self, other: S) -> Self
    where
        S: Specification<O, D> + 'static,
    {
        Self::from_strategy(Arc::new(Disjunction::new(
            Arc::clone(&self.spec),
            Arc::new(Negation::new(Arc::new(other))),
        )))
    }

    /// New rule satisfied when `self` is not. The wrapped evaluation's
    /// details are passed through untouched.
    #[must_use]
    pub fn not(&self) -> Self {
        Self::from_strategy(Arc::new(Negation::new(Arc::clone(&self.spec))))
    }
}

/// The canonical evaluation form: recurse into the strategy tree, writing
/// into a caller-owned sink. Only appends; the snapshot of `self` is not
/// read or written, which is what makes this form safe to call on a shared
/// rule from several threads.
impl<O, D> Specification<O, D> for Rule<O, D>
where
    O: ?Sized + 'static,
    D: Send + Sync + 'static,
{
    fn is_satisfied_by(&self, candidate: &O, details: &mut Details<D>) -> bool {
        self.spec.is_satisfied_by(candidate, details)
    }
}

/// Shares the strategy tree; the snapshot is copied, so the clone starts
/// with the same last-evaluation details but records its own from then on.
impl<O: ?Sized, D: Clone> Clone for Rule<O, D> {
    fn clone(&self) -> Self {
        Self {
            spec: Arc::clone(&self.spec),
            last_details: self.last_details.clone(),
        }
    }
}

impl<O: ?Sized, D: fmt::Debug> fmt::Debug for Rule<O, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("last_details", &self.last_details)
            .finish_non_exhaustive()
    }
}

/// Owned result of a single rule evaluation: the boolean plus every detail
/// entry the tree reported for that candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "D: Deserialize<'de> + Eq + Hash + Clone"))]
pub struct Verdict<D> {
    #[serde(rename = "ok")]
    satisfied: bool,
    #[serde(rename = "why")]
    details: Details<D>,
}

impl<D> Verdict<D> {
    /// Whether the candidate satisfied the rule.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.satisfied
    }

    /// The details reported during this evaluation, in report order.
    #[must_use]
    pub fn details(&self) -> &Details<D> {
        &self.details
    }

    /// Consume the verdict, keeping only the details.
    #[must_use]
    pub fn into_details(self) -> Details<D> {
        self.details
    }
}

/// Renders `satisfied`/`unsatisfied` followed by one indented line per
/// detail entry.
impl<D: fmt::Display> fmt::Display for Verdict<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.satisfied {
            "satisfied"
        } else {
            "unsatisfied"
        })?;
        for detail in &self.details {
            write!(f, "\n  - {detail}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
