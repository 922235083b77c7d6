//! Composable boolean rules that explain themselves.
//!
//! A [`Rule`] wraps a predicate — anything implementing [`Specification`]
//! — and combines with other rules through `and` / `or` / `not` /
//! `and_not` / `or_not`, producing new immutable rules over a shared
//! strategy DAG. Evaluation walks the tree writing human-readable
//! explanations into one shared [`Details`] sink, which preserves
//! insertion order and silently drops repeated entries.
//!
//! ```text
//! Rule<O, D>
//! ├── strategy      : Identity | Conjunction | Disjunction | Negation
//! │                   (each strategy is itself a Specification)
//! └── last_details  : Details<D>   (snapshot of the latest owned evaluation)
//! ```
//!
//! Conjunction and disjunction evaluate **both** operands for every
//! candidate instead of short-circuiting. That is the point of the crate:
//! after a failed composite check, the caller sees every reason the
//! candidate was rejected, not just the first one encountered.
//!
//! # Example
//!
//! ```
//! use franken_rules::{Details, Rule};
//!
//! struct Service {
//!     name: String,
//!     replicas: u32,
//! }
//!
//! let named = Rule::from_fn(|service: &Service, details: &mut Details<String>| {
//!     if service.name.is_empty() {
//!         details.push("service name must not be empty".to_string());
//!         return false;
//!     }
//!     true
//! });
//! let replicated = Rule::from_fn(|service: &Service, details: &mut Details<String>| {
//!     if service.replicas == 0 {
//!         details.push("at least one replica is required".to_string());
//!         return false;
//!     }
//!     true
//! });
//!
//! let mut deployable = named.and(replicated);
//!
//! let broken = Service {
//!     name: String::new(),
//!     replicas: 0,
//! };
//! assert!(!deployable.evaluate(&broken));
//!
//! // Both violations are reported, in evaluation order.
//! let reasons: Vec<&str> = deployable.last_details().iter().map(String::as_str).collect();
//! assert_eq!(
//!     reasons,
//!     [
//!         "service name must not be empty",
//!         "at least one replica is required",
//!     ]
//! );
//!
//! let healthy = Service {
//!     name: "ingest".to_string(),
//!     replicas: 3,
//! };
//! assert!(deployable.evaluate(&healthy));
//! assert!(deployable.last_details().is_empty());
//! ```
//!
//! # Concurrency
//!
//! A built rule tree is read-only. [`Rule::evaluate`] needs `&mut self`
//! because it stores the invocation's details on the rule; for shared or
//! concurrent use, evaluate through the [`Specification`] impl with a
//! caller-owned sink, or take an owned report with [`Rule::verdict`] —
//! neither touches per-rule state.

#![forbid(unsafe_code)]

mod combinator;
mod details;
mod rule;
mod specification;

pub use details::Details;
pub use rule::{Rule, Verdict};
pub use specification::{from_fn, Always, FromFn, Never, Specification};
