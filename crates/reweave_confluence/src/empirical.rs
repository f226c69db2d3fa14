//! The empirical invalidation fallback.
//!
//! When a rule carries behavior static analysis cannot see (negative
//! elements, opaque hooks), the question "does applying P break Q's match?"
//! is answered by experiment: apply P to a disposable copy of the host and
//! check whether Q's exact binding is still recognizable afterwards.

use reweave_foundation::{Error, ErrorContext, Result};
use reweave_grammar::{Applicator, Candidate, MatchOption, Recognizer};

use crate::matrix::Invalidation;

/// Applies P to a disposable copy of the candidate's graph and re-runs Q's
/// recognition against the mutated copy.
///
/// Returns [`Invalidation::Safe`] iff one of the rediscovered options binds
/// exactly the same element sequence (positional identity across nodes, arcs,
/// and hyperarcs) as Q's original binding; otherwise
/// [`Invalidation::Unsafe`]. Mutation is strictly confined to the copy:
/// element ids are stable across the snapshot clone, so both options'
/// bindings carry over to it unchanged.
///
/// # Errors
/// Returns [`Error::apply_failed`] if the applicator fails mid-mutation. The
/// copy is discarded regardless.
pub fn empirical_check(
    recognizer: &dyn Recognizer,
    applicator: &dyn Applicator,
    p: &MatchOption,
    q: &MatchOption,
    candidate: &Candidate,
) -> Result<Invalidation> {
    let mut copy = candidate.graph().clone();

    // P is applied with no extra parameters; one apply, one recognize, no
    // retries.
    applicator.apply(p, &mut copy, &[]).map_err(|e| {
        Error::apply_failed(&p.rule().name, e.to_string())
            .with_context(ErrorContext::new().with_rule(&p.rule().name))
    })?;

    let rediscovered = recognizer.recognize(q.rule(), &copy);
    let original = q.bound_signature();
    let reproduced = rediscovered
        .iter()
        .any(|option| option.bound_signature() == original);

    Ok(if reproduced {
        Invalidation::Safe
    } else {
        Invalidation::Unsafe
    })
}
