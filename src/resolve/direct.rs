//! Direct-relation resolver: the minimal, non-dominated subset of a
//! transitive broader/narrower closure.
//!
//! The transitive edge set (`broaderTransitive`/`narrowerTransitive`) is
//! authoritative; direct `broader`/`narrower` assertions are not consulted.
//! A candidate is direct when no other in-scope candidate lies between it
//! and the source concept. Elimination is O(|C|²) existence checks against
//! the graph facade, which keeps per-check cost at the backend's index
//! lookup cost rather than a scan.

use super::is_concept;
use crate::error::Result;
use crate::relation::{Scope, relations_of};
use crate::store::{GraphAccess, Iri};
use crate::vocab::SkosProperty;
use ahash::AHashMap;
use indexmap::IndexSet;
use tracing::{debug, warn};

/// Which side of the hierarchy to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Broader,
    Narrower,
}

impl Direction {
    fn transitive_property(self) -> SkosProperty {
        match self {
            Direction::Broader => SkosProperty::BroaderTransitive,
            Direction::Narrower => SkosProperty::NarrowerTransitive,
        }
    }

    /// Only the narrower side re-admits concepts whose every dominator was
    /// itself eliminated. Intentional asymmetry: the cyclic-data defense
    /// applies to narrower resolution only.
    fn readmits_orphaned_candidates(self) -> bool {
        matches!(self, Direction::Narrower)
    }
}

/// Immediate narrower concepts of `concept` within `scope`.
pub fn direct_narrower_concepts(
    graph: &dyn GraphAccess,
    concept: &Iri,
    scope: &Scope,
) -> Result<Vec<Iri>> {
    direct_related_concepts(graph, concept, Direction::Narrower, scope)
}

/// Immediate broader concepts of `concept` within `scope`.
pub fn direct_broader_concepts(
    graph: &dyn GraphAccess,
    concept: &Iri,
    scope: &Scope,
) -> Result<Vec<Iri>> {
    direct_related_concepts(graph, concept, Direction::Broader, scope)
}

/// Shared minimality computation. Candidate order is preserved from the
/// relation listing so repeated calls over an unchanged graph agree.
pub fn direct_related_concepts(
    graph: &dyn GraphAccess,
    concept: &Iri,
    direction: Direction,
    scope: &Scope,
) -> Result<Vec<Iri>> {
    let property = direction.transitive_property();
    let property_iri = Iri::from(property);

    // One transitive hop, scoped, concepts only, self excluded.
    let mut candidates: IndexSet<Iri> = IndexSet::new();
    for target in relations_of(graph, concept, property, scope)? {
        if target != *concept && is_concept(graph, &target)? {
            candidates.insert(target);
        }
    }
    if candidates.len() < 2 {
        return Ok(candidates.into_iter().collect());
    }

    // Dominance elimination: a candidate reachable through another candidate
    // is not direct. Record every dominator for the re-admission pass.
    let mut dominators: AHashMap<&Iri, Vec<&Iri>> = AHashMap::new();
    for yi in &candidates {
        for yj in &candidates {
            if yi != yj && graph.has_triple(yi, &property_iri, yj)? {
                dominators.entry(yj).or_default().push(yi);
            }
        }
    }

    let survivors: Vec<&Iri> = candidates
        .iter()
        .filter(|y| !dominators.contains_key(*y))
        .collect();

    // Walk candidates in listing order so the result is repeatable.
    let mut result: Vec<Iri> = Vec::with_capacity(survivors.len());
    for candidate in &candidates {
        match dominators.get(candidate) {
            None => result.push(candidate.clone()),
            Some(doms) if direction.readmits_orphaned_candidates() => {
                // Malformed or cyclic transitive data can eliminate every
                // member of a dominator chain. A removed candidate whose
                // dominators were all eliminated themselves is restored
                // rather than silently dropped.
                if !doms.iter().any(|d| survivors.contains(d)) {
                    warn!(
                        concept = %concept,
                        candidate = %candidate,
                        "re-admitting candidate whose dominators were all eliminated; \
                         transitive closure is likely cyclic"
                    );
                    result.push(candidate.clone());
                }
            }
            Some(_) => {}
        }
    }

    debug!(
        concept = %concept,
        ?direction,
        candidates = candidates.len(),
        direct = result.len(),
        "resolved direct relations"
    );
    Ok(result)
}
