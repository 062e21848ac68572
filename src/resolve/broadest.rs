//! Broadest-concept resolver: concepts with no broader concept inside the
//! same scope. Computed, not asserted — contrast with top concepts, which
//! are explicit `topConceptOf` assertions.

use super::{concepts_in_scope, is_concept};
use crate::error::Result;
use crate::relation::{Scope, relations_of};
use crate::store::{GraphAccess, Iri};
use crate::vocab::SkosProperty;
use tracing::debug;

/// Concepts in scope that have no in-scope broader concept other than
/// themselves. A plain existence check per concept; minimality elimination
/// is not needed here.
pub fn broadest_concepts(graph: &dyn GraphAccess, scope: &Scope) -> Result<Vec<Iri>> {
    let mut broadest = Vec::new();
    for concept in concepts_in_scope(graph, scope)? {
        if !has_broader_in_scope(graph, &concept, scope)? {
            broadest.push(concept);
        }
    }
    debug!(count = broadest.len(), "resolved broadest concepts");
    Ok(broadest)
}

fn has_broader_in_scope(graph: &dyn GraphAccess, concept: &Iri, scope: &Scope) -> Result<bool> {
    for target in relations_of(graph, concept, SkosProperty::BroaderTransitive, scope)? {
        // Degenerate self-loops in the closure do not count as broader.
        if target != *concept && is_concept(graph, &target)? {
            return Ok(true);
        }
    }
    Ok(false)
}
