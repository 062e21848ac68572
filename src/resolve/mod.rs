//! Concept resolvers: direct (minimal) broader/narrower computation and
//! broadest-concept detection over the transitive-closure edges.

mod broadest;
mod direct;

pub use broadest::broadest_concepts;
pub use direct::{
    Direction, direct_broader_concepts, direct_narrower_concepts, direct_related_concepts,
};

use crate::error::Result;
use crate::relation::Scope;
use crate::store::{GraphAccess, Iri};
use crate::vocab::{SkosClass, rdf_type_iri};

/// Whether a node carries the Concept type tag. Nodes with extra or missing
/// tags are handled gracefully: no Concept tag means "not a concept".
pub(crate) fn is_concept(graph: &dyn GraphAccess, node: &Iri) -> Result<bool> {
    Ok(graph.resource_kinds(node)?.contains(SkosClass::Concept))
}

/// All concepts satisfying the scope, ordered by IRI for repeatability.
pub fn concepts_in_scope(graph: &dyn GraphAccess, scope: &Scope) -> Result<Vec<Iri>> {
    let rdf_type = Iri::new(rdf_type_iri());
    let concept_class = Iri::from(SkosClass::Concept);
    let mut concepts = Vec::new();
    for triple in graph.match_triples(None, Some(&rdf_type), Some(&concept_class))? {
        if scope.contains(graph, &triple.subject)? {
            concepts.push(triple.subject);
        }
    }
    concepts.sort();
    concepts.dedup();
    Ok(concepts)
}
