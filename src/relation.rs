//! Relation query layer: filtered listing of nodes related through a SKOS
//! property, with scope constraints over concept schemes and collections.
//!
//! Scoping follows set-intersection semantics: within one dimension the
//! members of the set are alternatives (OR), across the two dimensions the
//! constraints combine (AND). An absent dimension is unconstrained, not
//! empty. Filters compose as statement-level predicates ([`TargetFilter`])
//! so callers can build their own combinations beyond what [`Scope`] covers.

use crate::error::Result;
use crate::store::{GraphAccess, Iri, TripleObject};
use crate::vocab::SkosProperty;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Scoping constraints for relation queries and resolvers.
///
/// Empty on both dimensions means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub schemes: Vec<Iri>,
    pub collections: Vec<Iri>,
}

impl Scope {
    pub fn unconstrained() -> Self {
        Scope::default()
    }

    pub fn in_scheme(scheme: Iri) -> Self {
        Scope {
            schemes: vec![scheme],
            collections: Vec::new(),
        }
    }

    pub fn in_collection(collection: Iri) -> Self {
        Scope {
            schemes: Vec::new(),
            collections: vec![collection],
        }
    }

    pub fn with_scheme(mut self, scheme: Iri) -> Self {
        self.schemes.push(scheme);
        self
    }

    pub fn with_collection(mut self, collection: Iri) -> Self {
        self.collections.push(collection);
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.schemes.is_empty() && self.collections.is_empty()
    }

    /// The statement-level predicate equivalent to this scope.
    pub fn filter(&self) -> TargetFilter {
        let mut conjuncts = Vec::new();
        if !self.schemes.is_empty() {
            conjuncts.push(TargetFilter::Any(
                self.schemes
                    .iter()
                    .cloned()
                    .map(TargetFilter::InScheme)
                    .collect(),
            ));
        }
        if !self.collections.is_empty() {
            conjuncts.push(TargetFilter::Any(
                self.collections
                    .iter()
                    .cloned()
                    .map(TargetFilter::InCollection)
                    .collect(),
            ));
        }
        TargetFilter::All(conjuncts)
    }

    /// Whether a node satisfies the scope. Unconstrained scopes accept
    /// everything.
    pub fn contains(&self, graph: &dyn GraphAccess, node: &Iri) -> Result<bool> {
        self.filter().accepts(graph, node)
    }
}

/// Composable statement-level predicate over a candidate node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFilter {
    /// Node is in the given concept scheme (via `inScheme` or any of its
    /// sub-properties, so graphs asserting only `topConceptOf` still pass).
    InScheme(Iri),
    /// Node is a member of the given collection.
    InCollection(Iri),
    /// Every inner predicate holds. Empty conjunction accepts.
    All(Vec<TargetFilter>),
    /// At least one inner predicate holds. Empty disjunction rejects.
    Any(Vec<TargetFilter>),
}

impl TargetFilter {
    pub fn accepts(&self, graph: &dyn GraphAccess, node: &Iri) -> Result<bool> {
        match self {
            TargetFilter::InScheme(scheme) => {
                for property in scheme_membership_properties() {
                    if graph.has_triple(node, &Iri::from(property), scheme)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            TargetFilter::InCollection(collection) => {
                graph.has_triple(collection, &Iri::from(SkosProperty::Member), node)
            }
            TargetFilter::All(filters) => {
                for filter in filters {
                    if !filter.accepts(graph, node)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            TargetFilter::Any(filters) => {
                for filter in filters {
                    if filter.accepts(graph, node)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

/// `inScheme` plus every property that entails it through the
/// super-property hierarchy (currently `topConceptOf`).
fn scheme_membership_properties() -> impl Iterator<Item = SkosProperty> {
    SkosProperty::iter().filter(|p| {
        *p == SkosProperty::InScheme || p.super_properties().contains(&SkosProperty::InScheme)
    })
}

/// Nodes related to `node` as `(node, property, ?)`, filtered by scope.
/// Symmetric properties also pick up reverse-direction assertions. Absent
/// nodes yield an empty list, never an error.
pub fn relations_of(
    graph: &dyn GraphAccess,
    node: &Iri,
    property: SkosProperty,
    scope: &Scope,
) -> Result<Vec<Iri>> {
    let property_iri = Iri::from(property);
    let filter = scope.filter();
    let mut results = IndexSet::new();

    for triple in graph.match_triples(Some(node), Some(&property_iri), None)? {
        if let TripleObject::Resource(target) = triple.object {
            if filter.accepts(graph, &target)? {
                results.insert(target);
            }
        }
    }
    if property.is_symmetric() {
        for triple in graph.match_triples(None, Some(&property_iri), Some(node))? {
            let source = triple.subject;
            if source != *node && filter.accepts(graph, &source)? {
                results.insert(source);
            }
        }
    }
    Ok(results.into_iter().collect())
}

/// Subjects related to `target` as `(?, property, target)`, filtered by
/// scope. Mirror of [`relations_of`].
pub fn sources_of_relation(
    graph: &dyn GraphAccess,
    target: &Iri,
    property: SkosProperty,
    scope: &Scope,
) -> Result<Vec<Iri>> {
    let property_iri = Iri::from(property);
    let filter = scope.filter();
    let mut results = IndexSet::new();

    for triple in graph.match_triples(None, Some(&property_iri), Some(target))? {
        let source = triple.subject;
        if filter.accepts(graph, &source)? {
            results.insert(source);
        }
    }
    if property.is_symmetric() {
        for triple in graph.match_triples(Some(target), Some(&property_iri), None)? {
            if let TripleObject::Resource(object) = triple.object {
                if object != *target && filter.accepts(graph, &object)? {
                    results.insert(object);
                }
            }
        }
    }
    Ok(results.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OxigraphBackend;
    use crate::vocab::SkosClass;

    fn iri(suffix: &str) -> Iri {
        Iri::new(format!("http://example.org/{suffix}"))
    }

    fn store_with_scheme() -> OxigraphBackend {
        let store = OxigraphBackend::new().unwrap();
        let scheme = iri("scheme");
        store.insert_kind(&scheme, SkosClass::ConceptScheme).unwrap();
        for name in ["a", "b", "c"] {
            let node = iri(name);
            store.insert_kind(&node, SkosClass::Concept).unwrap();
        }
        store
            .insert_relation(&iri("a"), SkosProperty::NarrowerTransitive, &iri("b"))
            .unwrap();
        store
            .insert_relation(&iri("a"), SkosProperty::NarrowerTransitive, &iri("c"))
            .unwrap();
        store
            .insert_relation(&iri("b"), SkosProperty::InScheme, &iri("scheme"))
            .unwrap();
        store
    }

    #[test]
    fn unconstrained_scope_returns_all_targets() {
        let store = store_with_scheme();
        let related = relations_of(
            &store,
            &iri("a"),
            SkosProperty::NarrowerTransitive,
            &Scope::unconstrained(),
        )
        .unwrap();
        assert_eq!(related.len(), 2);
    }

    #[test]
    fn scheme_scope_filters_targets() {
        let store = store_with_scheme();
        let related = relations_of(
            &store,
            &iri("a"),
            SkosProperty::NarrowerTransitive,
            &Scope::in_scheme(iri("scheme")),
        )
        .unwrap();
        assert_eq!(related, vec![iri("b")]);
    }

    #[test]
    fn collection_scope_checks_membership() {
        let store = store_with_scheme();
        let collection = iri("coll");
        store
            .insert_kind(&collection, SkosClass::Collection)
            .unwrap();
        store
            .insert_relation(&collection, SkosProperty::Member, &iri("c"))
            .unwrap();

        let related = relations_of(
            &store,
            &iri("a"),
            SkosProperty::NarrowerTransitive,
            &Scope::in_collection(collection),
        )
        .unwrap();
        assert_eq!(related, vec![iri("c")]);
    }

    #[test]
    fn scheme_and_collection_scopes_combine_with_and() {
        let store = store_with_scheme();
        let collection = iri("coll");
        store
            .insert_relation(&collection, SkosProperty::Member, &iri("c"))
            .unwrap();

        let scope = Scope::in_scheme(iri("scheme")).with_collection(collection);
        let related = relations_of(&store, &iri("a"), SkosProperty::NarrowerTransitive, &scope)
            .unwrap();
        // b is in the scheme but not the collection; c is in the collection
        // but not the scheme.
        assert!(related.is_empty());
    }

    #[test]
    fn schemes_within_a_set_are_alternatives() {
        let store = store_with_scheme();
        let other = iri("other-scheme");
        store
            .insert_relation(&iri("c"), SkosProperty::InScheme, &other)
            .unwrap();

        let scope = Scope::in_scheme(iri("scheme")).with_scheme(other);
        let related = relations_of(&store, &iri("a"), SkosProperty::NarrowerTransitive, &scope)
            .unwrap();
        assert_eq!(related.len(), 2);
    }

    #[test]
    fn top_concept_assertion_satisfies_scheme_scope() {
        let store = store_with_scheme();
        store
            .insert_relation(&iri("c"), SkosProperty::TopConceptOf, &iri("scheme"))
            .unwrap();

        assert!(Scope::in_scheme(iri("scheme"))
            .contains(&store, &iri("c"))
            .unwrap());
    }

    #[test]
    fn symmetric_property_unions_both_directions() {
        let store = store_with_scheme();
        store
            .insert_relation(&iri("b"), SkosProperty::Related, &iri("a"))
            .unwrap();

        let related = relations_of(&store, &iri("a"), SkosProperty::Related, &Scope::default())
            .unwrap();
        assert_eq!(related, vec![iri("b")]);
    }

    #[test]
    fn sources_of_relation_finds_subjects() {
        let store = store_with_scheme();
        let sources = sources_of_relation(
            &store,
            &iri("b"),
            SkosProperty::NarrowerTransitive,
            &Scope::default(),
        )
        .unwrap();
        assert_eq!(sources, vec![iri("a")]);
    }

    #[test]
    fn absent_node_yields_empty() {
        let store = store_with_scheme();
        let related = relations_of(
            &store,
            &iri("missing"),
            SkosProperty::NarrowerTransitive,
            &Scope::default(),
        )
        .unwrap();
        assert!(related.is_empty());
    }
}
