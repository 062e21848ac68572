//! Hierarchy builder: recursive construction of concept forests from root
//! concepts down through narrower edges.
//!
//! Construction is pure and re-reads the graph on every request; nothing is
//! cached. Two guards keep it finite on malformed data: an ancestor-path set
//! threaded through the recursion (a concept already on the current
//! root-to-node path is not descended into again) and a configurable depth
//! bound. Truncated branches are flagged on the node and logged.

use crate::error::Result;
use crate::relation::{Scope, relations_of, sources_of_relation};
use crate::resolve::{broadest_concepts, direct_narrower_concepts, is_concept};
use crate::resource::Concept;
use crate::store::{GraphAccess, Iri, TripleObject};
use crate::vocab::{AnnotationProperty, SkosProperty};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumIter;
use tracing::{debug, warn};

/// How the forest's root concepts are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootStrategy {
    /// Explicit `topConceptOf`/`hasTopConcept` assertions.
    TopConcepts,
    /// Concepts with no in-scope broader concept (computed).
    BroadestConcepts,
    /// Union of both, deduplicated.
    Both,
}

/// Which narrower set forms a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStrategy {
    /// Minimal non-dominated narrower concepts (the usual tree shape).
    DirectNarrower,
    /// The full transitive narrower set at every level.
    TransitiveNarrower,
}

/// One node of a constructed hierarchy. Transient output: built fresh per
/// request, never persisted. The same concept may appear in several branches
/// when the source transitive relation puts it there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptNode {
    pub concept: Concept,
    /// Preferred label in the builder's sort language, when present.
    pub label: Option<String>,
    pub children: Vec<ConceptNode>,
    /// Set when descent stopped early because of a cycle or the depth bound.
    pub truncated: bool,
}

/// Concepts explicitly asserted as top concepts, honoring the scope. With
/// scheme constraints, only assertions against those schemes count; without,
/// every top-concept assertion in the graph does.
pub fn top_concepts(graph: &dyn GraphAccess, scope: &Scope) -> Result<Vec<Iri>> {
    let mut tops = IndexSet::new();
    if scope.schemes.is_empty() {
        for triple in
            graph.match_triples(None, Some(&Iri::from(SkosProperty::TopConceptOf)), None)?
        {
            tops.insert(triple.subject);
        }
        for triple in
            graph.match_triples(None, Some(&Iri::from(SkosProperty::HasTopConcept)), None)?
        {
            if let TripleObject::Resource(concept) = triple.object {
                tops.insert(concept);
            }
        }
    } else {
        for scheme in &scope.schemes {
            for concept in
                sources_of_relation(graph, scheme, SkosProperty::TopConceptOf, &Scope::default())?
            {
                tops.insert(concept);
            }
            for concept in
                relations_of(graph, scheme, SkosProperty::HasTopConcept, &Scope::default())?
            {
                tops.insert(concept);
            }
        }
    }

    let mut result = Vec::new();
    for concept in tops {
        if is_concept(graph, &concept)? && scope.contains(graph, &concept)? {
            result.push(concept);
        }
    }
    Ok(result)
}

/// Builder for concept forests and single-rooted trees.
pub struct HierarchyBuilder<'g> {
    graph: &'g dyn GraphAccess,
    scope: Scope,
    root_strategy: RootStrategy,
    relationship_strategy: RelationshipStrategy,
    sort_language: Option<String>,
    max_depth: usize,
}

impl<'g> HierarchyBuilder<'g> {
    pub fn new(graph: &'g dyn GraphAccess) -> Self {
        HierarchyBuilder {
            graph,
            scope: Scope::default(),
            root_strategy: RootStrategy::TopConcepts,
            relationship_strategy: RelationshipStrategy::DirectNarrower,
            sort_language: None,
            max_depth: crate::config::DEFAULT_MAX_HIERARCHY_DEPTH,
        }
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn root_strategy(mut self, strategy: RootStrategy) -> Self {
        self.root_strategy = strategy;
        self
    }

    pub fn relationship_strategy(mut self, strategy: RelationshipStrategy) -> Self {
        self.relationship_strategy = strategy;
        self
    }

    pub fn sort_language(mut self, language: Option<String>) -> Self {
        self.sort_language = language;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Build the full forest: roots per the root strategy, sorted, then
    /// recursive descent through narrower edges.
    pub fn build_forest(&self) -> Result<Vec<ConceptNode>> {
        let mut roots = IndexSet::new();
        match self.root_strategy {
            RootStrategy::TopConcepts => {
                roots.extend(top_concepts(self.graph, &self.scope)?);
            }
            RootStrategy::BroadestConcepts => {
                roots.extend(broadest_concepts(self.graph, &self.scope)?);
            }
            RootStrategy::Both => {
                roots.extend(top_concepts(self.graph, &self.scope)?);
                roots.extend(broadest_concepts(self.graph, &self.scope)?);
            }
        }

        let sorted = self.sort_concepts(roots.into_iter().collect())?;
        let mut forest = Vec::with_capacity(sorted.len());
        for root in sorted {
            let mut path = IndexSet::new();
            forest.push(self.build_node(root, &mut path, 1)?);
        }
        debug!(roots = forest.len(), "built concept hierarchy");
        Ok(forest)
    }

    /// Build a single tree. `None` when the root is not a concept or falls
    /// outside the scope.
    pub fn build_tree(&self, root: &Iri) -> Result<Option<ConceptNode>> {
        if !is_concept(self.graph, root)? || !self.scope.contains(self.graph, root)? {
            return Ok(None);
        }
        let mut path = IndexSet::new();
        Ok(Some(self.build_node(root.clone(), &mut path, 1)?))
    }

    fn build_node(
        &self,
        concept: Iri,
        path: &mut IndexSet<Iri>,
        depth: usize,
    ) -> Result<ConceptNode> {
        let label = self.graph.annotation(
            &concept,
            AnnotationProperty::PrefLabel,
            self.sort_language.as_deref(),
        )?;

        let mut node = ConceptNode {
            concept: Concept::from_iri(concept.clone()),
            label,
            children: Vec::new(),
            truncated: false,
        };

        if depth >= self.max_depth {
            warn!(concept = %concept, depth, "hierarchy depth bound reached; truncating branch");
            node.truncated = true;
            return Ok(node);
        }

        path.insert(concept.clone());
        let children = self.sort_concepts(self.children_of(&concept)?)?;
        for child in children {
            if path.contains(&child) {
                warn!(
                    concept = %concept,
                    child = %child,
                    "cycle in narrower relation; truncating branch"
                );
                node.truncated = true;
                continue;
            }
            node.children.push(self.build_node(child, path, depth + 1)?);
        }
        path.pop();
        Ok(node)
    }

    fn children_of(&self, concept: &Iri) -> Result<Vec<Iri>> {
        match self.relationship_strategy {
            RelationshipStrategy::DirectNarrower => {
                direct_narrower_concepts(self.graph, concept, &self.scope)
            }
            RelationshipStrategy::TransitiveNarrower => {
                let mut narrower = Vec::new();
                for target in relations_of(
                    self.graph,
                    concept,
                    SkosProperty::NarrowerTransitive,
                    &self.scope,
                )? {
                    if target != *concept && is_concept(self.graph, &target)? {
                        narrower.push(target);
                    }
                }
                Ok(narrower)
            }
        }
    }

    /// Sibling ordering: concepts carrying a preferred label in the sort
    /// language first, by (label, IRI); unlabeled concepts after, by IRI.
    /// Total and deterministic regardless of backend listing order.
    fn sort_concepts(&self, concepts: Vec<Iri>) -> Result<Vec<Iri>> {
        let mut keyed = Vec::with_capacity(concepts.len());
        for concept in concepts {
            let label = self.graph.annotation(
                &concept,
                AnnotationProperty::PrefLabel,
                self.sort_language.as_deref(),
            )?;
            keyed.push((label, concept));
        }
        keyed.sort_by(|a, b| match (&a.0, &b.0) {
            (Some(la), Some(lb)) => la.cmp(lb).then_with(|| a.1.cmp(&b.1)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.1.cmp(&b.1),
        });
        Ok(keyed.into_iter().map(|(_, concept)| concept).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OxigraphBackend;
    use crate::vocab::SkosClass;

    fn iri(suffix: &str) -> Iri {
        Iri::new(format!("http://example.org/{suffix}"))
    }

    fn concept(store: &OxigraphBackend, suffix: &str, label: Option<&str>) -> Iri {
        let node = iri(suffix);
        store.insert_kind(&node, SkosClass::Concept).unwrap();
        if let Some(label) = label {
            store
                .insert_annotation(&node, AnnotationProperty::PrefLabel, label, Some("en"))
                .unwrap();
        }
        node
    }

    #[test]
    fn sort_places_unlabeled_concepts_last_by_iri() {
        let store = OxigraphBackend::new().unwrap();
        let zebra = concept(&store, "zzz", Some("Aardvark"));
        let unlabeled_b = concept(&store, "b-unlabeled", None);
        let unlabeled_a = concept(&store, "a-unlabeled", None);
        let apple = concept(&store, "apple", Some("Zucchini"));

        let builder = HierarchyBuilder::new(&store).sort_language(Some("en".to_string()));
        let sorted = builder
            .sort_concepts(vec![
                unlabeled_b.clone(),
                apple.clone(),
                zebra.clone(),
                unlabeled_a.clone(),
            ])
            .unwrap();
        assert_eq!(sorted, vec![zebra, apple, unlabeled_a, unlabeled_b]);
    }

    #[test]
    fn top_concepts_honors_both_assertion_directions() {
        let store = OxigraphBackend::new().unwrap();
        let scheme = iri("scheme");
        store.insert_kind(&scheme, SkosClass::ConceptScheme).unwrap();
        let a = concept(&store, "a", None);
        let b = concept(&store, "b", None);
        store
            .insert_relation(&a, SkosProperty::TopConceptOf, &scheme)
            .unwrap();
        store
            .insert_relation(&scheme, SkosProperty::HasTopConcept, &b)
            .unwrap();
        // hasTopConcept alone does not put b in the scheme's scope, so the
        // membership edge is asserted separately.
        store
            .insert_relation(&b, SkosProperty::InScheme, &scheme)
            .unwrap();

        let mut tops = top_concepts(&store, &Scope::in_scheme(scheme)).unwrap();
        tops.sort();
        assert_eq!(tops, vec![a, b]);
    }

    #[test]
    fn build_tree_rejects_out_of_scope_root() {
        let store = OxigraphBackend::new().unwrap();
        let a = concept(&store, "a", None);
        let scheme = iri("scheme");

        let builder = HierarchyBuilder::new(&store).scope(Scope::in_scheme(scheme));
        assert!(builder.build_tree(&a).unwrap().is_none());

        let not_a_concept = iri("scheme2");
        let builder = HierarchyBuilder::new(&store);
        assert!(builder.build_tree(&not_a_concept).unwrap().is_none());
    }
}
