//! Public engine surface: a [`Thesaurus`] facade over a shared graph
//! backend, exposing hierarchy construction, direct-relation resolution,
//! and label access.
//!
//! Every operation is synchronous, read-only, and self-contained — the
//! graph is re-read per call, so results always reflect the backend's
//! current state and there is nothing to invalidate. "Not found" and
//! out-of-scope conditions yield empty results; errors are reserved for
//! backend failures and malformed caller input.

use crate::analysis::AnalyzerPipeline;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::hierarchy::{ConceptNode, HierarchyBuilder, RelationshipStrategy, RootStrategy};
use crate::relation::Scope;
use crate::resolve;
use crate::resource::Concept;
use crate::store::{Annotation, GraphAccess, Iri};
use crate::vocab::AnnotationProperty;
use std::sync::Arc;

/// Typed SKOS view over a triple store.
pub struct Thesaurus {
    graph: Arc<dyn GraphAccess>,
    config: EngineConfig,
}

impl Thesaurus {
    pub fn new(graph: Arc<dyn GraphAccess>) -> Self {
        Thesaurus {
            graph,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(graph: Arc<dyn GraphAccess>, config: EngineConfig) -> Self {
        Thesaurus { graph, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &dyn GraphAccess {
        self.graph.as_ref()
    }

    /// Immediate narrower concepts of `concept` within `scope`.
    pub fn direct_narrower_concepts(&self, concept: &Iri, scope: &Scope) -> Result<Vec<Concept>> {
        let iris = resolve::direct_narrower_concepts(self.graph.as_ref(), concept, scope)?;
        Ok(into_concepts(iris))
    }

    /// Immediate broader concepts of `concept` within `scope`.
    pub fn direct_broader_concepts(&self, concept: &Iri, scope: &Scope) -> Result<Vec<Concept>> {
        let iris = resolve::direct_broader_concepts(self.graph.as_ref(), concept, scope)?;
        Ok(into_concepts(iris))
    }

    /// Concepts with no in-scope broader concept, ordered by IRI.
    pub fn broadest_concepts(&self, scope: &Scope) -> Result<Vec<Concept>> {
        let iris = resolve::broadest_concepts(self.graph.as_ref(), scope)?;
        Ok(into_concepts(iris))
    }

    /// Concepts explicitly asserted as top concepts, honoring the scope.
    pub fn top_concepts(&self, scope: &Scope) -> Result<Vec<Concept>> {
        let iris = crate::hierarchy::top_concepts(self.graph.as_ref(), scope)?;
        Ok(into_concepts(iris))
    }

    /// Build a concept forest. `sort_language` falls back to the configured
    /// default when absent.
    pub fn concept_hierarchy(
        &self,
        scope: &Scope,
        root_strategy: RootStrategy,
        relationship_strategy: RelationshipStrategy,
        sort_language: Option<&str>,
    ) -> Result<Vec<ConceptNode>> {
        self.builder(scope, relationship_strategy, sort_language)
            .root_strategy(root_strategy)
            .build_forest()
    }

    /// Build a single concept tree. `None` when the root is not a concept
    /// or falls outside the scope.
    pub fn concept_tree(
        &self,
        root: &Iri,
        scope: &Scope,
        relationship_strategy: RelationshipStrategy,
        sort_language: Option<&str>,
    ) -> Result<Option<ConceptNode>> {
        self.builder(scope, relationship_strategy, sort_language)
            .build_tree(root)
    }

    /// All concepts in a scheme, ordered by IRI.
    pub fn concepts_in_scheme(&self, scheme: &Iri) -> Result<Vec<Concept>> {
        let scope = Scope::in_scheme(scheme.clone());
        let iris = resolve::concepts_in_scope(self.graph.as_ref(), &scope)?;
        Ok(into_concepts(iris))
    }

    /// All concepts in a collection, ordered by IRI.
    pub fn concepts_in_collection(&self, collection: &Iri) -> Result<Vec<Concept>> {
        let scope = Scope::in_collection(collection.clone());
        let iris = resolve::concepts_in_scope(self.graph.as_ref(), &scope)?;
        Ok(into_concepts(iris))
    }

    /// Preferred label of a node, optionally in a language.
    pub fn pref_label(&self, concept: &Iri, language: Option<&str>) -> Result<Option<String>> {
        self.graph
            .annotation(concept, AnnotationProperty::PrefLabel, language)
    }

    /// All alternative labels of a node.
    pub fn alt_labels(&self, concept: &Iri) -> Result<Vec<Annotation>> {
        self.graph.annotations(concept, AnnotationProperty::AltLabel)
    }

    /// Tokens for indexing a concept's preferred label through an analysis
    /// pipeline. Empty when the label is absent.
    pub fn label_tokens(
        &self,
        concept: &Iri,
        language: Option<&str>,
        pipeline: &AnalyzerPipeline,
    ) -> Result<Vec<String>> {
        match self.pref_label(concept, language)? {
            Some(label) => Ok(pipeline.analyze(&label)),
            None => Ok(Vec::new()),
        }
    }

    fn builder<'a>(
        &'a self,
        scope: &Scope,
        relationship_strategy: RelationshipStrategy,
        sort_language: Option<&str>,
    ) -> HierarchyBuilder<'a> {
        let language = sort_language
            .map(str::to_string)
            .or_else(|| self.config.sort_language.clone());
        HierarchyBuilder::new(self.graph.as_ref())
            .scope(scope.clone())
            .relationship_strategy(relationship_strategy)
            .sort_language(language)
            .max_depth(self.config.max_hierarchy_depth)
    }
}

fn into_concepts(iris: Vec<Iri>) -> Vec<Concept> {
    iris.into_iter().map(Concept::from_iri).collect()
}
