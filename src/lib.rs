//! Typed SKOS thesaurus layer over an RDF triple store.
//!
//! This crate exposes SKOS concepts, concept schemes, and collections as a
//! navigable graph: direct (immediate) broader/narrower resolution computed
//! from transitive-closure edges, broadest-concept detection, and recursive
//! concept-hierarchy construction — all scoped by concept scheme and
//! collection, cycle-safe, and deterministic. A small label-analysis
//! pipeline is bundled for indexing thesaurus labels.
//!
//! The triple store itself is an external collaborator behind the
//! [`GraphAccess`] facade; an [oxigraph](https://crates.io/crates/oxigraph)
//! adapter is provided.
//!
//! # Example
//!
//! ```
//! use skos_graph::{Iri, OxigraphBackend, Scope, SkosClass, SkosProperty, Thesaurus};
//! use std::sync::Arc;
//!
//! let store = OxigraphBackend::new()?;
//! let animal = Iri::new("http://example.org/animal");
//! let dog = Iri::new("http://example.org/dog");
//! store.insert_kind(&animal, SkosClass::Concept)?;
//! store.insert_kind(&dog, SkosClass::Concept)?;
//! store.insert_relation(&animal, SkosProperty::NarrowerTransitive, &dog)?;
//!
//! let thesaurus = Thesaurus::new(Arc::new(store));
//! let narrower = thesaurus.direct_narrower_concepts(&animal, &Scope::unconstrained())?;
//! assert_eq!(narrower.len(), 1);
//! # Ok::<(), skos_graph::ThesaurusError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod logging;
pub mod relation;
pub mod resolve;
pub mod resource;
pub mod store;
pub mod vocab;

pub use analysis::{
    AnalyzerPipeline, ConcatFilter, LowercaseFilter, StopWordFilter, StopWordRegistry,
    TokenFilter, Tokenizer, WhitespaceTokenizer,
};
pub use config::EngineConfig;
pub use engine::Thesaurus;
pub use error::{Result, ThesaurusError};
pub use hierarchy::{ConceptNode, HierarchyBuilder, RelationshipStrategy, RootStrategy};
pub use logging::{LogFormat, LogOutput, LoggingConfig, init_logging};
pub use relation::{Scope, TargetFilter, relations_of, sources_of_relation};
pub use resolve::{
    Direction, broadest_concepts, concepts_in_scope, direct_broader_concepts,
    direct_narrower_concepts,
};
pub use resource::{Collection, Concept, ConceptScheme, KindSet};
pub use store::{Annotation, GraphAccess, Iri, OxigraphBackend, Triple, TripleObject};
pub use vocab::{AnnotationProperty, PropertyKind, SkosClass, SkosProperty};
