//! Graph Access Facade: the minimal read surface the engine needs from a
//! triple store, plus the oxigraph adapter implementing it.
//!
//! The engine never talks to the store directly — every relation lookup,
//! existence check, and label fetch goes through [`GraphAccess`]. The trait
//! is deliberately small (pattern match, existence, type lookup, annotation
//! lookup) so alternative backends stay easy to slot in. `has_triple` is on
//! the hot path of dominance elimination and must be index-backed, not a
//! scan over `match_triples`.

use crate::error::{Result, ThesaurusError};
use crate::resource::KindSet;
use crate::vocab::{AnnotationProperty, SkosClass, SkosProperty, rdf_type_iri};
use oxigraph::io::RdfFormat;
use oxigraph::model::{GraphNameRef, Literal, NamedNode, Quad, QuadRef, Subject, Term};
use oxigraph::store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CORE VALUE TYPES
// =============================================================================

/// A graph resource identifier. Process-unique key for nodes and properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Iri(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(value: &str) -> Self {
        Iri::new(value)
    }
}

impl From<String> for Iri {
    fn from(value: String) -> Self {
        Iri(value)
    }
}

impl From<SkosProperty> for Iri {
    fn from(value: SkosProperty) -> Self {
        Iri(value.uri())
    }
}

impl From<SkosClass> for Iri {
    fn from(value: SkosClass) -> Self {
        Iri(value.uri())
    }
}

impl From<AnnotationProperty> for Iri {
    fn from(value: AnnotationProperty) -> Self {
        Iri(value.uri())
    }
}

/// Object position of a triple: another resource or a literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripleObject {
    Resource(Iri),
    Literal {
        value: String,
        language: Option<String>,
    },
}

impl TripleObject {
    pub fn as_resource(&self) -> Option<&Iri> {
        match self {
            TripleObject::Resource(iri) => Some(iri),
            TripleObject::Literal { .. } => None,
        }
    }
}

/// A directed labeled edge in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: TripleObject,
}

/// A literal annotation value with its optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub value: String,
    pub language: Option<String>,
}

// =============================================================================
// FACADE TRAIT
// =============================================================================

/// Read-only query capability over a directed labeled multigraph.
///
/// Wildcarded pattern fields are `None`. Object patterns match resource
/// objects only; literal-object triples still appear in wildcarded results
/// and through the annotation methods.
pub trait GraphAccess: Send + Sync {
    /// All triples matching the pattern, in backend order.
    fn match_triples(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Iri>,
    ) -> Result<Vec<Triple>>;

    /// Index-backed existence check for a fully-ground triple.
    fn has_triple(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> Result<bool>;

    /// The SKOS classes asserted for a node via `rdf:type`. Empty when the
    /// node is untyped or carries only non-SKOS types.
    fn resource_kinds(&self, node: &Iri) -> Result<KindSet>;

    /// A single annotation value, optionally restricted to a language tag
    /// (compared case-insensitively). With no language given, a tagless
    /// literal wins over tagged ones.
    fn annotation(
        &self,
        node: &Iri,
        property: AnnotationProperty,
        language: Option<&str>,
    ) -> Result<Option<String>>;

    /// All annotation values for a property, with their language tags.
    fn annotations(&self, node: &Iri, property: AnnotationProperty) -> Result<Vec<Annotation>>;
}

// =============================================================================
// OXIGRAPH ADAPTER
// =============================================================================

/// [`GraphAccess`] adapter over an oxigraph [`Store`], reading the default
/// graph. Blank-node subjects/objects are outside the engine's data model
/// and are skipped during conversion.
///
/// The mutation helpers exist for loaders and test harnesses; the engine
/// itself only reads.
pub struct OxigraphBackend {
    store: Store,
}

impl OxigraphBackend {
    /// In-memory store.
    pub fn new() -> Result<Self> {
        Ok(OxigraphBackend {
            store: Store::new()?,
        })
    }

    /// Wrap an existing store (e.g. one opened from disk by the caller).
    pub fn from_store(store: Store) -> Self {
        OxigraphBackend { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Load Turtle data into the default graph.
    pub fn load_turtle(&self, data: &[u8]) -> Result<()> {
        self.store.load_from_reader(RdfFormat::Turtle, data)?;
        Ok(())
    }

    pub fn insert_triple(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> Result<()> {
        let s = named(subject)?;
        let p = named(predicate)?;
        let o = named(object)?;
        self.store
            .insert(QuadRef::new(&s, &p, &o, GraphNameRef::DefaultGraph))?;
        Ok(())
    }

    /// Assert `rdf:type` for a node.
    pub fn insert_kind(&self, node: &Iri, kind: SkosClass) -> Result<()> {
        self.insert_triple(node, &Iri::new(rdf_type_iri()), &Iri::from(kind))
    }

    /// Assert a SKOS relation edge.
    pub fn insert_relation(&self, subject: &Iri, property: SkosProperty, object: &Iri) -> Result<()> {
        self.insert_triple(subject, &Iri::from(property), object)
    }

    /// Assert a literal annotation, optionally language-tagged.
    pub fn insert_annotation(
        &self,
        node: &Iri,
        property: AnnotationProperty,
        value: &str,
        language: Option<&str>,
    ) -> Result<()> {
        let s = named(node)?;
        let p = named(&Iri::from(property))?;
        let literal = match language {
            Some(lang) => Literal::new_language_tagged_literal(value, lang)
                .map_err(|e| ThesaurusError::Config(format!("invalid language tag: {e}")))?,
            None => Literal::new_simple_literal(value),
        };
        self.store
            .insert(QuadRef::new(&s, &p, &literal, GraphNameRef::DefaultGraph))?;
        Ok(())
    }
}

fn named(iri: &Iri) -> Result<NamedNode> {
    NamedNode::new(iri.as_str()).map_err(|e| ThesaurusError::invalid_iri(iri.as_str(), e))
}

fn convert_quad(quad: Quad) -> Option<Triple> {
    let subject = match quad.subject {
        Subject::NamedNode(node) => Iri::new(node.into_string()),
        _ => return None,
    };
    let predicate = Iri::new(quad.predicate.into_string());
    let object = match quad.object {
        Term::NamedNode(node) => TripleObject::Resource(Iri::new(node.into_string())),
        Term::Literal(literal) => {
            let language = literal.language().map(|l| l.to_string());
            TripleObject::Literal {
                value: literal.destruct().0,
                language,
            }
        }
        _ => return None,
    };
    Some(Triple {
        subject,
        predicate,
        object,
    })
}

impl GraphAccess for OxigraphBackend {
    fn match_triples(
        &self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Iri>,
    ) -> Result<Vec<Triple>> {
        let subject_node = subject.map(named).transpose()?;
        let predicate_node = predicate.map(named).transpose()?;
        let object_node = object.map(named).transpose()?;

        let mut triples = Vec::new();
        for quad in self.store.quads_for_pattern(
            subject_node.as_ref().map(|n| n.as_ref().into()),
            predicate_node.as_ref().map(|n| n.as_ref()),
            object_node.as_ref().map(|n| n.as_ref().into()),
            Some(GraphNameRef::DefaultGraph),
        ) {
            let quad = quad?;
            if let Some(triple) = convert_quad(quad) {
                triples.push(triple);
            }
        }
        Ok(triples)
    }

    fn has_triple(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> Result<bool> {
        let s = named(subject)?;
        let p = named(predicate)?;
        let o = named(object)?;
        let quad = QuadRef::new(&s, &p, &o, GraphNameRef::DefaultGraph);
        Ok(self.store.contains(quad)?)
    }

    fn resource_kinds(&self, node: &Iri) -> Result<KindSet> {
        let mut kinds = KindSet::default();
        for triple in self.match_triples(Some(node), Some(&Iri::new(rdf_type_iri())), None)? {
            if let TripleObject::Resource(class_iri) = &triple.object {
                if let Some(class) = SkosClass::from_uri(class_iri.as_str()) {
                    kinds.insert(class);
                }
            }
        }
        Ok(kinds)
    }

    fn annotation(
        &self,
        node: &Iri,
        property: AnnotationProperty,
        language: Option<&str>,
    ) -> Result<Option<String>> {
        let values = self.annotations(node, property)?;
        match language {
            Some(lang) => Ok(values
                .into_iter()
                .find(|a| {
                    a.language
                        .as_deref()
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(lang))
                })
                .map(|a| a.value)),
            None => {
                let mut tagged_fallback = None;
                for annotation in values {
                    if annotation.language.is_none() {
                        return Ok(Some(annotation.value));
                    }
                    if tagged_fallback.is_none() {
                        tagged_fallback = Some(annotation.value);
                    }
                }
                Ok(tagged_fallback)
            }
        }
    }

    fn annotations(&self, node: &Iri, property: AnnotationProperty) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::new();
        for triple in self.match_triples(Some(node), Some(&Iri::from(property)), None)? {
            if let TripleObject::Literal { value, language } = triple.object {
                annotations.push(Annotation { value, language });
            }
        }
        Ok(annotations)
    }
}
