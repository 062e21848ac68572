//! Typed resource layer over raw graph nodes.
//!
//! SKOS resources are capability-tagged rather than subclassed: a node
//! carries a [`KindSet`] of asserted classes, and the typed wrappers
//! ([`Concept`], [`ConceptScheme`], [`Collection`]) are resolved against
//! those assertions. A node may legitimately carry several type tags or
//! none; resolution treats "Concept tag absent" as "not a concept"
//! regardless of whatever else is asserted.

use crate::error::Result;
use crate::store::{Annotation, GraphAccess, Iri};
use crate::vocab::{AnnotationProperty, SkosClass};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Asserted SKOS classes of a node. Small and unordered; almost every node
/// carries exactly one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindSet(SmallVec<[SkosClass; 2]>);

impl KindSet {
    pub fn insert(&mut self, kind: SkosClass) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
        }
    }

    pub fn contains(&self, kind: SkosClass) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = SkosClass> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<SkosClass> for KindSet {
    fn from_iter<T: IntoIterator<Item = SkosClass>>(iter: T) -> Self {
        let mut kinds = KindSet::default();
        for kind in iter {
            kinds.insert(kind);
        }
        kinds
    }
}

macro_rules! typed_resource {
    ($name:ident, $class:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            iri: Iri,
        }

        impl $name {
            /// Wrap without consulting the graph. Useful when the caller
            /// already knows the node's type.
            pub fn from_iri(iri: Iri) -> Self {
                $name { iri }
            }

            /// Resolve against asserted types; `None` when the node does not
            /// carry the expected class tag.
            pub fn resolve(graph: &dyn GraphAccess, iri: &Iri) -> Result<Option<Self>> {
                if graph.resource_kinds(iri)?.contains($class) {
                    Ok(Some($name { iri: iri.clone() }))
                } else {
                    Ok(None)
                }
            }

            pub fn iri(&self) -> &Iri {
                &self.iri
            }

            pub fn into_iri(self) -> Iri {
                self.iri
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.iri.as_str())
            }
        }
    };
}

typed_resource!(
    Concept,
    SkosClass::Concept,
    "A SKOS concept: the unit of meaning carrying semantic relations."
);
typed_resource!(
    ConceptScheme,
    SkosClass::ConceptScheme,
    "A SKOS concept scheme: a named taxonomy instance grouping concepts."
);
typed_resource!(
    Collection,
    SkosClass::Collection,
    "A SKOS collection: an arbitrary grouping of concepts, distinct from scheme membership."
);

impl Concept {
    /// Preferred label in a language, if asserted.
    pub fn pref_label(
        &self,
        graph: &dyn GraphAccess,
        language: Option<&str>,
    ) -> Result<Option<String>> {
        graph.annotation(&self.iri, AnnotationProperty::PrefLabel, language)
    }

    /// All alternative labels, unfiltered by language.
    pub fn alt_labels(&self, graph: &dyn GraphAccess) -> Result<Vec<Annotation>> {
        graph.annotations(&self.iri, AnnotationProperty::AltLabel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::OxigraphBackend;

    #[test]
    fn kind_set_deduplicates() {
        let mut kinds = KindSet::default();
        kinds.insert(SkosClass::Concept);
        kinds.insert(SkosClass::Concept);
        assert_eq!(kinds.iter().count(), 1);
    }

    #[test]
    fn resolve_requires_the_matching_tag() {
        let store = OxigraphBackend::new().unwrap();
        let node = Iri::new("http://example.org/n");
        store.insert_kind(&node, SkosClass::Collection).unwrap();

        assert!(Concept::resolve(&store, &node).unwrap().is_none());
        assert!(Collection::resolve(&store, &node).unwrap().is_some());

        // A node with multiple tags resolves as each of them.
        store.insert_kind(&node, SkosClass::Concept).unwrap();
        assert!(Concept::resolve(&store, &node).unwrap().is_some());
    }
}
