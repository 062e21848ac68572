//! The closed SKOS vocabulary: classes, semantic/membership properties, and
//! annotation properties, with the metadata the resolvers rely on (symmetry,
//! inverses, super-property hierarchy) and string/symbol parsing.
//!
//! Two sub-vocabularies are unified into one enum, [`SkosProperty`], with the
//! original split kept queryable through [`SkosProperty::kind`]: the
//! hierarchy builder traverses `Semantic` properties for broader/narrower and
//! `Membership` properties for collection containment, while the relation
//! query layer treats both uniformly.
//!
//! `memberOf` and `memberTransitive` follow the legacy SKOS-Core vocabulary;
//! they share the SKOS namespace with the 2009 recommendation terms.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// SKOS core namespace.
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// RDF syntax namespace (for `rdf:type` assertions).
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Full IRI of `rdf:type`.
pub fn rdf_type_iri() -> String {
    format!("{RDF_NS}type")
}

// =============================================================================
// CLASSES
// =============================================================================

/// The three SKOS resource classes. A node may carry more than one type
/// assertion; nothing at this layer enforces mutual exclusivity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
pub enum SkosClass {
    Concept,
    ConceptScheme,
    Collection,
}

impl SkosClass {
    pub fn local_name(self) -> &'static str {
        match self {
            SkosClass::Concept => "Concept",
            SkosClass::ConceptScheme => "ConceptScheme",
            SkosClass::Collection => "Collection",
        }
    }

    pub fn uri(self) -> String {
        format!("{SKOS_NS}{}", self.local_name())
    }

    /// Resolve a full class URI back to the enum. Returns `None` for
    /// anything outside the closed set.
    pub fn from_uri(uri: &str) -> Option<SkosClass> {
        SkosClass::iter().find(|class| {
            uri.strip_prefix(SKOS_NS)
                .is_some_and(|local| local == class.local_name())
        })
    }
}

impl fmt::Display for SkosClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

/// Which sub-vocabulary a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Broader/narrower/related family plus the mapping properties.
    Semantic,
    /// Scheme membership, top-concept assertions, and collection membership.
    Membership,
}

/// The closed SKOS property set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
pub enum SkosProperty {
    // Semantic relations
    SemanticRelation,
    Broader,
    Narrower,
    BroaderTransitive,
    NarrowerTransitive,
    Related,
    MappingRelation,
    BroadMatch,
    NarrowMatch,
    RelatedMatch,
    CloseMatch,
    ExactMatch,
    // Element / membership relations
    InScheme,
    HasTopConcept,
    TopConceptOf,
    Member,
    MemberOf,
    MemberTransitive,
}

impl SkosProperty {
    pub fn local_name(self) -> &'static str {
        match self {
            SkosProperty::SemanticRelation => "semanticRelation",
            SkosProperty::Broader => "broader",
            SkosProperty::Narrower => "narrower",
            SkosProperty::BroaderTransitive => "broaderTransitive",
            SkosProperty::NarrowerTransitive => "narrowerTransitive",
            SkosProperty::Related => "related",
            SkosProperty::MappingRelation => "mappingRelation",
            SkosProperty::BroadMatch => "broadMatch",
            SkosProperty::NarrowMatch => "narrowMatch",
            SkosProperty::RelatedMatch => "relatedMatch",
            SkosProperty::CloseMatch => "closeMatch",
            SkosProperty::ExactMatch => "exactMatch",
            SkosProperty::InScheme => "inScheme",
            SkosProperty::HasTopConcept => "hasTopConcept",
            SkosProperty::TopConceptOf => "topConceptOf",
            SkosProperty::Member => "member",
            SkosProperty::MemberOf => "memberOf",
            SkosProperty::MemberTransitive => "memberTransitive",
        }
    }

    pub fn uri(self) -> String {
        format!("{SKOS_NS}{}", self.local_name())
    }

    pub fn kind(self) -> PropertyKind {
        match self {
            SkosProperty::SemanticRelation
            | SkosProperty::Broader
            | SkosProperty::Narrower
            | SkosProperty::BroaderTransitive
            | SkosProperty::NarrowerTransitive
            | SkosProperty::Related
            | SkosProperty::MappingRelation
            | SkosProperty::BroadMatch
            | SkosProperty::NarrowMatch
            | SkosProperty::RelatedMatch
            | SkosProperty::CloseMatch
            | SkosProperty::ExactMatch => PropertyKind::Semantic,
            SkosProperty::InScheme
            | SkosProperty::HasTopConcept
            | SkosProperty::TopConceptOf
            | SkosProperty::Member
            | SkosProperty::MemberOf
            | SkosProperty::MemberTransitive => PropertyKind::Membership,
        }
    }

    /// Whether `(a, p, b)` semantically implies `(b, p, a)`.
    pub fn is_symmetric(self) -> bool {
        matches!(
            self,
            SkosProperty::Related
                | SkosProperty::RelatedMatch
                | SkosProperty::CloseMatch
                | SkosProperty::ExactMatch
        )
    }

    /// The declared inverse, if any. Symmetric properties report no inverse;
    /// they are their own reversal.
    pub fn inverse(self) -> Option<SkosProperty> {
        match self {
            SkosProperty::Broader => Some(SkosProperty::Narrower),
            SkosProperty::Narrower => Some(SkosProperty::Broader),
            SkosProperty::BroaderTransitive => Some(SkosProperty::NarrowerTransitive),
            SkosProperty::NarrowerTransitive => Some(SkosProperty::BroaderTransitive),
            SkosProperty::BroadMatch => Some(SkosProperty::NarrowMatch),
            SkosProperty::NarrowMatch => Some(SkosProperty::BroadMatch),
            SkosProperty::HasTopConcept => Some(SkosProperty::TopConceptOf),
            SkosProperty::TopConceptOf => Some(SkosProperty::HasTopConcept),
            SkosProperty::Member => Some(SkosProperty::MemberOf),
            SkosProperty::MemberOf => Some(SkosProperty::Member),
            _ => None,
        }
    }

    /// Immediate super-properties only.
    pub fn direct_super_properties(self) -> &'static [SkosProperty] {
        match self {
            SkosProperty::Broader => &[SkosProperty::BroaderTransitive],
            SkosProperty::Narrower => &[SkosProperty::NarrowerTransitive],
            SkosProperty::BroaderTransitive => &[SkosProperty::SemanticRelation],
            SkosProperty::NarrowerTransitive => &[SkosProperty::SemanticRelation],
            SkosProperty::Related => &[SkosProperty::SemanticRelation],
            SkosProperty::MappingRelation => &[SkosProperty::SemanticRelation],
            SkosProperty::BroadMatch => {
                &[SkosProperty::Broader, SkosProperty::MappingRelation]
            }
            SkosProperty::NarrowMatch => {
                &[SkosProperty::Narrower, SkosProperty::MappingRelation]
            }
            SkosProperty::RelatedMatch => {
                &[SkosProperty::Related, SkosProperty::MappingRelation]
            }
            SkosProperty::CloseMatch => &[SkosProperty::MappingRelation],
            SkosProperty::ExactMatch => &[SkosProperty::CloseMatch],
            SkosProperty::TopConceptOf => &[SkosProperty::InScheme],
            SkosProperty::Member => &[SkosProperty::MemberTransitive],
            SkosProperty::SemanticRelation
            | SkosProperty::InScheme
            | SkosProperty::HasTopConcept
            | SkosProperty::MemberOf
            | SkosProperty::MemberTransitive => &[],
        }
    }

    /// Full transitive closure of the super-property relation, excluding the
    /// property itself. Order is breadth-first from the direct supers, which
    /// keeps iteration deterministic.
    pub fn super_properties(self) -> Vec<SkosProperty> {
        let mut closure = Vec::new();
        let mut frontier: Vec<SkosProperty> = self.direct_super_properties().to_vec();
        while let Some(prop) = frontier.pop() {
            if prop != self && !closure.contains(&prop) {
                closure.push(prop);
                frontier.extend_from_slice(prop.direct_super_properties());
            }
        }
        closure
    }

    /// Parse a string identifier: exact local name, `skos:` prefixed name,
    /// full URI, or the legacy combined-relation shorthand (`"<"` broader,
    /// `">"` narrower, `"~"` related). Unrecognized input yields `None`.
    pub fn parse(input: &str) -> Option<SkosProperty> {
        PARSE_TABLE.get(input).copied()
    }
}

impl fmt::Display for SkosProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

static PARSE_TABLE: Lazy<HashMap<String, SkosProperty>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for prop in SkosProperty::iter() {
        table.insert(prop.local_name().to_string(), prop);
        table.insert(format!("skos:{}", prop.local_name()), prop);
        table.insert(prop.uri(), prop);
    }
    table.insert("<".to_string(), SkosProperty::Broader);
    table.insert(">".to_string(), SkosProperty::Narrower);
    table.insert("~".to_string(), SkosProperty::Related);
    table
});

// =============================================================================
// ANNOTATION PROPERTIES
// =============================================================================

/// Label and documentation properties used for annotation lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Serialize, Deserialize,
)]
pub enum AnnotationProperty {
    PrefLabel,
    AltLabel,
    HiddenLabel,
    Definition,
    ScopeNote,
}

impl AnnotationProperty {
    pub fn local_name(self) -> &'static str {
        match self {
            AnnotationProperty::PrefLabel => "prefLabel",
            AnnotationProperty::AltLabel => "altLabel",
            AnnotationProperty::HiddenLabel => "hiddenLabel",
            AnnotationProperty::Definition => "definition",
            AnnotationProperty::ScopeNote => "scopeNote",
        }
    }

    pub fn uri(self) -> String {
        format!("{SKOS_NS}{}", self.local_name())
    }

    /// At most one value per language. Only `prefLabel` carries this
    /// restriction; the rest are multi-valued.
    pub fn single_valued(self) -> bool {
        matches!(self, AnnotationProperty::PrefLabel)
    }
}

impl fmt::Display for AnnotationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_property() {
        for prop in SkosProperty::iter() {
            assert_eq!(SkosProperty::parse(prop.local_name()), Some(prop));
            assert_eq!(
                SkosProperty::parse(&format!("skos:{}", prop.local_name())),
                Some(prop)
            );
            assert_eq!(SkosProperty::parse(&prop.uri()), Some(prop));
        }
    }

    #[test]
    fn parse_symbol_shorthand() {
        assert_eq!(SkosProperty::parse("<"), Some(SkosProperty::Broader));
        assert_eq!(SkosProperty::parse(">"), Some(SkosProperty::Narrower));
        assert_eq!(SkosProperty::parse("~"), Some(SkosProperty::Related));
    }

    #[test]
    fn parse_rejects_unknown_identifiers() {
        assert_eq!(SkosProperty::parse("broadest"), None);
        assert_eq!(SkosProperty::parse("skos:Broader"), None);
        assert_eq!(SkosProperty::parse(""), None);
        assert_eq!(SkosProperty::parse(">>"), None);
    }

    #[test]
    fn inverse_is_an_involution() {
        for prop in SkosProperty::iter() {
            if let Some(inv) = prop.inverse() {
                assert_eq!(inv.inverse(), Some(prop), "inverse of {prop} not symmetric");
            }
        }
    }

    #[test]
    fn symmetric_properties_have_no_declared_inverse() {
        for prop in SkosProperty::iter() {
            if prop.is_symmetric() {
                assert_eq!(prop.inverse(), None);
            }
        }
    }

    #[test]
    fn super_property_closure_is_transitive() {
        let supers = SkosProperty::ExactMatch.super_properties();
        assert!(supers.contains(&SkosProperty::CloseMatch));
        assert!(supers.contains(&SkosProperty::MappingRelation));
        assert!(supers.contains(&SkosProperty::SemanticRelation));
        assert!(!supers.contains(&SkosProperty::ExactMatch));

        let supers = SkosProperty::TopConceptOf.super_properties();
        assert_eq!(supers, vec![SkosProperty::InScheme]);

        let supers = SkosProperty::Member.super_properties();
        assert_eq!(supers, vec![SkosProperty::MemberTransitive]);
    }

    #[test]
    fn broad_match_inherits_through_both_parents() {
        let supers = SkosProperty::BroadMatch.super_properties();
        assert!(supers.contains(&SkosProperty::Broader));
        assert!(supers.contains(&SkosProperty::BroaderTransitive));
        assert!(supers.contains(&SkosProperty::MappingRelation));
        assert!(supers.contains(&SkosProperty::SemanticRelation));
    }

    #[test]
    fn class_uri_round_trip() {
        for class in SkosClass::iter() {
            assert_eq!(SkosClass::from_uri(&class.uri()), Some(class));
        }
        assert_eq!(SkosClass::from_uri("http://example.org/Concept"), None);
    }

    #[test]
    fn kind_split_matches_sub_vocabularies() {
        assert_eq!(SkosProperty::Broader.kind(), PropertyKind::Semantic);
        assert_eq!(SkosProperty::ExactMatch.kind(), PropertyKind::Semantic);
        assert_eq!(SkosProperty::InScheme.kind(), PropertyKind::Membership);
        assert_eq!(SkosProperty::Member.kind(), PropertyKind::Membership);
    }

    #[test]
    fn pref_label_is_single_valued() {
        assert!(AnnotationProperty::PrefLabel.single_valued());
        assert!(!AnnotationProperty::AltLabel.single_valued());
    }
}
