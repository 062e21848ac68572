//! Error taxonomy for the SKOS graph engine.
//!
//! Read-side operations are total over valid inputs: "not found" and
//! unresolvable-scope conditions produce empty results, never errors. The
//! variants here cover the cases that genuinely cannot be answered — a
//! storage backend failure, a caller-supplied IRI that does not parse, or a
//! configuration file that cannot be loaded.

use oxigraph::model::IriParseError;
use oxigraph::store::{LoaderError, StorageError};
use thiserror::Error;

/// Errors surfaced by the engine and the graph facade.
#[derive(Debug, Error)]
pub enum ThesaurusError {
    /// A caller-supplied IRI is not a valid IRI reference.
    #[error("invalid IRI `{iri}`: {source}")]
    InvalidIri {
        iri: String,
        #[source]
        source: IriParseError,
    },

    /// The underlying triple store failed to answer a read.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// RDF data could not be loaded into the backend.
    #[error("failed to load RDF data: {0}")]
    Load(#[from] LoaderError),

    /// Configuration file or environment override was malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ThesaurusError>;

impl ThesaurusError {
    pub(crate) fn invalid_iri(iri: impl Into<String>, source: IriParseError) -> Self {
        ThesaurusError::InvalidIri {
            iri: iri.into(),
            source,
        }
    }
}
