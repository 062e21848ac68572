//! Label analysis pipeline: tokenizer and filter chains for indexing
//! thesaurus labels.
//!
//! The filters here are deliberately minimal — the pipeline seam is the
//! contract, and real deployments swap in their own stemmers and stop lists
//! through the [`Tokenizer`] and [`TokenFilter`] traits. Stop-word tables
//! live in an explicit registry built at startup and frozen before use; no
//! hidden static state.

use crate::error::{Result, ThesaurusError};
use ahash::AHashSet;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Splits raw label text into tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Transforms a token stream. Filters run in pipeline order.
pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: Vec<String>) -> Vec<String>;
}

/// Whitespace splitting, empty tokens dropped.
#[derive(Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// ASCII-preserving Unicode lowercasing.
#[derive(Debug, Default)]
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.into_iter().map(|t| t.to_lowercase()).collect()
    }
}

/// Drops tokens found in a language's stop-word table. A language with no
/// registered table filters nothing.
pub struct StopWordFilter {
    registry: Arc<StopWordRegistry>,
    language: String,
}

impl StopWordFilter {
    pub fn new(registry: Arc<StopWordRegistry>, language: impl Into<String>) -> Self {
        StopWordFilter {
            registry,
            language: language.into(),
        }
    }
}

impl TokenFilter for StopWordFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        match self.registry.stop_words(&self.language) {
            Some(table) => tokens
                .into_iter()
                .filter(|t| !table.contains(t.as_str()))
                .collect(),
            None => tokens,
        }
    }
}

/// Joins the whole token stream back into a single indexing term.
pub struct ConcatFilter {
    separator: String,
}

impl ConcatFilter {
    pub fn new(separator: impl Into<String>) -> Self {
        ConcatFilter {
            separator: separator.into(),
        }
    }
}

impl TokenFilter for ConcatFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        if tokens.is_empty() {
            return tokens;
        }
        vec![tokens.join(&self.separator)]
    }
}

/// A tokenizer followed by an ordered filter chain.
pub struct AnalyzerPipeline {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl AnalyzerPipeline {
    pub fn new(tokenizer: impl Tokenizer + 'static) -> Self {
        AnalyzerPipeline {
            tokenizer: Box::new(tokenizer),
            filters: Vec::new(),
        }
    }

    /// Whitespace tokenizing plus lowercasing.
    pub fn standard() -> Self {
        AnalyzerPipeline::new(WhitespaceTokenizer).with_filter(LowercaseFilter)
    }

    pub fn with_filter(mut self, filter: impl TokenFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.apply(tokens);
        }
        tokens
    }
}

/// Process-wide stop-word tables keyed by language. Populate during
/// startup, then [`freeze`](StopWordRegistry::freeze); registration after
/// freezing is an error, so readers never observe a moving table.
#[derive(Default)]
pub struct StopWordRegistry {
    tables: RwLock<HashMap<String, Arc<AHashSet<String>>>>,
    frozen: AtomicBool,
}

impl StopWordRegistry {
    pub fn new() -> Self {
        StopWordRegistry::default()
    }

    pub fn register(
        &self,
        language: impl Into<String>,
        words: impl IntoIterator<Item = String>,
    ) -> Result<()> {
        if self.frozen.load(Ordering::Acquire) {
            return Err(ThesaurusError::Config(
                "stop-word registry is frozen; register tables before first use".to_string(),
            ));
        }
        let table: AHashSet<String> = words.into_iter().collect();
        self.tables.write().insert(language.into(), Arc::new(table));
        Ok(())
    }

    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    pub fn stop_words(&self, language: &str) -> Option<Arc<AHashSet<String>>> {
        self.tables.read().get(language).cloned()
    }
}
