//! Semantic FAQ matching.
//!
//! Corpus questions are embedded once when the index is built; each request
//! only embeds the query. A match must score strictly above the threshold —
//! a score exactly at the cutoff is a miss.

use super::corpus::FaqEntry;
use crate::core::errors::ApiError;
use crate::llm::{EmbeddingProvider, ProviderError};
use crate::vector::rank_descending_by_cosine;

pub struct FaqIndex {
    entries: Vec<FaqEntry>,
    embeddings: Vec<Vec<f32>>,
    threshold: f32,
}

impl FaqIndex {
    pub fn empty(threshold: f32) -> Self {
        Self {
            entries: Vec::new(),
            embeddings: Vec::new(),
            threshold,
        }
    }

    pub fn new(
        entries: Vec<FaqEntry>,
        embeddings: Vec<Vec<f32>>,
        threshold: f32,
    ) -> Result<Self, ApiError> {
        if entries.len() != embeddings.len() {
            return Err(ApiError::Internal(format!(
                "FAQ index mismatch: {} entries, {} embeddings",
                entries.len(),
                embeddings.len()
            )));
        }
        Ok(Self {
            entries,
            embeddings,
            threshold,
        })
    }

    /// Embed every corpus question and build the index.
    pub async fn build(
        entries: Vec<FaqEntry>,
        embedder: &dyn EmbeddingProvider,
        threshold: f32,
    ) -> Result<Self, ProviderError> {
        if entries.is_empty() {
            return Ok(Self::empty(threshold));
        }

        let questions: Vec<String> = entries.iter().map(|e| e.question.clone()).collect();
        let embeddings = embedder.embed(&questions).await?;

        Self::new(entries, embeddings, threshold)
            .map_err(|err| ProviderError::Malformed(err.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nearest corpus entry by cosine similarity, if strictly above the
    /// threshold.
    pub fn best_match(&self, query_embedding: &[f32]) -> Option<(&FaqEntry, f32)> {
        let ranked = rank_descending_by_cosine(query_embedding, &self.embeddings);
        let (idx, score) = ranked.first().copied()?;

        if score > self.threshold {
            Some((&self.entries[idx], score))
        } else {
            None
        }
    }
}
