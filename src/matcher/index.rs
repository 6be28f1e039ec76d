//! Embedding-backed nearest-neighbor index.
//!
//! Built once over a set of text snippets; immutable afterwards. There is no
//! incremental delete or update — rebuilding means reconstructing the whole
//! index.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::EmbeddingProvider;

/// A document stored in the index: the embedded text plus caller metadata.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub text: String,
    pub metadata: serde_json::Value,
}

impl IndexedDocument {
    pub fn new(text: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// One query result, ordered by increasing distance.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub distance: f32,
    pub document: IndexedDocument,
}

struct IndexRow {
    vector: Vec<f32>,
    document: IndexedDocument,
}

/// Exact k-nearest-neighbor index under cosine distance.
pub struct VectorSimilarityIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    rows: Vec<IndexRow>,
}

impl VectorSimilarityIndex {
    /// Build the index by embedding every document, one sequential call per
    /// snippet.
    pub async fn build(
        embedder: Arc<dyn EmbeddingProvider>,
        documents: Vec<IndexedDocument>,
    ) -> Result<Self, LlmError> {
        let mut rows = Vec::with_capacity(documents.len());
        for document in documents {
            let vector = embedder.embed(&document.text).await?;
            rows.push(IndexRow { vector, document });
        }
        tracing::debug!(rows = rows.len(), "Built similarity index");
        Ok(Self { embedder, rows })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return up to `k` nearest documents to `query`, closest first.
    ///
    /// Never fabricates entries: the result count is bounded by both `k`
    /// and the index size.
    pub async fn query(&self, query: &str, k: usize) -> Result<Vec<Neighbor>, LlmError> {
        if k == 0 || self.rows.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query).await?;

        let mut neighbors: Vec<Neighbor> = self
            .rows
            .iter()
            .map(|row| Neighbor {
                distance: cosine_distance(&query_vector, &row.vector),
                document: row.document.clone(),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }
}

/// Cosine distance in [0, 2]; zero-magnitude vectors compare as maximally
/// distant rather than dividing by zero.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 2.0;
    }
    1.0 - dot / (mag_a * mag_b)
}
