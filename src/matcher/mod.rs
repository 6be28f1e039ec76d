//! Skill matching and context retrieval over the similarity index.

pub mod index;

pub use index::{IndexedDocument, Neighbor, VectorSimilarityIndex};

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::EmbeddingProvider;
use crate::records::Roster;

/// Shortlists employees whose skill text is nearest to a required-skill
/// query. The index is built once from the roster and never mutated.
pub struct SkillMatcher {
    index: VectorSimilarityIndex,
}

impl SkillMatcher {
    /// Embed every employee as `"name: skill, skill, …"` and index them.
    pub async fn build(
        embedder: Arc<dyn EmbeddingProvider>,
        roster: &Roster,
    ) -> Result<Self, LlmError> {
        let documents = roster
            .employees
            .iter()
            .map(|e| {
                IndexedDocument::new(
                    e.skill_snippet(),
                    serde_json::json!({
                        "name": e.name,
                        "title": e.title,
                        "skills": e.skills,
                    }),
                )
            })
            .collect();
        let index = VectorSimilarityIndex::build(embedder, documents).await?;
        Ok(Self { index })
    }

    /// Return the metadata of up to `k` employees nearest to the space-joined
    /// skill list, ordered by increasing distance.
    pub async fn find_match(
        &self,
        required_skills: &[String],
        k: usize,
    ) -> Result<Vec<serde_json::Value>, LlmError> {
        let query = required_skills.join(" ");
        let neighbors = self.index.query(&query, k).await?;
        Ok(neighbors.into_iter().map(|n| n.document.metadata).collect())
    }
}

/// Retrieves grounding context for a reasoning session: the top-k task and
/// employee snippets nearest to the user query.
pub struct ContextRetriever {
    index: VectorSimilarityIndex,
}

impl ContextRetriever {
    /// Index every task and employee as a `[TASK]`/`[EMPLOYEE]` snippet.
    pub async fn build(
        embedder: Arc<dyn EmbeddingProvider>,
        roster: &Roster,
    ) -> Result<Self, LlmError> {
        let mut documents = Vec::with_capacity(roster.tasks.len() + roster.employees.len());
        for task in &roster.tasks {
            documents.push(IndexedDocument::new(
                task.context_snippet(),
                serde_json::json!({"type": "task", "key": task.key}),
            ));
        }
        for employee in &roster.employees {
            documents.push(IndexedDocument::new(
                employee.context_snippet(),
                serde_json::json!({"type": "employee", "name": employee.name}),
            ));
        }
        let index = VectorSimilarityIndex::build(embedder, documents).await?;
        Ok(Self { index })
    }

    /// Combine the top-k snippets into one context block for the prompt.
    pub async fn context_for(&self, query: &str, k: usize) -> Result<String, LlmError> {
        let neighbors = self.index.query(query, k).await?;
        Ok(neighbors
            .iter()
            .map(|n| n.document.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n---\n\n"))
    }
}
