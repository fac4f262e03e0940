//! Request/response contract for the recommendation engine.
//!
//! Every type here is created fresh from the caller's payload and discarded
//! once the response is produced — the engine persists nothing.

use serde::{Deserialize, Serialize};

/// The worker whose profile drives the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub id: String,
    /// Declared skills, in the worker's own ordering.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free-text experience description.
    #[serde(default)]
    pub experience: Option<String>,
}

impl WorkerProfile {
    /// True when no text field carries any content — there is nothing to
    /// rank against and the engine must take the fallback path.
    pub fn has_signal(&self) -> bool {
        self.skills.iter().any(|s| !s.trim().is_empty())
            || self
                .experience
                .as_deref()
                .is_some_and(|e| !e.trim().is_empty())
    }
}

/// One open job posting from the candidate set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub requirements: String,
    /// Optional structured skill list supplementing the free text.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl JobPosting {
    /// Requirements plus any structured skills, joined for matching.
    pub fn full_text(&self) -> String {
        match &self.skills {
            Some(skills) if !skills.is_empty() => {
                format!("{} {}", self.requirements, skills.join(" "))
            }
            _ => self.requirements.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub worker_profile: WorkerProfile,
    pub job_postings: Vec<JobPosting>,
    /// Truncate the ranking to the top K jobs. Absent = return all.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Include per-job scores in the response.
    #[serde(default)]
    pub include_scores: bool,
}

/// Which scoring path produced the ranking. Fallback and similarity scores
/// are not on a common scale and must not be compared across methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Similarity,
    Fallback,
}

/// A job identifier paired with its relevance score (higher = more relevant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJob {
    pub id: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Job ids in descending relevance, a permutation of the input ids
    /// (before any requested truncation).
    pub ranked_job_ids: Vec<String>,
    pub method: Method,
    /// Present only when the caller asked for scores; ordered identically
    /// to `ranked_job_ids`, scores non-increasing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<ScoredJob>>,
}
