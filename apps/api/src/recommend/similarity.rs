//! Similarity Ranker — cosine similarity between the worker vector and each
//! job vector.

use crate::recommend::models::{JobPosting, ScoredJob};
use crate::recommend::vectorize::TfidfVectors;

/// Cosine similarity `dot(a, b) / (|a| * |b|)`, defined as 0 when either
/// vector has zero magnitude so degenerate documents never divide by zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores every job against the worker vector, preserving input order.
/// Sorting is the orchestrator's job so ties keep this order.
pub fn score_jobs(vectors: &TfidfVectors, jobs: &[JobPosting]) -> Vec<ScoredJob> {
    vectors
        .jobs
        .iter()
        .zip(jobs)
        .map(|(job_vector, job)| ScoredJob {
            id: job.id.clone(),
            score: cosine_similarity(&vectors.worker, job_vector),
        })
        .collect()
}
