//! Fallback Matcher — rule-based overlap scoring used when the similarity
//! model cannot be built or produces no discriminating signal.
//!
//! This is the terminal safety net: it is total over all inputs. Fully empty
//! requests score every job 0 and keep input order.

use crate::recommend::models::{JobPosting, ScoredJob, WorkerProfile};

/// Scores each job by the number of worker skill tokens that appear
/// (case-insensitive, substring or exact) in the job's text. Raw skills are
/// matched, not normalized ones, so multi-word skills like "spring boot"
/// still count when the posting spells them the same way.
pub fn score_by_overlap(worker: &WorkerProfile, jobs: &[JobPosting]) -> Vec<ScoredJob> {
    let skill_tokens: Vec<String> = worker
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    jobs.iter()
        .map(|job| {
            let haystack = job.full_text().to_lowercase();
            let overlap = skill_tokens
                .iter()
                .filter(|skill| haystack.contains(skill.as_str()))
                .count();
            ScoredJob {
                id: job.id.clone(),
                score: overlap as f64,
            }
        })
        .collect()
}
