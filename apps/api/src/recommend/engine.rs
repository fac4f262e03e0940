//! Recommendation Orchestrator — validates the request, drives the
//! normalize -> corpus -> vectorize -> rank pipeline and absorbs every
//! internal failure into the fallback matcher.
//!
//! The reliability contract: the only errors a caller ever sees are its own
//! (empty identifier, duplicate job ids). Everything else degrades to a
//! successful response tagged `method: "fallback"`.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::recommend::corpus::build_corpus;
use crate::recommend::fallback::score_by_overlap;
use crate::recommend::models::{
    Method, RecommendationRequest, RecommendationResponse, ScoredJob,
};
use crate::recommend::similarity::score_jobs;
use crate::recommend::vectorize::{fit_transform, TfidfParams};

/// Internal recoverable failure. Never crosses the handler boundary —
/// each variant routes the request to the fallback matcher.
#[derive(Debug, Error)]
pub enum Signal {
    #[error("insufficient signal: no usable text after normalization")]
    EmptyCorpus,

    #[error("vectorization failed: {0}")]
    Vectorization(String),

    #[error("no discriminating signal in similarity ranking")]
    FlatSimilarity,
}

/// Engine tunables, fixed at startup and shared immutably across requests.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Similarity rankings whose spread (or maximum) does not exceed this
    /// are treated as flat and replaced by the fallback ranking.
    pub flat_epsilon: f64,
    pub tfidf: TfidfParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flat_epsilon: 1e-9,
            tfidf: TfidfParams::default(),
        }
    }
}

pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Produces a ranked ordering of the request's jobs. All per-request
    /// state lives on this call's stack; the engine itself never mutates.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResponse, AppError> {
        self.validate(request)?;

        // An empty candidate set is a valid request with an empty answer,
        // not an error.
        if request.job_postings.is_empty() {
            return Ok(RecommendationResponse {
                ranked_job_ids: vec![],
                method: Method::Similarity,
                scores: request.include_scores.then(Vec::new),
            });
        }

        let (mut scored, method) = match self.rank_by_similarity(request) {
            Ok(scored) => (scored, Method::Similarity),
            Err(signal) => {
                warn!("similarity ranking unavailable ({signal}), using fallback matcher");
                (
                    score_by_overlap(&request.worker_profile, &request.job_postings),
                    Method::Fallback,
                )
            }
        };

        // Stable descending sort: ties keep the caller's job order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = request.limit {
            scored.truncate(limit);
        }

        debug!(
            jobs = scored.len(),
            method = ?method,
            "ranking complete"
        );

        Ok(RecommendationResponse {
            ranked_job_ids: scored.iter().map(|s| s.id.clone()).collect(),
            method,
            scores: request.include_scores.then_some(scored),
        })
    }

    fn validate(&self, request: &RecommendationRequest) -> Result<(), AppError> {
        if request.worker_profile.id.trim().is_empty() {
            return Err(AppError::Validation(
                "worker profile is missing an identifier".to_string(),
            ));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for job in &request.job_postings {
            if !seen.insert(job.id.as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate job id '{}' in request",
                    job.id
                )));
            }
        }
        Ok(())
    }

    /// Happy path: corpus -> TF-IDF -> cosine scores. Every failure here is
    /// a recoverable [`Signal`].
    fn rank_by_similarity(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<ScoredJob>, Signal> {
        if !request.worker_profile.has_signal() {
            return Err(Signal::EmptyCorpus);
        }

        let corpus = build_corpus(&request.worker_profile, &request.job_postings);
        if corpus.is_empty() {
            return Err(Signal::EmptyCorpus);
        }

        let vectors = fit_transform(&corpus, &self.config.tfidf)?;
        debug!(
            vocabulary = vectors.vocabulary.len(),
            documents = corpus.non_empty_docs(),
            "tf-idf model fitted"
        );
        let scored = score_jobs(&vectors, &request.job_postings);

        if scored.iter().any(|s| !s.score.is_finite()) {
            return Err(Signal::Vectorization(
                "non-finite similarity score".to_string(),
            ));
        }
        if self.is_flat(&scored) {
            return Err(Signal::FlatSimilarity);
        }
        Ok(scored)
    }

    /// A ranking is flat when every score is effectively zero, or when two
    /// or more jobs all land within epsilon of each other. A single job
    /// with a positive score is a real signal, not a flat one.
    fn is_flat(&self, scored: &[ScoredJob]) -> bool {
        let eps = self.config.flat_epsilon;
        let max = scored.iter().map(|s| s.score).fold(f64::MIN, f64::max);
        let min = scored.iter().map(|s| s.score).fold(f64::MAX, f64::min);
        max <= eps || (scored.len() >= 2 && max - min <= eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::models::{JobPosting, WorkerProfile};

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    fn worker(id: &str, skills: &[&str], experience: Option<&str>) -> WorkerProfile {
        WorkerProfile {
            id: id.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.map(str::to_string),
        }
    }

    fn job(id: &str, requirements: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            requirements: requirements.to_string(),
            skills: None,
        }
    }

    fn request(
        worker_profile: WorkerProfile,
        job_postings: Vec<JobPosting>,
    ) -> RecommendationRequest {
        RecommendationRequest {
            worker_profile,
            job_postings,
            limit: None,
            include_scores: false,
        }
    }

    #[test]
    fn test_similarity_ranks_matching_job_first() {
        let req = request(
            worker("w1", &["plumbing", "electrical"], None),
            vec![
                job("job-b", "graphic designer wanted"),
                job("job-a", "experienced plumber needed"),
            ],
        );
        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.method, Method::Similarity);
        assert_eq!(resp.ranked_job_ids[0], "job-a");
        assert_eq!(resp.ranked_job_ids[1], "job-b");
    }

    #[test]
    fn test_ranking_is_permutation_of_input_ids() {
        let req = request(
            worker("w1", &["rust", "tokio"], Some("async backend work")),
            vec![
                job("j1", "rust backend engineer"),
                job("j2", ""),
                job("j3", "frontend react developer"),
                job("j4", "rust and tokio services"),
            ],
        );
        let resp = engine().recommend(&req).unwrap();

        let mut ranked = resp.ranked_job_ids.clone();
        ranked.sort();
        assert_eq!(ranked, vec!["j1", "j2", "j3", "j4"]);
    }

    #[test]
    fn test_empty_job_list_is_not_an_error() {
        let req = request(worker("w1", &["rust"], None), vec![]);
        let resp = engine().recommend(&req).unwrap();
        assert!(resp.ranked_job_ids.is_empty());
        assert_eq!(resp.method, Method::Similarity);
    }

    #[test]
    fn test_missing_worker_id_is_caller_error() {
        let req = request(worker("  ", &["rust"], None), vec![job("j1", "rust")]);
        assert!(matches!(
            engine().recommend(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_duplicate_job_ids_are_caller_error() {
        let req = request(
            worker("w1", &["rust"], None),
            vec![job("j1", "rust"), job("j1", "more rust")],
        );
        assert!(matches!(
            engine().recommend(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_all_empty_corpus_falls_back_preserving_order() {
        let req = request(
            worker("w1", &[], None),
            vec![job("j1", ""), job("j2", "  "), job("j3", "!!!")],
        );
        let mut req = req;
        req.include_scores = true;

        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.method, Method::Fallback);
        assert_eq!(resp.ranked_job_ids, vec!["j1", "j2", "j3"]);
        assert!(resp
            .scores
            .unwrap()
            .iter()
            .all(|s| s.score == 0.0));
    }

    #[test]
    fn test_worker_without_signal_falls_back() {
        let req = request(
            worker("w1", &[], None),
            vec![job("j1", "welding role"), job("j2", "cooking role")],
        );
        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.method, Method::Fallback);
        assert_eq!(resp.ranked_job_ids.len(), 2);
    }

    #[test]
    fn test_single_job_is_always_first() {
        let req = request(
            worker("w1", &["rust"], None),
            vec![job("only", "culinary school instructor")],
        );
        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.ranked_job_ids, vec!["only"]);
    }

    #[test]
    fn test_identical_jobs_tie_flatly_and_keep_order() {
        // Equal similarity across all jobs is treated as no signal: the
        // fallback ranking applies, and its ties keep input order.
        let req = request(
            worker("w1", &["rust"], None),
            vec![
                job("first", "rust developer position"),
                job("second", "rust developer position"),
            ],
        );
        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.method, Method::Fallback);
        assert_eq!(resp.ranked_job_ids, vec!["first", "second"]);
    }

    #[test]
    fn test_idempotent_across_invocations() {
        let mut req = request(
            worker("w1", &["java", "spring boot", "sql"], Some("backend apis")),
            vec![
                job("j1", "java spring boot developer"),
                job("j2", "python data engineer"),
                job("j3", "sql database administrator"),
            ],
        );
        req.include_scores = true;

        let first = engine().recommend(&req).unwrap();
        let second = engine().recommend(&req).unwrap();
        assert_eq!(first.ranked_job_ids, second.ranked_job_ids);
        assert_eq!(
            serde_json::to_string(&first.scores).unwrap(),
            serde_json::to_string(&second.scores).unwrap()
        );
    }

    #[test]
    fn test_scores_are_non_increasing_and_aligned() {
        let mut req = request(
            worker("w1", &["welding", "fabrication"], None),
            vec![
                job("j1", "office clerk"),
                job("j2", "welding and fabrication specialist"),
                job("j3", "welding assistant"),
            ],
        );
        req.include_scores = true;

        let resp = engine().recommend(&req).unwrap();
        let scores = resp.scores.unwrap();
        assert_eq!(scores.len(), resp.ranked_job_ids.len());
        for (scored, id) in scores.iter().zip(&resp.ranked_job_ids) {
            assert_eq!(&scored.id, id);
        }
        for pair in scores.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_limit_truncates_after_ranking() {
        let mut req = request(
            worker("w1", &["rust"], None),
            vec![
                job("j1", "rust engineer"),
                job("j2", "gardener"),
                job("j3", "florist"),
            ],
        );
        req.limit = Some(1);

        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.ranked_job_ids, vec!["j1"]);
    }

    #[test]
    fn test_special_character_skills_still_rank() {
        let req = request(
            worker("w1", &["C++", ".NET", "SQL Server"], None),
            vec![
                job("cpp", "C++ Visual Studio"),
                job("dotnet", ".NET Framework SQL"),
            ],
        );
        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.ranked_job_ids.len(), 2);
        // ".NET" and "SQL Server" survive normalization as "net"/"sql"
        // tokens, so the .NET posting wins.
        assert_eq!(resp.ranked_job_ids[0], "dotnet");
    }

    #[test]
    fn test_large_request_completes() {
        let jobs: Vec<JobPosting> = (0..100)
            .map(|i| {
                job(
                    &format!("j{i}"),
                    &format!("skill{} technology{} framework{}", i % 10, i % 5, i % 3),
                )
            })
            .collect();
        let req = request(worker("w1", &["skill1", "technology2"], None), jobs);

        let resp = engine().recommend(&req).unwrap();
        assert_eq!(resp.ranked_job_ids.len(), 100);
    }
}
