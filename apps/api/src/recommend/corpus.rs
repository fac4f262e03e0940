//! Corpus Builder — one normalized document per job posting plus one for the
//! worker profile, assembled fresh for every request.

use crate::recommend::models::{JobPosting, WorkerProfile};
use crate::recommend::normalize::{normalize, normalize_fields};

/// The comparison corpus for a single request. Document 0 is the worker;
/// job documents keep the input order of the posting list.
#[derive(Debug)]
pub struct Corpus {
    pub worker: Vec<String>,
    pub jobs: Vec<Vec<String>>,
}

impl Corpus {
    /// True when every document (worker and all jobs) normalized to nothing —
    /// the "empty corpus" condition that forces the fallback path.
    pub fn is_empty(&self) -> bool {
        self.worker.is_empty() && self.jobs.iter().all(Vec::is_empty)
    }

    /// Documents with at least one token, counting the worker's.
    pub fn non_empty_docs(&self) -> usize {
        usize::from(!self.worker.is_empty())
            + self.jobs.iter().filter(|d| !d.is_empty()).count()
    }
}

/// Builds the corpus: worker skills + experience as document 0, each job's
/// requirement text (plus structured skills) as documents 1..N.
pub fn build_corpus(worker: &WorkerProfile, jobs: &[JobPosting]) -> Corpus {
    let worker_fields = worker
        .skills
        .iter()
        .map(String::as_str)
        .chain(worker.experience.as_deref());

    Corpus {
        worker: normalize_fields(worker_fields),
        jobs: jobs
            .iter()
            .map(|job| normalize(&job.full_text()))
            .collect(),
    }
}
