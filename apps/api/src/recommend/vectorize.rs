//! Vectorizer — fits a TF-IDF model over the request's corpus and emits one
//! L2-normalized vector per document.
//!
//! This is a pure function from corpus to vectors: a fresh model per call,
//! nothing persisted, no randomness. The vocabulary is kept in sorted term
//! order so identical input always yields identical vectors.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::recommend::corpus::Corpus;
use crate::recommend::engine::Signal;

/// TF-IDF fitting parameters. Defaults mirror the production tuning:
/// unigrams + bigrams, smooth IDF, 95% document-frequency ceiling and a
/// vocabulary cap of `min(1000, 50 * n_docs)`.
#[derive(Debug, Clone)]
pub struct TfidfParams {
    /// Terms present in more than this fraction of documents are pruned.
    pub max_df: f64,
    /// Absolute vocabulary ceiling.
    pub max_features_cap: usize,
    /// Per-document contribution to the dynamic vocabulary ceiling.
    pub features_per_doc: usize,
}

impl Default for TfidfParams {
    fn default() -> Self {
        Self {
            max_df: 0.95,
            max_features_cap: 1000,
            features_per_doc: 50,
        }
    }
}

/// One vector per document, dimensioned by the fitted vocabulary.
/// `worker` is document 0; `jobs` keep the corpus order.
#[derive(Debug)]
pub struct TfidfVectors {
    pub worker: Vec<f64>,
    pub jobs: Vec<Vec<f64>>,
    pub vocabulary: Vec<String>,
}

/// Fits the model and transforms every document. Recoverable failures
/// (degenerate corpus, empty vocabulary, non-finite values) surface as
/// [`Signal::Vectorization`] and are absorbed by the orchestrator.
pub fn fit_transform(corpus: &Corpus, params: &TfidfParams) -> Result<TfidfVectors, Signal> {
    if corpus.worker.is_empty() {
        return Err(Signal::Vectorization(
            "worker document is empty after normalization".to_string(),
        ));
    }
    if corpus.non_empty_docs() < 2 {
        return Err(Signal::Vectorization(
            "fewer than 2 non-empty documents in corpus".to_string(),
        ));
    }

    let docs: Vec<Vec<String>> = std::iter::once(&corpus.worker)
        .chain(corpus.jobs.iter())
        .map(|tokens| doc_features(tokens))
        .collect();
    let n_docs = docs.len();

    // Document and corpus frequencies. BTreeMap keeps term order sorted.
    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    let mut corpus_freq: BTreeMap<&str, u64> = BTreeMap::new();
    for doc in &docs {
        let mut seen: HashSet<&str> = HashSet::new();
        for term in doc {
            *corpus_freq.entry(term.as_str()).or_insert(0) += 1;
            if seen.insert(term.as_str()) {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
    }

    // Prune terms that appear in more than max_df of the documents.
    let max_doc_count = ((params.max_df * n_docs as f64).floor() as usize).max(1);
    let mut terms: Vec<&str> = doc_freq
        .iter()
        .filter(|(_, &df)| df <= max_doc_count)
        .map(|(&term, _)| term)
        .collect();

    // Dynamic vocabulary cap: most frequent terms win, ties alphabetical.
    let cap = params
        .max_features_cap
        .min(params.features_per_doc * n_docs)
        .max(1);
    if terms.len() > cap {
        terms.sort_by(|a, b| corpus_freq[b].cmp(&corpus_freq[a]).then(a.cmp(b)));
        terms.truncate(cap);
        terms.sort_unstable();
    }

    if terms.is_empty() {
        return Err(Signal::Vectorization(
            "vocabulary is empty after pruning".to_string(),
        ));
    }

    let index: HashMap<&str, usize> = terms
        .iter()
        .enumerate()
        .map(|(i, &term)| (term, i))
        .collect();

    // Smooth IDF: ln((1 + n) / (1 + df)) + 1.
    let idf: Vec<f64> = terms
        .iter()
        .map(|term| (((1 + n_docs) as f64) / ((1 + doc_freq[term]) as f64)).ln() + 1.0)
        .collect();

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n_docs);
    for doc in &docs {
        let mut row = vec![0.0_f64; terms.len()];
        for term in doc {
            if let Some(&i) = index.get(term.as_str()) {
                row[i] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&idf) {
            *value *= idf;
        }
        let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if !norm.is_finite() {
            return Err(Signal::Vectorization(
                "non-finite value during vectorization".to_string(),
            ));
        }
        if norm > 0.0 {
            for value in &mut row {
                *value /= norm;
            }
        }
        rows.push(row);
    }

    let worker = rows.remove(0);
    Ok(TfidfVectors {
        worker,
        jobs: rows,
        vocabulary: terms.into_iter().map(str::to_string).collect(),
    })
}

/// Unigram + bigram features for one document. Bigrams are adjacent token
/// pairs joined by a space, matching the normalized token stream.
fn doc_features(tokens: &[String]) -> Vec<String> {
    let mut features: Vec<String> = tokens.to_vec();
    for pair in tokens.windows(2) {
        features.push(format!("{} {}", pair[0], pair[1]));
    }
    features
}
