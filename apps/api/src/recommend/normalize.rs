//! Text Normalizer — lowercases, strips punctuation, drops stopwords and
//! short tokens, then applies light suffix stemming so inflected forms of a
//! skill ("plumbing" / "plumber") land on a common stem. Deterministic and
//! side-effect free; empty input yields an empty token list, never an error.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens shorter than this are discarded ("a", "of", "c" after symbol
/// stripping carry no lexical signal).
const MIN_TOKEN_LEN: usize = 3;

/// A suffix is only stripped when at least this many characters remain,
/// which keeps short words like "spring" or "boot" intact.
const MIN_STEM_LEN: usize = 4;

/// English stopwords (NLTK-derived subset; entries shorter than
/// `MIN_TOKEN_LEN` are already caught by the length filter).
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "and", "any", "are", "aren",
    "because", "been", "before", "being", "below", "between", "both", "but", "can", "couldn",
    "did", "didn", "does", "doesn", "doing", "don", "down", "during", "each", "few", "for",
    "from", "further", "had", "hadn", "has", "hasn", "have", "haven", "having", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "into", "isn", "its", "itself", "just",
    "more", "most", "mustn", "myself", "needn", "nor", "not", "now", "off", "once", "only",
    "other", "our", "ours", "ourselves", "out", "over", "own", "same", "shan", "she", "should",
    "shouldn", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "too", "under", "until",
    "very", "was", "wasn", "were", "weren", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "won", "wouldn", "you", "your", "yours", "yourself",
    "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Normalizes free text into a token sequence: lowercase, every
/// non-alphanumeric character treated as a separator, stopwords and tokens
/// shorter than [`MIN_TOKEN_LEN`] removed, remaining tokens stemmed.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() >= MIN_TOKEN_LEN && !STOPWORD_SET.contains(token))
        .map(stem)
        .collect()
}

/// Normalizes several fields into one document (fields are independent,
/// so tokens never merge across a field boundary).
pub fn normalize_fields<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().flat_map(normalize).collect()
}

/// Light iterative suffix stripper (simplified from the Porter family).
/// Strips common inflection suffixes while at least [`MIN_STEM_LEN`]
/// characters remain, so "plumbing", "plumber" and "plumbers" all reduce
/// to "plumb".
fn stem(token: &str) -> String {
    // (suffix, replacement) pairs, longest suffix tried first per pass.
    const RULES: &[(&str, &str)] = &[
        ("ing", ""),
        ("ies", "y"),
        ("ied", "y"),
        ("ers", ""),
        ("es", ""),
        ("ed", ""),
        ("er", ""),
        ("e", ""),
        ("s", ""),
    ];

    let mut word = token.to_string();
    'outer: loop {
        for (suffix, replacement) in RULES {
            if let Some(prefix) = word.strip_suffix(suffix) {
                if prefix.len() >= MIN_STEM_LEN {
                    word = format!("{prefix}{replacement}");
                    continue 'outer;
                }
            }
        }
        return word;
    }
}
