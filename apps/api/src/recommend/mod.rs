// Recommendation engine: lexical job ranking for a worker profile.
// Pipeline: normalize -> corpus -> vectorize (TF-IDF) -> rank (cosine),
// with a rule-based overlap fallback when the model yields no signal.

pub mod corpus;
pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod similarity;
pub mod vectorize;
