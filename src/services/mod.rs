pub mod corpus;
pub mod enrichment;
pub mod providers;
pub mod recommendations;
pub mod similarity;
pub mod tokenizer;

pub use recommendations::RecommendationEngine;
