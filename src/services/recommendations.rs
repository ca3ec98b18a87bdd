use std::time::Instant;

use crate::{
    models::MovieRecord,
    services::similarity::{SimilarityMatrix, VectorSpace},
};

/// Maximum number of titles returned per query
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Row index of the first record whose title matches `query` case-insensitively
pub fn find_title(records: &[MovieRecord], query: &str) -> Option<usize> {
    let query = query.to_lowercase();
    records
        .iter()
        .position(|record| record.title.to_lowercase() == query)
}

/// Titles most similar to `query_title`, best first
///
/// Returns an empty list when the title is not in the corpus. Rows carrying
/// the query's own title are never recommended. Equal scores keep corpus order.
pub fn recommend(
    query_title: &str,
    records: &[MovieRecord],
    matrix: &SimilarityMatrix,
) -> Vec<String> {
    let Some(index) = find_title(records, query_title) else {
        return Vec::new();
    };
    let Some(row) = matrix.row(index) else {
        return Vec::new();
    };

    let own_title = records[index].title.to_lowercase();
    let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .filter(|&(row_id, _)| row_id != index)
        .filter_map(|(row_id, _)| records.get(row_id))
        .filter(|record| record.title.to_lowercase() != own_title)
        .take(MAX_RECOMMENDATIONS)
        .map(|record| record.title.clone())
        .collect()
}

/// Read-only corpus and similarity matrix built once at startup
///
/// Holding both together keeps row identifiers consistent between
/// vectorization and lookup.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    records: Vec<MovieRecord>,
    matrix: SimilarityMatrix,
    vocabulary_size: usize,
}

impl RecommendationEngine {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        let started = Instant::now();

        let overviews: Vec<&str> = records.iter().map(|r| r.overview.as_str()).collect();
        let space = VectorSpace::fit(&overviews);
        let matrix = SimilarityMatrix::from_vector_space(&space);

        tracing::info!(
            movies = records.len(),
            vocabulary = space.vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity matrix built"
        );

        Self {
            vocabulary_size: space.vocabulary_size(),
            records,
            matrix,
        }
    }

    pub fn recommend(&self, query_title: &str) -> Vec<String> {
        recommend(query_title, &self.records, &self.matrix)
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Corpus titles in row order
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.title.as_str()).collect()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        find_title(&self.records, title).is_some()
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
