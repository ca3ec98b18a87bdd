//! TF-IDF vector space and all-pairs cosine similarity over movie overviews.
//!
//! Weights follow the smooth-idf scheme: `tf * (ln((1 + n) / (1 + df)) + 1)`,
//! with every document vector L2-normalised so cosine similarity reduces to a
//! dot product.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::MovieRecord;
use crate::services::tokenizer::tokenize;

/// Sparse vector stored as `(dimension, weight)` pairs sorted by dimension
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (self.entries.iter().peekable(), other.entries.iter().peekable());
        let mut sum = 0.0;
        while let (Some(&&(i, x)), Some(&&(j, y))) = (a.peek(), b.peek()) {
            match i.cmp(&j) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += x * y;
                    a.next();
                    b.next();
                }
            }
        }
        sum
    }
}

/// TF-IDF model fitted over an ordered set of documents
///
/// Immutable once built. Vector `i` belongs to document `i`.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Fits the vocabulary and idf weights and vectorizes every document
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Dimensions are assigned in lexicographic term order
        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let vocabulary: BTreeMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|tokens| {
                let mut term_counts = BTreeMap::new();
                for token in tokens {
                    *term_counts.entry(vocabulary[token.as_str()]).or_insert(0) += 1;
                }
                for &dimension in term_counts.keys() {
                    doc_freq[dimension] += 1;
                }
                term_counts
            })
            .collect();

        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|term_counts| {
                let mut entries: Vec<(usize, f64)> = term_counts
                    .into_iter()
                    .map(|(dimension, tf)| (dimension, tf as f64 * idf[dimension]))
                    .collect();
                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    entries.iter_mut().for_each(|(_, w)| *w /= norm);
                }
                SparseVector { entries }
            })
            .collect();

        Self {
            vocabulary,
            idf,
            vectors,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension index of a term, if it is in the vocabulary
    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.dimension(term).map(|d| self.idf[d])
    }

    pub fn vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }
}

/// Dense, symmetric N×N cosine similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Vectorizes the overviews of `records` and computes all pairwise similarities
    ///
    /// An empty corpus yields an empty matrix.
    pub fn build(records: &[MovieRecord]) -> Self {
        let overviews: Vec<&str> = records.iter().map(|r| r.overview.as_str()).collect();
        Self::from_vector_space(&VectorSpace::fit(&overviews))
    }

    /// Computes the upper triangle through an inverted index and mirrors it
    ///
    /// The diagonal is exactly 1.0 for non-zero vectors and 0.0 for zero vectors.
    pub fn from_vector_space(space: &VectorSpace) -> Self {
        let size = space.len();
        let vectors = space.vectors();
        let mut scores = vec![0.0; size * size];

        // Postings are pushed in document order, so each list is sorted by document
        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); space.vocabulary_size()];
        for (doc, vector) in vectors.iter().enumerate() {
            for &(dimension, weight) in vector.entries() {
                postings[dimension].push((doc, weight));
            }
        }

        let mut row = vec![0.0; size];
        for (i, vector) in vectors.iter().enumerate() {
            row[i..].iter_mut().for_each(|score| *score = 0.0);

            for &(dimension, weight) in vector.entries() {
                let list = &postings[dimension];
                let start = list.partition_point(|&(doc, _)| doc < i);
                for &(j, other) in &list[start..] {
                    row[j] += weight * other;
                }
            }

            for j in i + 1..size {
                scores[i * size + j] = row[j];
                scores[j * size + i] = row[j];
            }
            scores[i * size + i] = if vector.is_zero() { 0.0 } else { 1.0 };
        }

        Self { size, scores }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity between rows `i` and `j`
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "similarity index out of bounds");
        self.scores[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.size {
            return None;
        }
        Some(&self.scores[i * self.size..(i + 1) * self.size])
    }
}
