use std::collections::{BTreeMap, BTreeSet};

/// Added to the cosine denominator so all-zero vectors compare as 0 instead of NaN.
pub const SIMILARITY_EPSILON: f64 = 1e-9;

/// Lower-cases and splits on runs of non-alphanumeric characters, dropping empty tokens.
///
/// Shared by corpus construction and vectorization; the two must never diverge.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sparse term → weight vector. Ordered so that dot products sum in a stable order.
pub type TermVector = BTreeMap<String, f64>;

/// Inverse-document-frequency table built once per matching run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    documents: usize,
    idf: BTreeMap<String, f64>,
}

impl LexicalIndex {
    /// Computes `ln(N / (df + 1))` for every term in the corpus.
    pub fn build<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut documents = 0usize;
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for blob in corpus {
            documents += 1;
            let distinct: BTreeSet<String> = tokenize(blob.as_ref()).into_iter().collect();
            for term in distinct {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let total = documents as f64;
        let idf = document_frequency
            .into_iter()
            .map(|(term, df)| (term, (total / (df as f64 + 1.0)).ln()))
            .collect();

        Self { documents, idf }
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// IDF weight of a term, `None` when the corpus never saw it.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Raw term counts scaled by IDF. Terms unknown to the corpus are left out.
    pub fn vectorize(&self, text: &str) -> TermVector {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .filter_map(|(term, count)| {
                self.idf
                    .get(&term)
                    .map(|weight| (term, count as f64 * weight))
            })
            .collect()
    }

    /// Cosine similarity of the two texts' TF-IDF vectors.
    pub fn similarity(&self, left: &str, right: &str) -> f64 {
        cosine(&self.vectorize(left), &self.vectorize(right))
    }
}

fn cosine(left: &TermVector, right: &TermVector) -> f64 {
    let dot: f64 = left
        .iter()
        .filter_map(|(term, weight)| right.get(term).map(|other| weight * other))
        .sum();
    let norm_left = left.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_right = right.values().map(|w| w * w).sum::<f64>().sqrt();

    dot / (norm_left * norm_right + SIMILARITY_EPSILON)
}
