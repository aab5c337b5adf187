//! Descending-size subset generation over the query set.

use vigil_core::errors::{QueryError, QueryResult};
use vigil_core::models::DrugId;

/// Lazy, finite, restartable sequence of query subsets.
///
/// Subsets are yielded grouped by size in descending order (n, n−1, …, 2);
/// within a size, lexicographically by input position. Duplicate drug ids
/// are collapsed on construction, preserving first occurrence, so the
/// traversal order — and everything downstream of it — is deterministic.
#[derive(Debug, Clone)]
pub struct Combinations {
    ids: Vec<DrugId>,
    size: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    /// Build the sequence. Fails with [`QueryError::InvalidQuery`] when
    /// fewer than 2 distinct drugs remain after dedup.
    pub fn new(drug_ids: &[DrugId]) -> QueryResult<Self> {
        let mut ids: Vec<DrugId> = Vec::with_capacity(drug_ids.len());
        for id in drug_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        let n = ids.len();
        if n < 2 {
            return Err(QueryError::InvalidQuery { got: n });
        }
        Ok(Self {
            size: n,
            indices: (0..n).collect(),
            ids,
            exhausted: false,
        })
    }

    /// The deduplicated query set, in input order.
    pub fn query(&self) -> &[DrugId] {
        &self.ids
    }

    pub fn query_len(&self) -> usize {
        self.ids.len()
    }

    /// Rewind to the full-size subset; the sequence replays identically.
    pub fn reset(&mut self) {
        self.size = self.ids.len();
        self.indices = (0..self.size).collect();
        self.exhausted = false;
    }

    fn advance(&mut self) {
        let n = self.ids.len();
        let k = self.size;
        let mut i = k;
        while i > 0 {
            i -= 1;
            // indices[i] ranges up to n − k + i within size k.
            if self.indices[i] < n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return;
            }
        }
        // Size exhausted: step down, stopping after pairs.
        if k == 2 {
            self.exhausted = true;
        } else {
            self.size = k - 1;
            self.indices = (0..self.size).collect();
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<DrugId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let subset: Vec<DrugId> = self.indices.iter().map(|&i| self.ids[i].clone()).collect();
        self.advance();
        Some(subset)
    }
}
