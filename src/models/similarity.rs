use crate::error::StoreError;

/// Square matrix of precomputed pairwise similarity scores
///
/// Entry `(i, j)` is the similarity between catalog positions `i` and `j`.
/// Values are stored row-major. Symmetry and value range are whatever the
/// offline job produced; only the shape is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds the matrix from nested rows, rejecting anything that is not N×N
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, StoreError> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(StoreError::Load(format!(
                    "similarity matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            values.extend(row);
        }

        Ok(Self { size, values })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of `position` against every catalog position, or `None` when out of range
    pub fn row(&self, position: usize) -> Option<&[f32]> {
        if position >= self.size {
            return None;
        }
        let start = position * self.size;
        Some(&self.values[start..start + self.size])
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }
}
