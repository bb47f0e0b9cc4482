//! Cross-feature scoring
//!
//! A scoring routine modeled after a production ranking pipeline: given
//! two sparse annotation features (query side and pin side), compute the
//! cosine max-norm match — how strongly the annotation sets overlap,
//! normalized by the dominant scores on each side.
//!
//! # Core Concepts
//!
//! - **SparseFeature**: COO-style sparse 2-D feature; sorted index
//!   pairs, one value per pair, a dense shape for bounds
//! - **cosine_max_norm_match**: the scoring kernel — a two-pointer
//!   merge-join over the sorted index lists
//! - **related_pins_match_score**: the gated entry point that applies
//!   the view-type and need-compute checks before scoring
//!
//! # The Merge-Join
//!
//! Both index lists are sorted lexicographically, so shared indices can
//! be found in one linear pass: advance whichever pointer is behind,
//! accumulate the product when the indices match. The pass also records
//! the match count and the maximum matched product, so the dense
//! materialization the routine historically used is never needed at
//! run time (it survives as a test oracle via [`SparseFeature::to_dense`]).

use ndarray::Array2;
use std::cmp::Ordering;
use std::fmt;

// =================================================================================================
// Constants
// =================================================================================================

/// View type gating the cross feature (RELATED_PINS)
pub const RELATED_PINS_VIEW_TYPE: i32 = 42;

/// Values below this are treated as absent by the scoring kernel
pub const SCORE_EPSILON: f64 = 1e-14;

// =================================================================================================
// Sparse Feature
// =================================================================================================

/// A sparse 2-D feature in coordinate form
///
/// Index pairs are `[row, column]`, sorted lexicographically and
/// deduplicated; `values[k]` belongs to `indices[k]`. The dense shape
/// bounds the indices and sizes [`to_dense`](Self::to_dense).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseFeature {
    indices: Vec<[i64; 2]>,
    values: Vec<f64>,
    dense_shape: [usize; 2],
}

impl SparseFeature {
    /// Create a sparse feature, validating its invariants
    ///
    /// # Errors
    ///
    /// - index/value length mismatch
    /// - indices out of lexicographic order or duplicated
    /// - an index outside the dense shape
    pub fn new(
        indices: Vec<[i64; 2]>,
        values: Vec<f64>,
        dense_shape: [usize; 2],
    ) -> Result<Self, String> {
        if indices.len() != values.len() {
            return Err(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            ));
        }

        for (k, index) in indices.iter().enumerate() {
            if index[0] < 0
                || index[1] < 0
                || index[0] as usize >= dense_shape[0]
                || index[1] as usize >= dense_shape[1]
            {
                return Err(format!(
                    "index {:?} outside dense shape {:?}",
                    index, dense_shape
                ));
            }
            if k > 0 && indices[k - 1] >= *index {
                return Err(format!(
                    "indices must be strictly increasing: {:?} before {:?}",
                    indices[k - 1],
                    index
                ));
            }
        }

        Ok(Self {
            indices,
            values,
            dense_shape,
        })
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense shape `[rows, columns]`
    pub fn dense_shape(&self) -> [usize; 2] {
        self.dense_shape
    }

    /// Largest stored value, or `None` when empty
    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().cloned().fold(None, |acc, v| match acc {
            None => Some(v),
            Some(m) => Some(m.max(v)),
        })
    }

    /// True when any stored value is below the scoring epsilon
    pub fn has_sub_epsilon_value(&self) -> bool {
        self.values.iter().any(|v| *v < SCORE_EPSILON)
    }

    /// Stored index pairs, in order
    pub fn indices(&self) -> &[[i64; 2]] {
        &self.indices
    }

    /// Stored values, in index order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Materialize the feature as a dense ndarray matrix
    ///
    /// Only sensible for small shapes; the scoring kernel never calls
    /// this, but tests use it to cross-check the merge-join against a
    /// naive dense evaluation.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.dense_shape[0], self.dense_shape[1]));
        for (index, value) in self.indices.iter().zip(&self.values) {
            dense[[index[0] as usize, index[1] as usize]] = *value;
        }
        dense
    }
}

// =================================================================================================
// Match Score
// =================================================================================================

/// Result of the cosine max-norm match
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchScore {
    /// Number of shared indices with a nonzero product
    pub num_matches: f64,

    /// Dot product over shared indices, divided by the query-side max
    /// value and by the maximum matched product
    pub cosine_max_norm: f64,
}

impl MatchScore {
    /// The early-return value: no comparison performed
    pub fn zeros() -> Self {
        Self::default()
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.num_matches, self.cosine_max_norm)
    }
}

// =================================================================================================
// Scoring Kernel
// =================================================================================================

/// Cosine max-norm match between two sparse features
///
/// # Algorithm
///
/// 1. Early-outs: a query side whose maximum value is below epsilon, or
///    any sub-epsilon value on either side, scores zero — degenerate
///    inputs are not worth a pass.
/// 2. Two-pointer merge-join over the sorted index lists:
///    - advance `j` while `b`'s index is behind `a`'s
///    - on an index match, accumulate `score += a_k * b_j`, count the
///      match, track the maximum product
///    - otherwise advance `i`
/// 3. Normalize: `score / max(a.values) / max_product`.
///
/// No shared indices (or an all-zero overlap) scores zero.
pub fn cosine_max_norm_match(a: &SparseFeature, b: &SparseFeature) -> MatchScore {
    // ====== Step 1: Early returns ======

    let max_score_a = match a.max_value() {
        Some(m) if m >= SCORE_EPSILON => m,
        _ => return MatchScore::zeros(),
    };

    if a.has_sub_epsilon_value() || b.has_sub_epsilon_value() {
        return MatchScore::zeros();
    }

    // ====== Step 2: Merge-join ======

    let mut i = 0;
    let mut j = 0;
    let mut score = 0.0;
    let mut num_matches = 0_u64;
    let mut max_product = f64::NEG_INFINITY;

    while i < a.indices.len() && j < b.indices.len() {
        match b.indices[j].cmp(&a.indices[i]) {
            Ordering::Less => j += 1,
            Ordering::Equal => {
                let product = a.values[i] * b.values[j];
                score += product;
                if product != 0.0 {
                    num_matches += 1;
                }
                max_product = max_product.max(product);
                i += 1;
                j += 1;
            }
            Ordering::Greater => i += 1,
        }
    }

    if num_matches == 0 || max_product <= 0.0 {
        return MatchScore::zeros();
    }

    // ====== Step 3: Normalization ======

    MatchScore {
        num_matches: num_matches as f64,
        cosine_max_norm: score / max_score_a / max_product,
    }
}

// =================================================================================================
// Gated Entry Point
// =================================================================================================

/// Inputs to the cross feature, as the ranking pipeline delivers them
#[derive(Debug, Clone)]
pub struct CrossFeatureInputs {
    /// Impression view type; only [`RELATED_PINS_VIEW_TYPE`] is scored
    pub view_type: i32,

    /// Whether the caller asked for the comparison at all
    pub need_cmp: bool,

    /// Query-side annotations
    pub query_annotations: SparseFeature,

    /// Pin-side annotations
    pub pin_annotations: SparseFeature,
}

/// Compute the related-pins annotation match score
///
/// Early-returns zeros unless the comparison was requested and the
/// impression is a related-pins view; otherwise delegates to
/// [`cosine_max_norm_match`].
pub fn related_pins_match_score(inputs: &CrossFeatureInputs) -> MatchScore {
    if !inputs.need_cmp || inputs.view_type != RELATED_PINS_VIEW_TYPE {
        return MatchScore::zeros();
    }

    cosine_max_norm_match(&inputs.query_annotations, &inputs.pin_annotations)
}

// =================================================================================================
// Tests
// =================================================================================================
