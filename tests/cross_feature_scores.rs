//! Integration tests: cross-feature scoring end to end
//!
//! Exercises the gated entry point with the fixtures a ranking pipeline
//! would deliver, and cross-checks the sparse merge-join against a
//! dense ndarray evaluation.

use fizz_rs::cross::{
    cosine_max_norm_match, related_pins_match_score, CrossFeatureInputs, MatchScore,
    SparseFeature, RELATED_PINS_VIEW_TYPE,
};

// =================================================================================================
// Fixtures
// =================================================================================================

fn query_annotations() -> SparseFeature {
    SparseFeature::new(
        vec![[1001, 0], [1002, 0], [1003, 0]],
        vec![5001.0, 5002.0, 5003.0],
        [10_000, 2],
    )
    .unwrap()
}

fn pin_annotations() -> SparseFeature {
    SparseFeature::new(
        vec![[1001, 0], [1002, 0], [1003, 0]],
        vec![5001.0, 5003.0, 5005.0],
        [10_000, 2],
    )
    .unwrap()
}

fn scored_inputs() -> CrossFeatureInputs {
    CrossFeatureInputs {
        view_type: RELATED_PINS_VIEW_TYPE,
        need_cmp: true,
        query_annotations: query_annotations(),
        pin_annotations: pin_annotations(),
    }
}

// =================================================================================================
// Gating
// =================================================================================================

#[test]
fn test_score_computed_for_related_pins_view() {
    let score = related_pins_match_score(&scored_inputs());
    assert_eq!(score.num_matches, 3.0);
    assert!(score.cosine_max_norm > 0.0);
}

#[test]
fn test_zeros_without_need_cmp() {
    let mut inputs = scored_inputs();
    inputs.need_cmp = false;
    assert_eq!(related_pins_match_score(&inputs), MatchScore::zeros());
}

#[test]
fn test_zeros_for_other_view_types() {
    for view_type in [0, 1, 41, 43, -1] {
        let mut inputs = scored_inputs();
        inputs.view_type = view_type;
        assert_eq!(
            related_pins_match_score(&inputs),
            MatchScore::zeros(),
            "view type {} must not be scored",
            view_type
        );
    }
}

// =================================================================================================
// Scoring
// =================================================================================================

#[test]
fn test_pipeline_fixture_score() {
    let score = related_pins_match_score(&scored_inputs());

    let dot = 5001.0 * 5001.0 + 5002.0 * 5003.0 + 5003.0 * 5005.0;
    let expected = dot / 5003.0 / (5003.0 * 5005.0);
    assert!((score.cosine_max_norm - expected).abs() < 1e-12);
}

#[test]
fn test_sub_epsilon_values_score_zero() {
    let query = SparseFeature::new(
        vec![[1001, 0], [1002, 0]],
        vec![5001.0, 1e-20],
        [10_000, 2],
    )
    .unwrap();

    assert_eq!(
        cosine_max_norm_match(&query, &pin_annotations()),
        MatchScore::zeros()
    );
}

#[test]
fn test_disjoint_annotations_score_zero() {
    let pin = SparseFeature::new(
        vec![[2001, 0], [2002, 0]],
        vec![7.0, 9.0],
        [10_000, 2],
    )
    .unwrap();

    assert_eq!(
        cosine_max_norm_match(&query_annotations(), &pin),
        MatchScore::zeros()
    );
}

#[test]
fn test_merge_join_agrees_with_dense_evaluation() {
    // Small shape so the dense product is cheap; interleaved overlap so
    // both pointers advance on every arm of the join.
    let a = SparseFeature::new(
        vec![[0, 0], [1, 1], [3, 0], [5, 1], [6, 0]],
        vec![1.0, 2.0, 3.0, 4.0, 5.0],
        [8, 2],
    )
    .unwrap();
    let b = SparseFeature::new(
        vec![[1, 1], [2, 0], [3, 0], [6, 0], [7, 1]],
        vec![10.0, 20.0, 30.0, 40.0, 50.0],
        [8, 2],
    )
    .unwrap();

    // Dense elementwise product sums exactly the shared cells.
    let dense_dot = (a.to_dense() * b.to_dense()).sum();
    let expected_dot = 2.0 * 10.0 + 3.0 * 30.0 + 5.0 * 40.0;
    assert!((dense_dot - expected_dot).abs() < 1e-12);

    let score = cosine_max_norm_match(&a, &b);
    assert_eq!(score.num_matches, 3.0);

    let max_a = 5.0;
    let max_product = 5.0 * 40.0;
    assert!((score.cosine_max_norm - expected_dot / max_a / max_product).abs() < 1e-12);
}
