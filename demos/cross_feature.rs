//! Example: Related-Pins Cross Feature
//!
//! Times the sparse cosine max-norm match on the annotation fixtures a
//! ranking pipeline would deliver: three shared annotation IDs on the
//! query and pin sides, scores in the 5000 range, a [10000, 2] dense
//! shape.
//!
//! Also exercises the gating: the score is only computed when the
//! comparison was requested and the impression is a related-pins view;
//! every other combination early-returns zeros.

use fizz_rs::{
    cross::{
        related_pins_match_score, CrossFeatureInputs, SparseFeature, RELATED_PINS_VIEW_TYPE,
    },
    timing::time_once,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Related-Pins Cross Feature - Cosine Max-Norm Match");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Annotation fixtures ======

    let query = SparseFeature::new(
        vec![[1001, 0], [1002, 0], [1003, 0]],
        vec![5001.0, 5002.0, 5003.0],
        [10_000, 2],
    )?;
    let pin = SparseFeature::new(
        vec![[1001, 0], [1002, 0], [1003, 0]],
        vec![5001.0, 5003.0, 5005.0],
        [10_000, 2],
    )?;

    println!("Inputs:");
    println!("  Query annotations : {} entries", query.nnz());
    println!("  Pin annotations   : {} entries", pin.nnz());
    println!("  Dense shape       : {:?}", query.dense_shape());
    println!("  View type         : {}\n", RELATED_PINS_VIEW_TYPE);

    // ====== Score with gating satisfied ======

    let inputs = CrossFeatureInputs {
        view_type: RELATED_PINS_VIEW_TYPE,
        need_cmp: true,
        query_annotations: query,
        pin_annotations: pin,
    };

    let (score, elapsed) = time_once(|| related_pins_match_score(&inputs));

    println!("Cosine max norm match: {}", score);
    println!(
        "Time taken (Cross Feature) (usec): {}",
        elapsed.as_secs_f64() * 1e6
    );

    // ====== Early returns ======

    let mut not_requested = inputs.clone();
    not_requested.need_cmp = false;
    println!(
        "\nWithout need_cmp      : {}",
        related_pins_match_score(&not_requested)
    );

    let mut wrong_view = inputs.clone();
    wrong_view.view_type = 1;
    println!(
        "Wrong view type       : {}",
        related_pins_match_score(&wrong_view)
    );

    Ok(())
}
