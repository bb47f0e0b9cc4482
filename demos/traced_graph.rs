//! Example: Traced Graph Engine
//!
//! Traces the counting loop into a dataflow graph, prints its textual
//! form, times the interpreter, then saves the model to disk and times
//! a reloaded copy — the overhead of the artifact round trip is part of
//! what this harness measures.
//!
//! The harness also attempts a static (loop-free) trace export, which
//! fails for this model: the loop is data-dependent, and a straight-line
//! listing cannot represent it. The error is printed, not fatal.

use fizz_rs::{
    counting::{Engine, Workload},
    engines::{export_static_trace, load_model, save_model, trace_counting_model, GraphEngine},
    timing::OverheadReport,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  FizzBuzz Counting - Traced Graph Interpreter");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Workload parameters ======

    let n = 100_000_u32;
    let workload = Workload::new(n);

    println!("Workload:");
    println!("  N (upper bound) : {}", n);
    println!("  Expected counts : {}\n", workload.expected());

    // ====== Trace the model ======

    let model = trace_counting_model();
    println!("Traced model ({} nodes):", model.node_count());
    println!("{}", model.render_code());

    // ====== Time fresh vs reloaded ======

    let mut report = OverheadReport::new();

    let engine = GraphEngine::new(model.clone())?;
    let fresh_run = report.time("Traced Graph (fresh)", || engine.count(&workload))?;
    println!("Result: {}", fresh_run.counts);
    assert_eq!(fresh_run.counts, workload.expected());

    let tmp_dir = std::env::temp_dir();
    let model_path = tmp_dir.join("fizz_traced_model.json");
    save_model(&model, &model_path)?;
    println!("Saved model to {}", model_path.display());

    let reloaded = load_model(&model_path)?;
    assert_eq!(reloaded, model);

    let reloaded_engine = GraphEngine::new(reloaded)?;
    let reloaded_run = report.time("Traced Graph (reloaded)", || {
        reloaded_engine.count(&workload)
    })?;
    assert_eq!(reloaded_run.counts, workload.expected());

    println!();
    for measurement in report.iter() {
        println!("{}", measurement);
    }

    // ====== Static trace export ======

    println!("\nAttempting static trace export...");
    match export_static_trace(engine.model()) {
        Ok(listing) => println!("Exported:\n{}", listing),
        Err(reason) => println!("Export failed (expected): {}", reason),
    }

    Ok(())
}
