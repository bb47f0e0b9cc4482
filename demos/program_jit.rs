//! Example: Compiled Tape Engine
//!
//! Lowers the traced counting model into a flat register tape and
//! separates compile time from run time:
//!
//! - **Cold**: trace + compile + first run, all timed together
//! - **Warm**: a second run on the already-compiled tape
//! - **Reloaded**: save the traced model, load it back, recompile, run
//!
//! The cold/warm gap is the compilation overhead; the reloaded column
//! adds the artifact round trip on top.

use fizz_rs::{
    counting::{Engine, Workload},
    engines::{load_model, save_model, trace_counting_model, ProgramEngine},
    timing::OverheadReport,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  FizzBuzz Counting - Compiled Tape");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Workload parameters ======

    let n = 100_000_u32;
    let workload = Workload::new(n);

    println!("Workload:");
    println!("  N (upper bound) : {}", n);
    println!("  Expected counts : {}\n", workload.expected());

    let mut report = OverheadReport::new();

    // ====== Cold: trace + compile + run ======

    let cold_run = report.time("Compiled Tape (cold)", || {
        let model = trace_counting_model();
        let engine = ProgramEngine::compile(&model)?;
        engine.count(&workload)
    })?;
    println!("Result: {}", cold_run.counts);
    assert_eq!(cold_run.counts, workload.expected());

    // ====== Warm: reuse the compiled tape ======

    let model = trace_counting_model();
    let engine = ProgramEngine::compile(&model)?;
    println!(
        "Tape: {} instructions\n",
        engine.program().instruction_count()
    );

    let warm_run = report.time("Compiled Tape (warm)", || engine.count(&workload))?;
    assert_eq!(warm_run.counts, workload.expected());

    // ====== Reloaded: artifact round trip + recompile + run ======

    let tmp_dir = std::env::temp_dir();
    let model_path = tmp_dir.join("fizz_program_model.json");
    save_model(&model, &model_path)?;
    println!("Saved model to {}", model_path.display());

    let reloaded_run = report.time("Compiled Tape (reloaded)", || {
        let reloaded = load_model(&model_path)?;
        let reloaded_engine = ProgramEngine::compile(&reloaded)?;
        reloaded_engine.count(&workload)
    })?;
    assert_eq!(reloaded_run.counts, workload.expected());

    // ====== Report ======

    println!();
    for measurement in report.iter() {
        println!("{}", measurement);
    }

    if let Some(ratios) = report.relative_overheads() {
        println!("\nRelative overhead (vs fastest):");
        for (label, ratio) in ratios {
            println!("  {:<26} {:.2}x", label, ratio);
        }
    }

    Ok(())
}
