//! Example: Scalar Loop vs Vectorized Masks
//!
//! The baseline comparison: count FizzBuzz classes over `[0, N)` with a
//! plain scalar loop, then with divisibility masks over a materialized
//! index vector, and compare wall times.
//!
//! Both engines must report the same counts, and both must agree with
//! the closed-form expectation — the timings are meaningless otherwise.
//!
//! Outputs:
//! - A CSV of the timings (with a metadata header)
//! - A PNG bar chart of the comparison

use fizz_rs::{
    counting::{ClassCounts, Engine, Workload},
    engines::{ScalarEngine, VectorizedEngine},
    output::{export_report_csv, plot_overhead_chart, CsvConfig, CsvMetadata, PlotConfig},
    timing::OverheadReport,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  FizzBuzz Counting - Scalar vs Vectorized");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Workload parameters ======

    let n = 100_000_u32;
    let workload = Workload::new(n);
    let expected = workload.expected();

    println!("Workload:");
    println!("  N (upper bound) : {}", n);
    println!("  Expected counts : {}\n", expected);

    // ====== Run both engines ======

    let mut report = OverheadReport::new();

    let scalar_run = report.time(ScalarEngine.name(), || ScalarEngine.count(&workload))?;
    let vector_run = report.time(VectorizedEngine.name(), || VectorizedEngine.count(&workload))?;

    // ====== Results ======

    println!("Result ({}): {}", ScalarEngine.name(), scalar_run.counts);
    println!("Result ({}): {}", VectorizedEngine.name(), vector_run.counts);
    println!();

    for measurement in report.iter() {
        println!("{}", measurement);
    }

    assert_eq!(scalar_run.counts, expected, "scalar counts diverged");
    assert_eq!(vector_run.counts, expected, "vectorized counts diverged");
    assert_eq!(expected, ClassCounts::closed_form(n));

    if let Some(ratios) = report.relative_overheads() {
        println!("\nRelative overhead (vs fastest):");
        for (label, ratio) in ratios {
            println!("  {:<20} {:.2}x", label, ratio);
        }
    }

    // ====== Export ======

    let tmp_dir = std::env::temp_dir();
    let csv_path = tmp_dir.join("fizz_scalar_vs_vectorized.csv");
    let png_path = tmp_dir.join("fizz_scalar_vs_vectorized.png");

    let csv_config =
        CsvConfig::default().with_metadata(CsvMetadata::from_run(n as u64, &expected.to_string()));
    export_report_csv(&report, csv_path.to_str().unwrap(), Some(&csv_config))?;

    let mut plot_config = PlotConfig::default();
    plot_config.title = format!("FizzBuzz at N = {}", n);
    plot_overhead_chart(&report, png_path.to_str().unwrap(), Some(&plot_config))?;

    println!("\nExported:");
    println!("  CSV   : {}", csv_path.display());
    println!("  Chart : {}", png_path.display());

    Ok(())
}
