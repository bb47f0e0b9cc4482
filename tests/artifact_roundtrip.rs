//! Integration tests: model artifacts on disk
//!
//! Saving a traced model, loading it back, and running the reloaded
//! copy must be indistinguishable from running the original. The
//! static-trace export must succeed for straight-line models and fail
//! with a readable message for looped ones.

use fizz_rs::counting::{Engine, Workload};
use fizz_rs::engines::{
    export_static_trace, load_model, save_model, trace_counting_model, Graph, GraphEngine, Op,
    ProgramEngine, TracedModel,
};
use tempfile::tempdir;

mod common;
use common::brute_force_counts;

// =================================================================================================
// Round Trip
// =================================================================================================

#[test]
fn test_save_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("counting_model.json");

    let model = trace_counting_model();
    save_model(&model, &path).unwrap();

    let reloaded = load_model(&path).unwrap();
    assert_eq!(reloaded, model);
}

#[test]
fn test_reloaded_model_counts_identically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("counting_model.json");

    let model = trace_counting_model();
    save_model(&model, &path).unwrap();
    let reloaded = load_model(&path).unwrap();

    let workload = Workload::new(5_000);
    let fresh = GraphEngine::new(model).unwrap().count(&workload).unwrap();
    let loaded = GraphEngine::new(reloaded)
        .unwrap()
        .count(&workload)
        .unwrap();

    assert_eq!(fresh.counts, loaded.counts);
    assert_eq!(fresh.counts, brute_force_counts(5_000));
}

#[test]
fn test_reloaded_model_recompiles() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("counting_model.json");

    save_model(&trace_counting_model(), &path).unwrap();
    let reloaded = load_model(&path).unwrap();

    let engine = ProgramEngine::compile(&reloaded).unwrap();
    let run = engine.count(&Workload::new(1_000)).unwrap();
    assert_eq!(run.counts, brute_force_counts(1_000));
}

// =================================================================================================
// Failure Paths
// =================================================================================================

#[test]
fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");

    let err = load_model(&path).unwrap_err();
    assert!(err.contains("failed to read"), "unexpected error: {}", err);
}

#[test]
fn test_load_garbage_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.json");
    std::fs::write(&path, "not a model").unwrap();

    let err = load_model(&path).unwrap_err();
    assert!(err.contains("failed to parse"), "unexpected error: {}", err);
}

// =================================================================================================
// Static Trace Export
// =================================================================================================

#[test]
fn test_static_export_rejects_looped_model() {
    let err = export_static_trace(&trace_counting_model()).unwrap_err();
    assert!(err.contains("loop"), "unexpected error: {}", err);
}

#[test]
fn test_static_export_accepts_straight_line_model() {
    // A model with no loop condition: body runs once, doubling the
    // argument into the single state slot.
    let mut body = Graph::new();
    let arg = body.push(Op::Arg);
    let doubled = body.push(Op::Add(arg, arg));

    let model = TracedModel {
        state_init: vec![0],
        cond: Graph::new(),
        cond_output: 0,
        body,
        body_outputs: vec![doubled],
    };

    let listing = export_static_trace(&model).unwrap();
    assert!(listing.contains("run once"), "listing:\n{}", listing);
    assert_eq!(model.run(21).unwrap(), vec![42]);
}
