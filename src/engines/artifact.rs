//! Model artifacts
//!
//! Save/load of traced models as JSON files, plus the static-trace
//! export. The demos round-trip their models through
//! `std::env::temp_dir()` the way the original harnesses round-tripped
//! theirs through framework-specific model files; the cost of running a
//! reloaded model is one of the measurements.

use std::fs;
use std::path::Path;

use crate::engines::graph::TracedModel;

// =================================================================================================
// Save / Load
// =================================================================================================

/// Serialize a traced model to a JSON file
///
/// # Errors
///
/// Fails when the model is malformed (it is checked before writing) or
/// the file cannot be written.
pub fn save_model(model: &TracedModel, path: &Path) -> Result<(), String> {
    // Never persist a model that would fail to load back.
    model.check()?;

    let json = serde_json::to_string_pretty(model)
        .map_err(|e| format!("failed to serialize model: {}", e))?;

    fs::write(path, json).map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

/// Load a traced model from a JSON file
///
/// The loaded model is re-checked: a file edited or corrupted on disk
/// must fail here, not deep inside an evaluation.
pub fn load_model(path: &Path) -> Result<TracedModel, String> {
    let json =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    let model: TracedModel =
        serde_json::from_str(&json).map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;

    model.check()?;
    Ok(model)
}

// =================================================================================================
// Static-Trace Export
// =================================================================================================

/// Export a model as a straight-line trace
///
/// A static trace is a single loop-free node tape. The counting model
/// carries its loop as a graph-level construct, so it cannot be
/// exported this way — the same limitation that makes trace-based
/// exporters reject data-dependent control flow in the large
/// frameworks. The error is the expected outcome for every model this
/// crate traces; the function exists so the limitation is a printable
/// result instead of a panic.
pub fn export_static_trace(model: &TracedModel) -> Result<String, String> {
    model.check()?;

    if !model.cond.is_empty() {
        return Err(format!(
            "model contains a data-dependent loop ({} cond nodes, {} body nodes); \
             a static trace cannot represent control flow",
            model.cond.len(),
            model.body.len()
        ));
    }

    // Loop-free model: the body tape is the trace.
    Ok(model.render_code())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::graph::{trace_counting_model, Graph, Op};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("fizz_rs_artifact_test.json");
        let model = trace_counting_model();

        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(model, loaded);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_model(&temp_path("fizz_rs_does_not_exist.json")).unwrap_err();
        assert!(err.contains("failed to read"), "{}", err);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_path("fizz_rs_garbage_artifact.json");
        std::fs::write(&path, "not a model").unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(err.contains("failed to parse"), "{}", err);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_rejects_broken_model() {
        let mut model = trace_counting_model();
        model.cond_output = 999;

        let err = save_model(&model, &temp_path("fizz_rs_never_written.json")).unwrap_err();
        assert!(err.contains("out of range"), "{}", err);
    }

    #[test]
    fn test_static_trace_rejects_loop() {
        let err = export_static_trace(&trace_counting_model()).unwrap_err();
        assert!(err.contains("loop"), "{}", err);
    }

    #[test]
    fn test_static_trace_accepts_loop_free_model() {
        // A degenerate straight-line model: no condition, one output.
        let mut body = Graph::new();
        let a = body.push(Op::Const(2));
        let b = body.push(Op::Const(3));
        let sum = body.push(Op::Add(a, b));

        let model = TracedModel {
            state_init: vec![0],
            cond: Graph::new(),
            cond_output: 0,
            body,
            body_outputs: vec![sum],
        };

        let trace = export_static_trace(&model).unwrap();
        assert!(trace.contains("run once"), "{}", trace);

        // Loop-free execution: the body runs exactly once.
        assert_eq!(model.run(0).unwrap(), vec![5]);
    }
}
