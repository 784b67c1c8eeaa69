#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

/// Result document of a successful single-root run.
pub fn result_document(name: &str, verified: u64, total_ms: u64, functions: &[(&str, u64)]) -> Value {
    let breakdown: Vec<Value> = functions
        .iter()
        .map(|(function, time)| json!({ "function": function, "time": time, "success": true }))
        .collect();
    json!({
        "runner": {
            "success": true,
            "run_configuration": { "name": name }
        },
        "verification-results": { "verified": verified, "errors": 0 },
        "times-ms": {
            "total": total_ms,
            "smt": { "smt-run-module-times": [ { "function-breakdown": breakdown } ] }
        }
    })
}

pub fn write_result(dir: &Path, stem: &str, document: &Value) {
    let body = serde_json::to_string_pretty(document).expect("serialize document");
    fs::write(dir.join(format!("{stem}.json")), body).expect("write result file");
}
