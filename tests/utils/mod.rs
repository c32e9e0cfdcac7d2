#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use triage_stats::{IntakeRecord, RawRecord};

/// Deserialize a raw record from a JSON object literal
#[must_use]
pub fn raw(value: Value) -> RawRecord {
    serde_json::from_value(value).expect("test record must be a JSON object")
}

/// Parse a raw record from a JSON object literal
#[must_use]
pub fn record(value: Value) -> IntakeRecord {
    IntakeRecord::from(&raw(value))
}

/// A small batch covering every encoding the extraction stage produces
#[must_use]
pub fn sample_batch() -> Vec<Value> {
    vec![
        serde_json::json!({
            "age": 34,
            "gender": "male",
            "symptoms": "[\"Fever\", \"Cough\", \"Fatigue\"]",
            "initial_symptom": "[\"Fever\"]",
            "symptom_duration": "{\"Fever\": \"3 days\", \"Cough\": \"1 week\"}",
            "suggested_specialist": "General Medicine"
        }),
        serde_json::json!({
            "age": "67",
            "gender": "F",
            "symptoms": "cough, shortness of breath",
            "initial_symptom": "Shortness of breath",
            "symptom_duration": {"cough": "1 week", "shortness of breath": "2 days"},
            "suggested_specialist": "Pulmonology"
        }),
        serde_json::json!({
            "age": "unknown",
            "gender": "",
            "symptoms": ["Headache", "Nausea"],
            "initial_symptom": null,
            "symptom_duration": "not recorded",
            "suggested_specialist": "Neurology"
        }),
        serde_json::json!({
            "age": 8.6,
            "gender": "M",
            "symptoms": "Rash",
            "initial_symptom": "rash",
            "suggested_specialist": "  "
        }),
    ]
}

/// Parsed form of [`sample_batch`]
#[must_use]
pub fn sample_records() -> Vec<IntakeRecord> {
    sample_batch().into_iter().map(record).collect()
}

/// Write lines to a scratch JSON Lines file unique to `name`
pub fn scratch_file(name: &str, lines: &[String]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "triage-stats-{}-{name}.jsonl",
        std::process::id()
    ));
    fs::write(&path, lines.join("\n")).expect("scratch file must be writable");
    path
}
