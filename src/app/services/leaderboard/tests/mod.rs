//! Tests for the leaderboard module
//!
//! This module provides unit tests for the time codec, filters, sorting,
//! statistics and the record store, plus property tests over the pipeline.


// Test helper functions and fixtures
use crate::app::models::LapRecord;
use serde_json::{Value, json};

/// Create a record with only a time and a track
pub fn create_timed_record(time: &str, track: &str) -> LapRecord {
    LapRecord {
        time: Some(time.to_string()),
        track: Some(track.to_string()),
        ..Default::default()
    }
}

/// Create a fully populated record
pub fn create_test_record(car: &str, track: &str, time: &str) -> LapRecord {
    LapRecord {
        car: Some(car.to_string()),
        track: Some(track.to_string()),
        layout: Some("Full".to_string()),
        time: Some(time.to_string()),
        power: Some(300.0),
        drivetrain: Some("后驱".to_string()),
        power_type: Some("油车".to_string()),
        start_type: Some("静态起步".to_string()),
        control_type: Some("Wheel".to_string()),
        mod_status: Some("否".to_string()),
        date: Some("2024-03-01".to_string()),
        rank: None,
    }
}

/// The three-record scenario: two laps on track A, one on B, one without time
pub fn create_scenario_records() -> Vec<LapRecord> {
    vec![
        create_timed_record("1:23.456", "A"),
        create_timed_record("0:59.999", "B"),
        create_timed_record("--:--.--", "A"),
    ]
}

/// A varied collection for filter and sort tests
pub fn create_sample_records() -> Vec<LapRecord> {
    vec![
        LapRecord {
            car: Some("Pessima".to_string()),
            track: Some("Utah".to_string()),
            layout: Some("Short".to_string()),
            time: Some("1:23.456".to_string()),
            power: Some(180.0),
            drivetrain: Some("前驱".to_string()),
            power_type: Some("油车".to_string()),
            start_type: Some("静态起步".to_string()),
            mod_status: Some("否".to_string()),
            date: Some("2024-01-10".to_string()),
            ..Default::default()
        },
        LapRecord {
            car: Some("Scintilla".to_string()),
            track: Some("Hirochi Raceway".to_string()),
            layout: Some("Full".to_string()),
            time: Some("1:05.120".to_string()),
            power: Some(650.0),
            drivetrain: Some("四驱".to_string()),
            power_type: Some("电车".to_string()),
            start_type: Some("滚动起步".to_string()),
            mod_status: Some("是".to_string()),
            date: Some("2024-06-02".to_string()),
            ..Default::default()
        },
        LapRecord {
            car: Some("covet".to_string()),
            track: Some("Utah".to_string()),
            layout: Some("Full".to_string()),
            time: Some("".to_string()),
            power: None,
            drivetrain: Some("前驱".to_string()),
            power_type: Some("油车".to_string()),
            start_type: Some("静态起步".to_string()),
            mod_status: Some("否".to_string()),
            date: None,
            ..Default::default()
        },
        LapRecord {
            car: Some("Bolide".to_string()),
            track: Some("Hirochi Raceway".to_string()),
            layout: Some("Full".to_string()),
            time: Some("1:01.900".to_string()),
            power: Some(420.0),
            drivetrain: Some("后驱".to_string()),
            power_type: Some("油车".to_string()),
            start_type: Some("静态起步".to_string()),
            mod_status: Some("是".to_string()),
            date: Some("2024-05-20".to_string()),
            ..Default::default()
        },
    ]
}

/// JSON document matching [`create_sample_records`]
pub fn create_sample_document() -> Value {
    serde_json::to_value(create_sample_records()).expect("sample records serialize")
}

/// A minimal JSON document with one record per track
pub fn create_two_track_document() -> Value {
    json!([
        { "car": "Pessima", "track": "Utah", "time": "1:10.000" },
        { "car": "Covet", "track": "Italy", "time": "1:20.000" }
    ])
}

/// Borrow every record of a vector
pub fn refs(records: &[LapRecord]) -> Vec<&LapRecord> {
    records.iter().collect()
}

/// Time strings of a row sequence, for order assertions
pub fn times(rows: &[&LapRecord]) -> Vec<String> {
    rows.iter().map(|r| r.time_text().to_string()).collect()
}

/// Car names of a row sequence, for order assertions
pub fn cars(rows: &[&LapRecord]) -> Vec<String> {
    rows.iter()
        .map(|r| r.car.clone().unwrap_or_default())
        .collect()
}
