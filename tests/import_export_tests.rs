use blueprint_scheduler::{
    AnalysisFeatures, BlueprintSchedule, PersistenceError, ProjectParameters, ScheduleBuilder,
    load_schedule_from_csv, load_schedule_from_json, save_schedule_to_csv, save_schedule_to_json,
    validate_tasks,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_schedule() -> BlueprintSchedule {
    let mut schedule = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 1800.0),
        AnalysisFeatures::new(0.6, 8, 16),
    )
    .with_today(d(2025, 2, 1))
    .build();
    schedule.set_manual_completion_pct(3, 75.0);
    schedule
}

#[test]
fn json_round_trip_preserves_the_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.json");

    let schedule = sample_schedule();
    save_schedule_to_json(&schedule, &path).unwrap();
    let loaded = load_schedule_from_json(&path).unwrap();

    assert_eq!(loaded.tasks(), schedule.tasks());
    assert_eq!(loaded.parameters(), schedule.parameters());
    assert_eq!(loaded.features(), schedule.features());
    assert_eq!(loaded.as_of(), schedule.as_of());
}

#[test]
fn csv_round_trip_preserves_the_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.csv");

    let schedule = sample_schedule();
    save_schedule_to_csv(&schedule, &path).unwrap();
    let loaded = load_schedule_from_csv(&path).unwrap();

    assert_eq!(loaded.tasks(), schedule.tasks());
    assert_eq!(loaded.parameters(), schedule.parameters());
    assert_eq!(loaded.as_of(), schedule.as_of());

    // The manual override survives the string encoding.
    assert_eq!(loaded.find_task(3).unwrap().manual_completion_pct, Some(75.0));
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    let err = load_schedule_from_json(&path).expect_err("missing file should fail");
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn empty_csv_is_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, "").unwrap();
    let err = load_schedule_from_csv(&path).expect_err("empty file should fail");
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}

#[test]
fn duplicate_task_ids_fail_validation() {
    let schedule = sample_schedule();
    let mut tasks = schedule.tasks().to_vec();
    let mut dup = tasks[0].clone();
    dup.name = "Shadow".to_string();
    tasks.push(dup);

    let err = validate_tasks(&tasks).expect_err("duplicate id should fail");
    assert!(err.to_string().contains("duplicate task id 1"));
}

#[test]
fn forward_referencing_predecessor_fails_validation() {
    let schedule = sample_schedule();
    let mut tasks = schedule.tasks().to_vec();
    tasks[0].predecessor_ids = vec![5];

    let err = validate_tasks(&tasks).expect_err("forward reference should fail");
    assert!(err.to_string().contains("not an earlier task"));
}

#[test]
fn corrupted_duration_fails_validation_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.json");

    let schedule = sample_schedule();
    save_schedule_to_json(&schedule, &path).unwrap();

    // Corrupt one task's duration so it no longer matches its date span.
    let raw = std::fs::read_to_string(&path).unwrap();
    let mut snapshot: serde_json::Value = serde_json::from_str(&raw).unwrap();
    snapshot["tasks"][0]["duration_days"] = serde_json::json!(99);
    std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

    let err = load_schedule_from_json(&path).expect_err("corrupted duration should fail");
    assert!(matches!(err, PersistenceError::InvalidData(_)));
}
