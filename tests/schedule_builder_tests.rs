use blueprint_scheduler::{
    AnalysisFeatures, Phase, ProjectParameters, ScheduleBuilder, Task, TEMPLATES,
};
use chrono::NaiveDate;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn worked_example() -> (ProjectParameters, AnalysisFeatures) {
    (
        ProjectParameters::new(d(2025, 1, 1), 1000.0),
        AnalysisFeatures::new(0.5, 5, 10),
    )
}

fn build_worked_example() -> Vec<Task> {
    let (params, features) = worked_example();
    ScheduleBuilder::new(params, features)
        .with_today(d(2024, 12, 1))
        .build()
        .into_tasks()
}

fn task(tasks: &[Task], id: i32) -> &Task {
    tasks
        .iter()
        .find(|t| t.id == id)
        .unwrap_or_else(|| panic!("missing task {id}"))
}

#[test]
fn builds_exactly_twenty_five_tasks_in_id_order() {
    let tasks = build_worked_example();
    assert_eq!(tasks.len(), 25);
    for (idx, t) in tasks.iter().enumerate() {
        assert_eq!(t.id, idx as i32 + 1);
    }
}

#[test]
fn every_task_spans_its_duration() {
    let tasks = build_worked_example();
    for t in &tasks {
        assert!(t.end_date >= t.start_date, "task {} ends before start", t.id);
        assert_eq!(
            (t.end_date - t.start_date).num_days(),
            t.duration_days,
            "task {} span does not match duration",
            t.id
        );
    }
}

#[test]
fn worked_example_durations() {
    let tasks = build_worked_example();
    let expected = [
        (1, 1),
        (2, 2),
        (3, 4),
        (4, 2),
        (5, 2),
        (6, 7),
        (7, 4),
        (8, 6),
        (9, 4),
        (10, 4),
        (11, 4),
        (12, 6),
        (13, 6),
        (14, 4),
        (15, 2),
        (16, 6),
        (17, 4),
        (18, 6),
        (19, 4),
        (20, 4),
        (21, 1),
        (22, 1),
        (23, 1),
        (24, 1),
        (25, 1),
    ];
    for (id, days) in expected {
        assert_eq!(task(&tasks, id).duration_days, days, "task {id} duration");
    }
}

#[test]
fn worked_example_first_task_dates() {
    let tasks = build_worked_example();
    let first = task(&tasks, 1);
    assert_eq!(first.start_date, d(2025, 1, 1));
    assert_eq!(first.end_date, d(2025, 1, 2));
}

#[test]
fn sequential_tasks_leave_a_one_day_gap() {
    let tasks = build_worked_example();
    assert_eq!(task(&tasks, 2).start_date, d(2025, 1, 3));
    assert_eq!(task(&tasks, 3).start_date, d(2025, 1, 6));
    assert_eq!(task(&tasks, 8).start_date, d(2025, 1, 29));
}

#[test]
fn curing_starts_at_pour_end_without_gap() {
    let tasks = build_worked_example();
    let pour = task(&tasks, 5);
    let curing = task(&tasks, 6);
    assert_eq!(curing.start_date, pour.end_date);
    assert_eq!(curing.duration_days, 7);
    // The next task resumes one day after curing completes.
    assert_eq!(
        task(&tasks, 7).start_date,
        curing.end_date + chrono::Duration::days(1)
    );
}

#[test]
fn rough_in_fork_shares_one_start_date() {
    let tasks = build_worked_example();
    let fork_start = task(&tasks, 11).start_date;
    for id in [12, 13, 14] {
        assert_eq!(task(&tasks, id).start_date, fork_start);
    }
    assert_eq!(fork_start, d(2025, 2, 15));
}

#[test]
fn insulation_starts_after_the_rough_in_join() {
    let tasks = build_worked_example();
    let join_end = [11, 12, 13, 14]
        .iter()
        .map(|&id| task(&tasks, id).end_date)
        .max()
        .unwrap();
    assert_eq!(
        task(&tasks, 15).start_date,
        join_end + chrono::Duration::days(1)
    );
    assert_eq!(task(&tasks, 15).start_date, d(2025, 2, 22));
}

#[test]
fn appliances_start_after_the_fixture_join() {
    let tasks = build_worked_example();
    let join_end = [21, 22]
        .iter()
        .map(|&id| task(&tasks, id).end_date)
        .max()
        .unwrap();
    assert_eq!(
        task(&tasks, 23).start_date,
        join_end + chrono::Duration::days(1)
    );
    assert_eq!(task(&tasks, 23).start_date, d(2025, 3, 28));
}

#[test]
fn fixture_fork_shares_one_start_date() {
    let tasks = build_worked_example();
    assert_eq!(task(&tasks, 21).start_date, task(&tasks, 22).start_date);
    assert_eq!(task(&tasks, 21).start_date, d(2025, 3, 26));
}

#[test]
fn final_inspection_closes_the_schedule() {
    let tasks = build_worked_example();
    let inspection = task(&tasks, 25);
    assert_eq!(inspection.start_date, d(2025, 4, 1));
    assert_eq!(inspection.end_date, d(2025, 4, 2));
    assert_eq!(inspection.phase, Phase::FinalFinishing);
    assert_eq!(inspection.responsible_party, "Building Inspector");
}

#[test]
fn predecessors_resolve_to_task_names() {
    let tasks = build_worked_example();
    assert_eq!(
        task(&tasks, 15).dependencies,
        vec!["Plumbing Rough-in", "Electrical Rough-in", "HVAC Rough-in"]
    );
    assert_eq!(task(&tasks, 12).predecessor_ids, vec![9]);
    assert_eq!(task(&tasks, 12).dependencies, vec!["Roof Framing"]);
    assert!(task(&tasks, 1).dependencies.is_empty());
}

#[test]
fn completion_is_zero_before_the_project_starts() {
    let tasks = build_worked_example();
    for t in &tasks {
        assert_eq!(t.completion_percentage, 0);
        assert_eq!(t.manual_completion_pct, None);
    }
}

#[test]
fn completion_reflects_the_reference_date() {
    let (params, features) = worked_example();
    let schedule = ScheduleBuilder::new(params, features)
        .with_today(d(2025, 2, 18))
        .build();

    // Finished well before the reference date.
    assert_eq!(schedule.find_task(1).unwrap().completion_percentage, 100);
    assert_eq!(schedule.find_task(10).unwrap().completion_percentage, 100);
    // In flight: 3 of 6 days elapsed.
    assert_eq!(schedule.find_task(12).unwrap().completion_percentage, 50);
    // Not yet started.
    assert_eq!(schedule.find_task(15).unwrap().completion_percentage, 0);
}

#[test]
fn completion_stays_within_bounds_for_any_reference_date() {
    let (params, features) = worked_example();
    for today in [d(2020, 1, 1), d(2025, 2, 15), d(2025, 3, 27), d(2030, 1, 1)] {
        let schedule = ScheduleBuilder::new(params.clone(), features.clone())
            .with_today(today)
            .build();
        for t in schedule.tasks() {
            assert!(t.completion_percentage <= 100);
        }
    }
}

#[test]
fn identical_inputs_build_identical_schedules() {
    let (params, features) = worked_example();
    let a = ScheduleBuilder::new(params.clone(), features.clone())
        .with_today(d(2025, 2, 1))
        .build();
    let b = ScheduleBuilder::new(params, features)
        .with_today(d(2025, 2, 1))
        .build();
    assert_eq!(a, b);
}

#[test]
fn oversized_area_behaves_as_the_documented_maximum() {
    let features = AnalysisFeatures::new(0.5, 5, 10);
    let oversized = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 999_999.0),
        features.clone(),
    )
    .with_today(d(2024, 12, 1))
    .build();
    let capped = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 10_000.0),
        features,
    )
    .with_today(d(2024, 12, 1))
    .build();
    assert_eq!(oversized.tasks(), capped.tasks());
}

#[test]
fn missing_feature_fields_default_instead_of_erroring() {
    let features: AnalysisFeatures = serde_json::from_str(r#"{"building_area_ratio": 0.5}"#)
        .expect("partial feature record should deserialize");
    assert_eq!(features.num_rooms, 1);
    let schedule = ScheduleBuilder::new(ProjectParameters::new(d(2025, 1, 1), 1000.0), features)
        .with_today(d(2024, 12, 1))
        .build();
    assert_eq!(schedule.tasks().len(), 25);
}

#[test]
fn extreme_features_are_clamped_not_rejected() {
    let wild = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 2000.0),
        AnalysisFeatures::new(7.5, 9999, 9999),
    )
    .with_today(d(2024, 12, 1))
    .build();
    let clamped = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 2000.0),
        AnalysisFeatures::new(1.0, 50, 100),
    )
    .with_today(d(2024, 12, 1))
    .build();
    assert_eq!(wild.tasks(), clamped.tasks());
    assert_eq!(wild.factors().complexity, 3.0);
}

#[test]
fn manual_completion_round_trips_through_the_schedule() {
    let (params, features) = worked_example();
    let mut schedule = ScheduleBuilder::new(params, features)
        .with_today(d(2025, 2, 18))
        .build();

    assert!(schedule.set_manual_completion_pct(12, 80.0));
    assert_eq!(schedule.effective_completion(12), Some(80.0));
    // Derived value is untouched underneath the override.
    assert_eq!(schedule.find_task(12).unwrap().completion_percentage, 50);

    assert!(schedule.clear_manual_completion_pct(12));
    assert_eq!(schedule.effective_completion(12), Some(50.0));

    // Values clamp; unknown ids and non-finite values are rejected.
    assert!(schedule.set_manual_completion_pct(12, 250.0));
    assert_eq!(schedule.effective_completion(12), Some(100.0));
    assert!(!schedule.set_manual_completion_pct(99, 10.0));
    assert!(!schedule.set_manual_completion_pct(12, f64::NAN));
}

#[test]
fn refresh_completion_moves_the_reference_date() {
    let (params, features) = worked_example();
    let mut schedule = ScheduleBuilder::new(params, features)
        .with_today(d(2024, 12, 1))
        .build();
    assert_eq!(schedule.summary().not_started_count, 25);

    schedule.refresh_completion(d(2025, 5, 1));
    assert_eq!(schedule.as_of(), d(2025, 5, 1));
    assert_eq!(schedule.summary().completed_count, 25);
}

#[test]
fn summary_reports_authored_critical_chain() {
    let tasks = build_worked_example();
    let (params, features) = worked_example();
    let schedule = ScheduleBuilder::new(params, features)
        .with_today(d(2024, 12, 1))
        .build();
    let summary = schedule.summary();

    assert_eq!(summary.task_count, 25);
    assert_eq!(summary.critical_count, 20);
    assert_eq!(summary.project_finish, Some(d(2025, 4, 2)));
    assert_eq!(
        summary.critical_chain,
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13, 15, 16, 18, 19, 20, 23, 24, 25]
    );
    // Non-critical trades stay out of the chain.
    for id in [11, 14, 17, 21, 22] {
        assert!(!task(&tasks, id).critical_path);
    }
}

#[test]
fn small_projects_scale_durations_down() {
    let schedule = ScheduleBuilder::new(
        ProjectParameters::new(d(2025, 1, 1), 500.0),
        AnalysisFeatures::new(0.5, 5, 10),
    )
    .with_today(d(2024, 12, 1))
    .build();
    assert_eq!(schedule.factors().size, 0.8);
    // Wall framing: max(3, floor(500/400)) = 3, floor(3 * 2.25) = 6,
    // floor(6 * 0.8) = 4.
    assert_eq!(schedule.find_task(8).unwrap().duration_days, 4);
}

#[test]
fn dataframe_view_carries_all_tasks() {
    let (params, features) = worked_example();
    let schedule = ScheduleBuilder::new(params, features)
        .with_today(d(2024, 12, 1))
        .build();
    let df = schedule.to_dataframe().unwrap();
    assert_eq!(df.height(), 25);
    let ids = df.column("id").unwrap().i32().unwrap();
    assert_eq!(ids.get(0), Some(1));
    assert_eq!(ids.get(24), Some(25));
    let restored = Task::from_dataframe_row(&df, 6).unwrap();
    assert_eq!(&restored, schedule.find_task(7).unwrap());
}

#[test]
fn templates_drive_task_identity() {
    let tasks = build_worked_example();
    for (template, t) in TEMPLATES.iter().zip(tasks.iter()) {
        assert_eq!(template.id, t.id);
        assert_eq!(template.name, t.name);
        assert_eq!(template.phase, t.phase);
        assert_eq!(template.critical_path, t.critical_path);
        assert_eq!(template.predecessor_ids, t.predecessor_ids.as_slice());
    }
}
