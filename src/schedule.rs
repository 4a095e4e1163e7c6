use crate::duration::{DurationEstimator, ScalingFactors};
use crate::features::AnalysisFeatures;
use crate::graph;
use crate::project::ProjectParameters;
use crate::task::Task;
use crate::templates::{self, BUILD_PLAN, DurationRule, ScheduleStep, TaskTemplate};
use chrono::{Duration, Local, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roll-up of a built schedule, suitable for one-line status output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub task_count: usize,
    pub critical_count: usize,
    pub critical_chain: Vec<i32>,
    pub project_finish: Option<NaiveDate>,
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub not_started_count: usize,
}

impl BuildSummary {
    pub fn to_display_line(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("critical={}", self.critical_count));
        if let Some(date) = self.project_finish {
            parts.push(format!("finish={}", date));
        }
        if self.completed_count > 0 {
            parts.push(format!("done={}", self.completed_count));
        }
        if self.in_progress_count > 0 {
            parts.push(format!("active={}", self.in_progress_count));
        }
        if self.not_started_count > 0 {
            parts.push(format!("pending={}", self.not_started_count));
        }
        if !self.critical_chain.is_empty() {
            let chain = self
                .critical_chain
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("->");
            parts.push(format!("crit_path={}", chain));
        }
        parts.join(", ")
    }
}

/// Builds the 25-task construction schedule from a feature record and
/// project parameters. The build never fails: out-of-range inputs clamp and
/// the reference date defaults to the current local date unless injected.
pub struct ScheduleBuilder {
    params: ProjectParameters,
    features: AnalysisFeatures,
    today: Option<NaiveDate>,
}

impl ScheduleBuilder {
    pub fn new(params: ProjectParameters, features: AnalysisFeatures) -> Self {
        Self {
            params,
            features,
            today: None,
        }
    }

    /// Pin the reference date used for completion percentages. Two builds
    /// with the same inputs and the same pinned date produce identical
    /// output.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn build(self) -> BlueprintSchedule {
        let features = self.features.clamped();
        let params = ProjectParameters::new(self.params.start_date, self.params.clamped_area_sqft());
        let factors = ScalingFactors::derive(&params, &features);
        let mut estimator = DurationEstimator::new(params.clamped_area_sqft(), factors);
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let mut tasks: Vec<Task> = Vec::with_capacity(BUILD_PLAN.len());
        let mut cursor = params.start_date;

        for step in BUILD_PLAN {
            match step {
                ScheduleStep::Single(id) => {
                    let task = Self::place_task(id, cursor, &mut estimator, &features);
                    cursor = task.end_date + Duration::days(1);
                    tasks.push(task);
                }
                ScheduleStep::Abutting(id) => {
                    let anchor = tasks.last().map(|t| t.end_date).unwrap_or(cursor);
                    let task = Self::place_task(id, anchor, &mut estimator, &features);
                    cursor = task.end_date + Duration::days(1);
                    tasks.push(task);
                }
                ScheduleStep::Concurrent(ids) => {
                    let mut latest_end = cursor;
                    for &id in ids {
                        let task = Self::place_task(id, cursor, &mut estimator, &features);
                        if task.end_date > latest_end {
                            latest_end = task.end_date;
                        }
                        tasks.push(task);
                    }
                    cursor = latest_end + Duration::days(1);
                }
            }
        }

        Self::resolve_dependencies(&mut tasks);
        for task in &mut tasks {
            task.refresh_completion(today);
        }

        BlueprintSchedule {
            params,
            features,
            factors,
            as_of: today,
            tasks,
        }
    }

    fn place_task(
        id: i32,
        start: NaiveDate,
        estimator: &mut DurationEstimator,
        features: &AnalysisFeatures,
    ) -> Task {
        let template = templates::template(id).expect("build plan references a known template");
        let duration_days = Self::duration_for(template, estimator, features);
        Task {
            id: template.id,
            name: template.name.to_string(),
            phase: template.phase,
            start_date: start,
            end_date: start + Duration::days(duration_days),
            duration_days,
            responsible_party: template.responsible_party.to_string(),
            description: template.description.to_string(),
            critical_path: template.critical_path,
            resources_needed: template
                .resources_needed
                .iter()
                .map(|s| s.to_string())
                .collect(),
            predecessor_ids: template.predecessor_ids.to_vec(),
            dependencies: Vec::new(),
            completion_percentage: 0,
            manual_completion_pct: None,
        }
    }

    fn duration_for(
        template: &TaskTemplate,
        estimator: &mut DurationEstimator,
        features: &AnalysisFeatures,
    ) -> i64 {
        match template.duration {
            DurationRule::Fixed(days) => days,
            DurationRule::Area(formula) => estimator.estimate(formula),
            DurationRule::Openings {
                divisor,
                min_days,
                max_days,
            } => estimator.from_count(
                features.num_windows_doors,
                divisor,
                min_days,
                max_days,
                crate::duration::Scaling::ComplexityAndSize,
            ),
            DurationRule::Rooms {
                divisor,
                min_days,
                max_days,
                scaling,
            } => estimator.from_count(features.num_rooms, divisor, min_days, max_days, scaling),
        }
    }

    /// Resolve predecessor ids into task names. An id with no matching task
    /// is dropped rather than failing the build.
    fn resolve_dependencies(tasks: &mut [Task]) {
        let names: HashMap<i32, String> =
            tasks.iter().map(|t| (t.id, t.name.clone())).collect();
        for task in tasks.iter_mut() {
            task.dependencies = task
                .predecessor_ids
                .iter()
                .filter_map(|pred| names.get(pred).cloned())
                .collect();
        }
    }
}

/// The built schedule: 25 tasks in creation order plus the normalized inputs
/// they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintSchedule {
    params: ProjectParameters,
    features: AnalysisFeatures,
    factors: ScalingFactors,
    as_of: NaiveDate,
    tasks: Vec<Task>,
}

impl BlueprintSchedule {
    pub(crate) fn from_parts(
        params: ProjectParameters,
        features: AnalysisFeatures,
        as_of: NaiveDate,
        tasks: Vec<Task>,
    ) -> Self {
        let factors = ScalingFactors::derive(&params, &features);
        Self {
            params,
            features,
            factors,
            as_of,
            tasks,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn parameters(&self) -> &ProjectParameters {
        &self.params
    }

    pub fn features(&self) -> &AnalysisFeatures {
        &self.features
    }

    pub fn factors(&self) -> ScalingFactors {
        self.factors
    }

    /// Reference date the completion percentages were computed against.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn find_task(&self, task_id: i32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Latest end date across all tasks.
    pub fn project_finish(&self) -> Option<NaiveDate> {
        self.tasks.iter().map(|t| t.end_date).max()
    }

    /// Recompute every task's date-derived completion against a new
    /// reference date. Manual overrides are preserved.
    pub fn refresh_completion(&mut self, today: NaiveDate) {
        self.as_of = today;
        for task in &mut self.tasks {
            task.refresh_completion(today);
        }
    }

    /// Record a user-supplied completion override for one task. The value is
    /// clamped to `[0, 100]`; a non-finite value is rejected. Returns whether
    /// the task exists.
    pub fn set_manual_completion_pct(&mut self, task_id: i32, pct: f64) -> bool {
        if !pct.is_finite() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.manual_completion_pct = Some(pct.clamp(0.0, 100.0));
                true
            }
            None => false,
        }
    }

    pub fn clear_manual_completion_pct(&mut self, task_id: i32) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.manual_completion_pct = None;
                true
            }
            None => false,
        }
    }

    /// Completion for one task with the manual override applied when set.
    pub fn effective_completion(&self, task_id: i32) -> Option<f64> {
        self.find_task(task_id).map(Task::effective_completion)
    }

    pub fn summary(&self) -> BuildSummary {
        let mut completed_count = 0;
        let mut in_progress_count = 0;
        let mut not_started_count = 0;
        for task in &self.tasks {
            match task.completion_percentage {
                100 => completed_count += 1,
                0 => not_started_count += 1,
                _ => in_progress_count += 1,
            }
        }

        BuildSummary {
            task_count: self.tasks.len(),
            critical_count: self.tasks.iter().filter(|t| t.critical_path).count(),
            critical_chain: graph::critical_chain(&self.tasks),
            project_finish: self.project_finish(),
            completed_count,
            in_progress_count,
            not_started_count,
        }
    }

    /// Flat-table view of the task list for downstream tabular consumers.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut df = DataFrame::empty_with_schema(&Self::dataframe_schema());
        for task in &self.tasks {
            let row = task.to_dataframe_row()?;
            df = df.vstack(&row)?;
        }
        Ok(df)
    }

    fn dataframe_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new("id".into(), DataType::Int32),
            Field::new("name".into(), DataType::String),
            Field::new("phase".into(), DataType::String),
            Field::new("start_date".into(), DataType::Date),
            Field::new("end_date".into(), DataType::Date),
            Field::new("duration_days".into(), DataType::Int64),
            Field::new("responsible_party".into(), DataType::String),
            Field::new("description".into(), DataType::String),
            Field::new("critical_path".into(), DataType::Boolean),
            Field::new(
                "resources_needed".into(),
                DataType::List(Box::new(DataType::String)),
            ),
            Field::new(
                "predecessor_ids".into(),
                DataType::List(Box::new(DataType::Int32)),
            ),
            Field::new(
                "dependencies".into(),
                DataType::List(Box::new(DataType::String)),
            ),
            Field::new("completion_percentage".into(), DataType::Int64),
            Field::new("manual_completion_pct".into(), DataType::Float64),
        ])
    }
}
