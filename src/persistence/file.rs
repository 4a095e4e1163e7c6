use super::{PersistenceError, PersistenceResult};
use crate::features::AnalysisFeatures;
use crate::project::ProjectParameters;
use crate::schedule::BlueprintSchedule;
use crate::task::{Phase, Task};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    parameters: ProjectParameters,
    features: AnalysisFeatures,
    as_of: NaiveDate,
    tasks: Vec<Task>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &BlueprintSchedule) -> PersistenceResult<Self> {
        super::validate_schedule(schedule)?;
        Ok(Self {
            parameters: schedule.parameters().clone(),
            features: schedule.features().clone(),
            as_of: schedule.as_of(),
            tasks: schedule.tasks().to_vec(),
        })
    }

    fn into_schedule(self) -> PersistenceResult<BlueprintSchedule> {
        super::validate_tasks(&self.tasks)?;
        Ok(BlueprintSchedule::from_parts(
            self.parameters,
            self.features,
            self.as_of,
            self.tasks,
        ))
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &BlueprintSchedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<BlueprintSchedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(file)?;
    snapshot.into_schedule()
}

#[derive(Default, Serialize, Deserialize)]
struct TaskCsvRecord {
    id: i32,
    name: String,
    phase: String,
    start_date: String,
    end_date: String,
    duration_days: i64,
    responsible_party: String,
    description: String,
    critical_path: String,
    resources_needed: String,
    predecessor_ids: String,
    dependencies: String,
    completion_percentage: i64,
    manual_completion_pct: String,
    #[serde(default)]
    parameters_json: String,
    #[serde(default)]
    features_json: String,
    #[serde(default)]
    as_of: String,
}

impl From<&Task> for TaskCsvRecord {
    fn from(task: &Task) -> Self {
        let mut record = TaskCsvRecord::default();
        record.id = task.id;
        record.name = task.name.clone();
        record.phase = task.phase.as_str().to_string();
        record.start_date = format_date(task.start_date);
        record.end_date = format_date(task.end_date);
        record.duration_days = task.duration_days;
        record.responsible_party = task.responsible_party.clone();
        record.description = task.description.clone();
        record.critical_path = task.critical_path.to_string();
        record.resources_needed = join_strings(&task.resources_needed);
        record.predecessor_ids = join_i32(&task.predecessor_ids);
        record.dependencies = join_strings(&task.dependencies);
        record.completion_percentage = i64::from(task.completion_percentage);
        record.manual_completion_pct = format_option_f64(task.manual_completion_pct);
        record
    }
}

impl TaskCsvRecord {
    fn header_row(schedule: &BlueprintSchedule) -> PersistenceResult<Self> {
        let mut record = TaskCsvRecord::default();
        record.name = "__schedule__".to_string();
        record.parameters_json = serde_json::to_string(schedule.parameters())?;
        record.features_json = serde_json::to_string(schedule.features())?;
        record.as_of = format_date(schedule.as_of());
        Ok(record)
    }

    fn is_header_row(&self) -> bool {
        !self.parameters_json.trim().is_empty()
    }

    fn into_task(self) -> PersistenceResult<Task> {
        if self.is_header_row() {
            return Err(PersistenceError::InvalidData(
                "schedule header row cannot be converted to task".into(),
            ));
        }
        let phase = Phase::from_label(self.phase.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid phase '{}'", self.phase))
        })?;
        Ok(Task {
            id: self.id,
            name: self.name,
            phase,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            duration_days: self.duration_days,
            responsible_party: self.responsible_party,
            description: self.description,
            critical_path: parse_bool(&self.critical_path)?,
            resources_needed: split_strings(&self.resources_needed),
            predecessor_ids: split_i32(&self.predecessor_ids)?,
            dependencies: split_strings(&self.dependencies),
            completion_percentage: self.completion_percentage.clamp(0, 100) as u8,
            manual_completion_pct: parse_option_f64(&self.manual_completion_pct)?,
        })
    }
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &BlueprintSchedule,
    path: P,
) -> PersistenceResult<()> {
    super::validate_schedule(schedule)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(TaskCsvRecord::header_row(schedule)?)?;
    for task in schedule.tasks() {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_schedule_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<BlueprintSchedule> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut tasks = Vec::new();
    let mut parameters: Option<ProjectParameters> = None;
    let mut features: Option<AnalysisFeatures> = None;
    let mut as_of: Option<NaiveDate> = None;
    for record in reader.deserialize::<TaskCsvRecord>() {
        let record = record?;
        if record.is_header_row() {
            if parameters.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple schedule header rows".into(),
                ));
            }
            parameters = Some(serde_json::from_str(&record.parameters_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid parameters json: {err}"))
            })?);
            if !record.features_json.trim().is_empty() {
                features = Some(serde_json::from_str(&record.features_json).map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid features json: {err}"))
                })?);
            }
            if !record.as_of.trim().is_empty() {
                as_of = Some(parse_date(&record.as_of)?);
            }
            continue;
        }
        tasks.push(record.into_task()?);
    }

    if tasks.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no tasks".into(),
        ));
    }

    super::validate_tasks(&tasks)?;

    let parameters = parameters.ok_or_else(|| {
        PersistenceError::InvalidData("CSV file missing schedule header row".into())
    })?;
    let features = features.unwrap_or_default();
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());

    Ok(BlueprintSchedule::from_parts(
        parameters, features, as_of, tasks,
    ))
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn format_option_f64(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_option_f64(input: &str) -> PersistenceResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid float '{input}': {e}")))
}

fn parse_bool(input: &str) -> PersistenceResult<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(PersistenceError::InvalidData(format!(
            "invalid boolean '{other}'"
        ))),
    }
}

fn join_i32(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_i32(input: &str) -> PersistenceResult<Vec<i32>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(|part| {
            part.trim().parse::<i32>().map_err(|e| {
                PersistenceError::InvalidData(format!("invalid integer '{part}': {e}"))
            })
        })
        .collect()
}

fn join_strings(values: &[String]) -> String {
    values.join(";")
}

fn split_strings(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(';').map(|s| s.trim().to_string()).collect()
}
