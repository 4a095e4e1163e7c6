use crate::task::Task;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct TaskValidationError {
    message: String,
}

impl TaskValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskValidationError {}

pub fn validate_task(task: &Task) -> Result<(), TaskValidationError> {
    if task.duration_days < 0 {
        return Err(TaskValidationError::new(format!(
            "task {} has negative duration {}",
            task.id, task.duration_days
        )));
    }

    if task.end_date < task.start_date {
        return Err(TaskValidationError::new(format!(
            "task {} ends {} before it starts {}",
            task.id, task.end_date, task.start_date
        )));
    }

    let span_days = (task.end_date - task.start_date).num_days();
    if span_days != task.duration_days {
        return Err(TaskValidationError::new(format!(
            "task {} spans {} days but records duration {}",
            task.id, span_days, task.duration_days
        )));
    }

    if task.completion_percentage > 100 {
        return Err(TaskValidationError::new(format!(
            "task {} has completion percentage {} above 100",
            task.id, task.completion_percentage
        )));
    }

    if let Some(pct) = task.manual_completion_pct {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(TaskValidationError::new(format!(
                "task {} has invalid manual completion {} (must be between 0 and 100)",
                task.id, pct
            )));
        }
    }

    let mut seen_preds = HashSet::with_capacity(task.predecessor_ids.len());
    for &pred in &task.predecessor_ids {
        if pred <= 0 || pred >= task.id {
            return Err(TaskValidationError::new(format!(
                "task {} lists predecessor {} that is not an earlier task",
                task.id, pred
            )));
        }
        if !seen_preds.insert(pred) {
            return Err(TaskValidationError::new(format!(
                "task {} lists predecessor {} twice",
                task.id, pred
            )));
        }
    }

    Ok(())
}

pub fn validate_task_collection(tasks: &[Task]) -> Result<(), TaskValidationError> {
    let mut seen_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen_ids.insert(task.id) {
            return Err(TaskValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}
