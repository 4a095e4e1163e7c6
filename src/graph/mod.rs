use crate::task::Task;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    Cycle,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::Cycle => write!(f, "cycle detected in task dependency graph"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Ids of critical-path tasks ordered by `(start_date, id)`.
pub fn critical_chain(tasks: &[Task]) -> Vec<i32> {
    let mut chain: Vec<(chrono::NaiveDate, i32)> = tasks
        .iter()
        .filter(|t| t.critical_path)
        .map(|t| (t.start_date, t.id))
        .collect();
    chain.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    chain.into_iter().map(|(_, id)| id).collect()
}

pub mod schedule_dag;

pub use schedule_dag::ScheduleDag;
