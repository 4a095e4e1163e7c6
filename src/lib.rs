pub mod duration;
pub mod features;
pub mod graph;
pub mod materials;
pub mod persistence;
pub mod project;
pub mod schedule;
pub mod task;
pub(crate) mod task_validation;
pub mod templates;

pub use duration::{DurationEstimator, DurationFormula, DurationMode, Scaling, ScalingFactors};
pub use features::AnalysisFeatures;
pub use graph::{GraphError, ScheduleDag, critical_chain};
pub use materials::{MaterialCategory, MaterialLineItem, estimate_materials};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteScheduleStore;
pub use persistence::{
    PersistenceError, ScheduleStore, load_schedule_from_csv, load_schedule_from_json,
    save_schedule_to_csv, save_schedule_to_json, validate_schedule, validate_tasks,
};
pub use project::ProjectParameters;
pub use schedule::{BlueprintSchedule, BuildSummary, ScheduleBuilder};
pub use task::{Phase, Task};
pub use templates::{BUILD_PLAN, DurationRule, ScheduleStep, TEMPLATES, TaskTemplate};
