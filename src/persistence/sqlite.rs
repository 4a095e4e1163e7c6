use super::{PersistenceError, PersistenceResult, ScheduleStore};
use crate::features::AnalysisFeatures;
use crate::project::ProjectParameters;
use crate::schedule::BlueprintSchedule;
use crate::task::Task;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Serialize, Deserialize)]
struct ScheduleInfo {
    parameters: ProjectParameters,
    features: AnalysisFeatures,
    as_of: NaiveDate,
}

pub struct SqliteScheduleStore {
    connection: Mutex<Connection>,
}

impl SqliteScheduleStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            PRAGMA foreign_keys = ON;
            CREATE TABLE IF NOT EXISTS schedule_info (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                info_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY,
                task_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_info(
        &self,
        tx: &rusqlite::Transaction,
        schedule: &BlueprintSchedule,
    ) -> PersistenceResult<()> {
        let info = ScheduleInfo {
            parameters: schedule.parameters().clone(),
            features: schedule.features().clone(),
            as_of: schedule.as_of(),
        };
        let json = serde_json::to_string(&info)?;
        tx.execute("DELETE FROM schedule_info", [])?;
        tx.execute(
            "INSERT INTO schedule_info (id, info_json) VALUES (1, ?1)",
            params![json],
        )?;
        Ok(())
    }

    fn save_tasks(
        &self,
        tx: &rusqlite::Transaction,
        schedule: &BlueprintSchedule,
    ) -> PersistenceResult<()> {
        tx.execute("DELETE FROM tasks", [])?;
        let mut stmt = tx.prepare("INSERT INTO tasks (id, task_json) VALUES (?1, ?2)")?;
        for task in schedule.tasks() {
            let json = serde_json::to_string(task)?;
            stmt.execute(params![task.id, json])?;
        }
        Ok(())
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn save_schedule(&self, schedule: &BlueprintSchedule) -> PersistenceResult<()> {
        super::validate_schedule(schedule)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        self.save_info(&tx, schedule)?;
        self.save_tasks(&tx, schedule)?;
        tx.commit()?;
        Ok(())
    }

    fn load_schedule(&self) -> PersistenceResult<Option<BlueprintSchedule>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT info_json FROM schedule_info WHERE id = 1")?;
        let info_json_opt: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(info_json) = info_json_opt else {
            return Ok(None);
        };

        let info: ScheduleInfo = serde_json::from_str(&info_json)?;

        let mut stmt = conn.prepare("SELECT task_json FROM tasks ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut tasks = Vec::new();
        for json in rows {
            let json = json?;
            let task: Task = serde_json::from_str(&json)?;
            tasks.push(task);
        }

        super::validate_tasks(&tasks)?;

        Ok(Some(BlueprintSchedule::from_parts(
            info.parameters,
            info.features,
            info.as_of,
            tasks,
        )))
    }
}
