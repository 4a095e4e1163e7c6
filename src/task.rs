use chrono::{Duration, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Construction stage a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Site Preparation")]
    SitePreparation,
    Foundation,
    Framing,
    Exterior,
    #[serde(rename = "Rough-ins")]
    RoughIns,
    #[serde(rename = "Interior Finishing")]
    InteriorFinishing,
    #[serde(rename = "Final Finishing")]
    FinalFinishing,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::SitePreparation,
        Phase::Foundation,
        Phase::Framing,
        Phase::Exterior,
        Phase::RoughIns,
        Phase::InteriorFinishing,
        Phase::FinalFinishing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::SitePreparation => "Site Preparation",
            Phase::Foundation => "Foundation",
            Phase::Framing => "Framing",
            Phase::Exterior => "Exterior",
            Phase::RoughIns => "Rough-ins",
            Phase::InteriorFinishing => "Interior Finishing",
            Phase::FinalFinishing => "Final Finishing",
        }
    }

    pub fn from_label(label: &str) -> Option<Phase> {
        Phase::ALL.iter().copied().find(|p| p.as_str() == label)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub phase: Phase,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub responsible_party: String,
    pub description: String,
    pub critical_path: bool,
    pub resources_needed: Vec<String>,
    pub predecessor_ids: Vec<i32>,
    pub dependencies: Vec<String>,
    pub completion_percentage: u8,
    pub manual_completion_pct: Option<f64>,
}

/// Date-derived completion for a task window. 100 once the window is past,
/// 0 before it opens, linear interpolation in between. A zero-length window
/// yields the fixed fallback of 50.
pub fn derived_completion(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> u8 {
    if end < today {
        return 100;
    }
    if start > today {
        return 0;
    }
    let total_days = (end - start).num_days();
    if total_days == 0 {
        return 50;
    }
    let days_passed = (today - start).num_days();
    let pct = (days_passed as f64 / total_days as f64 * 100.0) as i64;
    pct.clamp(0, 100) as u8
}

impl Task {
    /// Recompute the date-derived completion for a new reference date. The
    /// manual override, when present, is left untouched.
    pub fn refresh_completion(&mut self, today: NaiveDate) {
        self.completion_percentage = derived_completion(self.start_date, self.end_date, today);
    }

    /// Completion shown to consumers: the manual override supersedes the
    /// date-derived value when set.
    pub fn effective_completion(&self) -> f64 {
        self.manual_completion_pct
            .unwrap_or(f64::from(self.completion_percentage))
    }

    pub fn to_dataframe_row(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(14);

        let id_data: [i32; 1] = [self.id];
        columns.push(Series::new(PlSmallStr::from_static("id"), id_data).into_column());

        let name_data: [&str; 1] = [self.name.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("name"), name_data).into_column());

        let phase_data: [&str; 1] = [self.phase.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("phase"), phase_data).into_column());

        columns.push(Self::series_from_date("start_date", self.start_date)?.into_column());
        columns.push(Self::series_from_date("end_date", self.end_date)?.into_column());

        let duration_data: [i64; 1] = [self.duration_days];
        columns.push(
            Series::new(PlSmallStr::from_static("duration_days"), duration_data).into_column(),
        );

        let party_data: [&str; 1] = [self.responsible_party.as_str()];
        columns.push(
            Series::new(PlSmallStr::from_static("responsible_party"), party_data).into_column(),
        );

        let description_data: [&str; 1] = [self.description.as_str()];
        columns.push(
            Series::new(PlSmallStr::from_static("description"), description_data).into_column(),
        );

        let critical_data: [bool; 1] = [self.critical_path];
        columns.push(
            Series::new(PlSmallStr::from_static("critical_path"), critical_data).into_column(),
        );

        columns.push(
            Self::series_from_string_list("resources_needed", &self.resources_needed)
                .into_column(),
        );
        columns.push(
            Self::series_from_i32_list("predecessor_ids", &self.predecessor_ids).into_column(),
        );
        columns
            .push(Self::series_from_string_list("dependencies", &self.dependencies).into_column());

        let completion_data: [i64; 1] = [i64::from(self.completion_percentage)];
        columns.push(
            Series::new(
                PlSmallStr::from_static("completion_percentage"),
                completion_data,
            )
            .into_column(),
        );

        let manual_data: [Option<f64>; 1] = [self.manual_completion_pct];
        columns.push(
            Series::new(PlSmallStr::from_static("manual_completion_pct"), manual_data)
                .into_column(),
        );

        DataFrame::new(columns)
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> PolarsResult<Self> {
        let id = df
            .column("id")?
            .i32()?
            .get(row_idx)
            .ok_or_else(|| PolarsError::ComputeError("task row missing id".into()))?;

        let name = df
            .column("name")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let phase_label = df.column("phase")?.str()?.get(row_idx).unwrap_or("");
        let phase = Phase::from_label(phase_label).ok_or_else(|| {
            PolarsError::ComputeError(format!("unknown phase '{phase_label}'").into())
        })?;

        let start_date = Self::date_from_series(df.column("start_date")?.date()?, row_idx)
            .ok_or_else(|| PolarsError::ComputeError("task row missing start_date".into()))?;
        let end_date = Self::date_from_series(df.column("end_date")?.date()?, row_idx)
            .ok_or_else(|| PolarsError::ComputeError("task row missing end_date".into()))?;

        let duration_days = df.column("duration_days")?.i64()?.get(row_idx).unwrap_or(0);

        let responsible_party = df
            .column("responsible_party")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let description = df
            .column("description")?
            .str()?
            .get(row_idx)
            .unwrap_or("")
            .to_string();

        let critical_path = df
            .column("critical_path")?
            .bool()?
            .get(row_idx)
            .unwrap_or(false);

        let resources_needed =
            Self::vec_from_string_list(df.column("resources_needed")?.list()?, row_idx)?;
        let predecessor_ids =
            Self::vec_from_i32_list(df.column("predecessor_ids")?.list()?, row_idx)?;
        let dependencies = Self::vec_from_string_list(df.column("dependencies")?.list()?, row_idx)?;

        let completion_percentage = df
            .column("completion_percentage")?
            .i64()?
            .get(row_idx)
            .unwrap_or(0)
            .clamp(0, 100) as u8;

        let manual_completion_pct = df.column("manual_completion_pct")?.f64()?.get(row_idx);

        Ok(Self {
            id,
            name,
            phase,
            start_date,
            end_date,
            duration_days,
            responsible_party,
            description,
            critical_path,
            resources_needed,
            predecessor_ids,
            dependencies,
            completion_percentage,
            manual_completion_pct,
        })
    }

    fn series_from_i32_list(name: &str, values: &[i32]) -> Series {
        let inner = Series::new(PlSmallStr::from_static(""), values.to_vec());
        Series::new(name.into(), &[inner])
    }

    fn series_from_string_list(name: &str, values: &[String]) -> Series {
        let inner_values: Vec<&str> = values.iter().map(|s| s.as_str()).collect();
        let inner = Series::new(PlSmallStr::from_static(""), inner_values);
        Series::new(name.into(), &[inner])
    }

    fn series_from_date(name: &str, date: NaiveDate) -> PolarsResult<Series> {
        let data: [Option<i32>; 1] = [Some(Self::date_to_i32(date))];
        Series::new(name.into(), data).cast(&DataType::Date)
    }

    fn date_from_series(chunked: &DateChunked, row_idx: usize) -> Option<NaiveDate> {
        chunked.get(row_idx).map(Self::date_from_i32)
    }

    fn vec_from_i32_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<i32>> {
        if let Some(series) = list.get_as_series(row_idx) {
            Ok(series.i32()?.into_iter().flatten().collect::<Vec<_>>())
        } else {
            Ok(Vec::new())
        }
    }

    fn vec_from_string_list(list: &ListChunked, row_idx: usize) -> PolarsResult<Vec<String>> {
        if let Some(series) = list.get_as_series(row_idx) {
            Ok(series
                .str()?
                .into_iter()
                .flatten()
                .map(ToOwned::to_owned)
                .collect())
        } else {
            Ok(Vec::new())
        }
    }

    fn date_to_i32(date: NaiveDate) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        (date - epoch).num_days() as i32
    }

    fn date_from_i32(days: i32) -> NaiveDate {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        epoch + Duration::days(i64::from(days))
    }
}
