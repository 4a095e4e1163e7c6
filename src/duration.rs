use crate::features::AnalysisFeatures;
use crate::project::ProjectParameters;
use std::collections::HashMap;

/// Upper bound for the blueprint-derived complexity scalar.
pub const MAX_COMPLEXITY: f64 = 3.0;
/// Upper bound for the area-derived size scalar.
pub const MAX_SIZE_FACTOR: f64 = 1.5;
/// Default cap on any single task's duration, in days.
pub const DEFAULT_MAX_TASK_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationMode {
    /// Base days grow with the square root of the floor area.
    Sqrt,
    /// Base days grow linearly with the floor area.
    Linear,
}

/// One task's duration recipe. All fields participate in the memoization
/// key, so two formulas that differ only in their cap never share a cache
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationFormula {
    pub mode: DurationMode,
    pub divisor: u32,
    pub use_complexity: bool,
    pub min_days: i64,
    pub max_days: i64,
}

impl DurationFormula {
    pub const fn sqrt(divisor: u32, use_complexity: bool, min_days: i64) -> Self {
        Self {
            mode: DurationMode::Sqrt,
            divisor,
            use_complexity,
            min_days,
            max_days: DEFAULT_MAX_TASK_DAYS,
        }
    }

    pub const fn linear(divisor: u32, use_complexity: bool, min_days: i64) -> Self {
        Self {
            mode: DurationMode::Linear,
            divisor,
            use_complexity,
            min_days,
            max_days: DEFAULT_MAX_TASK_DAYS,
        }
    }
}

/// How a feature-count duration is scaled (finishing trades skip the
/// complexity scalar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scaling {
    ComplexityAndSize,
    SizeOnly,
}

/// Per-run scalars derived once from the feature record and project area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingFactors {
    pub complexity: f64,
    pub size: f64,
}

impl ScalingFactors {
    pub fn derive(params: &ProjectParameters, features: &AnalysisFeatures) -> Self {
        let features = features.clamped();
        let complexity = (1.0
            + features.building_area_ratio * 0.5
            + f64::from(features.num_rooms) * 0.1
            + f64::from(features.num_windows_doors) * 0.05)
            .min(MAX_COMPLEXITY);

        let area = params.clamped_area_sqft();
        let size: f64 = if area < 1000.0 {
            0.8
        } else if area > 3000.0 {
            1.2
        } else {
            1.0
        };
        let size = size.min(MAX_SIZE_FACTOR);

        Self { complexity, size }
    }
}

/// Maps duration formulas to integer day counts for one builder run. The
/// cache is owned by the estimator and dies with it; the scale factors are
/// frozen at construction, so memoized results stay valid for the whole run.
pub struct DurationEstimator {
    area_sqft: f64,
    factors: ScalingFactors,
    cache: HashMap<DurationFormula, i64>,
}

impl DurationEstimator {
    pub fn new(area_sqft: f64, factors: ScalingFactors) -> Self {
        Self {
            area_sqft,
            factors,
            cache: HashMap::new(),
        }
    }

    pub fn factors(&self) -> ScalingFactors {
        self.factors
    }

    /// Day count for an area-driven formula:
    /// `max(min_days, floor(base))`, scaled by the complexity factor when
    /// requested and then by the size factor (each scaling step floors
    /// independently), finally capped at `max_days`.
    pub fn estimate(&mut self, formula: DurationFormula) -> i64 {
        if let Some(&days) = self.cache.get(&formula) {
            return days;
        }

        let base = match formula.mode {
            DurationMode::Sqrt => (self.area_sqft.sqrt() / f64::from(formula.divisor)) as i64,
            DurationMode::Linear => (self.area_sqft / f64::from(formula.divisor)) as i64,
        };

        let mut days = base.max(formula.min_days);
        if formula.use_complexity {
            days = (days as f64 * self.factors.complexity) as i64;
        }
        days = (days as f64 * self.factors.size) as i64;
        days = days.min(formula.max_days);

        self.cache.insert(formula, days);
        days
    }

    /// Day count driven by a feature count (rooms, or windows and doors)
    /// instead of floor area. Both scale factors are applied in a single
    /// multiplication before the floor.
    pub fn from_count(
        &self,
        count: u32,
        divisor: u32,
        min_days: i64,
        max_days: i64,
        scaling: Scaling,
    ) -> i64 {
        let base = i64::from(count / divisor).max(min_days);
        let scaled = match scaling {
            Scaling::ComplexityAndSize => base as f64 * self.factors.complexity * self.factors.size,
            Scaling::SizeOnly => base as f64 * self.factors.size,
        };
        (scaled as i64).min(max_days)
    }
}
