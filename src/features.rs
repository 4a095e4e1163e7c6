use serde::{Deserialize, Serialize};

/// Caps applied when the schedule builder consumes a feature record.
pub const MAX_ROOMS: u32 = 50;
pub const MAX_WINDOWS_DOORS: u32 = 100;

/// Feature summary produced by the upstream blueprint analysis. The builder
/// treats this as an opaque input record and relies only on these three
/// fields; missing fields deserialize to the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFeatures {
    #[serde(default = "default_building_area_ratio")]
    pub building_area_ratio: f64,
    #[serde(default = "default_num_rooms")]
    pub num_rooms: u32,
    #[serde(default = "default_num_windows_doors")]
    pub num_windows_doors: u32,
}

impl AnalysisFeatures {
    pub fn new(building_area_ratio: f64, num_rooms: u32, num_windows_doors: u32) -> Self {
        Self {
            building_area_ratio,
            num_rooms,
            num_windows_doors,
        }
    }

    /// Copy with out-of-range values clamped to the documented maxima. A
    /// non-finite area ratio is replaced with the default rather than
    /// propagated into the duration math.
    pub fn clamped(&self) -> Self {
        let building_area_ratio = if self.building_area_ratio.is_finite() {
            self.building_area_ratio.clamp(0.0, 1.0)
        } else {
            default_building_area_ratio()
        };
        Self {
            building_area_ratio,
            num_rooms: self.num_rooms.min(MAX_ROOMS),
            num_windows_doors: self.num_windows_doors.min(MAX_WINDOWS_DOORS),
        }
    }
}

impl Default for AnalysisFeatures {
    fn default() -> Self {
        Self {
            building_area_ratio: default_building_area_ratio(),
            num_rooms: default_num_rooms(),
            num_windows_doors: default_num_windows_doors(),
        }
    }
}

fn default_building_area_ratio() -> f64 {
    0.5
}

fn default_num_rooms() -> u32 {
    1
}

fn default_num_windows_doors() -> u32 {
    2
}
