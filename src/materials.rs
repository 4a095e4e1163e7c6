use crate::features::AnalysisFeatures;
use crate::project::ProjectParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caps used by the material estimate. Tighter than the schedule builder's:
/// material quantities blow up faster than durations, which are capped per
/// task anyway.
pub const MAX_ESTIMATOR_ROOMS: u32 = 30;
pub const MAX_ESTIMATOR_WINDOWS_DOORS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Concrete,
    Steel,
    Masonry,
    Finishing,
    Other,
}

impl MaterialCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialCategory::Concrete => "Concrete",
            MaterialCategory::Steel => "Steel",
            MaterialCategory::Masonry => "Masonry",
            MaterialCategory::Finishing => "Finishing",
            MaterialCategory::Other => "Other",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLineItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub cost: f64,
    pub category: MaterialCategory,
}

impl MaterialLineItem {
    fn new(
        name: &str,
        quantity: f64,
        unit: &str,
        cost: f64,
        category: MaterialCategory,
    ) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            cost,
            category,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed sequence of unit-conversion estimates from floor area and blueprint
/// features to a bill of materials. Pure arithmetic, no state.
pub fn estimate_materials(
    features: &AnalysisFeatures,
    params: &ProjectParameters,
) -> Vec<MaterialLineItem> {
    let num_rooms = features.num_rooms.min(MAX_ESTIMATOR_ROOMS);
    let area_sqft = params.clamped_area_sqft();
    let ratio = features.clamped().building_area_ratio;

    // Footprint actually occupied by the structure.
    let building_area = area_sqft * ratio;
    let building_width = building_area.sqrt();

    let mut materials = Vec::with_capacity(17);

    // Foundation concrete: ~0.5 cubic yards per 100 sq ft.
    let foundation_concrete = (building_area / 100.0) * 0.5;
    materials.push(MaterialLineItem::new(
        "Concrete (Foundation)",
        round2(foundation_concrete),
        "cubic yards",
        round2(foundation_concrete * 125.0),
        MaterialCategory::Concrete,
    ));

    // Slab at 4 inch residential thickness: ~1.23 cubic yards per 100 sq ft.
    let slab_concrete = (building_area / 100.0) * 1.23;
    materials.push(MaterialLineItem::new(
        "Concrete (Slab)",
        round2(slab_concrete),
        "cubic yards",
        round2(slab_concrete * 110.0),
        MaterialCategory::Concrete,
    ));

    // ~6 bags of cement per cubic yard of concrete.
    let cement_bags = (foundation_concrete + slab_concrete) * 6.0;
    materials.push(MaterialLineItem::new(
        "Cement Bags",
        cement_bags.round(),
        "bags",
        round2(cement_bags * 12.0),
        MaterialCategory::Concrete,
    ));

    // ~100 lbs of rebar per cubic yard of concrete.
    let rebar_weight = (foundation_concrete + slab_concrete) * 100.0;
    materials.push(MaterialLineItem::new(
        "Steel Reinforcement",
        round2(rebar_weight),
        "lbs",
        round2(rebar_weight * 0.75),
        MaterialCategory::Steel,
    ));

    // Block walls at 10 ft height, 0.75 blocks per sq ft of wall.
    let block_wall_area = building_width * 4.0 * 10.0;
    let blocks_needed = block_wall_area * 0.75;
    materials.push(MaterialLineItem::new(
        "Concrete Blocks (8-inch)",
        blocks_needed.round(),
        "blocks",
        round2(blocks_needed * 1.75),
        MaterialCategory::Masonry,
    ));

    // One bag of mortar per ~32 blocks.
    let mortar_bags = blocks_needed / 32.0;
    materials.push(MaterialLineItem::new(
        "Mortar Mix",
        mortar_bags.round(),
        "bags",
        round2(mortar_bags * 9.0),
        MaterialCategory::Masonry,
    ));

    // ~2 board feet of framing lumber per sq ft of building.
    let lumber_board_feet = building_area * 2.0;
    materials.push(MaterialLineItem::new(
        "Framing Lumber",
        lumber_board_feet.round(),
        "board feet",
        round2(lumber_board_feet * 0.85),
        MaterialCategory::Other,
    ));

    // One truss per 2 linear feet of building width.
    let roof_trusses = building_width / 2.0;
    materials.push(MaterialLineItem::new(
        "Roof Trusses",
        roof_trusses.round(),
        "pieces",
        round2(roof_trusses * 85.0),
        MaterialCategory::Other,
    ));

    // Shingles in roofing squares (100 sq ft each), +15% for pitch/overhang.
    let roof_squares = (building_area * 1.15) / 100.0;
    materials.push(MaterialLineItem::new(
        "Asphalt Shingles",
        round2(roof_squares),
        "squares",
        round2(roof_squares * 90.0),
        MaterialCategory::Finishing,
    ));

    // Drywall: 8 ft interior walls plus the ceiling, 32 sq ft per sheet.
    let wall_area = (building_width * 4.0 * 8.0) + building_area;
    let drywall_sheets = wall_area / 32.0;
    materials.push(MaterialLineItem::new(
        "Drywall Sheets",
        drywall_sheets.round(),
        "sheets",
        round2(drywall_sheets * 12.0),
        MaterialCategory::Finishing,
    ));

    // Flooring with a 15% waste factor.
    let flooring_area = building_area * 1.15;
    materials.push(MaterialLineItem::new(
        "Flooring",
        round2(flooring_area),
        "sq ft",
        round2(flooring_area * 3.5),
        MaterialCategory::Finishing,
    ));

    // Window count from area and rooms, bounded to a sane range; large
    // buildings are held to one window per 200 sq ft.
    let base_window_count = building_area / 150.0;
    let room_windows = f64::from(num_rooms) * 1.5;
    let mut window_count =
        (((base_window_count + room_windows) / 2.0) as i64).clamp(2, 50);
    if building_area > 3000.0 {
        window_count = window_count.min((building_area / 200.0) as i64);
    }
    materials.push(MaterialLineItem::new(
        "Windows",
        window_count as f64,
        "pieces",
        round2(window_count as f64 * 250.0),
        MaterialCategory::Finishing,
    ));

    // One interior door per room plus 1-4 exterior doors from the perimeter.
    let interior_doors = i64::from(num_rooms);
    let exterior_doors = ((building_area.sqrt() / 15.0) as i64).clamp(1, 4);
    let door_count = (interior_doors + exterior_doors).min(30);
    materials.push(MaterialLineItem::new(
        "Doors",
        door_count as f64,
        "pieces",
        round2(door_count as f64 * 150.0),
        MaterialCategory::Finishing,
    ));

    // Two coats at ~400 sq ft per gallon.
    let paint_gallons = (wall_area * 2.0) / 400.0;
    materials.push(MaterialLineItem::new(
        "Paint",
        round2(paint_gallons),
        "gallons",
        round2(paint_gallons * 35.0),
        MaterialCategory::Finishing,
    ));

    // ~200 ft of wiring per 1000 sq ft.
    let wiring_feet = (building_area / 1000.0) * 200.0;
    materials.push(MaterialLineItem::new(
        "Electrical Wiring",
        wiring_feet.round(),
        "feet",
        round2(wiring_feet * 0.5),
        MaterialCategory::Other,
    ));

    // ~100 ft of pipe per bathroom (one per two rooms, minimum one) plus 50
    // for the kitchen.
    let bathroom_count = (num_rooms / 2).max(1);
    let plumbing_feet = f64::from(bathroom_count * 100 + 50);
    materials.push(MaterialLineItem::new(
        "Plumbing Pipes",
        plumbing_feet.round(),
        "feet",
        round2(plumbing_feet * 2.0),
        MaterialCategory::Other,
    ));

    // Basic HVAC system at ~$7 per sq ft.
    let hvac_cost = building_area * 7.0;
    materials.push(MaterialLineItem::new(
        "HVAC System",
        1.0,
        "system",
        round2(hvac_cost),
        MaterialCategory::Other,
    ));

    materials
}
