use crate::duration::{DurationFormula, Scaling};
use crate::task::Phase;

/// How a template's duration is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationRule {
    /// Fixed day count regardless of project inputs (curing, inspections).
    Fixed(i64),
    /// Area-driven formula, memoized by the estimator.
    Area(DurationFormula),
    /// Driven by the window/door count.
    Openings {
        divisor: u32,
        min_days: i64,
        max_days: i64,
    },
    /// Driven by the room count.
    Rooms {
        divisor: u32,
        min_days: i64,
        max_days: i64,
        scaling: Scaling,
    },
}

/// Declarative description of one construction task. The predecessor list
/// records the real-world dependency and intentionally does not always match
/// the scheduling order in [`BUILD_PLAN`].
#[derive(Debug, Clone, Copy)]
pub struct TaskTemplate {
    pub id: i32,
    pub name: &'static str,
    pub phase: Phase,
    pub responsible_party: &'static str,
    pub description: &'static str,
    pub resources_needed: &'static [&'static str],
    pub critical_path: bool,
    pub predecessor_ids: &'static [i32],
    pub duration: DurationRule,
}

/// One step of the date-assignment walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStep {
    /// Starts at the cursor; the cursor advances to its end plus one day.
    Single(i32),
    /// Starts exactly at the previous task's end date, with no gap day.
    Abutting(i32),
    /// All listed tasks start at the cursor; the cursor then advances to the
    /// latest of their end dates plus one day.
    Concurrent(&'static [i32]),
}

pub const TEMPLATES: [TaskTemplate; 25] = [
    TaskTemplate {
        id: 1,
        name: "Site Clearing and Preparation",
        phase: Phase::SitePreparation,
        responsible_party: "General Contractor",
        description: "Clear site, remove obstacles, grade land",
        resources_needed: &["Excavator", "Dump Truck", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[],
        duration: DurationRule::Area(DurationFormula::sqrt(50, false, 1)),
    },
    TaskTemplate {
        id: 2,
        name: "Excavation",
        phase: Phase::Foundation,
        responsible_party: "Excavation Crew",
        description: "Excavate foundation area and utility trenches",
        resources_needed: &["Excavator", "Dump Truck", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[1],
        duration: DurationRule::Area(DurationFormula::sqrt(50, true, 1)),
    },
    TaskTemplate {
        id: 3,
        name: "Foundation Formwork",
        phase: Phase::Foundation,
        responsible_party: "Concrete Contractor",
        description: "Build forms for concrete foundation",
        resources_needed: &["Lumber", "Form Hardware", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[2],
        duration: DurationRule::Area(DurationFormula::sqrt(30, true, 2)),
    },
    TaskTemplate {
        id: 4,
        name: "Steel Reinforcement Installation",
        phase: Phase::Foundation,
        responsible_party: "Concrete Contractor",
        description: "Install rebar for foundation",
        resources_needed: &["Rebar", "Tie Wire", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[3],
        duration: DurationRule::Area(DurationFormula::sqrt(70, true, 1)),
    },
    TaskTemplate {
        id: 5,
        name: "Foundation Concrete Pour",
        phase: Phase::Foundation,
        responsible_party: "Concrete Contractor",
        description: "Pour concrete for foundation",
        resources_needed: &["Concrete", "Pump Truck", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[4],
        duration: DurationRule::Area(DurationFormula::sqrt(100, true, 1)),
    },
    TaskTemplate {
        id: 6,
        name: "Foundation Curing",
        phase: Phase::Foundation,
        responsible_party: "Concrete Contractor",
        description: "Allow concrete to cure properly",
        resources_needed: &["Water", "Concrete Curing Blankets"],
        critical_path: true,
        predecessor_ids: &[5],
        duration: DurationRule::Fixed(7),
    },
    TaskTemplate {
        id: 7,
        name: "Floor Framing",
        phase: Phase::Framing,
        responsible_party: "Framing Contractor",
        description: "Frame floor structure",
        resources_needed: &["Lumber", "Nail Gun", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[6],
        duration: DurationRule::Area(DurationFormula::linear(500, true, 2)),
    },
    TaskTemplate {
        id: 8,
        name: "Wall Framing",
        phase: Phase::Framing,
        responsible_party: "Framing Contractor",
        description: "Frame exterior and interior walls",
        resources_needed: &["Lumber", "Nail Gun", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[7],
        duration: DurationRule::Area(DurationFormula::linear(400, true, 3)),
    },
    TaskTemplate {
        id: 9,
        name: "Roof Framing",
        phase: Phase::Framing,
        responsible_party: "Framing Contractor",
        description: "Install roof trusses and framing",
        resources_needed: &["Trusses", "Lumber", "Nail Gun", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[8],
        duration: DurationRule::Area(DurationFormula::linear(500, true, 2)),
    },
    TaskTemplate {
        id: 10,
        name: "Roofing Installation",
        phase: Phase::Exterior,
        responsible_party: "Roofing Contractor",
        description: "Install roof sheathing, underlayment, and shingles",
        resources_needed: &["Shingles", "Underlayment", "Nail Gun", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[9],
        duration: DurationRule::Area(DurationFormula::linear(600, true, 2)),
    },
    TaskTemplate {
        id: 11,
        name: "Window and Exterior Door Installation",
        phase: Phase::Exterior,
        responsible_party: "Carpentry Crew",
        description: "Install windows and exterior doors",
        resources_needed: &["Windows", "Doors", "Flashing", "Labor Crew"],
        critical_path: false,
        predecessor_ids: &[10],
        duration: DurationRule::Openings {
            divisor: 4,
            min_days: 1,
            max_days: 30,
        },
    },
    TaskTemplate {
        id: 12,
        name: "Plumbing Rough-in",
        phase: Phase::RoughIns,
        responsible_party: "Plumbing Contractor",
        description: "Install rough plumbing",
        resources_needed: &["Pipes", "Fittings", "Tools", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[9],
        duration: DurationRule::Rooms {
            divisor: 2,
            min_days: 3,
            max_days: 30,
            scaling: Scaling::ComplexityAndSize,
        },
    },
    TaskTemplate {
        id: 13,
        name: "Electrical Rough-in",
        phase: Phase::RoughIns,
        responsible_party: "Electrical Contractor",
        description: "Install rough electrical wiring",
        resources_needed: &["Wiring", "Boxes", "Panels", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[9],
        duration: DurationRule::Area(DurationFormula::linear(500, true, 3)),
    },
    TaskTemplate {
        id: 14,
        name: "HVAC Rough-in",
        phase: Phase::RoughIns,
        responsible_party: "HVAC Contractor",
        description: "Install HVAC ductwork and units",
        resources_needed: &["Ductwork", "HVAC Units", "Tools", "Labor Crew"],
        critical_path: false,
        predecessor_ids: &[9],
        duration: DurationRule::Area(DurationFormula::linear(700, true, 2)),
    },
    TaskTemplate {
        id: 15,
        name: "Insulation Installation",
        phase: Phase::RoughIns,
        responsible_party: "Insulation Contractor",
        description: "Install insulation in walls and ceiling",
        resources_needed: &["Insulation", "Staple Gun", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[12, 13, 14],
        duration: DurationRule::Area(DurationFormula::linear(1000, true, 1)),
    },
    TaskTemplate {
        id: 16,
        name: "Drywall Installation",
        phase: Phase::InteriorFinishing,
        responsible_party: "Drywall Contractor",
        description: "Install and finish drywall",
        resources_needed: &["Drywall Sheets", "Joint Compound", "Tools", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[15],
        duration: DurationRule::Area(DurationFormula::linear(400, true, 3)),
    },
    TaskTemplate {
        id: 17,
        name: "Interior Door Installation",
        phase: Phase::InteriorFinishing,
        responsible_party: "Carpentry Crew",
        description: "Install interior doors and trim",
        resources_needed: &["Doors", "Trim", "Nail Gun", "Labor Crew"],
        critical_path: false,
        predecessor_ids: &[16],
        duration: DurationRule::Rooms {
            divisor: 2,
            min_days: 1,
            max_days: 20,
            scaling: Scaling::ComplexityAndSize,
        },
    },
    TaskTemplate {
        id: 18,
        name: "Painting",
        phase: Phase::InteriorFinishing,
        responsible_party: "Painting Contractor",
        description: "Prime and paint walls and ceilings",
        resources_needed: &["Paint", "Brushes", "Rollers", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[17],
        duration: DurationRule::Area(DurationFormula::linear(500, true, 3)),
    },
    TaskTemplate {
        id: 19,
        name: "Flooring Installation",
        phase: Phase::InteriorFinishing,
        responsible_party: "Flooring Contractor",
        description: "Install flooring throughout the building",
        resources_needed: &["Flooring Materials", "Tools", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[18],
        duration: DurationRule::Area(DurationFormula::linear(500, true, 2)),
    },
    TaskTemplate {
        id: 20,
        name: "Cabinetry and Countertop Installation",
        phase: Phase::InteriorFinishing,
        responsible_party: "Cabinet Installer",
        description: "Install kitchen and bathroom cabinets and countertops",
        resources_needed: &["Cabinets", "Countertops", "Tools", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[19],
        duration: DurationRule::Rooms {
            divisor: 3,
            min_days: 2,
            max_days: 15,
            scaling: Scaling::ComplexityAndSize,
        },
    },
    TaskTemplate {
        id: 21,
        name: "Plumbing Fixtures Installation",
        phase: Phase::FinalFinishing,
        responsible_party: "Plumbing Contractor",
        description: "Install sinks, toilets, faucets, and other plumbing fixtures",
        resources_needed: &["Fixtures", "Tools", "Labor Crew"],
        critical_path: false,
        predecessor_ids: &[20],
        duration: DurationRule::Rooms {
            divisor: 3,
            min_days: 1,
            max_days: 10,
            scaling: Scaling::SizeOnly,
        },
    },
    TaskTemplate {
        id: 22,
        name: "Electrical Fixtures Installation",
        phase: Phase::FinalFinishing,
        responsible_party: "Electrical Contractor",
        description: "Install light fixtures, outlets, switches, and electrical panels",
        resources_needed: &["Fixtures", "Tools", "Labor Crew"],
        critical_path: false,
        predecessor_ids: &[20],
        duration: DurationRule::Area(DurationFormula::linear(1000, false, 1)),
    },
    TaskTemplate {
        id: 23,
        name: "Appliance Installation",
        phase: Phase::FinalFinishing,
        responsible_party: "General Contractor",
        description: "Install kitchen and laundry appliances",
        resources_needed: &["Appliances", "Tools", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[21, 22],
        duration: DurationRule::Fixed(1),
    },
    TaskTemplate {
        id: 24,
        name: "Final Cleaning",
        phase: Phase::FinalFinishing,
        responsible_party: "Cleaning Crew",
        description: "Clean entire building interior and exterior",
        resources_needed: &["Cleaning Supplies", "Labor Crew"],
        critical_path: true,
        predecessor_ids: &[23],
        duration: DurationRule::Area(DurationFormula::linear(2000, false, 1)),
    },
    TaskTemplate {
        id: 25,
        name: "Final Inspection",
        phase: Phase::FinalFinishing,
        responsible_party: "Building Inspector",
        description: "Final inspection and certificate of occupancy",
        resources_needed: &["Inspector"],
        critical_path: true,
        predecessor_ids: &[24],
        duration: DurationRule::Fixed(1),
    },
];

/// The date-assignment walk: a sequential chain through site preparation,
/// foundation, and framing; curing abutting the pour; the rough-in fork and
/// join; the interior finishing chain; the fixture fork and join; and the
/// closing chain.
pub const BUILD_PLAN: [ScheduleStep; 21] = [
    ScheduleStep::Single(1),
    ScheduleStep::Single(2),
    ScheduleStep::Single(3),
    ScheduleStep::Single(4),
    ScheduleStep::Single(5),
    ScheduleStep::Abutting(6),
    ScheduleStep::Single(7),
    ScheduleStep::Single(8),
    ScheduleStep::Single(9),
    ScheduleStep::Single(10),
    ScheduleStep::Concurrent(&[11, 12, 13, 14]),
    ScheduleStep::Single(15),
    ScheduleStep::Single(16),
    ScheduleStep::Single(17),
    ScheduleStep::Single(18),
    ScheduleStep::Single(19),
    ScheduleStep::Single(20),
    ScheduleStep::Concurrent(&[21, 22]),
    ScheduleStep::Single(23),
    ScheduleStep::Single(24),
    ScheduleStep::Single(25),
];

pub fn template(id: i32) -> Option<&'static TaskTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}
