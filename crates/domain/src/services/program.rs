//! The fixed 4-week strength and conditioning program.
//!
//! Logging forms are bound to this program: a resistance set can only be
//! logged for an exercise that appears on the chosen training day, and the
//! set's `target` is taken from here rather than from the client.

use serde::Serialize;

use crate::models::CardioType;

/// Number of weeks in one program block.
pub const PROGRAM_WEEKS: i32 = 4;

/// Limits applied to the logging forms.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLimits {
    pub min_week: i32,
    pub max_week: i32,
    pub max_sets: usize,
    pub max_weight_kg: f64,
    pub weight_step_kg: f64,
    pub min_reps: i32,
    pub max_reps: i32,
    pub default_reps: i32,
    pub max_rir: i32,
    pub default_rir: i32,
    pub min_duration_min: i32,
    pub max_duration_min: i32,
    pub default_duration_min: i32,
    pub min_avg_hr: i32,
    pub max_avg_hr: i32,
    pub default_avg_hr: i32,
}

pub const FORM_LIMITS: FormLimits = FormLimits {
    min_week: 1,
    max_week: PROGRAM_WEEKS,
    max_sets: 10,
    max_weight_kg: 150.0,
    weight_step_kg: shared::validation::WEIGHT_INCREMENT_KG,
    min_reps: 1,
    max_reps: 20,
    default_reps: 6,
    max_rir: 5,
    default_rir: 3,
    min_duration_min: 1,
    max_duration_min: 180,
    default_duration_min: 30,
    min_avg_hr: 30,
    max_avg_hr: 220,
    default_avg_hr: 120,
};

/// An exercise prescribed on a training day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramExercise {
    pub exercise: &'static str,
    pub target: &'static str,
}

/// A resistance training day.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDay {
    pub day: &'static str,
    pub exercises: &'static [ProgramExercise],
}

pub const WEEKLY_RESISTANCE: &[TrainingDay] = &[
    TrainingDay {
        day: "Monday",
        exercises: &[
            ProgramExercise {
                exercise: "Back-squat",
                target: "1×4 @88% + 3×6 @78%",
            },
            ProgramExercise {
                exercise: "Hip-thrust",
                target: "4×8",
            },
        ],
    },
    TrainingDay {
        day: "Tuesday",
        exercises: &[
            ProgramExercise {
                exercise: "Bench Press",
                target: "1×4 @88% + 3×6 @78%",
            },
            ProgramExercise {
                exercise: "Overhead Press",
                target: "3×6",
            },
            ProgramExercise {
                exercise: "Dips",
                target: "3×10",
            },
        ],
    },
    TrainingDay {
        day: "Thursday AM",
        exercises: &[
            ProgramExercise {
                exercise: "Deadlift",
                target: "1×3 @90% + 3×6 @80%",
            },
            ProgramExercise {
                exercise: "Romanian Deadlift",
                target: "3×8",
            },
        ],
    },
    TrainingDay {
        day: "Friday",
        exercises: &[
            ProgramExercise {
                exercise: "Weighted Pull-up",
                target: "3×6–8",
            },
            ProgramExercise {
                exercise: "Chest-supported Row",
                target: "3×10",
            },
        ],
    },
];

/// Looks up an exercise on a training day.
pub fn find_exercise(day: &str, exercise: &str) -> Option<&'static ProgramExercise> {
    WEEKLY_RESISTANCE
        .iter()
        .find(|d| d.day == day)?
        .exercises
        .iter()
        .find(|e| e.exercise == exercise)
}

/// The four mobility circuits, in the order they are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MobilityCircuit {
    Prep,
    JointFlow,
    AnimalCircuit,
    CuffFinisher,
}

impl MobilityCircuit {
    pub const ALL: [MobilityCircuit; 4] = [
        MobilityCircuit::Prep,
        MobilityCircuit::JointFlow,
        MobilityCircuit::AnimalCircuit,
        MobilityCircuit::CuffFinisher,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MobilityCircuit::Prep => "Prep (Box breathing, Cat/Cow, CARs)",
            MobilityCircuit::JointFlow => "Joint Flow (WGS, Down-Dog↔Cobra, Lizard, Pigeon)",
            MobilityCircuit::AnimalCircuit => {
                "Animal Circuit (Beast, Ape, Scorpion, Crab, Side Kick)"
            }
            MobilityCircuit::CuffFinisher => "Cuff Finisher (Band ER, Prone Y)",
        }
    }

    /// Name of the completion flag in mobility requests.
    pub fn field(&self) -> &'static str {
        match self {
            MobilityCircuit::Prep => "prepDone",
            MobilityCircuit::JointFlow => "jointFlowDone",
            MobilityCircuit::AnimalCircuit => "animalCircuitDone",
            MobilityCircuit::CuffFinisher => "cuffFinisherDone",
        }
    }
}

/// One row of the weekly schedule table.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub day: &'static str,
    pub main_work: &'static str,
    pub notes: &'static str,
}

pub const WEEKLY_SCHEDULE: &[ScheduleRow] = &[
    ScheduleRow { day: "Mon", main_work: "Back-squat; Hip-thrust", notes: "Mini-band" },
    ScheduleRow { day: "Tue", main_work: "Bench; OHP; Dips", notes: "Shoulder ER" },
    ScheduleRow { day: "Wed", main_work: "Mobility Flow", notes: "Dynamic only" },
    ScheduleRow { day: "Thu AM", main_work: "Deadlift; RDL", notes: "" },
    ScheduleRow { day: "Thu PM", main_work: "HIIT 4×4", notes: "VO₂-max" },
    ScheduleRow { day: "Fri", main_work: "Pull-up; Row", notes: "Cuff" },
    ScheduleRow { day: "Sat", main_work: "Zone-2 Run", notes: "" },
    ScheduleRow { day: "Sun", main_work: "Rest + Mobility", notes: "" },
];

/// A section of the program guide. `body` is Markdown.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSection {
    pub title: &'static str,
    pub body: &'static str,
}

pub const GUIDE: &[GuideSection] = &[
    GuideSection {
        title: "Resistance Framework",
        body: "**Max-strength:** ≥85% 1RM · 1–5 reps · 5–10 sets/ex · 2–5 min rest\n\n\
               **Hypertrophy:** 60–80% 1RM · 6–12 reps · 10–20 sets/muscle · 1–2 min rest\n\n\
               _Tweaks:_ add 87–90% top set + increase accessory volume to 12–16 weekly sets.",
    },
    GuideSection {
        title: "Weekly Template",
        body: "See `schedule` for the day-by-day template.",
    },
    GuideSection {
        title: "Warm-up & Failure Rules",
        body: "- Dynamic only; 1–2 ramp sets.\n\
               - Skip static pre-lift.\n\
               - Stop 3–4 reps shy on compounds.",
    },
    GuideSection {
        title: "Cardio Tweaks",
        body: "- **HIIT:** 4×4 or 10-min @90% HRₘₐₓ\n\
               - **Endurance:** ≥60min Z2",
    },
    GuideSection {
        title: "Mobility Flow",
        body: "Prep, Joint, Animal, Cuff circuits as outlined.",
    },
    GuideSection {
        title: "Nutrition & Rationale",
        body: "**Protein:** 1.6–2.2 g/kg/day\n\
               **Creatine:** 3–5 g/day\n\
               **Omega-3:** load 3 g EPA+2 g DHA → 2 g/day\n\n\
               **Energy:** 10–15% deficit\n\
               **Sleep:** 7–9 h/night\n\
               **Why:** top sets + volume hit strength & hypertrophy",
    },
];

/// A mobility circuit as presented to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitInfo {
    pub circuit: MobilityCircuit,
    pub label: &'static str,
    pub field: &'static str,
}

/// A cardio type as presented to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioTypeInfo {
    pub code: CardioType,
    pub label: &'static str,
}

/// Everything a client needs to render the logging forms and the guide.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub weeks: i32,
    pub resistance: &'static [TrainingDay],
    pub schedule: &'static [ScheduleRow],
    pub mobility_circuits: Vec<CircuitInfo>,
    pub cardio_types: Vec<CardioTypeInfo>,
    pub limits: FormLimits,
    pub guide: &'static [GuideSection],
}

/// Builds the program description served to clients.
pub fn program_overview() -> ProgramResponse {
    ProgramResponse {
        weeks: PROGRAM_WEEKS,
        resistance: WEEKLY_RESISTANCE,
        schedule: WEEKLY_SCHEDULE,
        mobility_circuits: MobilityCircuit::ALL
            .into_iter()
            .map(|circuit| CircuitInfo {
                circuit,
                label: circuit.label(),
                field: circuit.field(),
            })
            .collect(),
        cardio_types: CardioType::ALL
            .into_iter()
            .map(|code| CardioTypeInfo {
                code,
                label: code.as_str(),
            })
            .collect(),
        limits: FORM_LIMITS,
        guide: GUIDE,
    }
}
