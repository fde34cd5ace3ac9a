// Data models for step-by-step emergency guides

use serde::{Deserialize, Serialize};

// ==============================================================================
// Emergency Types
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyType {
    Cpr,
    Choking,
    Bleeding,
    Burns,
}

impl EmergencyType {
    pub fn to_string(&self) -> &'static str {
        match self {
            EmergencyType::Cpr => "cpr",
            EmergencyType::Choking => "choking",
            EmergencyType::Bleeding => "bleeding",
            EmergencyType::Burns => "burns",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cpr" => Some(EmergencyType::Cpr),
            "choking" => Some(EmergencyType::Choking),
            "bleeding" => Some(EmergencyType::Bleeding),
            "burns" => Some(EmergencyType::Burns),
            _ => None,
        }
    }

    /// Whether this emergency has camera-overlay guidance (CPR only for now)
    pub fn supports_overlay(&self) -> bool {
        matches!(self, EmergencyType::Cpr)
    }
}

// ==============================================================================
// Guides
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideStep {
    pub instruction: String,
}

/// A full instruction sequence for one emergency type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guide {
    pub emergency_type: EmergencyType,
    pub title: String,
    pub steps: Vec<GuideStep>,
    /// Step index from which hand-placement feedback applies (CPR only)
    pub placement_feedback_from: Option<usize>,
    /// Step index from which compressions begin, enabling the metronome (CPR only)
    pub compressions_from: Option<usize>,
}

impl Guide {
    /// Built-in guide catalog
    pub fn for_emergency(emergency_type: EmergencyType) -> Self {
        match emergency_type {
            EmergencyType::Cpr => Self {
                emergency_type,
                title: "CPR".to_string(),
                steps: steps(&[
                    "Check responsiveness and call for help",
                    "Place the person on their back on a firm surface",
                    "Place the heel of your hand on the center of the chest",
                    "Push hard and fast, at least 2 inches deep",
                    "Continue compressions until help arrives",
                ]),
                placement_feedback_from: Some(2),
                compressions_from: Some(3),
            },
            EmergencyType::Choking => Self {
                emergency_type,
                title: "Choking".to_string(),
                steps: steps(&[
                    "Encourage the person to cough",
                    "Give 5 back blows between shoulder blades",
                    "Give 5 abdominal thrusts (Heimlich maneuver)",
                    "Alternate between back blows and thrusts",
                    "Call emergency services if obstruction persists",
                ]),
                placement_feedback_from: None,
                compressions_from: None,
            },
            EmergencyType::Bleeding => Self {
                emergency_type,
                title: "Bleeding".to_string(),
                steps: steps(&[
                    "Apply direct pressure to the wound",
                    "Elevate the injured area above heart level",
                    "Keep pressure for at least 10 minutes",
                    "Do not remove objects embedded in wound",
                    "Call emergency services for severe bleeding",
                ]),
                placement_feedback_from: None,
                compressions_from: None,
            },
            EmergencyType::Burns => Self {
                emergency_type,
                title: "Burns".to_string(),
                steps: steps(&[
                    "Remove person from heat source",
                    "Cool the burn with cool (not cold) running water",
                    "Remove tight clothing before swelling",
                    "Cover with clean, dry cloth",
                    "Call emergency services for severe burns",
                ]),
                placement_feedback_from: None,
                compressions_from: None,
            },
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

fn steps(instructions: &[&str]) -> Vec<GuideStep> {
    instructions
        .iter()
        .map(|s| GuideStep {
            instruction: s.to_string(),
        })
        .collect()
}
