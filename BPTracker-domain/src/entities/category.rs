use std::fmt;

use serde::{Deserialize, Serialize};

/// Blood pressure category, declared in ascending severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BloodPressureCategory {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic < 130 and diastolic < 80)
    Elevated,

    /// Stage 1 hypertension (systolic < 140 or diastolic < 90)
    Stage1,

    /// Stage 2 hypertension (everything else)
    Stage2,
}

impl BloodPressureCategory {
    /// All categories, mildest first
    pub const ALL: [BloodPressureCategory; 4] = [
        BloodPressureCategory::Normal,
        BloodPressureCategory::Elevated,
        BloodPressureCategory::Stage1,
        BloodPressureCategory::Stage2,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Stage1 => "High BP Stage 1",
            BloodPressureCategory::Stage2 => "High BP Stage 2",
        }
    }

    /// Colour tone the status is shown in
    pub fn color(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "green",
            BloodPressureCategory::Elevated => "yellow",
            BloodPressureCategory::Stage1 => "orange",
            BloodPressureCategory::Stage2 => "red",
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
