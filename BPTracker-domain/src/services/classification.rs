use crate::entities::category::BloodPressureCategory;

/// Categorize blood pressure based on measurements.
///
/// Rules are checked in order and the first match wins. Stage 1 is an OR:
/// a reading only reaches Stage 2 when systolic >= 140 and diastolic >= 90.
pub fn categorize_blood_pressure(systolic: u16, diastolic: u16) -> BloodPressureCategory {
    if systolic < 120 && diastolic < 80 {
        BloodPressureCategory::Normal
    } else if systolic < 130 && diastolic < 80 {
        BloodPressureCategory::Elevated
    } else if systolic < 140 || diastolic < 90 {
        BloodPressureCategory::Stage1
    } else {
        BloodPressureCategory::Stage2
    }
}
