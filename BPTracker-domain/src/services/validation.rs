use chrono::NaiveDate;
use validator::Validate;

use crate::entities::reading::{
    parse_reading_date, FieldErrors, ReadingCandidate, ReadingField, ReadingForm, ValidReading,
};

pub const DIASTOLIC_NOT_BELOW_SYSTOLIC: &str = "Diastolic must be less than systolic";
pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_INVALID: &str = "Date must be a valid date";
pub const DATE_IN_FUTURE: &str = "Date cannot be in the future";

/// Validate a candidate reading against `today`, the caller's local date.
///
/// Every violated rule is reported, keyed by field.
pub fn validate_reading(
    candidate: &ReadingCandidate,
    today: NaiveDate,
) -> Result<ValidReading, FieldErrors> {
    let mut errors = FieldErrors::new();

    // Required and range rules come from the validator derive
    if let Err(validation_errors) = candidate.validate() {
        for (field, field_errors) in validation_errors.field_errors() {
            let Some(field) = ReadingField::from_name(field) else {
                continue;
            };
            let message = field_errors
                .iter()
                .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid {}", field));
            errors.insert(field, message);
        }
    }

    if let (Some(systolic), Some(diastolic)) = (candidate.systolic, candidate.diastolic) {
        if diastolic >= systolic {
            errors.insert(ReadingField::Diastolic, DIASTOLIC_NOT_BELOW_SYSTOLIC);
        }
    }

    let date = candidate.date.as_deref().map(str::trim);
    match date {
        Some("") => errors.insert(ReadingField::Date, DATE_REQUIRED),
        Some(raw) => match parse_reading_date(raw) {
            None => errors.insert(ReadingField::Date, DATE_INVALID),
            Some(taken) if taken.date() > today => errors.insert(ReadingField::Date, DATE_IN_FUTURE),
            Some(_) => {}
        },
        None => {}
    }

    match (candidate.systolic, candidate.diastolic, date) {
        (Some(systolic), Some(diastolic), Some(date)) if errors.is_empty() => {
            // Bounds were checked above, so the casts cannot truncate
            Ok(ValidReading::new(
                systolic as u16,
                diastolic as u16,
                candidate.pulse.map(|p| p as u16),
                date.to_string(),
            ))
        }
        _ => Err(errors),
    }
}

/// Validate raw form text. Text that is not a whole number is reported in
/// place of any other message for that field.
pub fn validate_form(form: &ReadingForm, today: NaiveDate) -> Result<ValidReading, FieldErrors> {
    let (candidate, parse_errors) = form.to_candidate();

    match validate_reading(&candidate, today) {
        Ok(valid) if parse_errors.is_empty() => Ok(valid),
        Ok(_) => Err(parse_errors),
        Err(mut errors) => {
            errors.extend(parse_errors);
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn candidate(systolic: Option<i32>, diastolic: Option<i32>, pulse: Option<i32>, date: &str) -> ReadingCandidate {
        ReadingCandidate {
            systolic,
            diastolic,
            pulse,
            date: Some(date.to_string()),
        }
    }

    #[test]
    fn test_valid_reading() {
        let valid = validate_reading(&candidate(Some(120), Some(80), Some(72), "2024-05-20"), today()).unwrap();
        assert_eq!(valid.systolic(), 120);
        assert_eq!(valid.diastolic(), 80);
        assert_eq!(valid.pulse(), Some(72));
        assert_eq!(valid.date(), "2024-05-20");
    }

    #[test]
    fn test_systolic_bounds_are_inclusive() {
        let errors = validate_reading(&candidate(Some(59), Some(45), None, "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Systolic), Some("Systolic must be between 60-250"));

        assert!(validate_reading(&candidate(Some(60), Some(45), None, "2024-05-01"), today()).is_ok());
        assert!(validate_reading(&candidate(Some(250), Some(150), None, "2024-05-01"), today()).is_ok());

        let errors = validate_reading(&candidate(Some(251), Some(90), None, "2024-05-01"), today()).unwrap_err();
        assert!(errors.contains(ReadingField::Systolic));
    }

    #[test]
    fn test_diastolic_bounds() {
        let errors = validate_reading(&candidate(Some(120), Some(39), None, "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Diastolic), Some("Diastolic must be between 40-150"));
        assert!(!errors.contains(ReadingField::Systolic));

        assert!(validate_reading(&candidate(Some(120), Some(40), None, "2024-05-01"), today()).is_ok());
        assert!(validate_reading(&candidate(Some(200), Some(150), None, "2024-05-01"), today()).is_ok());

        let errors = validate_reading(&candidate(Some(200), Some(151), None, "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Diastolic), Some("Diastolic must be between 40-150"));
    }

    #[test]
    fn test_diastolic_equal_to_systolic_is_rejected() {
        let errors = validate_reading(&candidate(Some(100), Some(100), None, "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Diastolic), Some(DIASTOLIC_NOT_BELOW_SYSTOLIC));
        assert!(!errors.contains(ReadingField::Systolic));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_pulse_is_optional_but_bounded() {
        assert!(validate_reading(&candidate(Some(120), Some(80), None, "2024-05-01"), today()).is_ok());

        let errors = validate_reading(&candidate(Some(120), Some(80), Some(29), "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Pulse), Some("Pulse must be between 30-200 bpm"));

        assert!(validate_reading(&candidate(Some(120), Some(80), Some(30), "2024-05-01"), today()).is_ok());
        assert!(validate_reading(&candidate(Some(120), Some(80), Some(200), "2024-05-01"), today()).is_ok());

        let errors = validate_reading(&candidate(Some(120), Some(80), Some(201), "2024-05-01"), today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Pulse), Some("Pulse must be between 30-200 bpm"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let empty = ReadingCandidate {
            pulse: Some(500),
            ..ReadingCandidate::default()
        };

        let errors = validate_reading(&empty, today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Systolic), Some("Systolic is required"));
        assert_eq!(errors.get(ReadingField::Diastolic), Some("Diastolic is required"));
        assert!(errors.contains(ReadingField::Pulse));
        assert_eq!(errors.get(ReadingField::Date), Some(DATE_REQUIRED));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_date_rules() {
        let future = validate_reading(&candidate(Some(120), Some(80), None, "2024-05-21"), today()).unwrap_err();
        assert_eq!(future.get(ReadingField::Date), Some(DATE_IN_FUTURE));

        let later_today = candidate(Some(120), Some(80), None, "2024-05-20T23:59:00");
        assert!(validate_reading(&later_today, today()).is_ok());

        let invalid = validate_reading(&candidate(Some(120), Some(80), None, "20/05/2024"), today()).unwrap_err();
        assert_eq!(invalid.get(ReadingField::Date), Some(DATE_INVALID));

        let blank = validate_reading(&candidate(Some(120), Some(80), None, "  "), today()).unwrap_err();
        assert_eq!(blank.get(ReadingField::Date), Some(DATE_REQUIRED));

        // No lower bound
        assert!(validate_reading(&candidate(Some(120), Some(80), None, "1970-01-01"), today()).is_ok());
    }

    #[test]
    fn test_revalidating_is_idempotent() {
        let valid = validate_reading(&candidate(Some(142), Some(91), Some(77), "2024-05-19"), today()).unwrap();
        let reading = crate::entities::reading::Reading {
            id: "x".to_string(),
            systolic: valid.systolic(),
            diastolic: valid.diastolic(),
            pulse: valid.pulse(),
            date: valid.date().to_string(),
        };

        let again = validate_reading(&ReadingCandidate::from(&reading), today()).unwrap();
        assert_eq!(again, valid);
    }

    #[test]
    fn test_form_validation() {
        let form = ReadingForm {
            systolic: "12O".to_string(),
            diastolic: "80".to_string(),
            pulse: "seventy".to_string(),
            date: "2024-05-01".to_string(),
        };

        let errors = validate_form(&form, today()).unwrap_err();
        assert_eq!(errors.get(ReadingField::Systolic), Some("Systolic must be a whole number"));
        assert_eq!(errors.get(ReadingField::Pulse), Some("Pulse must be a whole number"));
        assert!(!errors.contains(ReadingField::Diastolic));

        let blank = validate_form(&ReadingForm::blank(today()), today()).unwrap_err();
        assert_eq!(blank.len(), 2);
        assert!(!blank.contains(ReadingField::Date));

        let ok = ReadingForm {
            systolic: "118".to_string(),
            diastolic: "76".to_string(),
            pulse: String::new(),
            date: "2024-05-20".to_string(),
        };
        assert!(validate_form(&ok, today()).is_ok());
    }
}
