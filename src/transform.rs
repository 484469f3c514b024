//! Row-to-record mapping for each entity type.
//!
//! Source files name their columns in human-readable form ("Hospital Name");
//! exports from other systems use the snake_case target column instead
//! ("hospital_name"). Every field lookup tries the primary header, then the
//! target column name, then degrades to a literal default; a missing or
//! empty cell is never an error. A present but non-numeric cell in a count
//! column is the one failure mode; it surfaces as a row-level
//! [`PipelineError::MalformedValue`] and is handled like any other skipped
//! row.

use crate::dataset::{FieldValue, Row};
use crate::error::{PipelineError, Result};
use crate::models::{NewDoctor, NewEmergencyService, NewHospital};

/// Map a source row to a hospital record.
pub fn hospital_record(row: &Row) -> Result<NewHospital> {
    Ok(NewHospital {
        hospital_name: text_field(row, "Hospital Name", "hospital_name", ""),
        state: text_field(row, "State", "state", ""),
        hospital_type: text_field(row, "Hospital Type", "hospital_type", ""),
        beds: count_field(row, "Number of Beds", "beds", 0)?,
        trauma_center: text_field(row, "Trauma Center", "trauma_center", "No"),
    })
}

/// Map a source row to a doctor record. The hospital foreign key is left
/// unresolved.
pub fn doctor_record(row: &Row) -> Result<NewDoctor> {
    Ok(NewDoctor {
        doctor_name: text_field(row, "Doctor Name", "doctor_name", ""),
        hospital_id: None,
        specialty: text_field(row, "Specialty", "specialty", ""),
        phone: text_field(row, "Phone", "phone", ""),
        email: text_field(row, "Email", "email", ""),
        experience_years: count_field(row, "Experience Years", "experience_years", 0)?,
    })
}

/// Map a source row to an emergency-service record. The hospital foreign key
/// is left unresolved.
pub fn emergency_record(row: &Row) -> Result<NewEmergencyService> {
    Ok(NewEmergencyService {
        hospital_id: None,
        hospital_name: text_field(row, "Hospital Name", "hospital_name", ""),
        state: text_field(row, "State", "state", ""),
        emergency_type: text_field(row, "Emergency Type", "emergency_type", ""),
        phone_number: text_field(row, "Phone Number", "phone_number", ""),
        address: text_field(row, "Address", "address", ""),
    })
}

fn present(value: Option<&FieldValue>) -> Option<&FieldValue> {
    value.filter(|v| !v.is_null())
}

/// First non-null cell under the primary header or its snake_case alternate.
fn lookup<'a>(row: &'a Row, primary: &str, alternate: &str) -> Option<&'a FieldValue> {
    present(row.get(primary)).or_else(|| present(row.get(alternate)))
}

/// Text field with display conversion, so a phone column the source parser
/// read as numeric still round-trips as digits.
fn text_field(row: &Row, primary: &str, alternate: &str, default: &str) -> String {
    match lookup(row, primary, alternate) {
        Some(value) => value.to_string(),
        None => default.to_string(),
    }
}

/// Count field. Integer and float cells are accepted (floats truncate, as
/// the store would); any other present value is malformed.
fn count_field(row: &Row, primary: &str, alternate: &str, default: i32) -> Result<i32> {
    match lookup(row, primary, alternate) {
        None => Ok(default),
        Some(FieldValue::Int(i)) => i32::try_from(*i).map_err(|_| PipelineError::MalformedValue {
            column: primary.to_string(),
            value: i.to_string(),
        }),
        Some(FieldValue::Float(f)) => Ok(*f as i32),
        Some(other) => Err(PipelineError::MalformedValue {
            column: primary.to_string(),
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, FieldValue)]) -> Row {
        let mut row = Row::new();
        for (column, value) in cells {
            row.insert(*column, value.clone());
        }
        row
    }

    #[test]
    fn test_hospital_record_from_primary_headers() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("Mercy General".into())),
            ("State", FieldValue::String("CA".into())),
            ("Hospital Type", FieldValue::String("Acute Care".into())),
            ("Number of Beds", FieldValue::Int(200)),
            ("Trauma Center", FieldValue::String("Yes".into())),
        ]);

        let record = hospital_record(&row).unwrap();

        assert_eq!(record.hospital_name, "Mercy General");
        assert_eq!(record.state, "CA");
        assert_eq!(record.beds, 200);
        assert_eq!(record.trauma_center, "Yes");
    }

    #[test]
    fn test_hospital_record_from_snake_case_headers() {
        let row = row(&[
            ("hospital_name", FieldValue::String("St. Jude".into())),
            ("state", FieldValue::String("TN".into())),
            ("beds", FieldValue::Int(80)),
        ]);

        let record = hospital_record(&row).unwrap();

        assert_eq!(record.hospital_name, "St. Jude");
        assert_eq!(record.state, "TN");
        assert_eq!(record.beds, 80);
    }

    #[test]
    fn test_missing_beds_defaults_to_zero() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("Rural Clinic".into())),
            ("State", FieldValue::String("MT".into())),
        ]);

        let record = hospital_record(&row).unwrap();

        assert_eq!(record.beds, 0);
        assert_eq!(record.hospital_type, "");
        assert_eq!(record.trauma_center, "No");
    }

    #[test]
    fn test_null_cell_degrades_to_default() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("Rural Clinic".into())),
            ("Number of Beds", FieldValue::Null),
            ("Trauma Center", FieldValue::Null),
        ]);

        let record = hospital_record(&row).unwrap();

        assert_eq!(record.beds, 0);
        assert_eq!(record.trauma_center, "No");
    }

    #[test]
    fn test_float_beds_truncate() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("General".into())),
            ("Number of Beds", FieldValue::Float(120.0)),
        ]);

        assert_eq!(hospital_record(&row).unwrap().beds, 120);
    }

    #[test]
    fn test_non_numeric_beds_is_malformed() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("General".into())),
            ("Number of Beds", FieldValue::String("plenty".into())),
        ]);

        let err = hospital_record(&row).unwrap_err();

        assert!(matches!(err, PipelineError::MalformedValue { .. }));
        assert!(err.is_row_level());
    }

    #[test]
    fn test_numeric_phone_round_trips_as_text() {
        let row = row(&[
            ("Doctor Name", FieldValue::String("Dr. Patel".into())),
            ("Phone", FieldValue::Int(5551234)),
        ]);

        let record = doctor_record(&row).unwrap();

        assert_eq!(record.phone, "5551234");
        assert_eq!(record.hospital_id, None);
    }

    #[test]
    fn test_emergency_record_leaves_fk_unresolved() {
        let row = row(&[
            ("Hospital Name", FieldValue::String("Mercy General".into())),
            ("Emergency Type", FieldValue::String("Trauma".into())),
            ("Phone Number", FieldValue::String("555-0100".into())),
        ]);

        let record = emergency_record(&row).unwrap();

        assert_eq!(record.hospital_id, None);
        assert_eq!(record.hospital_name, "Mercy General");
        assert_eq!(record.address, "");
    }
}
