//! Integration tests for the dataset loader, transforms, and load loop.

use std::io::Write;

use medfeed::pipeline::{self, load_rows};
use medfeed::{transform, FieldValue, NewHospital, PipelineError};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// In-memory stand-in for the hospitals table: enforces the
/// (hospital_name, state) uniqueness the store declares.
struct FakeHospitalsTable {
    rows: Vec<NewHospital>,
}

impl FakeHospitalsTable {
    fn new() -> Self {
        FakeHospitalsTable { rows: Vec::new() }
    }

    fn insert(&mut self, record: NewHospital) -> medfeed::Result<i32> {
        let duplicate = self
            .rows
            .iter()
            .any(|r| r.hospital_name == record.hospital_name && r.state == record.state);
        if duplicate {
            return Err(PipelineError::Constraint {
                table: "hospitals".to_string(),
                message: format!(
                    "Duplicate entry '{}-{}' for key 'unique_hospital'",
                    record.hospital_name, record.state
                ),
            });
        }
        self.rows.push(record);
        Ok(self.rows.len() as i32)
    }
}

#[test]
fn test_csv_to_records_end_to_end() {
    let file = write_csv(
        "Hospital Name,State,Hospital Type,Number of Beds,Trauma Center\n\
         Mercy General,CA,Acute Care,200,Yes\n\
         St. Jude,TN,Children,80,No\n",
    );

    let dataset = medfeed::load_csv(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);

    let records: Vec<NewHospital> = dataset
        .rows()
        .iter()
        .map(|row| transform::hospital_record(row).unwrap())
        .collect();

    assert_eq!(records[0].hospital_name, "Mercy General");
    assert_eq!(records[0].beds, 200);
    assert_eq!(records[1].trauma_center, "No");
}

#[test]
fn test_duplicate_hospital_persists_once_and_logs_one_failure() {
    let file = write_csv(
        "Hospital Name,State,Hospital Type,Number of Beds,Trauma Center\n\
         Mercy General,CA,Acute Care,200,Yes\n\
         Mercy General,CA,Acute Care,200,Yes\n",
    );

    let dataset = medfeed::load_csv(file.path()).unwrap();
    let mut table = FakeHospitalsTable::new();

    let outcome = load_rows(
        "hospitals",
        &dataset,
        transform::hospital_record,
        |record| table.insert(record),
    );

    assert_eq!(outcome.inserted, 1);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].row, 2);
    assert!(outcome.failures[0].reason.contains("Duplicate entry"));
}

#[test]
fn test_clean_dataset_inserts_every_row() {
    let file = write_csv(
        "Hospital Name,State,Hospital Type,Number of Beds,Trauma Center\n\
         Mercy General,CA,Acute Care,200,Yes\n\
         St. Jude,TN,Children,80,No\n\
         Rural Clinic,MT,Critical Access,12,No\n\
         Bay Medical,FL,Acute Care,340,Yes\n",
    );

    let dataset = medfeed::load_csv(file.path()).unwrap();
    let mut table = FakeHospitalsTable::new();

    let outcome = load_rows(
        "hospitals",
        &dataset,
        transform::hospital_record,
        |record| table.insert(record),
    );

    assert_eq!(outcome.inserted, 4);
    assert!(outcome.failures.is_empty());
}

#[test]
fn test_missing_file_is_not_found() {
    let result = medfeed::load_csv("data/does_not_exist.csv");

    assert!(matches!(result, Err(PipelineError::NotFound(_))));
}

#[test]
fn test_header_only_file_is_empty_data() {
    let file = write_csv("Doctor Name,Specialty,Phone,Email,Experience Years\n");

    let result = medfeed::load_csv(file.path());

    assert!(matches!(result, Err(PipelineError::EmptyData(_))));
}

#[test]
fn test_doctor_dataset_with_missing_columns_uses_defaults() {
    let file = write_csv(
        "Doctor Name,Specialty\n\
         Dr. Patel,Cardiology\n\
         Dr. Kim,\n",
    );

    let dataset = medfeed::load_csv(file.path()).unwrap();
    let records: Vec<_> = dataset
        .rows()
        .iter()
        .map(|row| transform::doctor_record(row).unwrap())
        .collect();

    assert_eq!(records[0].doctor_name, "Dr. Patel");
    assert_eq!(records[0].phone, "");
    assert_eq!(records[0].experience_years, 0);
    assert_eq!(records[0].hospital_id, None);
    // Empty cell degrades to the default, same as a missing column.
    assert_eq!(records[1].specialty, "");
}

#[test]
fn test_cell_type_inference_survives_round_trip() {
    let file = write_csv(
        "Hospital Name,State,Phone Number,Emergency Type,Address\n\
         Mercy General,CA,5550100,Trauma,1 Main St\n",
    );

    let dataset = medfeed::load_csv(file.path()).unwrap();
    let row = &dataset.rows()[0];

    // The source parser reads the phone column as numeric.
    assert_eq!(row.get("Phone Number"), Some(&FieldValue::Int(5550100)));

    let record = transform::emergency_record(row).unwrap();
    assert_eq!(record.phone_number, "5550100");
    assert_eq!(record.emergency_type, "Trauma");
}

#[test]
fn test_default_dataset_file_names() {
    assert_eq!(pipeline::HOSPITAL_FILE, "Hospital_General_Information.csv");
    assert_eq!(pipeline::DOCTOR_FILE, "doctors_info_data.csv");
    assert_eq!(pipeline::EMERGENCY_FILE, "hospitals_emergency_data.csv");
}
