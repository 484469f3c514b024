//! Diesel models for the healthcare schema.
//!
//! Each table gets three views: a `Queryable` row as stored, a `New…`
//! insert record holding the closed set of loader-writable columns, and a
//! `…Changes` changeset for the update utilities where `None` leaves a
//! column untouched.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{doctors, emergency_services, hospitals};

// ============================================================================
// Hospital
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = hospitals)]
pub struct Hospital {
    pub hospital_id: i32,
    pub hospital_name: String,
    pub state: Option<String>,
    pub hospital_type: Option<String>,
    pub beds: Option<i32>,
    pub trauma_center: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Loader-facing hospital record; `(hospital_name, state)` must be unique in
/// the store.
#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = hospitals)]
pub struct NewHospital {
    pub hospital_name: String,
    pub state: String,
    pub hospital_type: String,
    pub beds: i32,
    pub trauma_center: String,
}

#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = hospitals)]
pub struct HospitalChanges {
    pub hospital_name: Option<String>,
    pub state: Option<String>,
    pub hospital_type: Option<String>,
    pub beds: Option<i32>,
    pub trauma_center: Option<String>,
}

// ============================================================================
// Doctor
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = doctors)]
pub struct Doctor {
    pub doctor_id: i32,
    pub doctor_name: String,
    pub hospital_id: Option<i32>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Loader-facing doctor record. The loader does not resolve hospital names
/// to ids, so `hospital_id` stays `None` on insert.
#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = doctors)]
pub struct NewDoctor {
    pub doctor_name: String,
    pub hospital_id: Option<i32>,
    pub specialty: String,
    pub phone: String,
    pub email: String,
    pub experience_years: i32,
}

#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = doctors)]
pub struct DoctorChanges {
    pub doctor_name: Option<String>,
    pub hospital_id: Option<i32>,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<i32>,
}

// ============================================================================
// EmergencyService
// ============================================================================

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = emergency_services)]
pub struct EmergencyService {
    pub emergency_id: i32,
    pub hospital_id: Option<i32>,
    pub hospital_name: Option<String>,
    pub state: Option<String>,
    pub emergency_type: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Loader-facing emergency-service record; `hospital_id` is left unresolved
/// like [`NewDoctor`].
#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = emergency_services)]
pub struct NewEmergencyService {
    pub hospital_id: Option<i32>,
    pub hospital_name: String,
    pub state: String,
    pub emergency_type: String,
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = emergency_services)]
pub struct EmergencyServiceChanges {
    pub hospital_id: Option<i32>,
    pub hospital_name: Option<String>,
    pub state: Option<String>,
    pub emergency_type: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
