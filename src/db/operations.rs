//! Typed statement builders for the healthcare tables.
//!
//! Each entity gets insert/find/update/delete operations over its closed
//! column set; all values travel through diesel's parameter binding.
//! Identifiers live in the typed schema, so callers never pass table or
//! column names as strings.

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;

use crate::error::{PipelineError, Result};
use crate::models::{
    Doctor, DoctorChanges, EmergencyService, EmergencyServiceChanges, Hospital, HospitalChanges,
    NewDoctor, NewEmergencyService, NewHospital,
};

/// Insert a record and return its generated surrogate id.
///
/// Implementations classify unique/foreign-key violations into
/// [`PipelineError::Constraint`] so the load loop can recover per row.
pub trait InsertRecord {
    /// Target table, for logging and error context.
    const TABLE: &'static str;

    fn insert(&self, conn: &mut MysqlConnection) -> Result<i32>;
}

// ============================================================================
// Hospital operations
// ============================================================================

impl InsertRecord for NewHospital {
    const TABLE: &'static str = "hospitals";

    fn insert(&self, conn: &mut MysqlConnection) -> Result<i32> {
        use crate::schema::hospitals::dsl::*;

        diesel::insert_into(hospitals)
            .values(self)
            .execute(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))?;

        // Query back the auto-generated id on the same connection.
        hospitals
            .select(hospital_id)
            .order(hospital_id.desc())
            .first(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))
    }
}

pub fn find_hospital(conn: &mut MysqlConnection, id: i32) -> Result<Option<Hospital>> {
    use crate::schema::hospitals::dsl::*;

    hospitals
        .find(id)
        .select(Hospital::as_select())
        .first(conn)
        .optional()
        .map_err(Into::into)
}

pub fn hospitals_in_state(conn: &mut MysqlConnection, state_code: &str) -> Result<Vec<Hospital>> {
    use crate::schema::hospitals::dsl::*;

    hospitals
        .filter(state.eq(state_code))
        .order(hospital_name.asc())
        .select(Hospital::as_select())
        .load(conn)
        .map_err(Into::into)
}

pub fn update_hospital(
    conn: &mut MysqlConnection,
    id: i32,
    changes: &HospitalChanges,
) -> Result<usize> {
    use crate::schema::hospitals::dsl::*;

    diesel::update(hospitals.find(id))
        .set(changes)
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("hospitals", e))
}

pub fn delete_hospital(conn: &mut MysqlConnection, id: i32) -> Result<usize> {
    use crate::schema::hospitals::dsl::*;

    diesel::delete(hospitals.find(id))
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("hospitals", e))
}

// ============================================================================
// Doctor operations
// ============================================================================

impl InsertRecord for NewDoctor {
    const TABLE: &'static str = "doctors";

    fn insert(&self, conn: &mut MysqlConnection) -> Result<i32> {
        use crate::schema::doctors::dsl::*;

        diesel::insert_into(doctors)
            .values(self)
            .execute(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))?;

        doctors
            .select(doctor_id)
            .order(doctor_id.desc())
            .first(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))
    }
}

pub fn find_doctor(conn: &mut MysqlConnection, id: i32) -> Result<Option<Doctor>> {
    use crate::schema::doctors::dsl::*;

    doctors
        .find(id)
        .select(Doctor::as_select())
        .first(conn)
        .optional()
        .map_err(Into::into)
}

pub fn doctors_by_specialty(conn: &mut MysqlConnection, name: &str) -> Result<Vec<Doctor>> {
    use crate::schema::doctors::dsl::*;

    doctors
        .filter(specialty.eq(name))
        .order(doctor_name.asc())
        .select(Doctor::as_select())
        .load(conn)
        .map_err(Into::into)
}

pub fn update_doctor(conn: &mut MysqlConnection, id: i32, changes: &DoctorChanges) -> Result<usize> {
    use crate::schema::doctors::dsl::*;

    diesel::update(doctors.find(id))
        .set(changes)
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("doctors", e))
}

pub fn delete_doctor(conn: &mut MysqlConnection, id: i32) -> Result<usize> {
    use crate::schema::doctors::dsl::*;

    diesel::delete(doctors.find(id))
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("doctors", e))
}

// ============================================================================
// EmergencyService operations
// ============================================================================

impl InsertRecord for NewEmergencyService {
    const TABLE: &'static str = "emergency_services";

    fn insert(&self, conn: &mut MysqlConnection) -> Result<i32> {
        use crate::schema::emergency_services::dsl::*;

        diesel::insert_into(emergency_services)
            .values(self)
            .execute(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))?;

        emergency_services
            .select(emergency_id)
            .order(emergency_id.desc())
            .first(conn)
            .map_err(|e| PipelineError::from_query_error(Self::TABLE, e))
    }
}

pub fn find_emergency_service(
    conn: &mut MysqlConnection,
    id: i32,
) -> Result<Option<EmergencyService>> {
    use crate::schema::emergency_services::dsl::*;

    emergency_services
        .find(id)
        .select(EmergencyService::as_select())
        .first(conn)
        .optional()
        .map_err(Into::into)
}

pub fn emergency_services_in_state(
    conn: &mut MysqlConnection,
    state_code: &str,
) -> Result<Vec<EmergencyService>> {
    use crate::schema::emergency_services::dsl::*;

    emergency_services
        .filter(state.eq(state_code))
        .order(hospital_name.asc())
        .select(EmergencyService::as_select())
        .load(conn)
        .map_err(Into::into)
}

pub fn update_emergency_service(
    conn: &mut MysqlConnection,
    id: i32,
    changes: &EmergencyServiceChanges,
) -> Result<usize> {
    use crate::schema::emergency_services::dsl::*;

    diesel::update(emergency_services.find(id))
        .set(changes)
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("emergency_services", e))
}

pub fn delete_emergency_service(conn: &mut MysqlConnection, id: i32) -> Result<usize> {
    use crate::schema::emergency_services::dsl::*;

    diesel::delete(emergency_services.find(id))
        .execute(conn)
        .map_err(|e| PipelineError::from_query_error("emergency_services", e))
}
