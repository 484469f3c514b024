//! Idempotent schema creation.
//!
//! Each `ensure_*` function issues a `CREATE TABLE IF NOT EXISTS` statement,
//! so calling them on every process start is safe against a pre-existing
//! matching schema. Failures are logged with driver detail and reported as
//! `false`; the caller decides whether to continue.

use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use diesel::sql_query;
use tracing::{error, info};

use crate::db::Database;
use crate::error::Result;

pub const CREATE_HOSPITALS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS hospitals (
    hospital_id INT AUTO_INCREMENT PRIMARY KEY,
    hospital_name VARCHAR(255) NOT NULL,
    state VARCHAR(100),
    hospital_type VARCHAR(100),
    beds INT,
    trauma_center VARCHAR(10),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE KEY unique_hospital (hospital_name, state)
)";

pub const CREATE_DOCTORS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS doctors (
    doctor_id INT AUTO_INCREMENT PRIMARY KEY,
    doctor_name VARCHAR(255) NOT NULL,
    hospital_id INT,
    specialty VARCHAR(100),
    phone VARCHAR(20),
    email VARCHAR(100),
    experience_years INT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (hospital_id) REFERENCES hospitals(hospital_id)
)";

pub const CREATE_EMERGENCY_SERVICES_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS emergency_services (
    emergency_id INT AUTO_INCREMENT PRIMARY KEY,
    hospital_id INT,
    hospital_name VARCHAR(255),
    state VARCHAR(100),
    emergency_type VARCHAR(100),
    phone_number VARCHAR(20),
    address VARCHAR(255),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (hospital_id) REFERENCES hospitals(hospital_id)
)";

fn run_ddl(conn: &mut MysqlConnection, table: &str, ddl: &str) -> bool {
    match sql_query(ddl).execute(conn) {
        Ok(_) => {
            info!(table, "table ready");
            true
        }
        Err(e) => {
            error!(table, error = %e, "failed to create table");
            false
        }
    }
}

pub fn ensure_hospitals_table(conn: &mut MysqlConnection) -> bool {
    run_ddl(conn, "hospitals", CREATE_HOSPITALS_TABLE)
}

pub fn ensure_doctors_table(conn: &mut MysqlConnection) -> bool {
    run_ddl(conn, "doctors", CREATE_DOCTORS_TABLE)
}

pub fn ensure_emergency_table(conn: &mut MysqlConnection) -> bool {
    run_ddl(conn, "emergency_services", CREATE_EMERGENCY_SERVICES_TABLE)
}

/// Ensure all three tables exist, in dependency order.
///
/// Every table is attempted regardless of earlier failures. The only `Err`
/// is a connection-level failure; table-creation failures come back as
/// `Ok(false)` with the detail already logged.
pub fn ensure_all_tables(db: &Database) -> Result<bool> {
    db.with_connection(|conn| {
        let hospitals_ok = ensure_hospitals_table(conn);
        let doctors_ok = ensure_doctors_table(conn);
        let emergency_ok = ensure_emergency_table(conn);
        Ok(hospitals_ok && doctors_ok && emergency_ok)
    })
}
