//! Diesel table definitions for the healthcare schema.
//!
//! Mirrors the DDL in [`crate::db::setup`]; `created_at` columns are filled
//! by the store (`DEFAULT CURRENT_TIMESTAMP`) and never written by the
//! loader.

diesel::table! {
    hospitals (hospital_id) {
        hospital_id -> Integer,
        hospital_name -> Varchar,
        state -> Nullable<Varchar>,
        hospital_type -> Nullable<Varchar>,
        beds -> Nullable<Integer>,
        trauma_center -> Nullable<Varchar>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    doctors (doctor_id) {
        doctor_id -> Integer,
        doctor_name -> Varchar,
        hospital_id -> Nullable<Integer>,
        specialty -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        experience_years -> Nullable<Integer>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    emergency_services (emergency_id) {
        emergency_id -> Integer,
        hospital_id -> Nullable<Integer>,
        hospital_name -> Nullable<Varchar>,
        state -> Nullable<Varchar>,
        emergency_type -> Nullable<Varchar>,
        phone_number -> Nullable<Varchar>,
        address -> Nullable<Varchar>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(doctors -> hospitals (hospital_id));
diesel::joinable!(emergency_services -> hospitals (hospital_id));

diesel::allow_tables_to_appear_in_same_query!(hospitals, doctors, emergency_services);
