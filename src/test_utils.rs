use chrono::NaiveDateTime;
use diesel::{Connection, SqliteConnection};

use crate::{
    database::run_migrations,
    models::{
        appointments::Appointment,
        doctors::{DoctorData, Specialty},
        patients::PatientData,
        users::Role,
    },
    service::{
        appointment::create_appointment,
        identity::Principal,
        registration::{register_doctor, register_patient, DoctorRegistration, PatientRegistration},
    },
    utils::parse_time_str,
};

pub const PASSWORD: &str = "Secret#123";

pub fn test_conn() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").expect("in-memory sqlite");
    run_migrations(&mut conn).expect("schema");
    conn
}

pub fn at(s: &str) -> NaiveDateTime {
    parse_time_str("time", s).expect("test timestamp")
}

pub fn principal(username: &str, role: Role) -> Principal {
    Principal {
        username: username.to_string(),
        role,
    }
}

fn surname_of(username: &str) -> String {
    let base: String = username
        .trim_start_matches("dr")
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => "Doe".to_string(),
    }
}

/// Lastname is the capitalized username without a leading `dr`.
pub fn doctor_form(username: &str, license: &str) -> DoctorRegistration {
    DoctorRegistration {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        firstname: "Greg".to_string(),
        lastname: surname_of(username),
        specialty: Specialty::Cardiology,
        medical_license_number: license.to_string(),
    }
}

pub fn patient_form(username: &str, ssn: &str) -> PatientRegistration {
    PatientRegistration {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        firstname: "Pat".to_string(),
        lastname: surname_of(username),
        ssn: ssn.to_string(),
        email: format!("{}@example.org", username),
        phone_number: "5550001111".to_string(),
    }
}

pub fn seed_doctor(conn: &mut SqliteConnection, username: &str, license: &str) -> DoctorData {
    register_doctor(conn, &doctor_form(username, license)).expect("seed doctor")
}

pub fn seed_patient(conn: &mut SqliteConnection, username: &str, ssn: &str) -> PatientData {
    register_patient(conn, &patient_form(username, ssn)).expect("seed patient")
}

pub fn book(
    conn: &mut SqliteConnection,
    doctor: &DoctorData,
    patient: &PatientData,
    time: &str,
) -> Appointment {
    create_appointment(conn, doctor.id, at(time), patient).expect("seed appointment")
}
