use diesel::prelude::*;
use tracing::warn;

use crate::{
    error::{EntityKind, ServiceError},
    models::{appointments::Appointment, doctors::DoctorData, patients::PatientData, users::UserData},
};

pub fn assert_user(conn: &mut SqliteConnection, username: &str) -> Result<UserData, ServiceError> {
    use crate::schema::users;

    users::table
        .filter(users::username.eq(username))
        .select(UserData::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(username, "no such user");
            ServiceError::not_found(EntityKind::User, username)
        })
}

pub fn assert_doctor(conn: &mut SqliteConnection, id: i32) -> Result<DoctorData, ServiceError> {
    use crate::schema::doctors;

    doctors::table
        .find(id)
        .select(DoctorData::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(doctor_id = id, "no such doctor");
            ServiceError::not_found(EntityKind::Doctor, id)
        })
}

pub fn assert_patient(conn: &mut SqliteConnection, id: i32) -> Result<PatientData, ServiceError> {
    use crate::schema::patients;

    patients::table
        .find(id)
        .select(PatientData::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(patient_id = id, "no such patient");
            ServiceError::not_found(EntityKind::Patient, id)
        })
}

pub fn assert_appointment(conn: &mut SqliteConnection, id: i32) -> Result<Appointment, ServiceError> {
    use crate::schema::appointments;

    appointments::table
        .find(id)
        .select(Appointment::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(appointment_id = id, "no such appointment");
            ServiceError::not_found(EntityKind::Appointment, id)
        })
}

pub fn assert_username_free(conn: &mut SqliteConnection, username: &str) -> Result<(), ServiceError> {
    use crate::schema::users;

    let res = users::table
        .filter(users::username.eq(username))
        .count()
        .get_result::<i64>(conn)?;

    if res > 0 {
        warn!(username, "username already taken");
        return Err(ServiceError::UserAlreadyExists(username.to_string()));
    }

    Ok(())
}

pub fn assert_license_free(conn: &mut SqliteConnection, license: &str) -> Result<(), ServiceError> {
    use crate::schema::doctors;

    let res = doctors::table
        .filter(doctors::medical_license_number.eq(license))
        .count()
        .get_result::<i64>(conn)?;

    if res > 0 {
        warn!(license, "medical license number already registered");
        return Err(ServiceError::DoctorAlreadyExists(license.to_string()));
    }

    Ok(())
}

pub fn assert_ssn_free(conn: &mut SqliteConnection, ssn: &str) -> Result<(), ServiceError> {
    use crate::schema::patients;

    let res = patients::table
        .filter(patients::ssn.eq(ssn))
        .count()
        .get_result::<i64>(conn)?;

    if res > 0 {
        warn!("ssn already registered");
        return Err(ServiceError::PatientAlreadyExists(ssn.to_string()));
    }

    Ok(())
}
