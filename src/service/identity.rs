use diesel::prelude::*;
use tracing::warn;

use crate::{
    database::assert::assert_user,
    error::{EntityKind, ServiceError},
    models::{doctors::DoctorData, patients::PatientData, users::{Role, UserData}},
};

/// The authenticated caller, resolved from a login token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

pub fn get_user_by_username(conn: &mut SqliteConnection, username: &str) -> Result<UserData, ServiceError> {
    assert_user(conn, username)
}

pub fn current_patient(conn: &mut SqliteConnection, principal: &Principal) -> Result<PatientData, ServiceError> {
    use crate::schema::patients;

    let user = assert_user(conn, &principal.username)?;
    patients::table
        .filter(patients::user_id.eq(user.id))
        .select(PatientData::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(username = %principal.username, "user has no patient profile");
            ServiceError::not_found(EntityKind::Patient, &principal.username)
        })
}

pub fn current_doctor(conn: &mut SqliteConnection, principal: &Principal) -> Result<DoctorData, ServiceError> {
    use crate::schema::doctors;

    let user = assert_user(conn, &principal.username)?;
    doctors::table
        .filter(doctors::user_id.eq(user.id))
        .select(DoctorData::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| {
            warn!(username = %principal.username, "user has no doctor profile");
            ServiceError::not_found(EntityKind::Doctor, &principal.username)
        })
}
