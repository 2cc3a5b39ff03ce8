use diesel::prelude::*;
use tracing::info;

use super::identity::{current_patient, Principal};
use crate::{
    database::assert::assert_patient,
    error::ServiceError,
    models::patients::{PatientData, UpdatePatient},
};

pub fn update_patient(
    conn: &mut SqliteConnection,
    principal: &Principal,
    changes: &UpdatePatient,
) -> Result<PatientData, ServiceError> {
    use crate::schema::patients;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let patient = current_patient(conn, principal)?;
        let updated = diesel::update(patients::table.find(patient.id))
            .set(changes)
            .returning(PatientData::as_returning())
            .get_result(conn)?;
        info!(patient_id = patient.id, "patient profile updated");
        Ok(updated)
    })
}

/// Removes the patient with their login account, tokens and appointments.
pub fn delete_patient(conn: &mut SqliteConnection, id: i32) -> Result<PatientData, ServiceError> {
    use crate::schema::{appointments, login_tokens, patients, users};

    conn.transaction::<_, ServiceError, _>(|conn| {
        let patient = assert_patient(conn, id)?;
        let username = users::table
            .find(patient.user_id)
            .select(users::username)
            .first::<String>(conn)
            .optional()?;

        let dropped = diesel::delete(appointments::table.filter(appointments::patient_id.eq(patient.id)))
            .execute(conn)?;
        diesel::delete(patients::table.find(patient.id)).execute(conn)?;
        if let Some(username) = username {
            diesel::delete(login_tokens::table.filter(login_tokens::username.eq(&username)))
                .execute(conn)?;
        }
        diesel::delete(users::table.find(patient.user_id)).execute(conn)?;

        info!(patient_id = patient.id, appointments = dropped, "patient deleted");
        Ok(patient)
    })
}
