use diesel::SqliteConnection;
use tracing::warn;

use crate::{
    auth::utils::principal_from_token,
    error::{EntityKind, ServiceError},
    models::{appointments::Appointment, patients::PatientData},
    service::{
        appointment::get_appointment,
        identity::{current_patient, Principal},
    },
};

pub fn patient_from_token(
    conn: &mut SqliteConnection,
    token: &str,
    ttl_secs: i64,
) -> Result<(Principal, PatientData), ServiceError> {
    let principal = principal_from_token(conn, token, ttl_secs)?;
    let patient = current_patient(conn, &principal)?;
    Ok((principal, patient))
}

/// Someone else's appointment looks the same as a missing one.
pub fn owned_appointment(
    conn: &mut SqliteConnection,
    patient: &PatientData,
    appointment_id: i32,
) -> Result<Appointment, ServiceError> {
    let appointment = get_appointment(conn, appointment_id)?;
    if appointment.patient_id != patient.id {
        warn!(appointment_id, patient_id = patient.id, "appointment belongs to another patient");
        return Err(ServiceError::not_found(EntityKind::Appointment, appointment_id));
    }
    Ok(appointment)
}
