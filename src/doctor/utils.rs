use diesel::SqliteConnection;
use tracing::warn;

use crate::{
    auth::utils::principal_from_token,
    error::{EntityKind, ServiceError},
    models::{appointments::Appointment, doctors::DoctorData},
    service::{
        appointment::get_appointment,
        identity::{current_doctor, Principal},
    },
};

pub fn doctor_from_token(
    conn: &mut SqliteConnection,
    token: &str,
    ttl_secs: i64,
) -> Result<(Principal, DoctorData), ServiceError> {
    let principal = principal_from_token(conn, token, ttl_secs)?;
    let doctor = current_doctor(conn, &principal)?;
    Ok((principal, doctor))
}

pub fn owned_appointment(
    conn: &mut SqliteConnection,
    doctor: &DoctorData,
    appointment_id: i32,
) -> Result<Appointment, ServiceError> {
    let appointment = get_appointment(conn, appointment_id)?;
    if appointment.doctor_id != doctor.id {
        warn!(appointment_id, doctor_id = doctor.id, "appointment belongs to another doctor");
        return Err(ServiceError::not_found(EntityKind::Appointment, appointment_id));
    }
    Ok(appointment)
}
