use chrono::NaiveDateTime;
use diesel::prelude::*;
use tracing::{info, warn};

use super::availability;
use crate::{
    database::assert::{assert_appointment, assert_doctor},
    error::{AppointmentRejection, ServiceError},
    models::{
        appointments::{Appointment, AppointmentStatus, NewAppointment},
        doctors::DoctorData,
        patients::PatientData,
    },
};

/// An appointment joined with both of its parties.
#[derive(Debug, Clone)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub doctor: DoctorData,
    pub patient: PatientData,
}

impl From<(Appointment, DoctorData, PatientData)> for AppointmentDetails {
    fn from((appointment, doctor, patient): (Appointment, DoctorData, PatientData)) -> Self {
        Self {
            appointment,
            doctor,
            patient,
        }
    }
}

/// Books `start` with `doctor_id` for `patient`. The availability check and
/// the insert share one write-locking transaction.
pub fn create_appointment(
    conn: &mut SqliteConnection,
    doctor_id: i32,
    start: NaiveDateTime,
    patient: &PatientData,
) -> Result<Appointment, ServiceError> {
    use crate::schema::appointments;

    conn.immediate_transaction::<_, ServiceError, _>(|conn| {
        let doctor = assert_doctor(conn, doctor_id)?;
        availability::ensure_bookable(conn, doctor.id, start, None)?;

        let new_appointment = NewAppointment {
            doctor_id: doctor.id,
            patient_id: patient.id,
            appointment_time: start,
            status: AppointmentStatus::Pending,
        };
        let appointment = diesel::insert_into(appointments::table)
            .values(&new_appointment)
            .returning(Appointment::as_returning())
            .get_result(conn)?;

        info!(
            appointment_id = appointment.id,
            doctor_id = doctor.id,
            patient_id = patient.id,
            %start,
            "appointment booked"
        );
        Ok(appointment)
    })
}

/// Moves an appointment to `new_time`. Only the time changes; `doctor_id`
/// must be the appointment's own doctor.
pub fn update_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i32,
    doctor_id: i32,
    new_time: NaiveDateTime,
) -> Result<Appointment, ServiceError> {
    use crate::schema::appointments;

    conn.immediate_transaction::<_, ServiceError, _>(|conn| {
        let appointment = assert_appointment(conn, appointment_id)?;
        let doctor = assert_doctor(conn, doctor_id)?;
        if doctor.id != appointment.doctor_id {
            warn!(appointment_id, doctor_id, "reschedule names a different doctor");
            return Err(AppointmentRejection::DoctorMismatch.into());
        }
        availability::ensure_bookable(conn, doctor.id, new_time, Some(appointment.id))?;

        let updated = diesel::update(appointments::table.find(appointment.id))
            .set(appointments::appointment_time.eq(new_time))
            .returning(Appointment::as_returning())
            .get_result(conn)?;

        info!(appointment_id, from = %appointment.appointment_time, to = %new_time, "appointment rescheduled");
        Ok(updated)
    })
}

/// Any status may follow any other.
pub fn update_appointment_status(
    conn: &mut SqliteConnection,
    appointment_id: i32,
    status: AppointmentStatus,
) -> Result<Appointment, ServiceError> {
    use crate::schema::appointments;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let appointment = assert_appointment(conn, appointment_id)?;
        let updated = diesel::update(appointments::table.find(appointment.id))
            .set(appointments::status.eq(status))
            .returning(Appointment::as_returning())
            .get_result(conn)?;

        info!(appointment_id, from = %appointment.status, to = %status, "appointment status changed");
        Ok(updated)
    })
}

pub fn delete_appointment(conn: &mut SqliteConnection, appointment_id: i32) -> Result<(), ServiceError> {
    use crate::schema::appointments;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let appointment = assert_appointment(conn, appointment_id)?;
        diesel::delete(appointments::table.find(appointment.id)).execute(conn)?;
        info!(appointment_id, "appointment deleted");
        Ok(())
    })
}

pub fn get_appointment(conn: &mut SqliteConnection, appointment_id: i32) -> Result<Appointment, ServiceError> {
    assert_appointment(conn, appointment_id)
}

pub fn list_by_doctor(
    conn: &mut SqliteConnection,
    doctor_id: i32,
) -> Result<Vec<AppointmentDetails>, ServiceError> {
    use crate::schema::{appointments, doctors, patients};

    let doctor = assert_doctor(conn, doctor_id)?;
    let rows = appointments::table
        .inner_join(doctors::table)
        .inner_join(patients::table)
        .filter(appointments::doctor_id.eq(doctor.id))
        .order(appointments::appointment_time.asc())
        .select((
            Appointment::as_select(),
            DoctorData::as_select(),
            PatientData::as_select(),
        ))
        .load::<(Appointment, DoctorData, PatientData)>(conn)?;

    if rows.is_empty() {
        info!(doctor_id, "doctor has no appointments");
    }
    Ok(rows.into_iter().map(AppointmentDetails::from).collect())
}

pub fn list_by_patient(
    conn: &mut SqliteConnection,
    patient: &PatientData,
) -> Result<Vec<AppointmentDetails>, ServiceError> {
    use crate::schema::{appointments, doctors, patients};

    let rows = appointments::table
        .inner_join(doctors::table)
        .inner_join(patients::table)
        .filter(appointments::patient_id.eq(patient.id))
        .order(appointments::appointment_time.asc())
        .select((
            Appointment::as_select(),
            DoctorData::as_select(),
            PatientData::as_select(),
        ))
        .load::<(Appointment, DoctorData, PatientData)>(conn)?;

    Ok(rows.into_iter().map(AppointmentDetails::from).collect())
}
