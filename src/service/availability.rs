//! Office hours and double-booking rules for a doctor's calendar.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use diesel::prelude::*;
use tracing::warn;

use crate::{
    error::{AppointmentRejection, ServiceError},
    models::appointments::AppointmentStatus,
};

pub const OPENING_HOUR: u32 = 9;
pub const CLOSING_HOUR: u32 = 21;
/// The last slot must start this long before closing.
pub const CLOSING_BUFFER_MINUTES: i64 = 10;
pub const SLOT_LENGTH_MINUTES: i64 = 60;

fn opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(OPENING_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn last_start_time() -> NaiveTime {
    let closing = NaiveTime::from_hms_opt(CLOSING_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    closing - Duration::minutes(CLOSING_BUFFER_MINUTES)
}

/// Both bounds are inclusive: 09:00 and 20:50 are bookable.
pub fn within_office_hours(start: NaiveDateTime) -> bool {
    let time = start.time();
    time >= opening_time() && time <= last_start_time()
}

pub fn check_office_hours(start: NaiveDateTime) -> Result<(), ServiceError> {
    if within_office_hours(start) {
        Ok(())
    } else {
        warn!(%start, "appointment outside of office hours");
        Err(AppointmentRejection::OutsideOfficeHours.into())
    }
}

/// Whether `doctor_id` has no live appointment starting less than one slot
/// before or after `start`. `excluding` skips the appointment being moved.
pub fn is_slot_available(
    conn: &mut SqliteConnection,
    doctor_id: i32,
    start: NaiveDateTime,
    excluding: Option<i32>,
) -> Result<bool, ServiceError> {
    use crate::schema::appointments;

    let slot = Duration::minutes(SLOT_LENGTH_MINUTES);

    let mut query = appointments::table
        .filter(appointments::doctor_id.eq(doctor_id))
        .filter(appointments::status.ne(AppointmentStatus::Cancelled))
        .filter(appointments::appointment_time.gt(start - slot))
        .filter(appointments::appointment_time.lt(start + slot))
        .into_boxed();
    if let Some(id) = excluding {
        query = query.filter(appointments::id.ne(id));
    }

    let clashes = query.count().get_result::<i64>(conn)?;
    Ok(clashes == 0)
}

/// Office hours first, then the doctor's calendar.
pub fn ensure_bookable(
    conn: &mut SqliteConnection,
    doctor_id: i32,
    start: NaiveDateTime,
    excluding: Option<i32>,
) -> Result<(), ServiceError> {
    check_office_hours(start)?;
    if !is_slot_available(conn, doctor_id, start, excluding)? {
        warn!(doctor_id, %start, "appointment slot already taken");
        return Err(AppointmentRejection::SlotUnavailable.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{at, book, seed_doctor, seed_patient, test_conn};

    #[test]
    fn office_hours_bounds_are_inclusive() {
        assert!(within_office_hours(at("2024-06-10T09:00")));
        assert!(within_office_hours(at("2024-06-10T20:50")));
        assert!(!within_office_hours(at("2024-06-10T08:59")));
        assert!(!within_office_hours(at("2024-06-10T20:51")));
        assert!(!within_office_hours(at("2024-06-10T21:00")));
        assert!(!within_office_hours(at("2024-06-10T00:00")));
    }

    #[test]
    fn nearby_appointments_block_in_both_directions() {
        let mut conn = test_conn();
        let doctor = seed_doctor(&mut conn, "drhouse", "1234567");
        let patient = seed_patient(&mut conn, "patient1", "123456789");
        book(&mut conn, &doctor, &patient, "2024-06-10T10:00");

        for t in ["2024-06-10T09:01", "2024-06-10T10:00", "2024-06-10T10:59"] {
            assert!(!is_slot_available(&mut conn, doctor.id, at(t), None).unwrap(), "{}", t);
        }
        for t in ["2024-06-10T09:00", "2024-06-10T11:00"] {
            assert!(is_slot_available(&mut conn, doctor.id, at(t), None).unwrap(), "{}", t);
        }
    }

    #[test]
    fn other_doctors_and_excluded_appointment_do_not_block() {
        let mut conn = test_conn();
        let doctor = seed_doctor(&mut conn, "drhouse", "1234567");
        let other = seed_doctor(&mut conn, "drwilson", "7654321");
        let patient = seed_patient(&mut conn, "patient1", "123456789");
        let booked = book(&mut conn, &doctor, &patient, "2024-06-10T10:00");

        assert!(is_slot_available(&mut conn, other.id, at("2024-06-10T10:00"), None).unwrap());
        assert!(
            is_slot_available(&mut conn, doctor.id, at("2024-06-10T10:30"), Some(booked.id))
                .unwrap()
        );
    }
}
