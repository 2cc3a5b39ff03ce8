use diesel::prelude::*;
use tracing::{info, warn};

use super::identity::{current_doctor, Principal};
use crate::{
    database::assert::assert_doctor,
    error::{EntityKind, ServiceError},
    models::doctors::{DoctorData, Specialty, UpdateDoctor},
    utils::get_prefix_pattern,
};

pub fn get_doctor(conn: &mut SqliteConnection, id: i32) -> Result<DoctorData, ServiceError> {
    assert_doctor(conn, id)
}

pub fn find_by_specialty(
    conn: &mut SqliteConnection,
    specialty: Specialty,
) -> Result<Vec<DoctorData>, ServiceError> {
    use crate::schema::doctors;

    let found = doctors::table
        .filter(doctors::specialty.eq(specialty))
        .order((doctors::lastname.asc(), doctors::firstname.asc()))
        .select(DoctorData::as_select())
        .load(conn)?;

    if found.is_empty() {
        warn!(%specialty, "no doctors with specialty");
        return Err(ServiceError::not_found(EntityKind::Doctor, specialty));
    }
    Ok(found)
}

/// Case follows SQLite's LIKE, which ignores ASCII case.
pub fn find_by_lastname_prefix(
    conn: &mut SqliteConnection,
    prefix: &str,
) -> Result<Vec<DoctorData>, ServiceError> {
    use crate::schema::doctors;

    let found = doctors::table
        .filter(doctors::lastname.like(get_prefix_pattern(prefix)).escape('\\'))
        .order((doctors::lastname.asc(), doctors::firstname.asc()))
        .select(DoctorData::as_select())
        .load(conn)?;

    if found.is_empty() {
        warn!(prefix, "no doctors with last name prefix");
        return Err(ServiceError::not_found(EntityKind::Doctor, format!("lastname {}*", prefix)));
    }
    Ok(found)
}

pub fn update_doctor(
    conn: &mut SqliteConnection,
    principal: &Principal,
    changes: &UpdateDoctor,
) -> Result<DoctorData, ServiceError> {
    use crate::schema::doctors;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let doctor = current_doctor(conn, principal)?;
        let updated = diesel::update(doctors::table.find(doctor.id))
            .set(changes)
            .returning(DoctorData::as_returning())
            .get_result(conn)?;
        info!(doctor_id = doctor.id, "doctor profile updated");
        Ok(updated)
    })
}

/// Removes the doctor with their login account, tokens and appointments.
pub fn delete_doctor(conn: &mut SqliteConnection, id: i32) -> Result<DoctorData, ServiceError> {
    use crate::schema::{appointments, doctors, login_tokens, users};

    conn.transaction::<_, ServiceError, _>(|conn| {
        let doctor = assert_doctor(conn, id)?;
        let username = users::table
            .find(doctor.user_id)
            .select(users::username)
            .first::<String>(conn)
            .optional()?;

        let dropped = diesel::delete(appointments::table.filter(appointments::doctor_id.eq(doctor.id)))
            .execute(conn)?;
        diesel::delete(doctors::table.find(doctor.id)).execute(conn)?;
        if let Some(username) = username {
            diesel::delete(login_tokens::table.filter(login_tokens::username.eq(&username)))
                .execute(conn)?;
        }
        diesel::delete(users::table.find(doctor.user_id)).execute(conn)?;

        info!(doctor_id = doctor.id, appointments = dropped, "doctor deleted");
        Ok(doctor)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::users::Role,
        service::appointment::get_appointment,
        test_utils::{book, principal, seed_doctor, seed_patient, test_conn},
    };
    use assert_matches::assert_matches;

    #[test]
    fn search_by_specialty_and_prefix() {
        let mut conn = test_conn();
        let house = seed_doctor(&mut conn, "drhouse", "1234567");
        seed_doctor(&mut conn, "drwilson", "7654321");

        let found = find_by_specialty(&mut conn, Specialty::Cardiology).unwrap();
        assert_eq!(found.len(), 2);

        let err = find_by_specialty(&mut conn, Specialty::Urology).unwrap_err();
        assert_matches!(err, ServiceError::EntityNotFound { entity: EntityKind::Doctor, .. });

        // seeded last names are derived from the username
        let found = find_by_lastname_prefix(&mut conn, "hou").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, house.id);

        let err = find_by_lastname_prefix(&mut conn, "%").unwrap_err();
        assert_matches!(err, ServiceError::EntityNotFound { .. });
    }

    #[test]
    fn update_replaces_profile_fields() {
        let mut conn = test_conn();
        let doctor = seed_doctor(&mut conn, "drhouse", "1234567");
        let changes = UpdateDoctor {
            firstname: "Gregory".to_string(),
            lastname: "House".to_string(),
            specialty: Specialty::Neurology,
        };

        let updated = update_doctor(&mut conn, &principal("drhouse", Role::Doctor), &changes).unwrap();
        assert_eq!(updated.id, doctor.id);
        assert_eq!(updated.specialty, Specialty::Neurology);
        assert_eq!(updated.medical_license_number, "1234567");

        let err = update_doctor(&mut conn, &principal("ghost", Role::Doctor), &changes).unwrap_err();
        assert_matches!(err, ServiceError::EntityNotFound { .. });
    }

    #[test]
    fn delete_cascades_to_appointments() {
        let mut conn = test_conn();
        let doctor = seed_doctor(&mut conn, "drhouse", "1234567");
        let patient = seed_patient(&mut conn, "patient1", "123456789");
        let booked = book(&mut conn, &doctor, &patient, "2024-06-10T10:00");

        let deleted = delete_doctor(&mut conn, doctor.id).unwrap();
        assert_eq!(deleted.id, doctor.id);
        assert_matches!(get_doctor(&mut conn, doctor.id), Err(ServiceError::EntityNotFound { .. }));
        assert_matches!(get_appointment(&mut conn, booked.id), Err(ServiceError::EntityNotFound { .. }));
        assert_matches!(
            crate::service::identity::get_user_by_username(&mut conn, "drhouse"),
            Err(ServiceError::EntityNotFound { entity: EntityKind::User, .. })
        );

        assert_matches!(delete_doctor(&mut conn, doctor.id), Err(ServiceError::EntityNotFound { .. }));
    }
}
