use diesel::prelude::*;
use tracing::info;

use crate::{
    database::assert::{assert_license_free, assert_ssn_free, assert_username_free},
    error::ServiceError,
    models::{
        doctors::{DoctorData, NewDoctor, Specialty},
        patients::{NewPatient, PatientData},
        users::{NewUser, Role, UserData},
    },
    utils::hash_password,
};

#[derive(Debug, Clone)]
pub struct DoctorRegistration {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub specialty: Specialty,
    pub medical_license_number: String,
}

#[derive(Debug, Clone)]
pub struct PatientRegistration {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub email: String,
    pub phone_number: String,
}

impl DoctorRegistration {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            role: Role::Doctor,
            username: self.username.clone(),
            password: hash_password(&self.password),
        }
    }

    pub fn to_new_doctor(&self, user_id: i32) -> NewDoctor {
        NewDoctor {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            specialty: self.specialty,
            medical_license_number: self.medical_license_number.clone(),
            user_id,
        }
    }
}

impl PatientRegistration {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            role: Role::Patient,
            username: self.username.clone(),
            password: hash_password(&self.password),
        }
    }

    pub fn to_new_patient(&self, user_id: i32) -> NewPatient {
        NewPatient {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            ssn: self.ssn.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            user_id,
        }
    }
}

fn insert_user(conn: &mut SqliteConnection, user: &NewUser) -> QueryResult<UserData> {
    use crate::schema::users;

    diesel::insert_into(users::table)
        .values(user)
        .returning(UserData::as_returning())
        .get_result(conn)
}

/// Creates the login account and the doctor profile together, or neither.
pub fn register_doctor(
    conn: &mut SqliteConnection,
    form: &DoctorRegistration,
) -> Result<DoctorData, ServiceError> {
    use crate::schema::doctors;

    conn.transaction::<_, ServiceError, _>(|conn| {
        assert_license_free(conn, &form.medical_license_number)?;
        assert_username_free(conn, &form.username)?;

        let user = insert_user(conn, &form.to_new_user())?;
        let doctor = diesel::insert_into(doctors::table)
            .values(&form.to_new_doctor(user.id))
            .returning(DoctorData::as_returning())
            .get_result(conn)?;

        info!(username = %user.username, doctor_id = doctor.id, "doctor registered");
        Ok(doctor)
    })
}

pub fn register_patient(
    conn: &mut SqliteConnection,
    form: &PatientRegistration,
) -> Result<PatientData, ServiceError> {
    use crate::schema::patients;

    conn.transaction::<_, ServiceError, _>(|conn| {
        assert_ssn_free(conn, &form.ssn)?;
        assert_username_free(conn, &form.username)?;

        let user = insert_user(conn, &form.to_new_user())?;
        let patient = diesel::insert_into(patients::table)
            .values(&form.to_new_patient(user.id))
            .returning(PatientData::as_returning())
            .get_result(conn)?;

        info!(username = %user.username, patient_id = patient.id, "patient registered");
        Ok(patient)
    })
}
