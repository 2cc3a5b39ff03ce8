use serde::Deserialize;

use crate::{
    models::{doctors::Specialty, patients::UpdatePatient},
    service::registration::PatientRegistration,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub email: String,
    pub phone_number: String,
}

impl From<RegisterRequest> for PatientRegistration {
    fn from(req: RegisterRequest) -> Self {
        PatientRegistration {
            username: req.username,
            password: req.password,
            firstname: req.firstname,
            lastname: req.lastname,
            ssn: req.ssn,
            email: req.email,
            phone_number: req.phone_number,
        }
    }
}

#[derive(Deserialize)]
pub struct ViewInfoRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ModifyInfoRequest {
    pub login_token: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
}

impl ModifyInfoRequest {
    pub fn to_update(&self) -> UpdatePatient {
        UpdatePatient {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Specialty wins when both filters are given.
#[derive(Deserialize)]
pub struct SearchDoctorRequest {
    pub login_token: String,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    #[serde(default)]
    pub lastname: Option<String>,
}

#[derive(Deserialize)]
pub struct SpecialtiesRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct BookRequest {
    pub login_token: String,
    pub doctor_id: i32,
    pub appointment_time: String,
}

#[derive(Deserialize)]
pub struct ModifyAppointRequest {
    pub login_token: String,
    pub id: i32,
    pub appointment_time: String,
}

#[derive(Deserialize)]
pub struct DeleteAppointRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize)]
pub struct DashboardRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ViewDoctorRequest {
    pub login_token: String,
    pub id: i32,
}

#[derive(Deserialize)]
pub struct DeleteAccountRequest {
    pub login_token: String,
}
