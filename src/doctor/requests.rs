use serde::Deserialize;

use crate::{
    models::{
        appointments::AppointmentStatus,
        doctors::{Specialty, UpdateDoctor},
    },
    service::registration::DoctorRegistration,
};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
    pub specialty: Specialty,
    pub medical_license_number: String,
}

impl From<RegisterRequest> for DoctorRegistration {
    fn from(req: RegisterRequest) -> Self {
        DoctorRegistration {
            username: req.username,
            password: req.password,
            firstname: req.firstname,
            lastname: req.lastname,
            specialty: req.specialty,
            medical_license_number: req.medical_license_number,
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
    pub specialty: Specialty,
}

impl ModifyInfoRequest {
    pub fn to_update(&self) -> UpdateDoctor {
        UpdateDoctor {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            specialty: self.specialty,
        }
    }
}

#[derive(Deserialize)]
pub struct DashboardRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub login_token: String,
    pub id: i32,
    pub status: AppointmentStatus,
}

#[derive(Deserialize)]
pub struct DeleteAccountRequest {
    pub login_token: String,
}
