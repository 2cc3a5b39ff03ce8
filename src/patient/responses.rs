use serde::Serialize;

use crate::{
    models::{doctors::DoctorData, patients::PatientData},
    service::appointment::AppointmentDetails,
    utils::format_time_str,
};

#[derive(Default, Serialize)]
pub struct ViewInfoResponse {
    pub success: bool,
    pub err: String,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub email: String,
    pub phone_number: String,
}

impl ViewInfoResponse {
    pub fn new(username: String, patient: PatientData) -> Self {
        Self {
            success: true,
            err: "".to_string(),
            username,
            firstname: patient.firstname,
            lastname: patient.lastname,
            ssn: patient.ssn,
            email: patient.email,
            phone_number: patient.phone_number,
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchDoctorItem {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub specialty: String,
}

impl From<DoctorData> for SearchDoctorItem {
    fn from(doctor: DoctorData) -> Self {
        Self {
            id: doctor.id,
            firstname: doctor.firstname,
            lastname: doctor.lastname,
            specialty: doctor.specialty.to_string(),
        }
    }
}

#[derive(Default, Serialize)]
pub struct SearchDoctorResponse {
    pub success: bool,
    pub err: String,
    pub doctors: Vec<SearchDoctorItem>,
}

#[derive(Default, Serialize)]
pub struct ViewDoctorResponse {
    pub success: bool,
    pub err: String,
    pub doctor: SearchDoctorItem,
}

#[derive(Default, Serialize)]
pub struct SpecialtiesResponse {
    pub success: bool,
    pub err: String,
    pub specialties: Vec<String>,
}

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub id: i32,
    pub doctor_id: i32,
    pub doctor_firstname: String,
    pub doctor_lastname: String,
    pub specialty: String,
    pub appointment_time: String,
    pub status: String,
}

impl From<AppointmentDetails> for AppointmentItem {
    fn from(details: AppointmentDetails) -> Self {
        Self {
            id: details.appointment.id,
            doctor_id: details.doctor.id,
            doctor_firstname: details.doctor.firstname,
            doctor_lastname: details.doctor.lastname,
            specialty: details.doctor.specialty.to_string(),
            appointment_time: format_time_str(&details.appointment.appointment_time),
            status: details.appointment.status.to_string(),
        }
    }
}

#[derive(Default, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
}

crate::impl_err_response! {
    ViewInfoResponse,
    SearchDoctorResponse,
    ViewDoctorResponse,
    SpecialtiesResponse,
    DashboardResponse,
}
