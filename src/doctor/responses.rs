use serde::Serialize;

use crate::{
    models::doctors::DoctorData, service::appointment::AppointmentDetails,
    utils::format_time_str,
};

#[derive(Default, Serialize)]
pub struct ViewInfoResponse {
    pub success: bool,
    pub err: String,
    pub id: i32,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub specialty: String,
    pub medical_license_number: String,
}

impl ViewInfoResponse {
    pub fn new(username: String, doctor: DoctorData) -> Self {
        Self {
            success: true,
            err: "".to_string(),
            id: doctor.id,
            username,
            firstname: doctor.firstname,
            lastname: doctor.lastname,
            specialty: doctor.specialty.to_string(),
            medical_license_number: doctor.medical_license_number,
        }
    }
}

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub id: i32,
    pub patient_id: i32,
    pub patient_firstname: String,
    pub patient_lastname: String,
    pub patient_email: String,
    pub patient_phone_number: String,
    pub appointment_time: String,
    pub status: String,
}

impl From<AppointmentDetails> for AppointmentItem {
    fn from(details: AppointmentDetails) -> Self {
        Self {
            id: details.appointment.id,
            patient_id: details.patient.id,
            patient_firstname: details.patient.firstname,
            patient_lastname: details.patient.lastname,
            patient_email: details.patient.email,
            patient_phone_number: details.patient.phone_number,
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
    DashboardResponse,
}
