mod requests;
mod responses;
mod utils;

use actix_web::{post, web, HttpResponse, Responder};

use crate::{
    database::get_db_conn,
    error::{ServiceError, ValidationErrors},
    models::doctors::Specialty,
    protocol::{IdResponse, SimpleResponse},
    service::{
        appointment, doctor, patient,
        registration::{self, PatientRegistration},
        validation,
    },
    utils::parse_time_str,
    AppState,
};

use self::{
    requests::*,
    responses::*,
    utils::{owned_appointment, patient_from_token},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(view_info)
        .service(modify_info)
        .service(search_doctor)
        .service(view_doctor)
        .service(specialties)
        .service(book)
        .service(modify_appoint)
        .service(delete_appoint)
        .service(dashboard)
        .service(delete_account);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, IdResponse),
    (view_info, "/view_info", ViewInfoRequest, ViewInfoResponse),
    (modify_info, "/modify_info", ModifyInfoRequest, SimpleResponse),
    (search_doctor, "/search_doctor", SearchDoctorRequest, SearchDoctorResponse),
    (view_doctor, "/view_doctor", ViewDoctorRequest, ViewDoctorResponse),
    (specialties, "/specialties", SpecialtiesRequest, SpecialtiesResponse),
    (book, "/book", BookRequest, IdResponse),
    (modify_appoint, "/modify_appoint", ModifyAppointRequest, SimpleResponse),
    (delete_appoint, "/delete_appoint", DeleteAppointRequest, SimpleResponse),
    (dashboard, "/dashboard", DashboardRequest, DashboardResponse),
    (delete_account, "/delete_account", DeleteAccountRequest, SimpleResponse),
}

async fn register_impl(
    state: web::Data<AppState>,
    info: web::Json<RegisterRequest>,
) -> Result<IdResponse, ServiceError> {
    let form = PatientRegistration::from(info.into_inner());
    validation::validate_patient_registration(&form)?;

    let mut conn = get_db_conn(&state.pool)?;
    let patient = web::block(move || registration::register_patient(&mut conn, &form)).await??;

    Ok(IdResponse::ok(patient.id))
}

async fn view_info_impl(
    state: web::Data<AppState>,
    info: web::Json<ViewInfoRequest>,
) -> Result<ViewInfoResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;

    let (principal, patient) =
        web::block(move || patient_from_token(&mut conn, &info.login_token, ttl)).await??;

    Ok(ViewInfoResponse::new(principal.username, patient))
}

async fn modify_info_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyInfoRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let changes = info.to_update();
    validation::validate_patient_update(&changes)?;

    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (principal, _) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        patient::update_patient(&mut conn, &principal, &changes)
    })
    .await??;

    Ok(SimpleResponse::ok())
}

async fn search_doctor_impl(
    state: web::Data<AppState>,
    info: web::Json<SearchDoctorRequest>,
) -> Result<SearchDoctorResponse, ServiceError> {
    let info = info.into_inner();
    let lastname = info.lastname.as_deref().map(str::trim).unwrap_or_default().to_string();
    if info.specialty.is_none() && lastname.is_empty() {
        let mut errors = ValidationErrors::default();
        errors.add("specialty", "give a specialty or a last name prefix");
        return Err(ServiceError::Validation(errors));
    }

    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    let doctors = web::block(move || {
        patient_from_token(&mut conn, &info.login_token, ttl)?;
        match info.specialty {
            Some(specialty) => doctor::find_by_specialty(&mut conn, specialty),
            None => doctor::find_by_lastname_prefix(&mut conn, &lastname),
        }
    })
    .await??;

    Ok(SearchDoctorResponse {
        success: true,
        err: "".to_string(),
        doctors: doctors.into_iter().map(SearchDoctorItem::from).collect(),
    })
}

async fn view_doctor_impl(
    state: web::Data<AppState>,
    info: web::Json<ViewDoctorRequest>,
) -> Result<ViewDoctorResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    let found = web::block(move || {
        patient_from_token(&mut conn, &info.login_token, ttl)?;
        doctor::get_doctor(&mut conn, info.id)
    })
    .await??;

    Ok(ViewDoctorResponse {
        success: true,
        err: "".to_string(),
        doctor: SearchDoctorItem::from(found),
    })
}

async fn specialties_impl(
    state: web::Data<AppState>,
    info: web::Json<SpecialtiesRequest>,
) -> Result<SpecialtiesResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || patient_from_token(&mut conn, &info.login_token, ttl)).await??;

    Ok(SpecialtiesResponse {
        success: true,
        err: "".to_string(),
        specialties: Specialty::ALL.iter().map(|s| s.to_string()).collect(),
    })
}

async fn book_impl(
    state: web::Data<AppState>,
    info: web::Json<BookRequest>,
) -> Result<IdResponse, ServiceError> {
    let info = info.into_inner();
    let start = parse_time_str("appointment_time", &info.appointment_time)?;

    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    let appointment = web::block(move || {
        let (_, patient) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        appointment::create_appointment(&mut conn, info.doctor_id, start, &patient)
    })
    .await??;

    Ok(IdResponse::ok(appointment.id))
}

async fn modify_appoint_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyAppointRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let new_time = parse_time_str("appointment_time", &info.appointment_time)?;

    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (_, patient) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        let existing = owned_appointment(&mut conn, &patient, info.id)?;
        appointment::update_appointment(&mut conn, existing.id, existing.doctor_id, new_time)
    })
    .await??;

    Ok(SimpleResponse::ok())
}

async fn delete_appoint_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteAppointRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (_, patient) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        let existing = owned_appointment(&mut conn, &patient, info.id)?;
        appointment::delete_appointment(&mut conn, existing.id)
    })
    .await??;

    Ok(SimpleResponse::ok())
}

async fn dashboard_impl(
    state: web::Data<AppState>,
    info: web::Json<DashboardRequest>,
) -> Result<DashboardResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    let appointments = web::block(move || {
        let (_, patient) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        appointment::list_by_patient(&mut conn, &patient)
    })
    .await??;

    Ok(DashboardResponse {
        success: true,
        err: "".to_string(),
        appointments: appointments.into_iter().map(AppointmentItem::from).collect(),
    })
}

async fn delete_account_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteAccountRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (_, patient) = patient_from_token(&mut conn, &info.login_token, ttl)?;
        patient::delete_patient(&mut conn, patient.id)
    })
    .await??;

    Ok(SimpleResponse::ok())
}
