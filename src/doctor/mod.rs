mod requests;
mod responses;
mod utils;

use actix_web::{post, web, HttpResponse, Responder};

use crate::{
    database::get_db_conn,
    error::ServiceError,
    protocol::{IdResponse, SimpleResponse},
    service::{
        appointment, doctor,
        registration::{self, DoctorRegistration},
        validation,
    },
    AppState,
};

use self::{
    requests::*,
    responses::*,
    utils::{doctor_from_token, owned_appointment},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(view_info)
        .service(modify_info)
        .service(dashboard)
        .service(change_status)
        .service(delete_account);
}

crate::post_funcs! {
    (register, "/register", RegisterRequest, IdResponse),
    (view_info, "/view_info", ViewInfoRequest, ViewInfoResponse),
    (modify_info, "/modify_info", ModifyInfoRequest, SimpleResponse),
    (dashboard, "/dashboard", DashboardRequest, DashboardResponse),
    (change_status, "/change_status", ChangeStatusRequest, SimpleResponse),
    (delete_account, "/delete_account", DeleteAccountRequest, SimpleResponse),
}

async fn register_impl(
    state: web::Data<AppState>,
    info: web::Json<RegisterRequest>,
) -> Result<IdResponse, ServiceError> {
    let form = DoctorRegistration::from(info.into_inner());
    validation::validate_doctor_registration(&form)?;

    let mut conn = get_db_conn(&state.pool)?;
    let doctor = web::block(move || registration::register_doctor(&mut conn, &form)).await??;

    Ok(IdResponse::ok(doctor.id))
}

async fn view_info_impl(
    state: web::Data<AppState>,
    info: web::Json<ViewInfoRequest>,
) -> Result<ViewInfoResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;

    let (principal, doctor) =
        web::block(move || doctor_from_token(&mut conn, &info.login_token, ttl)).await??;

    Ok(ViewInfoResponse::new(principal.username, doctor))
}

async fn modify_info_impl(
    state: web::Data<AppState>,
    info: web::Json<ModifyInfoRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let changes = info.to_update();
    validation::validate_doctor_update(&changes)?;

    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (principal, _) = doctor_from_token(&mut conn, &info.login_token, ttl)?;
        doctor::update_doctor(&mut conn, &principal, &changes)
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
        let (_, doctor) = doctor_from_token(&mut conn, &info.login_token, ttl)?;
        appointment::list_by_doctor(&mut conn, doctor.id)
    })
    .await??;

    Ok(DashboardResponse {
        success: true,
        err: "".to_string(),
        appointments: appointments.into_iter().map(AppointmentItem::from).collect(),
    })
}

async fn change_status_impl(
    state: web::Data<AppState>,
    info: web::Json<ChangeStatusRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (_, doctor) = doctor_from_token(&mut conn, &info.login_token, ttl)?;
        let existing = owned_appointment(&mut conn, &doctor, info.id)?;
        appointment::update_appointment_status(&mut conn, existing.id, info.status)
    })
    .await??;

    Ok(SimpleResponse::ok())
}

async fn delete_account_impl(
    state: web::Data<AppState>,
    info: web::Json<DeleteAccountRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || {
        let (_, doctor) = doctor_from_token(&mut conn, &info.login_token, ttl)?;
        doctor::delete_doctor(&mut conn, doctor.id)
    })
    .await??;

    Ok(SimpleResponse::ok())
}
