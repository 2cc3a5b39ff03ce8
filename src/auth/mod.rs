mod requests;
mod responses;
pub mod utils;

use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;

use crate::{database::get_db_conn, error::ServiceError, protocol::SimpleResponse, AppState};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout);
}

crate::post_funcs! {
    (login, "/login", LoginRequest, LoginResponse),
    (logout, "/logout", LogoutRequest, SimpleResponse),
}

async fn login_impl(
    state: web::Data<AppState>,
    info: web::Json<LoginRequest>,
) -> Result<LoginResponse, ServiceError> {
    let info = info.into_inner();
    let ttl = state.config.login_ttl_secs;
    let mut conn = get_db_conn(&state.pool)?;

    let (login_token, user) = web::block(move || {
        utils::login(&mut conn, &info.username, &info.password, Utc::now().naive_utc(), ttl)
    })
    .await??;

    Ok(LoginResponse {
        success: true,
        err: "".to_string(),
        login_token,
        role: Some(user.role),
        dashboard: user.role.dashboard().to_string(),
    })
}

async fn logout_impl(
    state: web::Data<AppState>,
    info: web::Json<LogoutRequest>,
) -> Result<SimpleResponse, ServiceError> {
    let info = info.into_inner();
    let mut conn = get_db_conn(&state.pool)?;
    web::block(move || utils::logout(&mut conn, &info.login_token)).await??;

    Ok(SimpleResponse::ok())
}
