pub mod auth;
pub mod config;
pub mod database;
pub mod doctor;
pub mod error;
pub mod models;
pub mod patient;
pub mod protocol;
pub mod schema;
pub mod service;
pub mod utils;

#[cfg(test)]
mod test_utils;

use actix_web::{error::InternalError, web, HttpResponse};

pub use crate::{config::Config, database::DbPool};

/// Shared by every handler through `web::Data`.
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
}

/// Malformed bodies get the usual `{success, err}` envelope instead of actix's plain text.
fn json_error(err: actix_web::error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let body = protocol::SimpleResponse {
        success: false,
        err: err.to_string(),
    };
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(web::scope("/auth").configure(auth::config))
        .service(web::scope("/patient").configure(patient::config))
        .service(web::scope("/doctor").configure(doctor::config));
}
