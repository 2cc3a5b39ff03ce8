#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:literal, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    match [<$func_name _impl>](state, info).await {
                        Ok(response) => HttpResponse::Ok().json(response),
                        Err(err) => {
                            if err.is_unclassified() {
                                tracing::error!(endpoint = $url, "request failed: {:#}", err);
                            }
                            HttpResponse::build(actix_web::ResponseError::status_code(&err))
                                .json(<$response>::err(&err))
                        }
                    }
                }
            }
        )+
    };
}

use blake2::{Blake2b512, Digest};
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::{ServiceError, ValidationErrors};

const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";
const TIME_FMT_NO_SECS: &str = "%Y-%m-%dT%H:%M";

/// Accepts `2024-06-10T10:00:00` or `2024-06-10T10:00`; the value is local clinic time.
pub fn parse_time_str(field: &'static str, s: &str) -> Result<NaiveDateTime, ServiceError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, TIME_FMT_NO_SECS))
        .map_err(|_| {
            let mut errors = ValidationErrors::default();
            errors.add(field, "must look like YYYY-MM-DDTHH:MM[:SS]");
            ServiceError::Validation(errors)
        })
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    time.format(TIME_FMT).to_string()
}

/// LIKE pattern matching values that start with `s`; wildcards in `s` are escaped with `\`.
pub fn get_prefix_pattern<S: AsRef<str>>(s: S) -> String {
    let mut pattern = String::with_capacity(s.as_ref().len() + 1);
    for c in s.as_ref().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub fn hash_password(password: &str) -> String {
    format!("{:x}", Blake2b512::digest(password.as_bytes()))
}

pub fn generate_login_token(username: &str, role: &str) -> String {
    let seed = format!("{}:{}:{}", role, username, Uuid::new_v4());
    format!("{:x}", Blake2b512::digest(seed.as_bytes()))
}
