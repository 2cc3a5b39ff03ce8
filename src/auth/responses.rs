use serde::Serialize;

use crate::models::users::Role;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
    pub role: Option<Role>,
    /// Where the client should go next.
    pub dashboard: String,
}

crate::impl_err_response! {
    LoginResponse,
}
