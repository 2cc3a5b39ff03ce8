use serde::Serialize;

/// Envelope every endpoint answers with; richer responses add fields after these two.
#[derive(Default, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub err: String,
}

impl SimpleResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err: "".to_string(),
        }
    }
}

/// Answer for endpoints that create a record.
#[derive(Default, Serialize)]
pub struct IdResponse {
    pub success: bool,
    pub err: String,
    pub id: i32,
}

impl IdResponse {
    pub fn ok(id: i32) -> Self {
        Self {
            success: true,
            err: "".to_string(),
            id,
        }
    }
}

#[macro_export]
macro_rules! impl_err_response {
    ( $( $type:ty),+ $(,)? ) => {
        $(
            impl $type {
                pub fn err(err: &$crate::error::ServiceError) -> Self {
                    Self {
                        success: false,
                        err: err.user_message(),
                        ..Default::default()
                    }
                }
            }
        )+
    };
}

impl_err_response! {
    SimpleResponse,
    IdResponse,
}
