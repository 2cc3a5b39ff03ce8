use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use thiserror::Error;

use crate::protocol::SimpleResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Doctor,
    Patient,
    Appointment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Doctor => "Doctor",
            EntityKind::Patient => "Patient",
            EntityKind::Appointment => "Appointment",
        };
        f.write_str(name)
    }
}

/// Why a requested appointment time was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppointmentRejection {
    #[error("Appointment time is outside of office hours.")]
    OutsideOfficeHours,
    #[error("The appointment time is not available.")]
    SlotUnavailable,
    #[error("The appointment is booked with a different doctor.")]
    DoctorMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    #[cfg(test)]
    pub(crate) fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), ServiceError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {key}")]
    EntityNotFound { entity: EntityKind, key: String },

    #[error("{0}")]
    InvalidAppointment(#[from] AppointmentRejection),

    #[error("Doctor with medical license number {0} already exists.")]
    DoctorAlreadyExists(String),

    #[error("Patient with SSN {0} already exists.")]
    PatientAlreadyExists(String),

    #[error("User with username {0} already exists.")]
    UserAlreadyExists(String),

    #[error("Invalid input: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Unauthenticated(&'static str),

    #[error("Wrong username or password")]
    BadCredentials,

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found<K: ToString>(entity: EntityKind, key: K) -> Self {
        ServiceError::EntityNotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Failures with no domain meaning; rendered generically.
    pub fn is_unclassified(&self) -> bool {
        matches!(
            self,
            ServiceError::Database(_) | ServiceError::Blocking(_) | ServiceError::Internal(_)
        )
    }

    pub fn user_message(&self) -> String {
        if self.is_unclassified() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InvalidAppointment(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::DoctorAlreadyExists(_)
            | ServiceError::PatientAlreadyExists(_)
            | ServiceError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthenticated(_) | ServiceError::BadCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Database(_) | ServiceError::Blocking(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SimpleResponse::err(self))
    }
}
