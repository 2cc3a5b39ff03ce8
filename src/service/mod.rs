//! Clinic workflows over a single SQLite connection. Handlers call these from
//! inside `web::block`; each function owns its transaction.

pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod identity;
pub mod patient;
pub mod registration;
pub mod validation;
