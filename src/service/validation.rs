//! Field rules applied to registration and profile forms before they reach the store.

use once_cell::sync::Lazy;
use regex::Regex;

use super::registration::{DoctorRegistration, PatientRegistration};
use crate::{
    error::{ServiceError, ValidationErrors},
    models::{doctors::UpdateDoctor, patients::UpdatePatient},
};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2,32}$").unwrap());
static LICENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[a-zA-Z0-9.-]+$").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static SSN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9}$").unwrap());

const PASSWORD_SPECIALS: &str = "@#$%^&+=";

fn check_username(errors: &mut ValidationErrors, username: &str) {
    let len = username.chars().count();
    if username.trim().is_empty() || !(5..=20).contains(&len) {
        errors.add("username", "must be between 5 and 20 characters");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    let strong = password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
        && !password.chars().any(char::is_whitespace);
    if !strong {
        errors.add(
            "password",
            "must be at least 8 characters with a digit, a lowercase letter, an uppercase letter and one of @#$%^&+=, without spaces",
        );
    }
}

fn check_names(errors: &mut ValidationErrors, firstname: &str, lastname: &str) {
    if !NAME_RE.is_match(firstname) {
        errors.add("firstname", "must be 2 to 32 letters");
    }
    if !NAME_RE.is_match(lastname) {
        errors.add("lastname", "must be 2 to 32 letters");
    }
}

fn check_contact(errors: &mut ValidationErrors, email: &str, phone_number: &str) {
    if !EMAIL_RE.is_match(email) {
        errors.add("email", "must be a valid email address");
    }
    if !PHONE_RE.is_match(phone_number) {
        errors.add("phone_number", "must be exactly 10 digits");
    }
}

pub fn validate_doctor_registration(form: &DoctorRegistration) -> Result<(), ServiceError> {
    let mut errors = ValidationErrors::default();
    check_username(&mut errors, &form.username);
    check_password(&mut errors, &form.password);
    check_names(&mut errors, &form.firstname, &form.lastname);
    if !LICENSE_RE.is_match(&form.medical_license_number) {
        errors.add("medical_license_number", "must be exactly 7 digits");
    }
    errors.into_result()
}

pub fn validate_patient_registration(form: &PatientRegistration) -> Result<(), ServiceError> {
    let mut errors = ValidationErrors::default();
    check_username(&mut errors, &form.username);
    check_password(&mut errors, &form.password);
    check_names(&mut errors, &form.firstname, &form.lastname);
    if !SSN_RE.is_match(&form.ssn) {
        errors.add("ssn", "must be exactly 9 digits");
    }
    check_contact(&mut errors, &form.email, &form.phone_number);
    errors.into_result()
}

pub fn validate_doctor_update(changes: &UpdateDoctor) -> Result<(), ServiceError> {
    let mut errors = ValidationErrors::default();
    check_names(&mut errors, &changes.firstname, &changes.lastname);
    errors.into_result()
}

pub fn validate_patient_update(changes: &UpdatePatient) -> Result<(), ServiceError> {
    let mut errors = ValidationErrors::default();
    check_names(&mut errors, &changes.firstname, &changes.lastname);
    check_contact(&mut errors, &changes.email, &changes.phone_number);
    errors.into_result()
}
