use crate::schema::patients;
use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PatientData {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub email: String,
    pub phone_number: String,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = patients)]
pub struct NewPatient {
    pub firstname: String,
    pub lastname: String,
    pub ssn: String,
    pub email: String,
    pub phone_number: String,
    pub user_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = patients)]
pub struct UpdatePatient {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: String,
}
