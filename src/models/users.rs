use crate::schema::users;
use diesel::{deserialize::FromSqlRow, expression::AsExpression, prelude::*, sql_types::Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[diesel(sql_type = Text)]
pub enum Role {
    Doctor,
    Patient,
}

super::text_enum!(Role {
    Doctor => "DOCTOR",
    Patient => "PATIENT",
});

impl Role {
    /// Where a freshly logged-in user of this role lands.
    pub fn dashboard(&self) -> &'static str {
        match self {
            Role::Doctor => "/doctor/dashboard",
            Role::Patient => "/patient/dashboard",
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserData {
    pub id: i32,
    pub role: Role,
    pub username: String,
    pub password: String,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub role: Role,
    pub username: String,
    pub password: String,
}
