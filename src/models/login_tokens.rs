use crate::schema::login_tokens;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Insertable)]
#[diesel(table_name = login_tokens)]
pub struct LoginData {
    pub token: String,
    pub username: String,
    pub login_time: NaiveDateTime,
}
