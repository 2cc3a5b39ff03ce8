use crate::schema::doctors;
use diesel::{deserialize::FromSqlRow, expression::AsExpression, prelude::*, sql_types::Text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[diesel(sql_type = Text)]
pub enum Specialty {
    Cardiology,
    Dermatology,
    Endocrinology,
    Gastroenterology,
    GeneralPractice,
    Neurology,
    ObstetricsGynecology,
    Ophthalmology,
    Orthopedics,
    Otolaryngology,
    Pediatrics,
    Psychiatry,
    Urology,
}

super::text_enum!(Specialty {
    Cardiology => "CARDIOLOGY",
    Dermatology => "DERMATOLOGY",
    Endocrinology => "ENDOCRINOLOGY",
    Gastroenterology => "GASTROENTEROLOGY",
    GeneralPractice => "GENERAL_PRACTICE",
    Neurology => "NEUROLOGY",
    ObstetricsGynecology => "OBSTETRICS_GYNECOLOGY",
    Ophthalmology => "OPHTHALMOLOGY",
    Orthopedics => "ORTHOPEDICS",
    Otolaryngology => "OTOLARYNGOLOGY",
    Pediatrics => "PEDIATRICS",
    Psychiatry => "PSYCHIATRY",
    Urology => "UROLOGY",
});

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DoctorData {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub specialty: Specialty,
    pub medical_license_number: String,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = doctors)]
pub struct NewDoctor {
    pub firstname: String,
    pub lastname: String,
    pub specialty: Specialty,
    pub medical_license_number: String,
    pub user_id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = doctors)]
pub struct UpdateDoctor {
    pub firstname: String,
    pub lastname: String,
    pub specialty: Specialty,
}
