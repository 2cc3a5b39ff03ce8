diesel::table! {
    appointments (id) {
        id -> Integer,
        doctor_id -> Integer,
        patient_id -> Integer,
        appointment_time -> Timestamp,
        status -> Text,
    }
}

diesel::table! {
    doctors (id) {
        id -> Integer,
        firstname -> Text,
        lastname -> Text,
        specialty -> Text,
        medical_license_number -> Text,
        user_id -> Integer,
    }
}

diesel::table! {
    login_tokens (token) {
        token -> Text,
        username -> Text,
        login_time -> Timestamp,
    }
}

diesel::table! {
    patients (id) {
        id -> Integer,
        firstname -> Text,
        lastname -> Text,
        ssn -> Text,
        email -> Text,
        phone_number -> Text,
        user_id -> Integer,
    }
}

diesel::table! {
    users (id) {
        id -> Integer,
        role -> Text,
        username -> Text,
        password -> Text,
    }
}

diesel::joinable!(appointments -> doctors (doctor_id));
diesel::joinable!(appointments -> patients (patient_id));
diesel::joinable!(doctors -> users (user_id));
diesel::joinable!(patients -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    appointments,
    doctors,
    login_tokens,
    patients,
    users,
);
