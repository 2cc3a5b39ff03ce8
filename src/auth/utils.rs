use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;
use tracing::{info, warn};

use crate::{
    database::assert::assert_user,
    error::ServiceError,
    models::{login_tokens::LoginData, users::UserData},
    service::identity::Principal,
    utils::{generate_login_token, hash_password},
};

/// Checks the password and records a fresh token for the user. Tokens older
/// than `ttl_secs` are swept in the same transaction.
pub fn login(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
    now: NaiveDateTime,
    ttl_secs: i64,
) -> Result<(String, UserData), ServiceError> {
    use crate::schema::{login_tokens, users};

    let user = users::table
        .filter(users::username.eq(username))
        .select(UserData::as_select())
        .first(conn)
        .optional()?;
    let user = match user {
        Some(user) if user.password == hash_password(password) => user,
        _ => {
            warn!(username, "login refused");
            return Err(ServiceError::BadCredentials);
        }
    };

    let token = generate_login_token(&user.username, user.role.as_str());
    let expired = conn.transaction::<_, ServiceError, _>(|conn| {
        let expired = diesel::delete(
            login_tokens::table.filter(login_tokens::login_time.lt(now - Duration::seconds(ttl_secs))),
        )
        .execute(conn)?;
        diesel::insert_into(login_tokens::table)
            .values(&LoginData {
                token: token.clone(),
                username: user.username.clone(),
                login_time: now,
            })
            .execute(conn)?;
        Ok(expired)
    })?;

    info!(username, role = %user.role, expired, "user logged in");
    Ok((token, user))
}

pub fn logout(conn: &mut SqliteConnection, token: &str) -> Result<(), ServiceError> {
    use crate::schema::login_tokens;

    diesel::delete(login_tokens::table.filter(login_tokens::token.eq(token))).execute(conn)?;
    Ok(())
}

pub fn principal_from_token(
    conn: &mut SqliteConnection,
    token: &str,
    ttl_secs: i64,
) -> Result<Principal, ServiceError> {
    principal_from_token_at(conn, token, ttl_secs, Utc::now().naive_utc())
}

pub fn principal_from_token_at(
    conn: &mut SqliteConnection,
    token: &str,
    ttl_secs: i64,
    now: NaiveDateTime,
) -> Result<Principal, ServiceError> {
    use crate::schema::login_tokens;

    let data = login_tokens::table
        .filter(login_tokens::token.eq(token))
        .first::<LoginData>(conn)
        .optional()?;

    let Some(data) = data else {
        return Err(ServiceError::Unauthenticated("Not logged in"));
    };
    if now.signed_duration_since(data.login_time).num_seconds() > ttl_secs {
        diesel::delete(login_tokens::table.filter(login_tokens::token.eq(token))).execute(conn)?;
        warn!(username = %data.username, "login expired");
        return Err(ServiceError::Unauthenticated("Login expired"));
    }

    let user = assert_user(conn, &data.username)?;
    Ok(Principal {
        username: user.username,
        role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::users::Role,
        test_utils::{at, seed_patient, test_conn, PASSWORD},
    };
    use assert_matches::assert_matches;

    #[test]
    fn token_resolves_until_it_expires() {
        let mut conn = test_conn();
        seed_patient(&mut conn, "patient1", "123456789");

        let (token, user) = login(&mut conn, "patient1", PASSWORD, at("2024-06-10T08:00"), 3600).unwrap();
        assert_eq!(user.role, Role::Patient);

        let p = principal_from_token_at(&mut conn, &token, 3600, at("2024-06-10T09:00")).unwrap();
        assert_eq!(p.username, "patient1");
        assert_eq!(p.role, Role::Patient);

        let err = principal_from_token_at(&mut conn, &token, 3600, at("2024-06-10T09:00:01")).unwrap_err();
        assert_matches!(err, ServiceError::Unauthenticated("Login expired"));
        let err = principal_from_token_at(&mut conn, &token, 3600, at("2024-06-10T08:30")).unwrap_err();
        assert_matches!(err, ServiceError::Unauthenticated("Not logged in"));
    }

    #[test]
    fn wrong_password_or_user_is_refused() {
        let mut conn = test_conn();
        seed_patient(&mut conn, "patient1", "123456789");

        let now = at("2024-06-10T08:00");
        assert_matches!(login(&mut conn, "patient1", "Wrong#123", now, 3600), Err(ServiceError::BadCredentials));
        assert_matches!(login(&mut conn, "nobody", PASSWORD, now, 3600), Err(ServiceError::BadCredentials));
    }

    #[test]
    fn logout_forgets_token() {
        let mut conn = test_conn();
        seed_patient(&mut conn, "patient1", "123456789");
        let now = at("2024-06-10T08:00");
        let (token, _) = login(&mut conn, "patient1", PASSWORD, now, 3600).unwrap();

        logout(&mut conn, &token).unwrap();
        let err = principal_from_token_at(&mut conn, &token, 3600, now).unwrap_err();
        assert_matches!(err, ServiceError::Unauthenticated(_));
    }

    #[test]
    fn login_sweeps_expired_tokens() {
        use crate::schema::login_tokens;

        let mut conn = test_conn();
        seed_patient(&mut conn, "patient1", "123456789");
        seed_patient(&mut conn, "patient2", "987654321");

        let (stale, _) = login(&mut conn, "patient1", PASSWORD, at("2024-06-10T08:00"), 3600).unwrap();
        let (fresh, _) = login(&mut conn, "patient2", PASSWORD, at("2024-06-10T09:30"), 3600).unwrap();
        login(&mut conn, "patient2", PASSWORD, at("2024-06-10T09:45"), 3600).unwrap();

        let remaining: Vec<String> = login_tokens::table
            .select(login_tokens::token)
            .load(&mut conn)
            .unwrap();
        assert!(!remaining.contains(&stale));
        assert!(remaining.contains(&fresh));
        assert_eq!(remaining.len(), 2);
    }
}
