use std::cell::Cell;
use std::fmt;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use web_sys::{window, RequestCredentials};

use crate::api::http::post_json;
use crate::config;
use crate::error::ApiError;
use crate::session::{self, KeyValueStore, LocalStorage};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Serialize)]
struct EmailLoginRequest<'a> {
    email: &'a str,
}

/// The backend returns numeric ids today; strings are accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
    pub jwt: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

pub async fn login_with_email(email: &str) -> Result<LoginResponse, ApiError> {
    post_json(
        "auth/user/login/email",
        &EmailLoginRequest { email: email.trim() },
    )
    .await
}

/// Persists a successful login. On failure storage is left exactly as it was.
pub fn finish_email_login(
    store: &impl KeyValueStore,
    result: Result<LoginResponse, ApiError>,
) -> LoginStatus {
    match result.and_then(|login| session::store_login(store, &login)) {
        Ok(()) => LoginStatus::Success,
        Err(e) => {
            log::error!("Email login failed: {}", e);
            LoginStatus::Error(LOGIN_FAILED_MESSAGE.to_string())
        }
    }
}

pub fn google_authorization_url() -> String {
    config::endpoint("oauth2/authorization/google")
}

pub fn begin_google_login() {
    if let Some(window) = window() {
        if window.location().set_href(&google_authorization_url()).is_err() {
            log::error!("Could not redirect to Google login");
        }
    }
}

thread_local! {
    static LOGOUT_IN_FLIGHT: Cell<bool> = Cell::new(false);
}

/// Claims the single logout slot. False while another logout is running.
fn try_begin_logout() -> bool {
    LOGOUT_IN_FLIGHT.with(|in_flight| !in_flight.replace(true))
}

fn end_logout() {
    LOGOUT_IN_FLIGHT.with(|in_flight| in_flight.set(false));
}

/// Tells the backend to end the session, then forgets it locally whatever
/// the outcome and returns to the landing page. Calls made while one is
/// already running are ignored.
pub async fn logout() {
    if !try_begin_logout() {
        log::debug!("Logout already in progress");
        return;
    }

    let result = Request::post(&config::endpoint("auth/logout"))
        .credentials(RequestCredentials::Include)
        .send()
        .await;
    if let Err(e) = result {
        log::warn!("Logout request failed: {}", e);
    }

    session::clear_session(&LocalStorage);
    session::expire_cookies();

    if let Some(window) = window() {
        let _ = window.location().set_href("/");
    }
    end_logout();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::MemoryStore;
    use crate::session::{JWT_KEY, USER_ID_KEY, USER_NAME_KEY};

    #[test]
    fn login_response_reads_camel_case() {
        let login: LoginResponse =
            serde_json::from_str(r#"{"jwt":"abc","userId":31,"username":"a@b.co"}"#).unwrap();
        assert_eq!(login.user_id, UserId::Number(31));
        assert_eq!(login.username, "a@b.co");

        let login: LoginResponse =
            serde_json::from_str(r#"{"jwt":"abc","userId":"u-31"}"#).unwrap();
        assert_eq!(login.user_id.to_string(), "u-31");
        assert_eq!(login.username, "");
    }

    #[test]
    fn successful_login_fills_storage() {
        let store = MemoryStore::default();
        let status = finish_email_login(
            &store,
            Ok(LoginResponse {
                user_id: UserId::Number(8),
                username: "nurse@careloop.ai".into(),
                jwt: "jwt-token".into(),
            }),
        );
        assert_eq!(status, LoginStatus::Success);
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("8"));
        assert_eq!(store.get(USER_NAME_KEY).as_deref(), Some("nurse@careloop.ai"));
        assert_eq!(store.get(JWT_KEY).as_deref(), Some("jwt-token"));
    }

    #[test]
    fn network_failure_leaves_storage_untouched() {
        let store = MemoryStore::default();
        store.set("theme", "dark").unwrap();
        let status = finish_email_login(&store, Err(ApiError::Network("offline".into())));
        assert_eq!(status, LoginStatus::Error(LOGIN_FAILED_MESSAGE.to_string()));
        let items = store.items.borrow();
        assert_eq!(items.len(), 1);
        assert_eq!(items.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn only_one_logout_runs_at_a_time() {
        assert!(try_begin_logout());
        assert!(!try_begin_logout());
        end_logout();
        assert!(try_begin_logout());
        end_logout();
    }

    #[test]
    fn google_url_points_at_backend() {
        assert!(google_authorization_url().ends_with("/oauth2/authorization/google"));
    }
}
