//! Client-side session flags.
//!
//! The backend hands identity back either through a JSON login response
//! (written to local storage) or through cookies after the Google OAuth
//! redirect. Local storage wins; cookies are the fallback.

use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use crate::api::auth::LoginResponse;
use crate::error::ApiError;

pub const USER_ID_KEY: &str = "userId";
pub const USER_NAME_KEY: &str = "userName";
pub const JWT_KEY: &str = "jwt";
pub const USER_PICTURE_KEY: &str = "userPicture";

const STORAGE_KEYS: [&str; 4] = [USER_ID_KEY, USER_NAME_KEY, JWT_KEY, USER_PICTURE_KEY];
const EXPIRED_COOKIES: [&str; 4] = [USER_ID_KEY, USER_NAME_KEY, USER_PICTURE_KEY, "JSESSIONID"];

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Every call degrades to "nothing stored" when storage
/// is unavailable (private mode, sandboxed iframes).
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let storage = Self::storage()
            .ok_or_else(|| ApiError::Storage("local storage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| ApiError::Storage(format!("could not store {}", key)))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserData {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl UserData {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("User")
    }

    /// Stored picture, or a generated initials avatar in brand colours.
    pub fn avatar_url(&self) -> String {
        match self.picture.as_deref().filter(|p| !p.is_empty()) {
            Some(picture) => percent_decoded(picture),
            None => fallback_avatar_url(self.display_name()),
        }
    }
}

pub fn fallback_avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=F9D000&color=000",
        urlencoding::encode(name)
    )
}

/// Looks `name` up in a `document.cookie` style string, percent-decoding the value.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key.trim() != name {
            return None;
        }
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(percent_decoded(value))
    })
}

fn html_document() -> Option<HtmlDocument> {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
}

pub fn document_cookies() -> String {
    html_document()
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub fn is_authenticated(store: &impl KeyValueStore, cookies: &str) -> bool {
    non_empty(store.get(USER_ID_KEY)).is_some() || parse_cookie(cookies, USER_ID_KEY).is_some()
}

pub fn user_data(store: &impl KeyValueStore, cookies: &str) -> UserData {
    let stored = UserData {
        user_id: non_empty(store.get(USER_ID_KEY)),
        name: non_empty(store.get(USER_NAME_KEY)),
        picture: non_empty(store.get(USER_PICTURE_KEY)),
    };
    if stored != UserData::default() {
        return stored;
    }
    UserData {
        user_id: parse_cookie(cookies, USER_ID_KEY),
        name: parse_cookie(cookies, USER_NAME_KEY),
        picture: parse_cookie(cookies, USER_PICTURE_KEY),
    }
}

fn percent_decoded(value: &str) -> String {
    urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Writes all three login keys or none: a partial write is rolled back.
pub fn store_login(store: &impl KeyValueStore, login: &LoginResponse) -> Result<(), ApiError> {
    let written = store
        .set(USER_ID_KEY, &login.user_id.to_string())
        .and_then(|_| store.set(USER_NAME_KEY, &percent_decoded(&login.username)))
        .and_then(|_| store.set(JWT_KEY, &login.jwt));
    if written.is_err() {
        clear_session(store);
    }
    written
}

/// Copies the `userId` cookie set by the OAuth redirect into storage.
pub fn adopt_cookie_login(store: &impl KeyValueStore, cookies: &str) -> Result<bool, ApiError> {
    match parse_cookie(cookies, USER_ID_KEY) {
        Some(user_id) => {
            store.set(USER_ID_KEY, &user_id)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn clear_session(store: &impl KeyValueStore) {
    for key in STORAGE_KEYS {
        store.remove(key);
    }
}

pub fn expire_cookies() {
    if let Some(document) = html_document() {
        for name in EXPIRED_COOKIES {
            let _ = document.set_cookie(&format!(
                "{}=; path=/; expires=Thu, 01 Jan 1970 00:00:01 GMT;",
                name
            ));
        }
    }
}

pub fn is_logged_in() -> bool {
    is_authenticated(&LocalStorage, &document_cookies())
}

pub fn current_user() -> UserData {
    user_data(&LocalStorage, &document_cookies())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::auth::UserId;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) items: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) {
            self.items.borrow_mut().remove(key);
        }
    }

    #[test]
    fn cookie_lookup_trims_and_decodes() {
        let cookies = "theme=dark; userName=Jane%20Doe ;userId=42";
        assert_eq!(parse_cookie(cookies, "userName").as_deref(), Some("Jane Doe"));
        assert_eq!(parse_cookie(cookies, "userId").as_deref(), Some("42"));
        assert_eq!(parse_cookie(cookies, "jwt"), None);
        assert_eq!(parse_cookie("userId=", "userId"), None);
        assert_eq!(parse_cookie("", "userId"), None);
    }

    #[test]
    fn storage_beats_cookies() {
        let store = MemoryStore::default();
        store.set(USER_ID_KEY, "7").unwrap();
        store.set(USER_NAME_KEY, "Asha").unwrap();
        let data = user_data(&store, "userId=99; userName=Cookie");
        assert_eq!(data.user_id.as_deref(), Some("7"));
        assert_eq!(data.name.as_deref(), Some("Asha"));
        assert!(is_authenticated(&store, ""));
    }

    #[test]
    fn cookie_fallback_when_storage_is_empty() {
        let store = MemoryStore::default();
        assert!(!is_authenticated(&store, "theme=dark"));
        assert!(is_authenticated(&store, "userId=99"));
        let data = user_data(&store, "userId=99; userPicture=https%3A%2F%2Fimg");
        assert_eq!(data.user_id.as_deref(), Some("99"));
        assert_eq!(data.picture.as_deref(), Some("https://img"));
    }

    #[test]
    fn empty_stored_id_is_not_a_session() {
        let store = MemoryStore::default();
        store.set(USER_ID_KEY, "").unwrap();
        assert!(!is_authenticated(&store, ""));
    }

    #[test]
    fn login_is_stored_and_cleared() {
        let store = MemoryStore::default();
        let login = LoginResponse {
            user_id: UserId::Number(12),
            username: "Asha%20Rao".into(),
            jwt: "token".into(),
        };
        store_login(&store, &login).unwrap();
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("12"));
        assert_eq!(store.get(USER_NAME_KEY).as_deref(), Some("Asha Rao"));
        assert_eq!(store.get(JWT_KEY).as_deref(), Some("token"));

        clear_session(&store);
        assert!(store.items.borrow().is_empty());
    }

    #[test]
    fn undecodable_username_is_stored_raw() {
        let store = MemoryStore::default();
        let login = LoginResponse {
            user_id: UserId::Number(3),
            username: "caf%FF".into(),
            jwt: "t".into(),
        };
        store_login(&store, &login).unwrap();
        assert_eq!(store.get(USER_NAME_KEY).as_deref(), Some("caf%FF"));
    }

    /// Accepts writes until `fail_on` is reached.
    struct FullStore {
        inner: MemoryStore,
        fail_on: &'static str,
    }

    impl KeyValueStore for FullStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
            if key == self.fail_on {
                return Err(ApiError::Storage("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_login_write_leaves_no_session() {
        for fail_on in [USER_NAME_KEY, JWT_KEY] {
            let store = FullStore { inner: MemoryStore::default(), fail_on };
            let login = LoginResponse {
                user_id: UserId::Number(9),
                username: "asha".into(),
                jwt: "token".into(),
            };
            assert!(store_login(&store, &login).is_err());
            assert!(!is_authenticated(&store, ""), "session flag left after {fail_on} failed");
            assert!(store.inner.items.borrow().is_empty());
        }
    }

    #[test]
    fn oauth_cookie_is_adopted() {
        let store = MemoryStore::default();
        assert!(!adopt_cookie_login(&store, "a=b").unwrap());
        assert!(adopt_cookie_login(&store, "userId=5").unwrap());
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("5"));
    }

    #[test]
    fn avatar_falls_back_to_initials() {
        let user = UserData { name: Some("Ravi K".into()), ..Default::default() };
        assert_eq!(
            user.avatar_url(),
            "https://ui-avatars.com/api/?name=Ravi%20K&background=F9D000&color=000"
        );
        assert_eq!(UserData::default().display_name(), "User");
    }
}
