use crate::api::{LoginRequest, LoginResponse};
use crate::storage::{
    expire_token_cookie, expiry_ms, remove_user_from_storage, save_user_to_storage,
    write_token_cookie,
};

pub(crate) const LOGIN_EXPIRES_IN_MINS: u32 = 30;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoginErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

pub(crate) fn validate_login(username: &str, password: &str) -> LoginErrors {
    let username = if username.trim().is_empty() {
        Some("Username is required")
    } else {
        None
    };

    let password = if password.is_empty() {
        Some("Password is required")
    } else {
        None
    };

    LoginErrors { username, password }
}

pub(crate) fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
        expires_in_mins: LOGIN_EXPIRES_IN_MINS,
    }
}

/// Token cookie to write after a successful login.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionCookie {
    pub token: String,
    pub expires_at_ms: f64,
}

/// `None` when the service answered without a usable token.
pub(crate) fn session_cookie(
    res: &LoginResponse,
    req: &LoginRequest,
    now_ms: f64,
) -> Option<SessionCookie> {
    if res.token.trim().is_empty() {
        return None;
    }
    Some(SessionCookie {
        token: res.token.clone(),
        expires_at_ms: expiry_ms(now_ms, req.expires_in_mins),
    })
}

/// Persists the session markers. Returns whether navigation may proceed.
pub(crate) fn start_session(res: &LoginResponse, req: &LoginRequest, now_ms: f64) -> bool {
    let Some(cookie) = session_cookie(res, req, now_ms) else {
        return false;
    };
    write_token_cookie(&cookie.token, cookie.expires_at_ms);
    save_user_to_storage(&res.user);
    true
}

pub(crate) fn end_session(now_ms: f64) {
    remove_user_from_storage();
    expire_token_cookie(now_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_requires_both_fields() {
        let e = validate_login("", "");
        assert_eq!(e.username, Some("Username is required"));
        assert_eq!(e.password, Some("Password is required"));
        assert!(!e.is_empty());

        assert_eq!(validate_login("   ", "x").username, Some("Username is required"));
    }

    #[test]
    fn test_validation_accepts_handles_and_emails() {
        // The default auth service signs in with plain handles.
        assert!(validate_login("emilys", "emilyspass").is_empty());
        assert!(validate_login("a@b.com", "x").is_empty());
    }

    #[test]
    fn test_login_request_uses_thirty_minutes() {
        let req = login_request(" a@b.com ", "x");
        assert_eq!(req.username, "a@b.com");
        assert_eq!(req.password, "x");
        assert_eq!(req.expires_in_mins, 30);
    }

    #[test]
    fn test_session_cookie_expires_after_requested_minutes() {
        let req = login_request("a@b.com", "x");
        let res: LoginResponse =
            serde_json::from_str(r#"{"token":"T"}"#).expect("login response should parse");
        let now = 1_700_000_000_000.0;

        let cookie = session_cookie(&res, &req, now).expect("token present");
        assert_eq!(cookie.token, "T");
        assert_eq!(cookie.expires_at_ms, now + 30.0 * 60_000.0);
    }

    #[test]
    fn test_empty_token_blocks_navigation() {
        let req = login_request("a@b.com", "x");
        let res: LoginResponse =
            serde_json::from_str(r#"{"token":""}"#).expect("login response should parse");
        assert!(session_cookie(&res, &req, 0.0).is_none());
    }
}
