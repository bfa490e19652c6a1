use crate::models::{Entry, EntryFields, EntryId, SessionUser};
use leptos::logging::warn;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    /// Servers usually answer `{"message": "..."}`; surface that text when present.
    pub(crate) fn http(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        let message = if detail.is_empty() {
            format!("Request failed with status code {}", status.as_u16())
        } else {
            detail
        };

        Self {
            kind: ApiErrorKind::Http,
            message,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub collection_url: String,
    pub auth_url: String,
    pub toast_ms: i32,
}

pub(crate) const DEFAULT_COLLECTION_URL: &str = "http://localhost:3001";
pub(crate) const DEFAULT_AUTH_URL: &str = "https://dummyjson.com/auth";
pub(crate) const DEFAULT_TOAST_MS: i32 = 5000;

impl EnvConfig {
    pub fn new() -> Self {
        let mut cfg = Self::defaults();

        // `window.ENV.COLLECTION_URL` style is preferred; lower-case keys are accepted too.
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return cfg;
        };

        let read = |upper: &str, lower: &str| -> Option<wasm_bindgen::JsValue> {
            [upper, lower].into_iter().find_map(|k| {
                js_sys::Reflect::get(&env, &k.into())
                    .ok()
                    .filter(|v| !v.is_undefined() && !v.is_null())
            })
        };

        if let Some(url) = read("COLLECTION_URL", "collection_url").and_then(|v| v.as_string()) {
            cfg.collection_url = url;
        }
        if let Some(url) = read("AUTH_URL", "auth_url").and_then(|v| v.as_string()) {
            cfg.auth_url = url;
        }
        if let Some(ms) = read("TOAST_MS", "toast_ms").and_then(|v| v.as_f64()) {
            cfg.toast_ms = ms as i32;
        }

        cfg
    }

    pub fn defaults() -> Self {
        Self {
            collection_url: DEFAULT_COLLECTION_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
    pub expires_in_mins: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    /// Newer auth backends call this `accessToken`.
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(flatten)]
    pub user: SessionUser,
}

/// The remote collection, as seen by the views.
#[allow(async_fn_in_trait)]
pub(crate) trait EntryService {
    async fn list_entries(&self) -> ApiResult<Vec<Entry>>;
    async fn create_entry(&self, fields: &EntryFields) -> ApiResult<Option<Entry>>;
    async fn update_entry(&self, id: &EntryId, fields: &EntryFields) -> ApiResult<Option<Entry>>;
    async fn delete_entry(&self, id: &EntryId) -> ApiResult<()>;
}

const COLLECTION_PATH: &str = "/tables";

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) collection_url: String,
    pub(crate) auth_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(collection_url: String, auth_url: String) -> Self {
        Self {
            collection_url,
            auth_url,
            token: None,
        }
    }

    /// Client for the configured endpoints, with the token cookie (if any) attached.
    pub fn from_config(cfg: &EnvConfig) -> Self {
        let mut client = Self::new(cfg.collection_url.clone(), cfg.auth_url.clone());
        client.token = crate::storage::read_token_cookie();
        client
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub(crate) fn entries_url(&self) -> String {
        format!("{}{}", self.collection_url.trim_end_matches('/'), COLLECTION_PATH)
    }

    pub(crate) fn entry_url(&self, id: &EntryId) -> String {
        format!(
            "{}/{}",
            self.entries_url(),
            urlencoding::encode(&id.to_string())
        )
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth_url.trim_end_matches('/'), path)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&impl Serialize>,
    ) -> ApiResult<reqwest::Response> {
        let client = reqwest::Client::new();
        let mut req = client.request(method, url);
        if let Some(header) = self.get_auth_header() {
            req = req.header("Authorization", header);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status.as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, &body))
        }
    }

    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&impl Serialize>,
    ) -> ApiResult<T> {
        let res = self.send(method, url, body).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// The mutation endpoints echo the stored entry, but nothing depends on it.
    async fn echoed_entry(res: reqwest::Response) -> Option<Entry> {
        match res.json::<Entry>().await {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("[api] ignoring unparsable mutation response: {e}");
                None
            }
        }
    }

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        // The login endpoint does not take the stale token along.
        let anonymous = Self {
            token: None,
            ..self.clone()
        };
        anonymous
            .request_json(Method::POST, self.auth_endpoint("/login"), Some(req))
            .await
    }

    pub async fn current_user(&self) -> ApiResult<SessionUser> {
        self.request_json(Method::GET, self.auth_endpoint("/me"), None::<&()>)
            .await
    }
}

impl EntryService for ApiClient {
    async fn list_entries(&self) -> ApiResult<Vec<Entry>> {
        self.request_json(Method::GET, self.entries_url(), None::<&()>)
            .await
    }

    async fn create_entry(&self, fields: &EntryFields) -> ApiResult<Option<Entry>> {
        let res = self
            .send(Method::POST, self.entries_url(), Some(fields))
            .await?;
        Ok(Self::echoed_entry(res).await)
    }

    async fn update_entry(&self, id: &EntryId, fields: &EntryFields) -> ApiResult<Option<Entry>> {
        let res = self.send(Method::PUT, self.entry_url(id), Some(fields)).await?;
        Ok(Self::echoed_entry(res).await)
    }

    async fn delete_entry(&self, id: &EntryId) -> ApiResult<()> {
        self.send(Method::DELETE, self.entry_url(id), None::<&()>)
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:3001/".to_string(),
            "https://dummyjson.com/auth".to_string(),
        )
    }

    #[test]
    fn test_collection_urls() {
        let c = client();
        assert_eq!(c.entries_url(), "http://localhost:3001/tables");
        assert_eq!(c.entry_url(&EntryId::from(7)), "http://localhost:3001/tables/7");
        assert_eq!(
            c.entry_url(&EntryId::from("a b")),
            "http://localhost:3001/tables/a%20b"
        );
    }

    #[test]
    fn test_auth_header() {
        let mut c = client();
        assert!(c.get_auth_header().is_none());
        assert!(!c.is_authenticated());

        c.set_token("T".to_string());
        assert_eq!(c.get_auth_header().as_deref(), Some("Bearer T"));
        assert!(c.is_authenticated());

        c.logout();
        assert!(!c.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let mut c = client();
        c.set_token(String::new());
        assert!(!c.is_authenticated());
    }

    #[test]
    fn test_login_request_contract_serialize() {
        let req = LoginRequest {
            username: "a@b.com".to_string(),
            password: "x".to_string(),
            expires_in_mins: 30,
        };
        let v = serde_json::to_value(&req).expect("should serialize");
        assert_eq!(
            v,
            serde_json::json!({"username": "a@b.com", "password": "x", "expiresInMins": 30})
        );
    }

    #[test]
    fn test_login_response_contract_deserialize() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"token":"T","id":1,"username":"a"}"#)
                .expect("login response should parse");
        assert_eq!(parsed.token, "T");
        assert_eq!(parsed.user.username.as_deref(), Some("a"));

        let newer: LoginResponse =
            serde_json::from_str(r#"{"accessToken":"A","refreshToken":"R"}"#)
                .expect("accessToken alias should parse");
        assert_eq!(newer.token, "A");
    }

    #[test]
    fn test_http_error_prefers_server_message() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message":"Invalid credentials"}"#,
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "Invalid credentials");

        let bare = ApiError::http(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(bare.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn test_env_defaults() {
        let cfg = EnvConfig::defaults();
        assert_eq!(cfg.collection_url, DEFAULT_COLLECTION_URL);
        assert_eq!(cfg.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(cfg.toast_ms, 5000);
    }
}
