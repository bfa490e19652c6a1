use crate::models::SessionUser;
use wasm_bindgen::JsCast;

pub(crate) const TOKEN_COOKIE: &str = "token";
pub(crate) const USER_KEY: &str = "user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
}

pub(crate) fn save_user_to_storage(user: &SessionUser) {
    if let Ok(json) = serde_json::to_string(user) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(USER_KEY, &json);
        }
    }
}

pub(crate) fn load_user_from_storage() -> Option<SessionUser> {
    let json = local_storage()?.get_item(USER_KEY).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn remove_user_from_storage() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(USER_KEY);
    }
}

/// Milliseconds since epoch at which a login for `expires_in_mins` ends.
pub(crate) fn expiry_ms(now_ms: f64, expires_in_mins: u32) -> f64 {
    now_ms + f64::from(expires_in_mins) * 60_000.0
}

pub(crate) fn format_cookie(name: &str, value: &str, expires_utc: &str) -> String {
    format!(
        "{}={}; expires={}; path=/",
        name,
        urlencoding::encode(value),
        expires_utc
    )
}

/// Looks `name` up in a `document.cookie` style header.
pub(crate) fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        if k != name {
            return None;
        }
        urlencoding::decode(v).ok().map(|v| v.into_owned())
    })
}

fn write_cookie(name: &str, value: &str, expires_at_ms: f64) {
    let Some(doc) = html_document() else {
        return;
    };
    let expires = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(expires_at_ms))
        .to_utc_string()
        .as_string()
        .unwrap_or_default();
    let _ = doc.set_cookie(&format_cookie(name, value, &expires));
}

pub(crate) fn write_token_cookie(token: &str, expires_at_ms: f64) {
    write_cookie(TOKEN_COOKIE, token, expires_at_ms);
}

/// Empty value with an expiry of "now": the browser drops the cookie.
pub(crate) fn expire_token_cookie(now_ms: f64) {
    write_cookie(TOKEN_COOKIE, "", now_ms);
}

pub(crate) fn read_token_cookie() -> Option<String> {
    let header = html_document()?.cookie().ok()?;
    cookie_value(&header, TOKEN_COOKIE).filter(|t| !t.is_empty())
}
