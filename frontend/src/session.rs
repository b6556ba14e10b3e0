//! Loads the dashboard's `AuthSession` from browser storage.
//!
//! Read once at startup; the session is then handed down as a Yew context.

use common::session::AuthSession;

pub const TOKEN_STORAGE_KEY: &str = "authToken";

pub fn load_session() -> AuthSession {
    let token = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten());
    if token.is_none() {
        gloo_console::warn!("No auth token in localStorage, uploads are disabled");
    }
    AuthSession::from_token(token)
}
