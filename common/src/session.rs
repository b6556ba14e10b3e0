//! Explicit owner of the bearer token used by authenticated requests.
//!
//! Views receive an `AuthSession` instead of reading the token from browser
//! storage on their own, so the token is read and trimmed in one place.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<String>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session from a stored token; blank tokens give an anonymous session.
    pub fn from_token(token: Option<String>) -> Self {
        let mut session = Self::new();
        if let Some(token) = token {
            session.sign_in(token);
        }
        session
    }

    pub fn sign_in(&mut self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        self.token = (!token.is_empty()).then(|| token.to_string());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_not_sessions() {
        assert!(!AuthSession::from_token(Some("  ".to_string())).is_authenticated());
        assert!(!AuthSession::from_token(None).is_authenticated());
    }

    #[test]
    fn sign_in_trims_and_replaces_the_token() {
        let mut session = AuthSession::new();
        session.sign_in(" jwt ");
        assert_eq!(session.token(), Some("jwt"));
        session.sign_in("");
        assert_eq!(session.token(), None);
    }
}
