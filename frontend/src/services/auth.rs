use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use super::config::ClientConfig;
use super::logging::Logger;

/// Who is signed in, as remembered in local storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

/// Access to the bearer token kept in browser local storage.
///
/// The token is stored as a raw string and read again before every request,
/// so a token cleared by one part of the app is gone for all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    token_key: String,
    identity_key: String,
}

impl AuthSession {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            token_key: config.token_storage_key.clone(),
            identity_key: config.identity_storage_key.clone(),
        }
    }

    pub fn token(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(&self.token_key)
            .ok()
            .flatten()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        LocalStorage::get(&self.identity_key).ok()
    }

    pub fn sign_in(&self, token: &str, identity: &Identity) -> Result<(), String> {
        let token = token.trim();
        if token.is_empty() {
            return Err("Enter an access token".to_string());
        }

        LocalStorage::raw()
            .set_item(&self.token_key, token)
            .map_err(|_| "Could not store the access token".to_string())?;
        LocalStorage::set(&self.identity_key, identity)
            .map_err(|e| format!("Could not store the identity: {}", e))?;

        Logger::info_with_component("auth-session", &format!("Signed in as {}", identity.name));
        Ok(())
    }

    /// Forget the token and identity.
    pub fn clear(&self) {
        LocalStorage::delete(&self.token_key);
        LocalStorage::delete(&self.identity_key);
        Logger::info_with_component("auth-session", "Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn session() -> AuthSession {
        AuthSession {
            token_key: "test.accessToken".to_string(),
            identity_key: "test.member".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_sign_in_and_clear() {
        let session = session();
        session.clear();
        assert!(!session.is_signed_in());

        let identity = Identity { name: "Kim".to_string() };
        session.sign_in(" abc.def ", &identity).unwrap();
        assert_eq!(session.token(), Some("abc.def".to_string()));
        assert_eq!(session.bearer(), Some("Bearer abc.def".to_string()));
        assert_eq!(session.identity(), Some(identity));

        session.clear();
        assert_eq!(session.token(), None);
        assert_eq!(session.identity(), None);
    }

    #[wasm_bindgen_test]
    fn test_empty_token_is_rejected() {
        let session = session();
        session.clear();
        let identity = Identity { name: "Lee".to_string() };
        assert!(session.sign_in("   ", &identity).is_err());
        assert!(!session.is_signed_in());
    }
}
