//! Session and token types.

use serde::{Deserialize, Serialize};
use std::fmt;
use vitrine_commerce::{ShippingInfo, UserId};

/// An opaque bearer token issued by the API at login.
///
/// The Debug impl is redacted so the token never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(..)")
    }
}

impl From<String> for SessionToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An authenticated session: the token plus the profile fields the
/// storefront uses to prefill the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: SessionToken,
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AuthSession {
    /// Create a session with just the identity fields.
    pub fn new(token: SessionToken, user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            token,
            user_id,
            email: email.into(),
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            phone: None,
        }
    }

    /// Shipping form data prefilled from the stored profile.
    ///
    /// Missing profile fields come back blank; the form still requires
    /// the user to complete them before submission.
    pub fn prefill_shipping(&self) -> ShippingInfo {
        ShippingInfo {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            email: self.email.clone(),
            address: self.address.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
            state: self.state.clone().unwrap_or_default(),
            zip_code: self.zip_code.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret-bearer-token");
        assert_eq!(format!("{token:?}"), "SessionToken(..)");
    }

    #[test]
    fn test_prefill_shipping_uses_profile() {
        let mut session = AuthSession::new(
            SessionToken::new("tok"),
            UserId::new("user-1"),
            "ada@example.com",
        );
        session.first_name = Some("Ada".into());
        session.city = Some("Lagos".into());

        let prefill = session.prefill_shipping();
        assert_eq!(prefill.first_name, "Ada");
        assert_eq!(prefill.email, "ada@example.com");
        assert_eq!(prefill.city, "Lagos");
        assert!(prefill.phone.is_empty());
        assert!(!prefill.is_complete());
    }
}
