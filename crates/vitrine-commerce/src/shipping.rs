//! Shipping form data for checkout.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Shipping information collected from the checkout form.
///
/// All fields are required before submission; there are no cross-field
/// rules beyond presence. Field names serialize in the order API's
/// camelCase shape so the struct doubles as the `shippingInfo` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl ShippingInfo {
    /// Check that every field is present and non-blank.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Validate, reporting every missing field at once.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(missing.join(", ")))
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let fields: [(&'static str, &str); 8] = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip code", &self.zip_code),
            ("phone", &self.phone),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            address: "14 Marina Rd".into(),
            city: "Lagos".into(),
            state: "Lagos".into(),
            zip_code: "101001".into(),
            phone: "+2348012345678".into(),
        }
    }

    #[test]
    fn test_complete_info_validates() {
        assert!(complete().is_complete());
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let mut info = complete();
        info.email = String::new();
        info.phone = "   ".into();

        let err = info.validate().unwrap_err();
        match err {
            CommerceError::MissingFields(list) => {
                assert!(list.contains("email"));
                assert!(list.contains("phone"));
                assert!(!list.contains("city"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(complete()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("zipCode").is_some());
        assert!(json.get("zip_code").is_none());
    }
}
