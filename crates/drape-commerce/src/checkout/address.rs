//! Address types.

use crate::ids::{AddressId, UserId};
use serde::{Deserialize, Serialize};

/// A delivery address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Address ID (None for unsaved addresses).
    #[serde(default)]
    pub id: Option<AddressId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Recipient name.
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub phone: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Address {
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id: None,
            name: name.into(),
            street: street.into(),
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            phone: phone.into(),
            is_default: false,
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.postal_code
        )
    }

    /// Format as multi-line.
    pub fn multi_line(&self) -> String {
        [
            self.name.clone(),
            self.street.clone(),
            format!("{}, {} {}", self.city, self.state, self.postal_code),
            self.phone.clone(),
        ]
        .join("\n")
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("name", &self.name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postal code", &self.postal_code),
            ("phone", &self.phone),
        ];
        fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
