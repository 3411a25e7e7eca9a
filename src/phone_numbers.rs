//! Phone numbers owned by the account.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::VapiClient;
use crate::error::CoraError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    pub id: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VapiClient {
    /// List phone numbers visible to the account.
    ///
    /// `filters` are forwarded as query parameters (e.g. `("limit", "10")`).
    pub async fn list_phone_numbers(
        &self,
        filters: &[(&str, &str)],
    ) -> Result<Vec<PhoneNumber>, CoraError> {
        self.get_json("phone-number", filters).await
    }

    pub async fn get_phone_number(&self, phone_number_id: &str) -> Result<PhoneNumber, CoraError> {
        self.get_json(&format!("phone-number/{phone_number_id}"), &[])
            .await
    }
}
