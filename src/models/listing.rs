//! Listing response shape shared by namespace and group enumeration.

use serde::Deserialize;

/// `{"data":{"keys":[...]}}`. Missing members decode as an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Option<ListData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListData {
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

impl ListResponse {
    pub fn into_keys(self) -> Vec<String> {
        self.data.and_then(|d| d.keys).unwrap_or_default()
    }
}
