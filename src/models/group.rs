//! Identity group records and the flattened export row.

use crate::constants;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw `GET /v1/identity/group/{id}` envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupResponse {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Group detail as returned by the service.
///
/// Backend records are heterogeneous (external vs internal groups, partially
/// populated entries), so fields stay untyped until [`GroupRecord::resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRecord {
    pub name: Option<Value>,
    pub policies: Option<Value>,
}

impl GroupRecord {
    /// Returns `None` when the envelope carries no usable data.
    pub fn from_response(resp: GroupResponse) -> Option<Self> {
        let mut data = resp.data.filter(|d| !d.is_empty())?;
        Some(Self {
            name: data.remove("name"),
            policies: data.remove("policies"),
        })
    }

    /// Apply field defaulting: the id stands in for a missing name, a missing
    /// policy field becomes an empty list, and a non-list policy field becomes
    /// a single entry holding its string form.
    pub fn resolve(self, group_id: &str) -> ResolvedGroup {
        let name = match self.name {
            None | Some(Value::Null) => group_id.to_string(),
            Some(v) => value_text(v),
        };
        let policies = match self.policies {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().map(value_text).collect(),
            Some(other) => vec![value_text(other)],
        };
        ResolvedGroup { name, policies }
    }
}

/// A group with its name and policies settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub name: String,
    pub policies: Vec<String>,
}

fn value_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// One line of the export: namespace, group name, joined policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub namespace: String,
    pub group_name: String,
    pub policies: String,
}

impl ExportRow {
    pub fn new(namespace: &str, group: ResolvedGroup) -> Self {
        Self {
            namespace: namespace.to_string(),
            group_name: group.name,
            policies: group.policies.join(constants::POLICY_SEPARATOR),
        }
    }

    pub fn fields(&self) -> [&str; 3] {
        [&self.namespace, &self.group_name, &self.policies]
    }
}
