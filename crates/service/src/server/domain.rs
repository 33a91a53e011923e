use serde::{Deserialize, Serialize};

use models::server::LOG_FORMAT_JSON;

use crate::validation::{FieldRules, Rule, Validate, Value};

/// Where a server keeps its logs and how they are encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogLocation {
    pub path: String,
    pub format: String,
}

/// Persisted server record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Server {
    pub id: i32,
    pub name: String,
    pub host: String,
    pub log_location: LogLocation,
    pub credential_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl Server {
    /// Overwrite every caller-controlled field (full replace).
    pub fn apply(&mut self, data: ServerData) {
        self.name = data.name;
        self.host = data.host;
        self.credential_id = data.credential_id;
        self.log_location = LogLocation { path: data.log_location.path, format: data.log_location.format };
    }
}

impl Validate for Server {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new("name", Value::Text(&self.name), &[Rule::Required]),
            FieldRules::new("host", Value::Text(&self.host), &[Rule::Required, Rule::HostnameOrIp]),
            FieldRules::new("logLocation.path", Value::Text(&self.log_location.path), &[Rule::Required]),
            FieldRules::new(
                "logLocation.format",
                Value::Text(&self.log_location.format),
                &[Rule::Required, Rule::Equals(LOG_FORMAT_JSON)],
            ),
            FieldRules::new("credentialId", Value::Id(self.credential_id), &[Rule::Required]),
            FieldRules::new("createdAt", Value::Text(&self.created_at), &[Rule::Required]),
            FieldRules::new("updatedAt", Value::Text(&self.updated_at), &[Rule::Required]),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogLocationModel {
    pub path: String,
    pub format: String,
}

/// Create/update input. Missing fields decode as empty and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerData {
    pub name: String,
    pub host: String,
    pub credential_id: i32,
    pub log_location: LogLocationModel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    pub id: i32,
    pub name: String,
    pub host: String,
    pub credential_id: i32,
    pub log_location: LogLocationModel,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Server> for ServerResponse {
    fn from(s: Server) -> Self {
        Self {
            id: s.id,
            name: s.name,
            host: s.host,
            credential_id: s.credential_id,
            log_location: LogLocationModel { path: s.log_location.path, format: s.log_location.format },
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
