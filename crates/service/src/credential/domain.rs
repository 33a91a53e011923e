use serde::{Deserialize, Serialize};

use crate::validation::{FieldRules, Rule, Validate, Value};

/// Persisted credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub id: i32,
    pub name: String,
    pub path: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Validate for Credential {
    fn rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new("name", Value::Text(&self.name), &[Rule::Required]),
            FieldRules::new("path", Value::Text(&self.path), &[Rule::Required]),
            FieldRules::new("createdAt", Value::Text(&self.created_at), &[Rule::Required]),
            FieldRules::new("updatedAt", Value::Text(&self.updated_at), &[Rule::Required]),
        ]
    }
}

/// Create/update input. Missing fields decode as empty and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialData {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub id: i32,
    pub name: String,
    pub path: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Credential> for CredentialResponse {
    fn from(c: Credential) -> Self {
        Self { id: c.id, name: c.name, path: c.path, created_at: c.created_at, updated_at: c.updated_at }
    }
}
