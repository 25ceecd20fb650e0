//! Tenant domain entity
//!
//! A tenant owns exactly one knowledge base. The id doubles as the file stem
//! of that knowledge base on disk, so it is restricted to a safe alphabet.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of a tenant id
pub const MAX_TENANT_ID_LEN: usize = 128;

/// Validated tenant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::Validation("tenant_id must not be empty".into()));
        }
        if raw.len() > MAX_TENANT_ID_LEN {
            return Err(DomainError::Validation(format!(
                "tenant_id must be at most {} characters",
                MAX_TENANT_ID_LEN
            )));
        }

        let mut chars = raw.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !first_ok || !rest_ok {
            return Err(DomainError::Validation(format!(
                "Invalid tenant_id '{}': use letters, digits, '-', '_' or '.' and start with a letter or digit",
                raw
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TenantId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TenantId> for String {
    fn from(id: TenantId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
