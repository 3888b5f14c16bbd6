use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};

/// Highest accepted per-session rate: one million currency units.
pub const MAX_SESSION_RATE_CENTS: i64 = 100_000_000;

/// A care offering (e.g. half-day preschool) billed per attended session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub session_rate_cents: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub session_rate_cents: i64,
}

impl CreateServiceRequest {
    pub fn validate(&self) -> CareResult<()> {
        if self.name.trim().is_empty() {
            return Err(CareError::Validation("Service name is required".to_string()));
        }
        if self.session_rate_cents < 0 {
            return Err(CareError::Validation(
                "session_rate_cents cannot be negative".to_string(),
            ));
        }
        if self.session_rate_cents > MAX_SESSION_RATE_CENTS {
            return Err(CareError::Validation(format!(
                "session_rate_cents cannot exceed {}",
                MAX_SESSION_RATE_CENTS
            )));
        }
        Ok(())
    }
}
