use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub guardian_email: String,
    pub created_at: DateTime<Utc>,
}

impl Child {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: NaiveDate,
    pub guardian_email: String,
}

impl CreateChildRequest {
    pub fn validate(&self, today: NaiveDate) -> CareResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CareError::Validation(
                "Child first and last name are required".to_string(),
            ));
        }
        if self.birthdate > today {
            return Err(CareError::Validation(
                "Birthdate cannot be in the future".to_string(),
            ));
        }
        let email = self.guardian_email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(CareError::Validation(format!(
                "Invalid guardian email '{}'",
                email
            ))),
        }
    }
}
