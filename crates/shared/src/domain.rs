use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ApplicationId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanHistory {
    pub loan_started: DateTime<Utc>,
    pub loan_ended: DateTime<Utc>,
    pub principle: f64,
    pub interest_rate: f64,
    pub interest: f64,
}

/// One loan application as served by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub loan_amount: f64,
    pub loan_type: String,
    pub email: String,
    pub company: String,
    pub date_created: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub avatar: String,
    #[serde(default)]
    pub loan_history: Vec<LoanHistory>,
}

impl Application {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
