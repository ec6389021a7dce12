use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::products::model::ProductRecord;
use crate::profile::model::{BodyStats, DailyGoals, LogEntry};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub goals: DailyGoals,
    pub history: Vec<ProductRecord>,
    pub log: Vec<LogEntry>,
    pub stats: Option<BodyStats>,
}

#[derive(Debug, Deserialize)]
pub struct AddLogEntryRequest {
    pub product: ProductRecord,
    pub quantity: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TotalsQuery {
    /// UTC calendar day, `YYYY-MM-DD`. Whole log when absent.
    pub date: Option<String>,
}
