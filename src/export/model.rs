use serde::Serialize;

/// Flat row written by the CSV and JSON exporters.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UtilizationExport {
    pub id: i64,
    pub employee: String,
    pub utilization_type: String,
    pub first_day: String,
    pub last_day: String,
    pub verified: bool,
    pub updated_at: String,
}
