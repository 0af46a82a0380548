use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DataRange {
    pub earliest_due: Option<String>,
    pub latest_due: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestRow {
    pub request_id: String,
    pub title: String,
    pub amount: f64,
    pub currency: String,
    pub payment_type: String,
    pub payment_status: String,
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub due_today: bool,
    pub overdue: bool,
    pub upcoming: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestListData {
    pub filter: String,
    pub as_of: String,
    pub total_active: i64,
    pub returned: i64,
    pub rows: Vec<RequestRow>,
    pub data_range: DataRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct DueWindowData {
    pub window: String,
    pub as_of: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_days: Option<i64>,
    pub returned: i64,
    pub rows: Vec<RequestRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeData {
    pub as_of: String,
    pub badge_count: i64,
    pub required_unpaid_total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportNextStep {
    pub label: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub dry_run: bool,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    pub message: String,
    pub summary: ImportSummary,
    pub next_step: ImportNextStep,
    pub source_used: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListItem {
    pub import_id: String,
    pub status: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverted_at: Option<String>,
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
    pub inserted: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportListData {
    pub rows: Vec<ImportListItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportUndoData {
    pub import_id: String,
    pub message: String,
    pub rows_reverted: i64,
}
