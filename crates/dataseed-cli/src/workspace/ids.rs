use chrono::Utc;

/// `YYYY-MM-DD__<kind>_<8 hex chars>`
pub fn new_artifact_id(kind: &str) -> String {
    let short = uuid::Uuid::new_v4().simple().to_string();
    format!("{}__{kind}_{}", Utc::now().format("%Y-%m-%d"), &short[..8])
}
