use std::collections::HashMap;

use chrono::{DateTime, Utc};
use historian_core::CallerIdentity;
use historian_protocol::alertstate::AlertStateQueryRequest;
use serde::Serialize;

/// Fully concrete query handed to the engine.
///
/// Dimensions the caller left out hold their zero value: empty strings,
/// `0` for ids and the limit (unbounded), the Unix epoch for `from`/`to`
/// and an empty label map, which the engine reads as "no label filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub org_id: i64,
    pub signed_in_user: CallerIdentity,
    #[serde(rename = "ruleUID")]
    pub rule_uid: String,
    #[serde(rename = "dashboardUID")]
    pub dashboard_uid: String,
    #[serde(rename = "panelID")]
    pub panel_id: i64,
    pub previous: String,
    pub current: String,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub limit: i64,
    pub labels: HashMap<String, String>,
}

impl HistoryQuery {
    /// Query scoped to the caller with every filter at its zero value.
    pub fn for_caller(caller: &CallerIdentity) -> Self {
        Self {
            org_id: caller.org_id,
            signed_in_user: caller.clone(),
            rule_uid: String::new(),
            dashboard_uid: String::new(),
            panel_id: 0,
            previous: String::new(),
            current: String::new(),
            from: DateTime::<Utc>::UNIX_EPOCH,
            to: DateTime::<Utc>::UNIX_EPOCH,
            limit: 0,
            labels: HashMap::new(),
        }
    }
}

/// Merges the optional request fields into a query for `caller`.
///
/// The tenant always comes from `caller`; nothing in the request body can
/// change it.
pub fn build_history_query(req: &AlertStateQueryRequest, caller: &CallerIdentity) -> HistoryQuery {
    let mut query = HistoryQuery::for_caller(caller);

    if let Some(rule_uid) = &req.rule_uid {
        query.rule_uid = rule_uid.clone();
    }
    if let Some(dashboard_uid) = &req.dashboard_uid {
        query.dashboard_uid = dashboard_uid.clone();
    }
    if let Some(panel_id) = req.panel_id {
        query.panel_id = panel_id;
    }
    if let Some(previous) = req.previous {
        query.previous = previous.as_str().to_string();
    }
    if let Some(current) = req.current {
        query.current = current.as_str().to_string();
    }
    if let Some(from) = req.from {
        query.from = from_epoch_seconds(from);
    }
    if let Some(to) = req.to {
        query.to = from_epoch_seconds(to);
    }
    if let Some(limit) = req.limit {
        query.limit = limit;
    }
    if let Some(labels) = &req.labels {
        query.labels = labels.clone();
    }

    query
}

/// Seconds outside chrono's range saturate to its bounds.
fn from_epoch_seconds(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
