use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Evaluation state of an alert rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    Normal,
    Alerting,
    Pending,
    NoData,
    Error,
    Recovering,
}

impl AlertState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertState::Normal => "normal",
            AlertState::Alerting => "alerting",
            AlertState::Pending => "pending",
            AlertState::NoData => "nodata",
            AlertState::Error => "error",
            AlertState::Recovering => "recovering",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST .../alertstate/query`.
///
/// Every field is optional and an absent field means "do not filter on this
/// dimension". A present zero or empty value is still a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStateQueryRequest {
    /// Start of the range, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// End of the range, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, rename = "ruleUID", skip_serializing_if = "Option::is_none")]
    pub rule_uid: Option<String>,
    #[serde(default, rename = "dashboardUID", skip_serializing_if = "Option::is_none")]
    pub dashboard_uid: Option<String>,
    #[serde(default, rename = "panelID", skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<AlertState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<AlertState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_wire_field_names() {
        let req: AlertStateQueryRequest = serde_json::from_value(json!({
            "from": 1000,
            "to": 2000,
            "limit": 50,
            "ruleUID": "rule-123",
            "dashboardUID": "dash-456",
            "panelID": 7,
            "previous": "pending",
            "current": "nodata",
            "labels": {"env": "prod"}
        }))
        .expect("decode");

        assert_eq!(req.from, Some(1000));
        assert_eq!(req.rule_uid.as_deref(), Some("rule-123"));
        assert_eq!(req.dashboard_uid.as_deref(), Some("dash-456"));
        assert_eq!(req.panel_id, Some(7));
        assert_eq!(req.previous, Some(AlertState::Pending));
        assert_eq!(req.current, Some(AlertState::NoData));
        assert_eq!(
            req.labels.unwrap().get("env").map(String::as_str),
            Some("prod")
        );
    }

    #[test]
    fn distinguishes_absent_from_empty() {
        let absent: AlertStateQueryRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent, AlertStateQueryRequest::default());

        let empty: AlertStateQueryRequest =
            serde_json::from_str(r#"{"ruleUID": "", "panelID": 0}"#).unwrap();
        assert_eq!(empty.rule_uid.as_deref(), Some(""));
        assert_eq!(empty.panel_id, Some(0));
    }

    #[test]
    fn rejects_unknown_state() {
        let err = serde_json::from_str::<AlertStateQueryRequest>(r#"{"current": "firing"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn state_strings_match_wire_values() {
        let encoded = serde_json::to_value(AlertState::NoData).unwrap();
        assert_eq!(encoded, json!("nodata"));
        assert_eq!(AlertState::Recovering.to_string(), "recovering");
    }
}
