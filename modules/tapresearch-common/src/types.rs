use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;
use typed_builder::TypedBuilder;

/// Status code the SDK reports on a placement before it has finished
/// initializing. Such placements never enter the registry via a ready event.
pub const PLACEMENT_CODE_SDK_NOT_READY: i64 = 90;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementEventType {
    CurrencySale,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementType {
    Interstitial,
    #[serde(other)]
    Unknown,
}

// --- Placement ---

/// A time-boxed sub-offer attached to a placement (e.g. a currency sale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementEvent {
    pub identifier: String,
    pub event_type: PlacementEventType,
    pub placement_type: PlacementType,
    #[serde(deserialize_with = "de_timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(deserialize_with = "de_timestamp")]
    pub end_time: DateTime<Utc>,
}

/// One offer unit (survey wall or timed event) reported by the SDK.
///
/// Field names on the wire follow the SDK's camelCase payloads. Availability
/// flags are normalised to `bool` on the way in, see [`coerce_flag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(rename = "placementIdentifier")]
    #[builder(setter(into))]
    pub identifier: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub currency_name: String,

    #[serde(default, deserialize_with = "de_flag")]
    #[builder(default)]
    pub is_survey_wall_available: bool,

    #[serde(default, deserialize_with = "de_flag")]
    #[builder(default)]
    pub is_event_available: bool,

    #[serde(default, deserialize_with = "de_flag")]
    #[builder(default)]
    pub has_hot_survey: bool,

    #[serde(rename = "placementCode", default, deserialize_with = "de_code")]
    #[builder(default)]
    pub status_code: i64,

    #[serde(rename = "placementErrorMessage", default, deserialize_with = "de_text")]
    #[builder(default, setter(into))]
    pub error_message: String,

    #[serde(rename = "minPayoutInCurrency", default, deserialize_with = "de_number")]
    #[builder(default)]
    pub min_payout: f64,

    #[serde(rename = "maxPayoutInCurrency", default, deserialize_with = "de_number")]
    #[builder(default)]
    pub max_payout: f64,

    #[serde(default, deserialize_with = "de_number")]
    #[builder(default)]
    pub min_survey_length: f64,

    #[serde(default, deserialize_with = "de_number")]
    #[builder(default)]
    pub max_survey_length: f64,

    /// Sub-events that fail to parse are skipped so the placement itself is
    /// still recorded.
    #[serde(default, deserialize_with = "de_events")]
    #[builder(default)]
    pub events: Vec<PlacementEvent>,
}

impl Placement {
    /// True when the SDK reported this placement as initialized.
    pub fn sdk_ready(&self) -> bool {
        self.status_code != PLACEMENT_CODE_SDK_NOT_READY
    }

    /// Gate applied to ready events before they may enter the registry.
    pub fn is_presentable(&self) -> bool {
        self.sdk_ready() && self.is_survey_wall_available
    }

    /// Parse a placement out of an opaque SDK payload.
    pub fn from_payload(payload: &Value) -> serde_json::Result<Self> {
        Placement::deserialize(payload)
    }
}

// --- Rewards ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(rename = "rewardAmount", deserialize_with = "de_number")]
    pub amount: f64,
    #[serde(default)]
    pub currency_name: String,
}

impl Reward {
    pub fn new(amount: f64, currency_name: impl Into<String>) -> Self {
        Self {
            amount,
            currency_name: currency_name.into(),
        }
    }
}

/// Total of one reward collection, reported in the currency of its last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSummary {
    pub total: f64,
    pub currency_name: String,
}

impl RewardSummary {
    /// Sum a reward collection. `None` for an empty collection.
    pub fn from_rewards(rewards: &[Reward]) -> Option<Self> {
        let last = rewards.last()?;
        Some(Self {
            total: rewards.iter().map(|r| r.amount).sum(),
            currency_name: last.currency_name.clone(),
        })
    }
}

impl std::fmt::Display for RewardSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rewards {} of {}", self.total, self.currency_name)
    }
}

// --- Boundary coercion ---

/// Normalise an SDK availability flag to a boolean.
///
/// Booleans pass through, numbers are true when non-zero, strings are true
/// for `"true"` or `"1"` (ignoring case and surrounding whitespace). `null`,
/// missing and anything else is false.
pub fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

fn de_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(coerce_flag(value.as_ref()))
}

fn de_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    let number = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a number, got {other}"
            )))
        }
    };
    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| serde::de::Error::custom("not a finite number"))
}

/// Status codes may arrive as `null`, as a float with no fraction, or as a
/// numeric string. Missing and `null` read as 0.
fn de_code<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    let code = match &value {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };
    code.ok_or_else(|| serde::de::Error::custom(format!("bad placement code: {value:?}")))
}

fn de_events<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<PlacementEvent>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| match PlacementEvent::deserialize(&value) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "Skipping malformed placement event");
                None
            }
        })
        .collect())
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp: {raw:?}")))
}

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM:SS` (taken as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flag_coercion_rules() {
        assert!(coerce_flag(Some(&json!(true))));
        assert!(coerce_flag(Some(&json!(1))));
        assert!(coerce_flag(Some(&json!(2.5))));
        assert!(coerce_flag(Some(&json!("TRUE"))));
        assert!(coerce_flag(Some(&json!("1"))));
        assert!(coerce_flag(Some(&json!(" true "))));
        assert!(coerce_flag(Some(&json!(" 1 "))));
        assert!(!coerce_flag(Some(&json!(0))));
        assert!(!coerce_flag(Some(&json!("no"))));
        assert!(!coerce_flag(Some(&Value::Null)));
        assert!(!coerce_flag(None));
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let ts = parse_timestamp("2024-03-01 12:30:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }
}
