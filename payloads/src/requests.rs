use crate::{EventCategory, EventId, Severity, UrgencyLevel};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The record sent to the event creation endpoint.
///
/// The server expects every text-like field to be present, so unset
/// options and dates are sent as empty strings rather than omitted. Unset
/// numbers are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Always `None` for a new event; the server assigns identity.
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    #[serde(with = "empty_as_none")]
    pub category: Option<EventCategory>,
    pub is_ongoing: bool,
    pub estimated_affected_people: Option<Count>,
    #[serde(with = "empty_as_none")]
    pub severity: Option<Severity>,
    pub location: String,
    #[serde(with = "empty_as_none")]
    pub start_date: Option<Date>,
    #[serde(with = "empty_as_none")]
    pub end_date: Option<Date>,
    pub cover_image: String,
    #[serde(with = "empty_as_none")]
    pub urgency_level: Option<UrgencyLevel>,
    pub funding_goal: Option<Amount>,
    pub current_funding: Option<Amount>,
}

/// A money amount, sent as a JSON number.
///
/// Amounts within `Decimal` range are kept exactly as typed. Larger ones
/// are carried as the nearest `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Exact(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Approximate(f64),
}

/// A whole number of people. Counts beyond `i64` are carried as the
/// nearest `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Exact(i64),
    Approximate(f64),
}

/// Serde adapter mapping `None` to `""` and back, for any type that
/// round-trips through its `Display`/`FromStr` implementations.
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use std::{fmt::Display, str::FromStr};

    pub fn serialize<T, S>(
        value: &Option<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;
    use serde_json::json;

    fn empty_event() -> CreateEvent {
        CreateEvent {
            id: None,
            title: String::new(),
            description: String::new(),
            category: None,
            is_ongoing: false,
            estimated_affected_people: None,
            severity: None,
            location: String::new(),
            start_date: None,
            end_date: None,
            cover_image: String::new(),
            urgency_level: None,
            funding_goal: None,
            current_funding: None,
        }
    }

    #[test]
    fn unset_fields_use_server_shape() {
        let value = serde_json::to_value(empty_event()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": null,
                "title": "",
                "description": "",
                "category": "",
                "isOngoing": false,
                "estimatedAffectedPeople": null,
                "severity": "",
                "location": "",
                "startDate": "",
                "endDate": "",
                "coverImage": "",
                "urgencyLevel": "",
                "fundingGoal": null,
                "currentFunding": null,
            })
        );
    }

    #[test]
    fn set_fields_serialize_as_plain_values() {
        let event = CreateEvent {
            category: Some(EventCategory::Food),
            severity: Some(Severity::Critical),
            urgency_level: Some(UrgencyLevel::Immediate),
            start_date: Some(jiff::civil::date(2025, 3, 1)),
            estimated_affected_people: Some(Count::Exact(1200)),
            funding_goal: Some(Amount::Exact(dec!(5000.25))),
            ..empty_event()
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["category"], "Food");
        assert_eq!(value["severity"], "Critical");
        assert_eq!(value["urgencyLevel"], "Immediate");
        assert_eq!(value["startDate"], "2025-03-01");
        assert_eq!(value["endDate"], "");
        assert_eq!(value["estimatedAffectedPeople"], 1200);
        assert_eq!(value["fundingGoal"], 5000.25);

        let parsed: CreateEvent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn out_of_range_numbers_serialize_as_plain_numbers() {
        let event = CreateEvent {
            estimated_affected_people: Some(Count::Approximate(1.5e19)),
            current_funding: Some(Amount::Approximate(1e30)),
            ..empty_event()
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["estimatedAffectedPeople"].as_f64(), Some(1.5e19));
        assert_eq!(value["currentFunding"].as_f64(), Some(1e30));

        let parsed: CreateEvent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, event);
    }
}
