//! Records returned by a provider's data listing and their display form.
//!
//! The backend decides the shape of a load response. A JSON array of
//! objects becomes [`FetchResult::List`]; anything else is kept verbatim as
//! [`FetchResult::Single`].

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Title used for items without a name.
pub const UNNAMED_ITEM: &str = "Unnamed Item";

/// Display format for timestamps, e.g. `1/5/2024, 10:00:00 AM`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// A display-only record produced by the backend.
///
/// Scalar fields accept strings or numbers on the wire. Fields the portal
/// does not display are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub last_modified_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Card projection of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub title: String,
    pub id: String,
    pub item_type: String,
    pub parent_id: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

impl Item {
    /// Builds the card shown for this item, formatting timestamps in `tz`.
    #[must_use]
    pub fn card_in<Tz>(&self, tz: &Tz) -> ItemCard
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        ItemCard {
            title: self
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNNAMED_ITEM.to_string()),
            id: self.id.clone().unwrap_or_default(),
            item_type: self.item_type.clone().unwrap_or_default(),
            parent_id: self.parent_id.clone().filter(|p| !p.is_empty()),
            created: non_empty(self.creation_time.as_deref()).map(|t| format_timestamp_in(t, tz)),
            modified: non_empty(self.last_modified_time.as_deref()).map(|t| format_timestamp_in(t, tz)),
        }
    }

    /// Builds the card shown for this item in the viewer's time zone.
    #[must_use]
    pub fn card(&self) -> ItemCard {
        self.card_in(&Local)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Formats a backend timestamp for display in `tz`.
///
/// RFC 3339 timestamps are converted to `tz`. Timestamps without an offset
/// are read as already being in `tz`, and bare dates as midnight UTC.
/// Anything else is returned unchanged.
#[must_use]
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Utc
            .from_utc_datetime(&date.and_time(NaiveTime::MIN))
            .with_timezone(tz)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| tz.from_local_datetime(&naive).single())
        .map(|local| local.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// The body of a successful load response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchResult {
    /// An ordered sequence of items.
    List(Vec<Item>),
    /// Any other JSON value, kept verbatim.
    Single(JsonValue),
}

/// How a [`FetchResult`] is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// One card per item, in response order.
    Cards(Vec<ItemCard>),
    /// Pretty-printed JSON for a read-only text block.
    Text(String),
}

impl FetchResult {
    /// Classifies a decoded response body.
    #[must_use]
    pub fn from_value(value: JsonValue) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(Self::Single(value))
    }

    /// Whether the backend returned nothing to show.
    ///
    /// `null`, `false`, zero and the empty string count as empty. Empty
    /// arrays and objects do not.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        match self {
            Self::List(_) => false,
            Self::Single(value) => match value {
                JsonValue::Null => true,
                JsonValue::Bool(b) => !b,
                JsonValue::Number(n) => n.as_f64() == Some(0.0),
                JsonValue::String(s) => s.is_empty(),
                JsonValue::Array(_) | JsonValue::Object(_) => false,
            },
        }
    }

    /// Heading shown above the result.
    #[must_use]
    pub fn heading(&self) -> String {
        match self {
            Self::List(items) => format!("{} Items Found", items.len()),
            Self::Single(_) => "Data Loaded".to_string(),
        }
    }

    /// Renders the result with timestamps in `tz`.
    #[must_use]
    pub fn view_in<Tz>(&self, tz: &Tz) -> ResultView
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match self {
            Self::List(items) => ResultView::Cards(items.iter().map(|i| i.card_in(tz)).collect()),
            Self::Single(value) => ResultView::Text(
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ),
        }
    }

    /// Renders the result in the viewer's time zone.
    #[must_use]
    pub fn view(&self) -> ResultView {
        self.view_in(&Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    fn hubspot_items() -> JsonValue {
        json!([
            {
                "id": "101",
                "type": "Contact",
                "name": "Ada Lovelace",
                "creation_time": "2024-01-05T10:00:00.000Z",
                "last_modified_time": "2024-02-10T15:30:45Z",
                "directory": false
            },
            {"id": 202, "type": "Company", "name": null, "parent_id": "101"},
            {"id": "303", "type": "Deal"}
        ])
    }

    #[test]
    fn array_response_renders_one_card_per_item() {
        let result = FetchResult::from_value(hubspot_items());
        assert_eq!(result.heading(), "3 Items Found");

        let ResultView::Cards(cards) = result.view_in(&Utc) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "Ada Lovelace");
        assert_eq!(cards[0].id, "101");
        assert_eq!(cards[0].item_type, "Contact");
        assert_eq!(cards[1].id, "202");
        assert_eq!(cards[1].title, UNNAMED_ITEM);
        assert_eq!(cards[1].parent_id.as_deref(), Some("101"));
        assert_eq!(cards[2].title, UNNAMED_ITEM);
        assert_eq!(cards[2].created, None);
    }

    #[test]
    fn card_formats_timestamps() {
        let result = FetchResult::from_value(hubspot_items());
        let ResultView::Cards(cards) = result.view_in(&Utc) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].created.as_deref(), Some("1/5/2024, 10:00:00 AM"));
        assert_eq!(cards[0].modified.as_deref(), Some("2/10/2024, 3:30:45 PM"));
    }

    #[test]
    fn unknown_fields_are_kept() {
        let FetchResult::List(items) = FetchResult::from_value(hubspot_items()) else {
            panic!("expected list");
        };
        assert_eq!(items[0].extra.get("directory"), Some(&json!(false)));
    }

    #[test]
    fn object_response_renders_as_text() {
        let result = FetchResult::from_value(json!({"paging": null, "results": []}));
        assert_eq!(result.heading(), "Data Loaded");
        let ResultView::Text(text) = result.view_in(&Utc) else {
            panic!("expected text");
        };
        assert_eq!(text, "{\n  \"paging\": null,\n  \"results\": []\n}");
    }

    #[test]
    fn array_of_scalars_is_not_a_card_list() {
        let result = FetchResult::from_value(json!(["a", "b"]));
        assert_eq!(result, FetchResult::Single(json!(["a", "b"])));
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        let result = FetchResult::from_value(json!([]));
        assert_eq!(result.heading(), "0 Items Found");
        assert_eq!(result.view_in(&Utc), ResultView::Cards(Vec::new()));
    }

    #[test]
    fn falsy_bodies_are_empty() {
        for body in [JsonValue::Null, json!(false), json!(0), json!(0.0), json!("")] {
            assert!(FetchResult::from_value(body.clone()).is_empty_body(), "{body}");
        }
        for body in [json!([]), json!({}), json!(true), json!(1), json!("0")] {
            assert!(!FetchResult::from_value(body.clone()).is_empty_body(), "{body}");
        }
    }

    #[test]
    fn bare_date_is_formatted_as_utc_midnight() {
        assert_eq!(format_timestamp_in("2024-01-05", &Utc), "1/5/2024, 12:00:00 AM");

        let new_york = FixedOffset::west_opt(5 * 3600).expect("valid offset");
        assert_eq!(
            format_timestamp_in("2024-01-05", &new_york),
            "1/4/2024, 7:00:00 PM"
        );
    }

    #[test]
    fn unparseable_timestamp_is_shown_unchanged() {
        assert_eq!(format_timestamp_in("yesterday", &Utc), "yesterday");
        assert_eq!(
            format_timestamp_in("2024-03-01T08:05:09", &Utc),
            "3/1/2024, 8:05:09 AM"
        );
    }

    #[test]
    fn list_survives_server_function_transport() {
        let result = FetchResult::from_value(hubspot_items());
        let wire = serde_json::to_string(&result).expect("serialize");
        let decoded: FetchResult = serde_json::from_str(&wire).expect("deserialize");
        assert_eq!(decoded, result);
    }
}
