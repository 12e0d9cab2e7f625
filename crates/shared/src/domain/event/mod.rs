use crate::domain::amount::{AmountError, TokenAmount};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A listed event. Sample data only, never read from chain.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: u64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub time: NaiveTime,
    pub location: String,
    pub price: TokenAmount,
    pub max_attendees: u32,
    pub current_attendees: u32,
    pub description: String,
}

impl EventRecord {
    /// Long form, e.g. "Sunday, December 1, 2024".
    pub fn display_date(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    pub fn seats_remaining(&self) -> u32 {
        self.max_attendees.saturating_sub(self.current_attendees)
    }

    pub fn is_sold_out(&self) -> bool {
        self.seats_remaining() == 0
    }

    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.location.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Name,
    Location,
    Date,
    Time,
    Price,
    MaxAttendees,
    Description,
}

impl DraftField {
    /// Form order.
    pub const ALL: [DraftField; 7] = [
        DraftField::Name,
        DraftField::Location,
        DraftField::Date,
        DraftField::Time,
        DraftField::Price,
        DraftField::MaxAttendees,
        DraftField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Location => "location",
            DraftField::Date => "date",
            DraftField::Time => "time",
            DraftField::Price => "price",
            DraftField::MaxAttendees => "maxAttendees",
            DraftField::Description => "description",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    Missing,
    Invalid(String),
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::Missing => f.write_str("is required"),
            ValidationKind::Invalid(reason) => write!(f, "is invalid: {reason}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {kind}")]
pub struct ValidationError {
    pub field: DraftField,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn missing(field: DraftField) -> Self {
        Self { field, kind: ValidationKind::Missing }
    }

    pub fn invalid(field: DraftField, reason: impl Into<String>) -> Self {
        Self { field, kind: ValidationKind::Invalid(reason.into()) }
    }
}

/// Raw create-event form input, one string per field.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub price: String,
    pub max_attendees: String,
    pub description: String,
    pub location: String,
}

impl EventDraft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Location => &self.location,
            DraftField::Date => &self.date,
            DraftField::Time => &self.time,
            DraftField::Price => &self.price,
            DraftField::MaxAttendees => &self.max_attendees,
            DraftField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Location => &mut self.location,
            DraftField::Date => &mut self.date,
            DraftField::Time => &mut self.time,
            DraftField::Price => &mut self.price,
            DraftField::MaxAttendees => &mut self.max_attendees,
            DraftField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    pub fn is_blank(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Presence is checked for every field before any value is parsed.
    pub fn validate(&self) -> Result<NewEvent, ValidationError> {
        if let Some(field) = DraftField::ALL.into_iter().find(|f| self.get(*f).trim().is_empty()) {
            return Err(ValidationError::missing(field));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|e| ValidationError::invalid(DraftField::Date, e.to_string()))?;
        let time = parse_clock(self.time.trim())
            .map_err(|e| ValidationError::invalid(DraftField::Time, e.to_string()))?;
        let price: TokenAmount = self
            .price
            .parse()
            .map_err(|e: AmountError| ValidationError::invalid(DraftField::Price, e.to_string()))?;
        let max_attendees: u32 = self
            .max_attendees
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid(DraftField::MaxAttendees, "expected a whole number"))?;
        if max_attendees == 0 {
            return Err(ValidationError::invalid(DraftField::MaxAttendees, "must be at least 1"));
        }

        Ok(NewEvent {
            name: self.name.trim().to_owned(),
            date,
            time,
            price,
            max_attendees,
            description: self.description.trim().to_owned(),
            location: self.location.trim().to_owned(),
        })
    }
}

/// A draft that passed validation.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub time: NaiveTime,
    pub price: TokenAmount,
    pub max_attendees: u32,
    pub description: String,
    pub location: String,
}

fn parse_clock(s: &str) -> chrono::ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

mod clock {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    /// `HH:MM`, with seconds only when they were given.
    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        let fmt = if time.second() == 0 { "%H:%M" } else { "%H:%M:%S" };
        s.collect_str(&time.format(fmt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EventDraft {
        EventDraft {
            name: "Rust Meetup".into(),
            date: "2025-03-14".into(),
            time: "19:30".into(),
            price: "0.25".into(),
            max_attendees: "40".into(),
            description: "Talks and pizza".into(),
            location: "Berlin".into(),
        }
    }

    #[test]
    fn validates_a_complete_draft() {
        let ev = filled().validate().unwrap();
        assert_eq!(ev.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(ev.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(ev.price.to_string(), "0.25");
        assert_eq!(ev.max_attendees, 40);
    }

    #[test]
    fn every_field_is_required() {
        for field in DraftField::ALL {
            let mut draft = filled();
            draft.set(field, "   ");
            assert_eq!(draft.validate(), Err(ValidationError::missing(field)));
        }
    }

    #[test]
    fn missing_fields_reported_before_malformed_ones() {
        let mut draft = filled();
        draft.date = "not a date".into();
        draft.description.clear();
        assert_eq!(draft.validate().unwrap_err().field, DraftField::Description);
    }

    #[test]
    fn rejects_malformed_values() {
        let mut draft = filled();
        draft.max_attendees = "0".into();
        assert_eq!(draft.validate().unwrap_err().field, DraftField::MaxAttendees);

        let mut draft = filled();
        draft.price = "-3".into();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field, DraftField::Price);
        assert_eq!(err.to_string(), "price is invalid: amount must not be negative");

        let mut draft = filled();
        draft.time = "25:00".into();
        assert_eq!(draft.validate().unwrap_err().field, DraftField::Time);
    }

    #[test]
    fn accepts_seconds_in_time() {
        let mut draft = filled();
        draft.time = "07:05:30".into();
        assert_eq!(draft.validate().unwrap().time, NaiveTime::from_hms_opt(7, 5, 30).unwrap());
    }

    #[test]
    fn serialized_time_keeps_given_seconds() {
        let mut draft = filled();
        draft.time = "07:05:30".into();
        let json = serde_json::to_value(draft.validate().unwrap()).unwrap();
        assert_eq!(json["time"], "07:05:30");

        let json = serde_json::to_value(filled().validate().unwrap()).unwrap();
        assert_eq!(json["time"], "19:30");
    }

    #[test]
    fn draft_deserializes_from_form_json() {
        let draft: EventDraft =
            serde_json::from_str(r#"{"name":"A","maxAttendees":"5"}"#).unwrap();
        assert_eq!(draft.get(DraftField::MaxAttendees), "5");
        assert_eq!(draft.get(DraftField::Location), "");
        assert!(!draft.is_blank());
        let mut draft = draft;
        draft.clear();
        assert!(draft.is_blank());
    }
}
