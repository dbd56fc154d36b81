//! Form field coercion
//!
//! Checklist forms post JSON whose numeric fields may arrive as numbers or
//! as strings ("36.97"). These helpers coerce one field each and report the
//! offending field by name.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};
use thiserror::Error;

/// Largest count a single checklist may report
pub const MAX_COUNT: i64 = u32::MAX as i64;

/// A single field that failed coercion or a range check
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type FieldResult<T> = Result<T, ValidationError>;

/// Borrowed view of a JSON object body
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn from_body(body: &'a Value) -> FieldResult<Self> {
        body.as_object()
            .map(|map| Self { map })
            .ok_or_else(|| ValidationError::new("body", "must be a JSON object"))
    }

    /// Field value; JSON null counts as absent
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Required, non-empty text
    pub fn text(&self, key: &str) -> FieldResult<String> {
        self.optional_text(key)?
            .ok_or_else(|| ValidationError::new(key, "is required"))
    }

    /// Text, with empty strings treated as absent
    pub fn optional_text(&self, key: &str) -> FieldResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let s = s.trim();
                Ok((!s.is_empty()).then(|| s.to_string()))
            }
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(ValidationError::new(key, "must be text")),
        }
    }

    /// Required finite number
    pub fn number(&self, key: &str) -> FieldResult<f64> {
        let value = match self.get(key) {
            None => return Err(ValidationError::new(key, "is required")),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::new(key, "must be a number"))
    }

    pub fn latitude(&self, key: &str) -> FieldResult<f64> {
        self.number_in(key, -90.0, 90.0)
    }

    pub fn longitude(&self, key: &str) -> FieldResult<f64> {
        self.number_in(key, -180.0, 180.0)
    }

    pub fn non_negative(&self, key: &str) -> FieldResult<f64> {
        let value = self.number(key)?;
        if value < 0.0 {
            return Err(ValidationError::new(key, "must not be negative"));
        }
        Ok(value)
    }

    /// Whole count in `0..=MAX_COUNT`; `3.0` is accepted as 3
    pub fn count(&self, key: &str) -> FieldResult<i64> {
        let value = self.non_negative(key)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::new(key, "must be a whole number"));
        }
        if value > MAX_COUNT as f64 {
            return Err(ValidationError::new(
                key,
                format!("must be at most {}", MAX_COUNT),
            ));
        }
        Ok(value as i64)
    }

    /// `YYYY-MM-DD`
    pub fn date(&self, key: &str) -> FieldResult<String> {
        let raw = self.text(key)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|_| ValidationError::new(key, "must be a date (YYYY-MM-DD)"))
    }

    /// `HH:MM` or `HH:MM:SS`, normalized to `HH:MM:SS`
    pub fn optional_time(&self, key: &str) -> FieldResult<Option<String>> {
        let Some(raw) = self.optional_text(key)? else {
            return Ok(None);
        };
        NaiveTime::parse_from_str(&raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
            .map(|t| Some(t.format("%H:%M:%S").to_string()))
            .map_err(|_| ValidationError::new(key, "must be a time (HH:MM)"))
    }

    /// Array of JSON objects; absent means empty
    pub fn objects(&self, key: &str) -> FieldResult<Vec<Fields<'a>>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_object()
                        .map(|map| Fields { map })
                        .ok_or_else(|| ValidationError::new(key, "entries must be objects"))
                })
                .collect(),
            Some(_) => Err(ValidationError::new(key, "must be a list")),
        }
    }

    fn number_in(&self, key: &str, min: f64, max: f64) -> FieldResult<f64> {
        let value = self.number(key)?;
        if !(min..=max).contains(&value) {
            return Err(ValidationError::new(
                key,
                format!("must be between {} and {}", min, max),
            ));
        }
        Ok(value)
    }
}
