//! Typed accessors over a JSON argument object.

use crate::model::hours::Hours;
use crate::tools::ToolError;
use chrono::NaiveDate;
use serde_json::{Map, Value};

pub(crate) struct ToolArgs<'a> {
    values: Option<&'a Map<String, Value>>,
}

impl<'a> ToolArgs<'a> {
    /// Accepts an object, or `null` for tools without parameters.
    pub(crate) fn new(args: &'a Value) -> Result<Self, ToolError> {
        match args {
            Value::Object(values) => Ok(Self {
                values: Some(values),
            }),
            Value::Null => Ok(Self { values: None }),
            other => Err(ToolError::InvalidArgument {
                name: "arguments",
                reason: format!("expected a JSON object, got {}", json_kind(other)),
            }),
        }
    }

    fn raw(&self, name: &'static str) -> Option<&'a Value> {
        self.values
            .and_then(|values| values.get(name))
            .filter(|value| !value.is_null())
    }

    pub(crate) fn text(&self, name: &'static str) -> Result<&'a str, ToolError> {
        self.optional_text(name)?
            .ok_or(ToolError::MissingArgument(name))
    }

    pub(crate) fn optional_text(&self, name: &'static str) -> Result<Option<&'a str>, ToolError> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(ToolError::InvalidArgument {
                name,
                reason: format!("expected a string, got {}", json_kind(other)),
            }),
        }
    }

    pub(crate) fn date(&self, name: &'static str) -> Result<NaiveDate, ToolError> {
        let raw = self.text(name)?;
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            ToolError::InvalidArgument {
                name,
                reason: format!("`{raw}` is not an ISO date (YYYY-MM-DD)"),
            }
        })
    }

    pub(crate) fn hours(&self, name: &'static str) -> Result<Hours, ToolError> {
        let parsed = match self.raw(name) {
            None => return Err(ToolError::MissingArgument(name)),
            Some(Value::String(value)) => value.parse::<Hours>(),
            Some(Value::Number(value)) => value.to_string().parse::<Hours>(),
            Some(other) => {
                return Err(ToolError::InvalidArgument {
                    name,
                    reason: format!("expected a decimal, got {}", json_kind(other)),
                })
            }
        };
        parsed.map_err(|err| ToolError::InvalidArgument {
            name,
            reason: err.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
