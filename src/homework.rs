//! Validation of review API responses and formatting of status messages.

use serde_json::Value;

use crate::error::BotError;

/// Review verdict reported for a homework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Reviewing,
    Approved,
    Rejected,
}

impl Verdict {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "reviewing" => Some(Verdict::Reviewing),
            "approved" => Some(Verdict::Approved),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict text
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Reviewing => "Work taken for review by the reviewer.",
            Verdict::Approved => "Work reviewed: the reviewer liked everything. Hooray!",
            Verdict::Rejected => "Work reviewed: the reviewer has comments.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub name: String,
    pub status: Verdict,
}

impl ReviewItem {
    pub fn from_value(homework: &Value) -> Result<Self, BotError> {
        let name = match homework.get("homework_name") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => return Err(BotError::MissingHomeworkName),
        };

        let status = match homework.get("status") {
            Some(Value::String(code)) => {
                Verdict::from_code(code).ok_or_else(|| BotError::UnknownStatus {
                    status: code.clone(),
                })?
            }
            Some(other) => {
                return Err(BotError::UnknownStatus {
                    status: other.to_string(),
                })
            }
            None => {
                return Err(BotError::UnknownStatus {
                    status: "<missing>".to_string(),
                })
            }
        };

        Ok(Self { name, status })
    }

    pub fn status_message(&self) -> String {
        format!("Status changed for \"{}\". {}", self.name, self.status.text())
    }
}

/// Check the response shape and return its `homeworks` list.
///
/// Only a body lacking both `homeworks` and `current_date` is rejected as
/// missing keys; a body with just `current_date` falls through to the list
/// check below.
pub fn check_response(response: &Value) -> Result<&Vec<Value>, BotError> {
    let body = response.as_object().ok_or(BotError::NotAMapping)?;

    if !body.contains_key("homeworks") && !body.contains_key("current_date") {
        return Err(BotError::MissingKeys);
    }

    match body.get("homeworks") {
        Some(Value::Array(homeworks)) => Ok(homeworks),
        _ => Err(BotError::HomeworksNotAList),
    }
}

/// Format the status message for a single homework entry.
pub fn parse_status(homework: &Value) -> Result<String, BotError> {
    ReviewItem::from_value(homework).map(|item| item.status_message())
}

/// Server-reported time of the response, if it is an integer.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
