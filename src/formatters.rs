use serde_json::Value;
use thiserror::Error;

/// Review state reported by the API's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// Parse the API's status string; `None` for anything outside the fixed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Fixed human-readable verdict for this status.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Review finished: the reviewer liked everything. Well done!",
            Self::Reviewing => "The submission was picked up for review.",
            Self::Rejected => "Review finished: the reviewer left some remarks.",
        }
    }
}

/// Submission-validation failures hit while building a notification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("submission has no `{0}` field")]
    MissingField(&'static str),
    #[error("unknown review status: {0}")]
    UnknownStatus(String),
}

fn get_str<'a>(v: &'a Value, key: &'static str) -> Result<&'a str, FormatError> {
    v.get(key)
        .and_then(|x| x.as_str())
        .ok_or(FormatError::MissingField(key))
}

/// Build the notification text for one submission.
pub fn format_status_message(submission: &Value) -> Result<String, FormatError> {
    let homework_name = get_str(submission, "homework_name")?;
    let status_raw = get_str(submission, "status")?;
    let status = ReviewStatus::parse(status_raw)
        .ok_or_else(|| FormatError::UnknownStatus(status_raw.to_string()))?;

    Ok(format!(
        "Review status changed for \"{}\". {}",
        homework_name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(name: &str, status: &str) -> Value {
        json!({ "homework_name": name, "status": status })
    }

    #[test]
    fn test_verdict_for_every_known_status() {
        let cases = [
            ("approved", "liked everything"),
            ("reviewing", "picked up for review"),
            ("rejected", "left some remarks"),
        ];
        for (status, fragment) in cases {
            let msg = format_status_message(&submission("hw05_final", status)).unwrap();
            assert!(msg.contains("hw05_final"), "name missing from: {msg}");
            assert!(msg.contains(fragment), "verdict missing from: {msg}");
        }
    }

    #[test]
    fn test_unknown_status() {
        let err = format_status_message(&submission("hw05_final", "burned")).unwrap_err();
        assert_eq!(err, FormatError::UnknownStatus("burned".to_string()));
    }

    #[test]
    fn test_missing_homework_name() {
        let err = format_status_message(&json!({ "status": "approved" })).unwrap_err();
        assert_eq!(err, FormatError::MissingField("homework_name"));
    }

    #[test]
    fn test_missing_status() {
        let err = format_status_message(&json!({ "homework_name": "hw05_final" })).unwrap_err();
        assert_eq!(err, FormatError::MissingField("status"));
    }

    #[test]
    fn test_non_string_field_counts_as_missing() {
        let err = format_status_message(&json!({ "homework_name": 7, "status": "approved" }))
            .unwrap_err();
        assert_eq!(err, FormatError::MissingField("homework_name"));
    }

    #[test]
    fn test_status_parse_is_exact() {
        for s in ["approved", "reviewing", "rejected"] {
            assert_eq!(ReviewStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(ReviewStatus::parse("Approved").is_none());
        assert!(ReviewStatus::parse("").is_none());
    }
}
