//! Response validation and homework status interpretation.
//!
//! The API payload is handled as raw JSON so each shape violation maps to
//! its own [`WatchError`] variant instead of one opaque deserialize error.

use serde_json::Value;

use crate::error::WatchError;

/// Fixed verdict text per known status code. Closed set; anything else is an
/// error condition.
const VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, text)| *text)
}

/// Validate the payload shape and return the homework list (possibly empty).
pub fn extract_homeworks(raw: &Value) -> Result<&Vec<Value>, WatchError> {
    let response = raw
        .as_object()
        .ok_or_else(|| WatchError::TypeMismatch("API response must be an object".into()))?;

    let homeworks = response.get("homeworks").ok_or_else(|| {
        WatchError::MalformedResponse("\"homeworks\" key is absent".into())
    })?;

    homeworks
        .as_array()
        .ok_or_else(|| WatchError::TypeMismatch("\"homeworks\" must be an array".into()))
}

/// Render the status-change message for one homework record.
pub fn describe(homework: &Value) -> Result<String, WatchError> {
    let record = homework
        .as_object()
        .ok_or_else(|| WatchError::TypeMismatch("homework record must be an object".into()))?;

    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(WatchError::MissingField("homework_name"))?;

    let status = record
        .get("status")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(WatchError::MissingField("status"))?;

    let verdict =
        verdict_for(status).ok_or_else(|| WatchError::UnknownStatus(status.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_returns_the_list_untouched() {
        let raw = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1_700_000_100,
        });
        let homeworks = extract_homeworks(&raw).unwrap();
        assert_eq!(homeworks.len(), 1);
        assert_eq!(homeworks[0]["homework_name"], "hw1");
    }

    #[test]
    fn extract_accepts_empty_list() {
        let raw = json!({"homeworks": []});
        assert!(extract_homeworks(&raw).unwrap().is_empty());
    }

    #[test]
    fn extract_rejects_non_object_response() {
        let raw = json!([{"homework_name": "hw1"}]);
        let err = extract_homeworks(&raw).unwrap_err();
        assert!(matches!(err, WatchError::TypeMismatch(_)), "{:?}", err);
    }

    #[test]
    fn extract_rejects_missing_homeworks_key() {
        let raw = json!({"current_date": 1_700_000_000});
        let err = extract_homeworks(&raw).unwrap_err();
        assert!(matches!(err, WatchError::MalformedResponse(_)), "{:?}", err);
    }

    #[test]
    fn extract_rejects_non_array_homeworks() {
        for value in [json!("hw1"), json!(42), json!({"0": "hw1"})] {
            let raw = json!({"homeworks": value});
            let err = extract_homeworks(&raw).unwrap_err();
            assert!(matches!(err, WatchError::TypeMismatch(_)), "{:?}", err);
        }
    }

    #[test]
    fn describe_renders_each_known_verdict() {
        let cases = [
            (
                "approved",
                "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!",
            ),
            (
                "reviewing",
                "Изменился статус проверки работы \"hw1\". Работа взята на проверку ревьюером.",
            ),
            (
                "rejected",
                "Изменился статус проверки работы \"hw1\". Работа проверена: у ревьюера есть замечания.",
            ),
        ];
        for (status, expected) in cases {
            let homework = json!({"homework_name": "hw1", "status": status});
            assert_eq!(describe(&homework).unwrap(), expected);
        }
    }

    #[test]
    fn describe_rejects_non_object_record() {
        let err = describe(&json!("hw1")).unwrap_err();
        assert!(matches!(err, WatchError::TypeMismatch(_)), "{:?}", err);
    }

    #[test]
    fn describe_rejects_absent_or_empty_name() {
        let err = describe(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, WatchError::MissingField("homework_name")));

        let err = describe(&json!({"homework_name": "", "status": "approved"})).unwrap_err();
        assert!(matches!(err, WatchError::MissingField("homework_name")));
    }

    #[test]
    fn describe_rejects_absent_or_empty_status() {
        let err = describe(&json!({"homework_name": "hw1"})).unwrap_err();
        assert!(matches!(err, WatchError::MissingField("status")));

        let err = describe(&json!({"homework_name": "hw1", "status": ""})).unwrap_err();
        assert!(matches!(err, WatchError::MissingField("status")));
    }

    #[test]
    fn describe_rejects_unknown_status() {
        let homework = json!({"homework_name": "hw1", "status": "resubmitted"});
        match describe(&homework).unwrap_err() {
            WatchError::UnknownStatus(status) => assert_eq!(status, "resubmitted"),
            other => panic!("expected UnknownStatus, got {:?}", other),
        }
    }
}
