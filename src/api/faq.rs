use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::http::post_json;
use crate::error::{ApiError, FaqValidationError};

pub const MIN_QUESTION_CHARS: usize = 10;
pub const MAX_QUESTION_CHARS: usize = 1000;
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit question. Please try again.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks run in the order the form reports them; values are trimmed first.
pub fn validate_question(email: &str, question: &str) -> Result<(), FaqValidationError> {
    let (email, question) = (email.trim(), question.trim());
    if email.is_empty() || question.is_empty() {
        return Err(FaqValidationError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(FaqValidationError::InvalidEmail);
    }
    let len = question.chars().count();
    if len < MIN_QUESTION_CHARS {
        return Err(FaqValidationError::QuestionTooShort);
    }
    if len > MAX_QUESTION_CHARS {
        return Err(FaqValidationError::QuestionTooLong);
    }
    Ok(())
}

#[derive(Serialize)]
struct QuestionSubmission<'a> {
    email: &'a str,
    question: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSubmitted {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub submitted_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub success: bool,
}

// The backend serializes LocalDateTime without an offset; anything else is ignored.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<NaiveDateTime>().ok()))
}

pub async fn submit_question(email: &str, question: &str) -> Result<QuestionSubmitted, ApiError> {
    let submission = QuestionSubmission {
        email: email.trim(),
        question: question.trim(),
    };
    let submitted: QuestionSubmitted = post_json("api/v1/faq/questions", &submission).await?;
    log::info!("Question submitted successfully: id={:?}", submitted.id);
    Ok(submitted)
}

/// Backend-provided reasons are shown as-is; transport problems get a generic line.
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
        _ => SUBMIT_FAILED_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("asha@careloop.ai"));
        assert!(!is_valid_email("asha@careloop"));
        assert!(!is_valid_email("asha careloop@x.io"));
        assert!(!is_valid_email("@x.io"));
    }

    #[test]
    fn validation_order() {
        assert_eq!(validate_question("", "anything at all"), Err(FaqValidationError::MissingFields));
        assert_eq!(validate_question("a@b.co", "   "), Err(FaqValidationError::MissingFields));
        assert_eq!(validate_question("nope", "short"), Err(FaqValidationError::InvalidEmail));
        assert_eq!(validate_question("a@b.co", "too short"), Err(FaqValidationError::QuestionTooShort));
        assert_eq!(
            validate_question("a@b.co", &"x".repeat(MAX_QUESTION_CHARS + 1)),
            Err(FaqValidationError::QuestionTooLong)
        );
        assert_eq!(validate_question(" a@b.co ", "Do you deliver at night?"), Ok(()));
        assert_eq!(validate_question("a@b.co", &"x".repeat(MAX_QUESTION_CHARS)), Ok(()));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let question = "दवा कब आएगी"; // 11 characters, many more bytes
        assert_eq!(validate_question("a@b.co", question), Ok(()));
    }

    #[test]
    fn submitted_response_parses_timestamp() {
        let ok: QuestionSubmitted = serde_json::from_str(
            r#"{"id":4,"message":"Your question has been submitted successfully. We'll get back to you soon!","submittedAt":"2025-03-02T10:15:30.123","success":true}"#,
        )
        .unwrap();
        assert_eq!(ok.id, Some(4));
        assert!(ok.success);
        assert!(ok.submitted_at.is_some());

        let odd: QuestionSubmitted =
            serde_json::from_str(r#"{"success":true,"submittedAt":[2025,3,2,10,15]}"#).unwrap();
        assert_eq!(odd.submitted_at, None);
    }

    #[test]
    fn failure_messages() {
        let status = ApiError::Status { status: 400, message: "Question must be between 10 and 1000 characters".into() };
        assert_eq!(failure_message(&status), "Question must be between 10 and 1000 characters");
        assert_eq!(failure_message(&ApiError::Network("offline".into())), SUBMIT_FAILED_MESSAGE);
    }
}
