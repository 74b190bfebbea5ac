use serde::{Deserialize, Serialize};

use crate::api::http::post_json;
use crate::error::ApiError;

pub const WELCOME_MESSAGE: &str = "Hi there! 👋 You're speaking with your Personal AI Assistance. I'm well trained and ready to assist you today but you can ask for the team at any time.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub matched_question: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub is_bot: bool,
    pub confidence: Option<f64>,
    pub topic: Option<String>,
    /// Bot messages are typed out; user messages appear at once.
    pub animate: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bot: false,
            confidence: None,
            topic: None,
            animate: false,
        }
    }

    pub fn welcome() -> Self {
        Self {
            text: WELCOME_MESSAGE.to_string(),
            is_bot: true,
            confidence: Some(1.0),
            topic: None,
            animate: true,
        }
    }

    /// Turns the outcome of [`ask`] into the bot bubble shown to the user.
    pub fn reply(result: Result<AskResponse, ApiError>) -> Self {
        match result {
            Ok(answer) => {
                log::debug!("Matched question: {:?}", answer.matched_question);
                Self {
                    text: answer.answer,
                    is_bot: true,
                    confidence: Some(answer.confidence),
                    topic: answer.topic,
                    animate: true,
                }
            }
            Err(e) => {
                log::error!("Error fetching answer: {}", e);
                Self {
                    text: CONNECTION_ERROR_MESSAGE.to_string(),
                    is_bot: true,
                    confidence: Some(0.0),
                    topic: None,
                    animate: true,
                }
            }
        }
    }
}

pub async fn ask(question: &str) -> Result<AskResponse, ApiError> {
    post_json("api/v1/chatbot/ask", &AskRequest { question }).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_becomes_typed_bot_message() {
        let response: AskResponse = serde_json::from_str(
            r#"{"answer":"Within 60 minutes.","confidence":0.82,"matchedQuestion":"How fast is the delivery?","topic":"Delivery"}"#,
        )
        .unwrap();
        assert_eq!(response.matched_question.as_deref(), Some("How fast is the delivery?"));

        let message = ChatMessage::reply(Ok(response));
        assert!(message.is_bot && message.animate);
        assert_eq!(message.text, "Within 60 minutes.");
        assert_eq!(message.confidence, Some(0.82));
        assert_eq!(message.topic.as_deref(), Some("Delivery"));
    }

    #[test]
    fn null_topic_is_accepted() {
        let response: AskResponse =
            serde_json::from_str(r#"{"answer":"Hi","confidence":1.0,"matchedQuestion":"hi","topic":null}"#)
                .unwrap();
        assert_eq!(response.topic, None);
    }

    #[test]
    fn failure_becomes_apology() {
        let message = ChatMessage::reply(Err(ApiError::Status { status: 500, message: "boom".into() }));
        assert_eq!(message.text, CONNECTION_ERROR_MESSAGE);
        assert_eq!(message.confidence, Some(0.0));
        assert!(message.is_bot);
    }

    #[test]
    fn user_messages_are_not_animated() {
        let message = ChatMessage::user("Do you deliver at night?");
        assert!(!message.is_bot);
        assert!(!message.animate);
    }
}
