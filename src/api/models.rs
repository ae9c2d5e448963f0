use serde::Serialize;
use serde_json::Value;

#[derive(Debug)]
pub struct AskRequest {
    pub question: Option<String>,
}

impl AskRequest {
    /// Reads `question` from a JSON object body. Arrays, scalars and non-string
    /// questions all come out as `None`.
    pub fn from_body(body: &Value) -> Self {
        let question = body
            .as_object()
            .and_then(|fields| fields.get("question"))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { question }
    }

    /// The question when it is present and not blank.
    pub fn into_question(self) -> Option<String> {
        self.question.filter(|question| !question.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_question_from_object() {
        let request = AskRequest::from_body(&json!({"question": "What is Rust?", "extra": 1}));
        assert_eq!(request.into_question().as_deref(), Some("What is Rust?"));
    }

    #[test]
    fn array_body_has_no_question() {
        let request = AskRequest::from_body(&json!(["What is Rust?"]));
        assert!(request.question.is_none());
    }

    #[test]
    fn non_string_question_is_absent() {
        for body in [json!({"question": 42}), json!({"question": ["a"]}), json!("question")] {
            assert!(AskRequest::from_body(&body).question.is_none(), "body: {body}");
        }
    }
}
