//! Chat request handling: validate, parse, route, render.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use activity_core::{
    ActivityError, GitHubActivity, Intent, JiraActivity, Person, TimeWindow, UnsupportedIntent,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::format;
use crate::parser::IntentParser;

/// Field name → validation messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Request-level failures, each mapped to an HTTP status and body
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid payload")]
    PayloadInvalid(FieldErrors),

    #[error("User not found")]
    PersonNotFound,

    #[error(transparent)]
    Activity(#[from] ActivityError),

    #[error(transparent)]
    UnsupportedIntent(#[from] UnsupportedIntent),
}

impl ChatError {
    pub fn status(&self) -> u16 {
        match self {
            ChatError::PayloadInvalid(_) | ChatError::PersonNotFound => 400,
            ChatError::UnsupportedIntent(_) => 400,
            ChatError::Activity(err) if err.is_lookup_failure() => 400,
            ChatError::Activity(_) => 502,
        }
    }

    pub fn to_reply(&self) -> ChatReply {
        match self {
            ChatError::PayloadInvalid(errors) => ChatReply {
                success: false,
                data: None,
                message: Some(self.to_string()),
                errors: Some(json!(errors)),
            },
            ChatError::PersonNotFound => ChatReply {
                success: false,
                data: None,
                message: Some(self.to_string()),
                errors: None,
            },
            ChatError::Activity(err) if err.is_lookup_failure() => {
                ChatReply::errors(vec![err.to_string()])
            }
            // Remote details stay in the log
            ChatError::Activity(err) => ChatReply::errors(vec![format!(
                "{} is temporarily unavailable",
                err.system()
            )]),
            ChatError::UnsupportedIntent(_) => {
                ChatReply::errors(vec!["Unsupported intent".to_string()])
            }
        }
    }
}

/// JSON body returned by the chat endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ChatReply {
    pub fn data(text: String) -> Self {
        Self {
            success: true,
            data: Some(text),
            message: None,
            errors: None,
        }
    }

    fn errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            errors: Some(json!(errors)),
        }
    }
}

/// Status code plus body
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub status: u16,
    pub body: ChatReply,
}

impl From<std::result::Result<String, ChatError>> for ChatResponse {
    fn from(result: std::result::Result<String, ChatError>) -> Self {
        match result {
            Ok(text) => ChatResponse {
                status: 200,
                body: ChatReply::data(text),
            },
            Err(err) => ChatResponse {
                status: err.status(),
                body: err.to_reply(),
            },
        }
    }
}

/// Extract the `message` field of a chat payload
pub fn validate_payload(payload: &Value) -> std::result::Result<String, ChatError> {
    let field_error = |message: &str| {
        let mut errors = FieldErrors::new();
        errors.insert("message".to_string(), vec![message.to_string()]);
        ChatError::PayloadInvalid(errors)
    };

    let Some(object) = payload.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(
            "non_field_errors".to_string(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(payload)
            )],
        );
        return Err(ChatError::PayloadInvalid(errors));
    };

    match object.get("message") {
        None => Err(field_error("This field is required.")),
        Some(Value::Null) => Err(field_error("This field may not be null.")),
        Some(Value::String(message)) if message.trim().is_empty() => {
            Err(field_error("This field may not be blank."))
        }
        Some(Value::String(message)) => Ok(message.trim().to_string()),
        Some(_) => Err(field_error("Not a valid string.")),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Routes parsed chat messages to the activity clients
pub struct Dispatcher {
    parser: IntentParser,
    github: Arc<dyn GitHubActivity>,
    jira: Arc<dyn JiraActivity>,
}

impl Dispatcher {
    pub fn new(
        parser: IntentParser,
        github: Arc<dyn GitHubActivity>,
        jira: Arc<dyn JiraActivity>,
    ) -> Self {
        Self {
            parser,
            github,
            jira,
        }
    }

    /// Handle one raw chat payload end to end
    pub fn handle(&self, payload: &Value) -> ChatResponse {
        let result = validate_payload(payload).and_then(|message| self.answer(&message, None));
        if let Err(err) = &result {
            warn!(status = err.status(), error = %err, "chat request failed");
        }
        ChatResponse::from(result)
    }

    /// Answer a message, optionally forcing the intent
    pub fn answer(
        &self,
        message: &str,
        intent_override: Option<Intent>,
    ) -> std::result::Result<String, ChatError> {
        let query = self.parser.parse(message);
        let intent = intent_override.unwrap_or(query.intent);

        let Some(person) = query.person else {
            info!(%intent, "no known person in message");
            return Err(ChatError::PersonNotFound);
        };

        info!(
            person = %person.alias,
            %intent,
            window_days = query.window.map(|w| w.as_days()),
            "dispatching chat query"
        );
        Ok(self.route(&person, intent, query.window)?)
    }

    fn route(
        &self,
        person: &Person,
        intent: Intent,
        window: Option<TimeWindow>,
    ) -> std::result::Result<String, ActivityError> {
        let name = person.alias.as_str();

        let reply = match intent {
            Intent::JiraOnly => format::jira_reply(name, &self.jira.assigned_issues(name, window)?),
            Intent::GithubCommits => {
                format::commits_reply(name, &self.github.recent_commits(name, window)?)
            }
            Intent::GithubPrs => {
                format::pull_requests_reply(name, &self.github.open_pull_requests(name)?)
            }
            Intent::GithubRepos => {
                format::repositories_reply(name, &self.github.recent_repositories(name)?)
            }
            Intent::GithubOnly => {
                format::activity_reply(name, &self.github.activity_summary(name)?)
            }
            Intent::Both => {
                let (issues, commits) = thread::scope(|scope| {
                    let issues = scope.spawn(|| self.jira.assigned_issues(name, window));
                    let commits = self.github.recent_commits(name, window);
                    let issues = match issues.join() {
                        Ok(result) => result,
                        Err(panic) => std::panic::resume_unwind(panic),
                    };
                    (issues, commits)
                });
                // Either leg failing fails the request; Jira is reported first
                let issues = issues?;
                let commits = commits?;
                format::combined_reply(name, &issues, &commits)
            }
        };

        Ok(reply)
    }
}
