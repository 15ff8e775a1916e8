use crate::cli::OutputFormat;
use crate::dispatcher::ChatReply;
use activity_core::{ParsedQuery, Person};
use colored::Colorize;
use serde::Serialize;

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

pub fn output_list<T: Serialize + Displayable>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", "(none)".dimmed());
            }
            for item in items {
                println!("{}", item.display());
            }
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for ChatReply {
    fn display(&self) -> String {
        self.data.clone().unwrap_or_default()
    }
}

impl Displayable for ParsedQuery {
    fn display(&self) -> String {
        let person = match &self.person {
            Some(person) => person.alias.cyan().bold().to_string(),
            None => "(none)".dimmed().to_string(),
        };
        let window = match self.window {
            Some(window) => format!("{} day(s)", window.as_days()),
            None => "(none)".dimmed().to_string(),
        };
        format!(
            "{}: {}\n{}: {}\n{}: {}",
            "Person".dimmed(),
            person,
            "Intent".dimmed(),
            self.intent.as_str().white().bold(),
            "Window".dimmed(),
            window
        )
    }
}

impl Displayable for Person {
    fn display(&self) -> String {
        format!(
            "{}\n  {}: {}\n  {}: {}",
            self.alias.cyan().bold(),
            "GitHub".dimmed(),
            self.github_username.as_deref().unwrap_or("-"),
            "Jira".dimmed(),
            self.jira_account_id.as_deref().unwrap_or("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_core::{Intent, TimeWindow};

    #[test]
    fn test_parsed_query_display() {
        colored::control::set_override(false);
        let query = ParsedQuery {
            person: Some(Person::new("john", Some("jdoe".into()), None)),
            intent: Intent::GithubCommits,
            window: Some(TimeWindow::days(7)),
        };
        assert_eq!(
            query.display(),
            "Person: John\nIntent: GITHUB_COMMITS\nWindow: 7 day(s)"
        );
    }

    #[test]
    fn test_person_display_missing_identity() {
        colored::control::set_override(false);
        let person = Person::new("sarah", None, Some("acc-2".into()));
        assert_eq!(person.display(), "Sarah\n  GitHub: -\n  Jira: acc-2");
    }

    #[test]
    fn test_reply_display_prefers_data() {
        let reply = ChatReply::data("All good".to_string());
        assert_eq!(reply.display(), "All good");
    }
}
