//! Alias directory: short chat names mapped to platform identities.
//!
//! Built once at startup from configuration and shared read-only between
//! the intent parser and the backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ActivityError, Result, System};

/// A person known to the chatbot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display form of the alias ("John")
    pub alias: String,
    /// GitHub login, if the person has one
    pub github_username: Option<String>,
    /// Jira Cloud account id, if the person has one
    pub jira_account_id: Option<String>,
}

impl Person {
    pub fn new(
        alias: &str,
        github_username: Option<String>,
        jira_account_id: Option<String>,
    ) -> Self {
        Self {
            alias: capitalize(alias.trim()),
            github_username: github_username.filter(|s| !s.trim().is_empty()),
            jira_account_id: jira_account_id.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Identity of this person on `system`
    pub fn identity(&self, system: System) -> Option<&str> {
        match system {
            System::GitHub => self.github_username.as_deref(),
            System::Jira => self.jira_account_id.as_deref(),
        }
    }
}

/// First letter upper-case, the rest lower-case
fn capitalize(alias: &str) -> String {
    let lower = alias.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Case-insensitive lookup table of known people
#[derive(Debug, Clone, Default)]
pub struct AliasDirectory {
    people: BTreeMap<String, Person>,
}

impl AliasDirectory {
    pub fn new(people: impl IntoIterator<Item = Person>) -> Self {
        let people = people
            .into_iter()
            .filter(|p| !p.alias.is_empty())
            .map(|p| (p.alias.to_lowercase(), p))
            .collect();
        Self { people }
    }

    pub fn lookup(&self, alias: &str) -> Option<&Person> {
        self.people.get(&alias.trim().to_lowercase())
    }

    /// Resolve an alias to its identifier on `system`.
    ///
    /// Fails with `PersonNotFound` when the alias is unknown or the person
    /// has no account on that system.
    pub fn resolve(&self, alias: &str, system: System) -> Result<&str> {
        self.lookup(alias)
            .and_then(|person| person.identity(system))
            .ok_or_else(|| ActivityError::person_not_found(&display_alias(alias), system))
    }

    /// Lower-cased aliases, sorted
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.people.keys().map(String::as_str)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

fn display_alias(alias: &str) -> String {
    capitalize(alias.trim())
}
