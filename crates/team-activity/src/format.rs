//! Reply templates, one per record shape.

use activity_core::{ActivitySummary, AssignedIssue, Commit, PullRequest, Repository};

pub fn jira_reply(name: &str, issues: &[AssignedIssue]) -> String {
    if issues.is_empty() {
        return format!("No JIRA issues found for {}.", name);
    }

    let mut lines = vec![format!(
        "{} is working on {} JIRA issue(s):",
        name,
        issues.len()
    )];
    for issue in issues {
        lines.push(format!(
            "- {} ({}): {}",
            issue.key, issue.status, issue.summary
        ));
    }
    lines.join("\n")
}

pub fn commits_reply(name: &str, commits: &[Commit]) -> String {
    if commits.is_empty() {
        return format!("No recent GitHub commits found for {}.", name);
    }

    let mut lines = vec![format!("Recent GitHub commits by {}:", name)];
    for commit in commits {
        lines.push(format!("- {}: {}", commit.repo, commit.message));
    }
    lines.join("\n")
}

pub fn pull_requests_reply(name: &str, prs: &[PullRequest]) -> String {
    if prs.is_empty() {
        return format!("No active pull requests found for {}.", name);
    }

    let mut lines = vec![format!("Active pull requests by {}:", name)];
    for pr in prs {
        lines.push(format!("- {}: {}", pr.repo, pr.title));
    }
    lines.join("\n")
}

pub fn repositories_reply(name: &str, repos: &[Repository]) -> String {
    if repos.is_empty() {
        return format!("No recent repository contributions found for {}.", name);
    }

    let mut lines = vec![format!("Repositories recently contributed to by {}:", name)];
    for repo in repos {
        lines.push(format!("- {}", repo.name));
    }
    lines.join("\n")
}

pub fn activity_reply(name: &str, summary: &ActivitySummary) -> String {
    if summary.is_empty() {
        return format!("No GitHub activity found for {}.", name);
    }

    format!(
        "On GitHub, {} has:\n- {} commits\n- {} open pull requests",
        name, summary.commits, summary.pull_requests
    )
}

/// Jira block, a blank line, then the commits block
pub fn combined_reply(name: &str, issues: &[AssignedIssue], commits: &[Commit]) -> String {
    format!(
        "{}\n\n{}",
        jira_reply(name, issues),
        commits_reply(name, commits)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(repo: &str, message: &str) -> Commit {
        Commit {
            repo: repo.to_string(),
            message: message.to_string(),
            date: Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
        }
    }

    fn issue(key: &str, status: &str, summary: &str) -> AssignedIssue {
        AssignedIssue {
            key: key.to_string(),
            summary: summary.to_string(),
            status: status.to_string(),
            updated: Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_inputs_name_the_person() {
        let replies = [
            jira_reply("John", &[]),
            commits_reply("John", &[]),
            pull_requests_reply("John", &[]),
            repositories_reply("John", &[]),
            activity_reply("John", &ActivitySummary::default()),
            combined_reply("John", &[], &[]),
        ];
        for reply in replies {
            assert!(reply.starts_with("No "), "{reply}");
            assert!(reply.contains("John"), "{reply}");
        }

        assert_eq!(jira_reply("Sarah", &[]), "No JIRA issues found for Sarah.");
        assert_eq!(
            commits_reply("Sarah", &[]),
            "No recent GitHub commits found for Sarah."
        );
        assert_eq!(
            pull_requests_reply("Sarah", &[]),
            "No active pull requests found for Sarah."
        );
        assert_eq!(
            repositories_reply("Sarah", &[]),
            "No recent repository contributions found for Sarah."
        );
        assert_eq!(
            activity_reply("Sarah", &ActivitySummary::default()),
            "No GitHub activity found for Sarah."
        );
    }

    #[test]
    fn test_jira_reply() {
        let reply = jira_reply(
            "John",
            &[
                issue("PROJ-1", "In Progress", "Fix checkout"),
                issue("PROJ-2", "To Do", "Write docs"),
            ],
        );
        assert_eq!(
            reply,
            "John is working on 2 JIRA issue(s):\n\
             - PROJ-1 (In Progress): Fix checkout\n\
             - PROJ-2 (To Do): Write docs"
        );
    }

    #[test]
    fn test_github_replies() {
        assert_eq!(
            commits_reply("Mike", &[commit("acme/api", "Fix login")]),
            "Recent GitHub commits by Mike:\n- acme/api: Fix login"
        );

        let pr = PullRequest {
            repo: "acme/web".to_string(),
            title: "Dark mode".to_string(),
            url: "https://github.com/acme/web/pull/3".to_string(),
        };
        assert_eq!(
            pull_requests_reply("Mike", &[pr]),
            "Active pull requests by Mike:\n- acme/web: Dark mode"
        );

        let repos = [
            Repository {
                name: "acme/api".to_string(),
            },
            Repository {
                name: "acme/cli".to_string(),
            },
        ];
        assert_eq!(
            repositories_reply("Mike", &repos),
            "Repositories recently contributed to by Mike:\n- acme/api\n- acme/cli"
        );

        let summary = ActivitySummary {
            commits: 42,
            pull_requests: 0,
        };
        assert_eq!(
            activity_reply("Mike", &summary),
            "On GitHub, Mike has:\n- 42 commits\n- 0 open pull requests"
        );
    }

    #[test]
    fn test_combined_reply() {
        let reply = combined_reply(
            "John",
            &[issue("PROJ-1", "Done", "Ship it")],
            &[commit("acme/api", "Release 1.0")],
        );
        assert_eq!(
            reply,
            "John is working on 1 JIRA issue(s):\n- PROJ-1 (Done): Ship it\n\n\
             Recent GitHub commits by John:\n- acme/api: Release 1.0"
        );
    }
}
