mod cli;
mod config;
mod dispatcher;
mod format;
mod logging;
mod output;
mod parser;
mod server;

use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use activity_core::{AliasDirectory, GitHubActivity, Intent, JiraActivity, Person};
use activity_mock::MockClient;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dispatcher::{ChatReply, Dispatcher};
use github_backend::GitHubClient;
use jira_backend::JiraClient;
use output::{output_error, output_list, output_result};
use parser::IntentParser;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    };
    logging::init_tracing(default_level);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    let directory = Arc::new(config.directory());

    match &cli.command {
        Commands::Parse { message } => {
            let parser = IntentParser::new(directory)?;
            output_result(&parser.parse(message), cli.format);
            Ok(())
        }
        Commands::People => {
            let people: Vec<Person> = directory.people().cloned().collect();
            output_list(&people, cli.format);
            Ok(())
        }
        Commands::Ask { message, intent } => {
            let intent_override = intent
                .as_deref()
                .map(Intent::from_str)
                .transpose()?;
            let dispatcher = build_dispatcher(&config, directory)?;
            let answer = dispatcher.answer(message, intent_override)?;
            output_result(&ChatReply::data(answer), cli.format);
            Ok(())
        }
        Commands::Serve { bind } => {
            let bind = bind.clone().unwrap_or_else(|| config.bind.clone());
            let dispatcher = Arc::new(build_dispatcher(&config, directory)?);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(server::serve(&bind, dispatcher))
        }
    }
}

/// Wire the parser to either the scenario mock or the live clients
fn build_dispatcher(config: &Config, directory: Arc<AliasDirectory>) -> Result<Dispatcher> {
    let parser = IntentParser::new(directory.clone())?;

    if let Some(mock_dir) = activity_mock::get_mock_dir() {
        info!(dir = %mock_dir.display(), "using mock activity backend");
        let mock = Arc::new(
            MockClient::from_dir(&mock_dir, directory)
                .with_context(|| format!("failed to load mock scenario from {}", mock_dir.display()))?,
        );
        return Ok(Dispatcher::new(parser, mock.clone(), mock));
    }

    config.validate()?;
    let (github, jira) = live_clients(config, directory)?;
    Ok(Dispatcher::new(parser, github, jira))
}

fn live_clients(
    config: &Config,
    directory: Arc<AliasDirectory>,
) -> Result<(Arc<dyn GitHubActivity>, Arc<dyn JiraActivity>)> {
    let retry = config.retry_policy();
    let timeout = config.request_timeout();

    let github = GitHubClient::with_base_url(
        &config.github.url,
        config.github.token.as_deref(),
        directory.clone(),
    )
    .with_retry(retry)
    .with_timeout(timeout)
    .with_limits(config.github.commit_limit, config.github.repository_limit);

    let (Some(url), Some(email), Some(api_token)) = (
        config.jira.url.as_deref(),
        config.jira.email.as_deref(),
        config.jira.api_token.as_deref(),
    ) else {
        anyhow::bail!("Jira credentials not configured");
    };
    let jira = JiraClient::new(url, email, api_token, directory)
        .with_retry(retry)
        .with_timeout(timeout)
        .with_max_results(config.jira.max_results);

    Ok((Arc::new(github), Arc::new(jira)))
}
