use clap::Parser;
use colored::Colorize;
use std::{env, fs, io, path::PathBuf};
use tasky::{
    args::{CLISubcommand, TaskyCLI},
    config::{self, Config, Credentials, Saveable},
    dirs,
    error::TaskyError,
    git,
    jira::{
        self,
        api::JiraApi,
        auth::Auth,
        types::{adf_to_text, Issue, NewIssue},
    },
    time::{format_timestamp, seconds_to_string},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TaskyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = TaskyCLI::parse();
    let Some(config_root) = args
        .config
        .to_owned()
        .or_else(|| env::var("TASKY_ROOT").map(PathBuf::from).ok())
        .or_else(|| dirs().map(|d| d.config_local_dir().to_owned()).ok())
    else {
        return Err(TaskyError::NoProjectDirs);
    };

    if !config_root.is_dir() {
        fs::create_dir_all(&config_root)?;
    }

    let requires_auth = || -> Result<JiraApi, TaskyError> {
        let (base_url, auth) = config::load(&config_root)?;
        debug!("Using Jira at {base_url}");
        Ok(JiraApi::new(base_url, auth))
    };

    match args.command {
        CLISubcommand::Login {
            domain,
            email,
            bearer,
        } => {
            let config = Config { domain };
            let token = jira::get_token()?;
            let auth = match email {
                Some(email) if !bearer => Auth::Basic { email, token },
                _ => Auth::Bearer { token },
            };

            debug!("Checking the new credentials...");
            let me = JiraApi::new(config.base_url()?, auth.clone())
                .validate_token()
                .await?;

            config.save(&config_root)?;
            Credentials::from(&auth).save(&config_root)?;

            println!("Logged in as {}", me.display_name.green());
        }
        CLISubcommand::Whoami => {
            let me = requires_auth()?.validate_token().await?;
            println!(
                "{} ({}) {}",
                me.display_name.green(),
                me.email_address.as_deref().unwrap_or("no email"),
                me.account_id.dimmed()
            );
        }
        CLISubcommand::Projects => {
            let projects = requires_auth()?.list_projects().await?;
            for project in &projects {
                println!("{:<12} {}", project.key.bright_blue(), project.name);
            }
            println!("{} projects", projects.len());
        }
        CLISubcommand::Issues { project, page_size } => {
            let issues = requires_auth()?
                .with_page_size(page_size)
                .list_issues(&project)
                .await?;
            for issue in &issues {
                print_issue_line(issue);
            }
            println!("{} issues", issues.len());
        }
        CLISubcommand::Issue { key } => {
            let key = key
                .or_else(|| git::get_current_branch_key().ok().flatten())
                .ok_or(TaskyError::CouldNotGetJiraIssueKey)?;
            let issue = requires_auth()?.get_issue(&key).await?;
            print_issue(&issue);
        }
        CLISubcommand::Create {
            project,
            summary,
            description,
            issue_type,
        } => {
            let api = requires_auth()?;
            let created = api
                .create_issue(&NewIssue {
                    project_key: project,
                    summary,
                    description,
                    issue_type,
                })
                .await?;

            println!(
                "Created {} {}browse/{}",
                created.key.green(),
                api.base_url(),
                created.key
            );
        }
    }

    Ok(())
}

fn print_issue_line(issue: &Issue) {
    let status = issue
        .fields
        .status
        .as_ref()
        .map_or("", |status| status.name.as_str());
    println!(
        "{:<12} {:<14} {}",
        issue.key.bright_blue(),
        status.yellow(),
        issue.fields.summary
    );
}

fn print_issue(issue: &Issue) {
    let fields = &issue.fields;
    println!("{} {}", issue.key.bright_blue(), fields.summary.bold());

    if let Some(kind) = &fields.issuetype {
        println!("Type:     {}", kind.name);
    }
    if let Some(status) = &fields.status {
        println!("Status:   {}", status.name.yellow());
    }
    let assignee = fields
        .assignee
        .as_ref()
        .map_or("unassigned", |user| user.display_name.as_str());
    println!("Assignee: {assignee}");
    if let Some(created) = &fields.created {
        println!("Created:  {}", format_timestamp(created));
    }
    if let Some(updated) = &fields.updated {
        println!("Updated:  {}", format_timestamp(updated));
    }
    if let Some(spent) = fields.timespent {
        println!("Logged:   {}", seconds_to_string(spent).green());
    }
    if let Some(description) = &fields.description {
        println!("\n{}", adf_to_text(description));
    }
}
