use crate::jira::{parse_issue_key, types::JiraIssueKey};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct TaskyCLI {
    /// Override configuration root path value, can also be override using $TASKY_ROOT
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CLISubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CLISubcommand {
    /// Save the Jira instance and API token
    Login {
        /// Instance name (`acme` for acme.atlassian.net), host or full URL
        #[arg(long)]
        domain: String,
        /// Atlassian account email, required unless --bearer is set
        #[arg(long, required_unless_present = "bearer")]
        email: Option<String>,
        /// Send the token as a bearer personal access token
        #[arg(long)]
        bearer: bool,
    },
    /// Check the saved credentials
    Whoami,
    /// List all projects
    Projects,
    /// List all issues of a project
    Issues {
        /// Project key, e.g. ACME
        project: String,
        /// Issues fetched per request
        #[arg(long, default_value_t = 50)]
        page_size: u64,
    },
    /// Show one issue, defaults to the key in the current git branch
    Issue {
        #[arg(value_parser = parse_key_arg)]
        key: Option<JiraIssueKey>,
    },
    /// Create a new issue
    Create {
        #[arg(short, long)]
        project: String,
        #[arg(short, long)]
        summary: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short = 't', long, default_value = "Task")]
        issue_type: String,
    },
}

fn parse_key_arg(key: &str) -> Result<JiraIssueKey, String> {
    parse_issue_key(key).map_err(|error| error.to_string())
}

#[cfg(test)]
mod test {
    use super::{CLISubcommand, TaskyCLI};
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_is_consistent() {
        TaskyCLI::command().debug_assert();
    }

    #[test]
    fn test_issue_key_argument() {
        let cli = TaskyCLI::parse_from(["tasky", "issue", "abc-12"]);
        match cli.command {
            CLISubcommand::Issue { key: Some(key) } => assert_eq!(key.to_string(), "ABC-12"),
            other => panic!("unexpected {other:?}"),
        }

        assert!(TaskyCLI::try_parse_from(["tasky", "issue", "nope"]).is_err());
    }

    #[test]
    fn test_login_requires_email_for_basic_auth() {
        assert!(TaskyCLI::try_parse_from(["tasky", "login", "--domain", "acme"]).is_err());
        assert!(TaskyCLI::try_parse_from(["tasky", "login", "--domain", "acme", "--bearer"]).is_ok());
    }
}
