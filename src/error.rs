use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskyError {
    #[error("HTTP error: {0:?}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("Jira API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("Invalid Jira URL '{0}': {1}")]
    InvalidUrl(String, String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to write configuration: {0}")]
    RonError(#[from] ron::Error),
    #[error("Failed to parse configuration: {0}")]
    RonParseError(#[from] ron::error::SpannedError),
    #[error("Invalid UTF-8 output: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Could not find a configuration directory, use --config or $TASKY_ROOT")]
    NoProjectDirs,
    #[error("Not logged in, run `tasky login` or set $JIRA_DOMAIN and $JIRA_API_TOKEN")]
    MissingConfigurations,
    #[error("Basic authentication needs an email address")]
    MissingEmail,
    #[error("'{0}' is not a Jira issue key (expected something like ABC-123)")]
    InvalidIssueKey(String),
    #[error("No issue key given and none found in the current git branch")]
    CouldNotGetJiraIssueKey,
}

impl TaskyError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::ReqwestError(error) => error.status(),
            _ => None,
        }
    }
}
