use crate::{
    error::TaskyError,
    jira::{self, types::JiraIssueKey},
};
use std::process::Command;
use tracing::debug;

/// Issue key embedded in the name of the checked out git branch, if any
pub fn get_current_branch_key() -> Result<Option<JiraIssueKey>, TaskyError> {
    let output = Command::new("git")
        .args(["branch", "--show-current"])
        .output()?;
    if !output.status.success() {
        debug!("Not inside a git repository");
        return Ok(None);
    }

    branch_key(output.stdout)
}

fn branch_key(stdout: Vec<u8>) -> Result<Option<JiraIssueKey>, TaskyError> {
    let branch = String::from_utf8(stdout)?;
    debug!("Current branch: {}", branch.trim());

    Ok(jira::parse_issue_key_fuzzy(&branch))
}
