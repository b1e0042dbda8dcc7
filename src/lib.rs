use directories::ProjectDirs;

pub mod args;
pub mod config;
pub mod error;
pub mod git;
pub mod jira;
pub mod time;

pub fn dirs() -> Result<ProjectDirs, error::TaskyError> {
    ProjectDirs::from("dev", "tasky", "tasky").ok_or(error::TaskyError::NoProjectDirs)
}
