use crate::error::TaskyError;
use nom::{
    bytes::complete::take_while,
    character::complete::{char, digit1, satisfy},
    combinator::{all_consuming, map_res, recognize},
    sequence::{pair, separated_pair},
    IResult,
};
use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};
use types::JiraIssueKey;

pub mod api;
pub mod auth;
pub mod pagination;
pub mod types;

const TOKEN_PROMPT: &str = "Go to https://id.atlassian.com/manage-profile/security/api-tokens and generate a new API token.
When done insert here: ";

/// Retreives the token from CLI
pub fn get_token() -> Result<String, TaskyError> {
    let token = read_token(io::stdin().lock(), io::stdout())?;
    println!();

    Ok(token)
}

fn read_token(mut input: impl BufRead, mut output: impl Write) -> Result<String, TaskyError> {
    write!(output, "{TOKEN_PROMPT}")?;
    output.flush()?;

    let mut token = String::new();
    input.read_line(&mut token)?;

    Ok(token.trim().to_owned())
}

fn project_key(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn issue_key(input: &str) -> IResult<&str, JiraIssueKey> {
    let (rest, (project, number)) =
        separated_pair(project_key, char('-'), map_res(digit1, u64::from_str))(input)?;

    Ok((
        rest,
        JiraIssueKey {
            project: project.to_ascii_uppercase(),
            number,
        },
    ))
}

/// Parses exactly one issue key such as `ABC-123`
pub fn parse_issue_key(text: &str) -> Result<JiraIssueKey, TaskyError> {
    all_consuming(issue_key)(text.trim())
        .map(|(_, key)| key)
        .map_err(|_| TaskyError::InvalidIssueKey(text.to_owned()))
}

/// Finds the first issue key in arbitrary text, e.g. a branch named `feature/abc-123-login`
pub fn parse_issue_key_fuzzy(text: &str) -> Option<JiraIssueKey> {
    let mut previous: Option<char> = None;

    for (index, c) in text.char_indices() {
        let at_word_start = previous.map_or(true, |p| !p.is_ascii_alphanumeric());
        previous = Some(c);

        if !at_word_start {
            continue;
        }
        if let Ok((_, key)) = issue_key(&text[index..]) {
            return Some(key);
        }
    }

    None
}

impl FromStr for JiraIssueKey {
    type Err = TaskyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_issue_key(s)
    }
}
