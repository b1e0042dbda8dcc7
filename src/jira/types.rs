use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
    #[serde(default)]
    pub simplified: bool,
    pub style: Option<String>,
    #[serde(default)]
    pub avatar_urls: AvatarUrls,
    pub project_category: Option<ProjectCategory>,
    pub insight: Option<Insight>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AvatarUrls {
    #[serde(rename = "16x16")]
    pub x16: Option<String>,
    #[serde(rename = "24x24")]
    pub x24: Option<String>,
    #[serde(rename = "32x32")]
    pub x32: Option<String>,
    #[serde(rename = "48x48")]
    pub x48: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProjectCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(default)]
    pub total_issue_count: u64,
    #[serde(default, with = "jira_datetime")]
    pub last_issue_update_time: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Issue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
    pub fields: IssueFields,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    pub status: Option<Named>,
    pub issuetype: Option<Named>,
    pub assignee: Option<User>,
    #[serde(default, with = "jira_datetime")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "jira_datetime")]
    pub updated: Option<DateTime<FixedOffset>>,
    /// Atlassian Document Format, see [`adf_to_text`]
    pub description: Option<Value>,
    /// Seconds logged on the issue
    pub timespent: Option<u64>,
}

/// Any Jira entity that is shown by name (status, issue type, ...)
#[derive(Deserialize, Debug, Clone)]
pub struct Named {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: Option<String>,
    pub display_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Myself {
    pub account_id: String,
    pub display_name: String,
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JiraIssueKey {
    pub project: String,
    pub number: u64,
}

impl fmt::Display for JiraIssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.project, self.number)
    }
}

/// Input for `POST /issue`
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub project_key: String,
    pub summary: String,
    pub description: Option<String>,
    pub issue_type: String,
}

impl NewIssue {
    pub fn task(project_key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            project_key: project_key.into(),
            summary: summary.into(),
            description: None,
            issue_type: "Task".to_owned(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// Request body of `POST /issue`
#[derive(Serialize, Debug)]
pub(crate) struct CreateIssuePayload<'a> {
    fields: CreateIssueFields<'a>,
}

#[derive(Serialize, Debug)]
struct CreateIssueFields<'a> {
    project: KeyRef<'a>,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Value>,
    issuetype: NameRef<'a>,
}

#[derive(Serialize, Debug)]
struct KeyRef<'a> {
    key: &'a str,
}

#[derive(Serialize, Debug)]
struct NameRef<'a> {
    name: &'a str,
}

impl<'a> From<&'a NewIssue> for CreateIssuePayload<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        Self {
            fields: CreateIssueFields {
                project: KeyRef {
                    key: &issue.project_key,
                },
                summary: &issue.summary,
                description: issue
                    .description
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
                    .map(text_to_adf),
                issuetype: NameRef {
                    name: &issue.issue_type,
                },
            },
        }
    }
}

/// Builds an ADF document with one paragraph per line
pub fn text_to_adf(text: &str) -> Value {
    let paragraphs: Vec<Value> = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                serde_json::json!({ "type": "paragraph", "content": [] })
            } else {
                serde_json::json!({
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": line }],
                })
            }
        })
        .collect();

    serde_json::json!({ "type": "doc", "version": 1, "content": paragraphs })
}

/// Flattens an ADF document to plain text, one line per block node
pub fn adf_to_text(doc: &Value) -> String {
    fn walk(node: &Value, out: &mut String) {
        match node.get("type").and_then(Value::as_str) {
            Some("text") => {
                if let Some(text) = node.get("text").and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
            Some("hardBreak") => out.push('\n'),
            _ => {}
        }

        if let Some(children) = node.get("content").and_then(Value::as_array) {
            for child in children {
                walk(child, out);

                match child.get("type").and_then(Value::as_str) {
                    Some("paragraph" | "heading" | "codeBlock") => out.push('\n'),
                    Some("text" | "hardBreak" | "mention" | "emoji" | "inlineCard") | None => {}
                    Some(_) => {
                        if !out.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                }
            }
        }
    }

    // API v2 style plain string descriptions
    if let Some(text) = doc.as_str() {
        return text.to_owned();
    }

    let mut out = String::new();
    walk(doc, &mut out);
    out.trim_end().to_owned()
}

/// Jira timestamps look like `2024-03-01T10:15:30.000+0000`, which is not RFC 3339
pub mod jira_datetime {
    use chrono::{DateTime, FixedOffset};
    use serde::{de::Error, Deserialize, Deserializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

    pub fn parse(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_str(value, FORMAT).or_else(|_| DateTime::parse_from_rfc3339(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|value| parse(&value).map_err(D::Error::custom))
            .transpose()
    }
}
