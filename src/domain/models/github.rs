//! GitHub webhook payload models.
//!
//! Only the fields the relay reads are modelled; everything else in the
//! webhook body is ignored.

use serde::{Deserialize, Serialize};

/// Body of an `issues` webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    /// Webhook action (`opened`, `edited`, `closed`, ...). Logged only.
    #[serde(default)]
    pub action: Option<String>,
    pub issue: Issue,
    pub repository: Repository,
    pub sender: Sender,
}

/// An issue as delivered in a webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    /// Issue body text (null when the issue has no description).
    #[serde(default)]
    pub body: Option<String>,
    /// `"open"` or `"closed"`.
    pub state: String,
    pub html_url: String,
}

impl Issue {
    /// Task description: the issue URL, a blank line, then the body.
    pub fn task_description(&self) -> String {
        format!("{}\n\n{}", self.html_url, self.body.as_deref().unwrap_or_default())
    }
}

/// Repository that owns the issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
}

/// Account that triggered the delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sender {
    pub login: String,
}
