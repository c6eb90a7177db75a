//! Git types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Name, email and timestamp of a commit author or tagger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Seconds since the Unix epoch
    pub time: i64,
}

impl Identity {
    /// Create a new identity
    pub fn new(name: impl Into<String>, email: impl Into<String>, time: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            time,
        }
    }

    pub(crate) fn from_signature(sig: &git2::Signature<'_>) -> Self {
        Self::new(
            sig.name().unwrap_or("Unknown"),
            sig.email().unwrap_or_default(),
            sig.when().seconds(),
        )
    }

    /// The timestamp as a UTC date
    pub fn timestamp(&self) -> DateTime<Utc> {
        to_utc(self.time)
    }
}

/// Information about a git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub id: String,
    /// Short hash (first 7 characters)
    pub short_id: String,
    /// Commit message (first line)
    pub summary: String,
    /// Full commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Committer timestamp, seconds since the Unix epoch
    pub time: i64,
    /// Parent commit hashes, first parent first
    pub parent_ids: Vec<String>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        id: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        time: i64,
    ) -> Self {
        let id = id.into();
        let short_id = id.chars().take(7).collect();
        let message = message.into();
        let summary = message.lines().next().unwrap_or_default().trim().to_string();

        Self {
            id,
            short_id,
            summary,
            message,
            author: author.into(),
            author_email: author_email.into(),
            time,
            parent_ids: Vec::new(),
        }
    }

    /// Set the parent ids
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_ids = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Number of parents
    pub fn parent_count(&self) -> usize {
        self.parent_ids.len()
    }

    /// True for commits with two or more parents
    pub fn is_merge(&self) -> bool {
        self.parent_count() >= 2
    }

    /// True for commits without parents
    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    /// Committer timestamp as a UTC date
    pub fn timestamp(&self) -> DateTime<Utc> {
        to_utc(self.time)
    }

    /// The full message or the summary line
    pub fn display_message(&self, full: bool) -> &str {
        if full {
            self.message.trim_end()
        } else {
            &self.summary
        }
    }
}

impl From<&git2::Commit<'_>> for CommitInfo {
    fn from(commit: &git2::Commit<'_>) -> Self {
        let author = commit.author();
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();

        let mut info = CommitInfo::new(
            commit.id().to_string(),
            message,
            author.name().unwrap_or("Unknown"),
            author.email().unwrap_or_default(),
            commit.time().seconds(),
        )
        .with_parents(commit.parent_ids().map(|id| id.to_string()));

        if let Some(summary) = commit.summary() {
            info.summary = summary.to_string();
        }
        info
    }
}

/// Information about an annotated git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Hash of the object the tag points to
    pub target_id: String,
    /// Tagger, absent only for malformed tag objects
    pub tagger: Option<Identity>,
    /// Tag message
    pub message: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_id: target_id.into(),
            tagger: None,
            message: None,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the tagger
    pub fn with_tagger(mut self, tagger: Identity) -> Self {
        self.tagger = Some(tagger);
        self
    }
}

impl From<&git2::Tag<'_>> for TagInfo {
    fn from(tag: &git2::Tag<'_>) -> Self {
        let mut info = TagInfo::new(
            String::from_utf8_lossy(tag.name_bytes()),
            tag.target_id().to_string(),
        );

        if let Some(message) = tag.message() {
            let message = message.trim_end();
            if !message.is_empty() {
                info = info.with_message(message);
            }
        }

        if let Some(tagger) = tag.tagger() {
            info = info.with_tagger(Identity::from_signature(&tagger));
        }

        info
    }
}

fn to_utc(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
