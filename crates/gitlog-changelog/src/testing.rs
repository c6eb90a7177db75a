//! Test fixtures: throwaway repositories and a recording sink

use std::path::Path;
use std::sync::{Arc, Mutex};

use git2::{Oid, Repository, Signature, Time};
use gitlog_core::error::RenderError;
use gitlog_git::{CommitInfo, GitRepo, TagInfo};
use tempfile::TempDir;

use crate::sink::RenderSink;

pub(crate) struct TestRepo {
    temp: TempDir,
    repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        Self { temp, repo }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn open(&self) -> GitRepo {
        GitRepo::open(self.temp.path()).unwrap()
    }

    /// Commit on HEAD with the given files written
    pub fn commit(&self, files: &[(&str, &str)], message: &str, time: i64) -> Oid {
        self.commit_changes(files, &[], message, time)
    }

    /// Commit on HEAD with files written and removed
    pub fn commit_changes(
        &self,
        add: &[(&str, &str)],
        remove: &[&str],
        message: &str,
        time: i64,
    ) -> Oid {
        let tree = self.stage(add, remove);
        let parents: Vec<Oid> = self.head().into_iter().collect();
        self.write_commit(Some("HEAD"), &parents, tree, message, time)
    }

    /// Commit with explicit parents, without moving HEAD
    pub fn commit_detached(
        &self,
        parents: &[Oid],
        files: &[(&str, &str)],
        message: &str,
        time: i64,
    ) -> Oid {
        let tree = self.stage(files, &[]);
        self.write_commit(None, parents, tree, message, time)
    }

    /// Merge commit on HEAD; its first parent must be the current HEAD
    pub fn merge(&self, parents: &[Oid], message: &str, time: i64) -> Oid {
        let tree = self.stage(&[], &[]);
        self.write_commit(Some("HEAD"), parents, tree, message, time)
    }

    pub fn annotated_tag(&self, name: &str, target: Oid) {
        let sig = Signature::new("Tagger", "tagger@example.com", &Time::new(9_000, 0)).unwrap();
        let object = self.repo.find_object(target, None).unwrap();
        self.repo
            .tag(name, &object, &sig, &format!("Release {name}"), false)
            .unwrap();
    }

    pub fn lightweight_tag(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    /// Delete the loose object file of the tree at `path` in `commit`
    pub fn remove_tree(&self, commit: Oid, path: &str) {
        let tree = self.repo.find_commit(commit).unwrap().tree().unwrap();
        let id = tree.get_path(Path::new(path)).unwrap().id().to_string();
        let object = self.repo.path().join("objects").join(&id[..2]).join(&id[2..]);
        std::fs::remove_file(object).unwrap();
    }

    fn head(&self) -> Option<Oid> {
        self.repo.head().ok().and_then(|h| h.target())
    }

    fn stage(&self, add: &[(&str, &str)], remove: &[&str]) -> Oid {
        let mut index = self.repo.index().unwrap();
        for (path, content) in add {
            let full = self.temp.path().join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, content).unwrap();
            index.add_path(Path::new(path)).unwrap();
        }
        for path in remove {
            std::fs::remove_file(self.temp.path().join(path)).unwrap();
            index.remove_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        index.write_tree().unwrap()
    }

    fn write_commit(
        &self,
        update_ref: Option<&str>,
        parents: &[Oid],
        tree: Oid,
        message: &str,
        time: i64,
    ) -> Oid {
        let sig = Signature::new("Test", "test@example.com", &Time::new(time, 0)).unwrap();
        let tree = self.repo.find_tree(tree).unwrap();
        let parents: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).unwrap())
            .collect();
        let parents: Vec<&git2::Commit<'_>> = parents.iter().collect();
        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parents)
            .unwrap()
    }
}

/// A lifecycle call observed by [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Header(String),
    Tag(String),
    Commit(String),
    Footer,
    Close,
}

/// Sink that records every call, optionally failing some of them
pub(crate) struct RecordingSink {
    name: String,
    events: Arc<Mutex<Vec<Event>>>,
    fail_on_commit: bool,
    fail_on_close: bool,
}

impl RecordingSink {
    pub fn new(name: &str) -> (Self, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Self {
            name: name.to_string(),
            events: Arc::clone(&events),
            fail_on_commit: false,
            fail_on_close: false,
        };
        (sink, events)
    }

    pub fn failing_commits(mut self) -> Self {
        self.fail_on_commit = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_on_close = true;
        self
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

fn failure() -> RenderError {
    RenderError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
}

impl RenderSink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn render_header(&mut self, title: &str) -> Result<(), RenderError> {
        self.record(Event::Header(title.to_string()));
        Ok(())
    }

    fn render_tag(&mut self, tag: &TagInfo) -> Result<(), RenderError> {
        self.record(Event::Tag(tag.name.clone()));
        Ok(())
    }

    fn render_commit(&mut self, commit: &CommitInfo) -> Result<(), RenderError> {
        if self.fail_on_commit {
            return Err(failure());
        }
        self.record(Event::Commit(commit.summary.clone()));
        Ok(())
    }

    fn render_footer(&mut self) -> Result<(), RenderError> {
        self.record(Event::Footer);
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.record(Event::Close);
        if self.fail_on_close {
            return Err(failure());
        }
        Ok(())
    }
}

pub(crate) fn sample_commit(summary: &str) -> CommitInfo {
    CommitInfo::new(
        "abc1234567890abc1234567890abc1234567890a",
        format!("{summary}\n\nDetails about <{summary}> & more"),
        "Ada Lovelace",
        "ada@example.com",
        1_700_000_000,
    )
    .with_parents(["def4567890def4567890def4567890def4567890"])
}

pub(crate) fn sample_tag(name: &str) -> TagInfo {
    TagInfo::new(name, "abc1234567890abc1234567890abc1234567890a")
        .with_message(format!("Release {name}"))
        .with_tagger(gitlog_git::Identity::new("Tagger", "tagger@example.com", 1_700_000_100))
}
