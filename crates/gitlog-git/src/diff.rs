//! Tree listing and first-parent diffs

use std::path::{Path, PathBuf};

use git2::{DiffFindOptions, ObjectType, Tree};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Every file path in a commit's tree.
    ///
    /// A subtree that cannot be read is an error, never a shorter listing.
    #[instrument(skip(self))]
    pub fn tree_paths(&self, commit_id: &str) -> Result<Vec<PathBuf>> {
        let commit = self.find_commit(commit_id)?;
        let tree = commit.tree()?;

        let mut paths = Vec::new();
        self.collect_files(&tree, Path::new(""), &mut paths)?;

        debug!(count = paths.len(), "listed tree paths");
        Ok(paths)
    }

    fn collect_files(
        &self,
        tree: &Tree<'_>,
        prefix: &Path,
        paths: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for entry in tree.iter() {
            let Some(name) = entry.name() else {
                continue;
            };
            let path = prefix.join(name);
            match entry.kind() {
                Some(ObjectType::Blob) => paths.push(path),
                Some(ObjectType::Tree) => {
                    let subtree = self.repo.find_tree(entry.id())?;
                    self.collect_files(&subtree, &path, paths)?;
                }
                // submodule entries point at commits in another repository
                _ => {}
            }
        }
        Ok(())
    }

    /// Paths changed by a commit relative to its first parent.
    ///
    /// Renames are detected, and both the old and the new path of each change
    /// are reported. A root commit is compared against the empty tree.
    #[instrument(skip(self))]
    pub fn changed_paths(&self, commit_id: &str) -> Result<Vec<PathBuf>> {
        let commit = self.find_commit(commit_id)?;
        let new_tree = commit.tree()?;
        let old_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut diff = self
            .repo
            .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), None)?;

        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for delta in diff.deltas() {
            for file in [delta.old_file(), delta.new_file()] {
                if let Some(path) = file.path() {
                    if !paths.iter().any(|p| p == path) {
                        paths.push(path.to_path_buf());
                    }
                }
            }
        }

        debug!(deltas = diff.deltas().len(), paths = paths.len(), "computed changed paths");
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Repository, Signature, Time};
    use std::path::Path;
    use tempfile::TempDir;

    const CONTENT: &str = "line one\nline two\nline three\nline four\nline five\n";

    struct Fixture {
        temp: TempDir,
        repo: Repository,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let repo = Repository::init(temp.path()).unwrap();
            Self { temp, repo }
        }

        fn commit(&self, add: &[(&str, &str)], remove: &[&str], message: &str) -> Oid {
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
            let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

            let sig = Signature::new("Test", "test@example.com", &Time::new(1_000, 0)).unwrap();
            let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
            let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
            self.repo
                .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                .unwrap()
        }

        /// Delete the loose object file of the tree at `path` in `commit`
        fn remove_tree(&self, commit: Oid, path: &str) {
            let tree = self.repo.find_commit(commit).unwrap().tree().unwrap();
            let id = tree.get_path(Path::new(path)).unwrap().id().to_string();
            let object = self.repo.path().join("objects").join(&id[..2]).join(&id[2..]);
            std::fs::remove_file(object).unwrap();
        }
    }

    #[test]
    fn test_tree_paths_recursive() {
        let fixture = Fixture::new();
        let root = fixture.commit(&[("README.md", "x"), ("src/core/lib.rs", "y")], &[], "init");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        let mut paths = repo.tree_paths(&root.to_string()).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![PathBuf::from("README.md"), PathBuf::from("src/core/lib.rs")]
        );
    }

    #[test]
    fn test_tree_paths_unreadable_subtree_is_an_error() {
        let fixture = Fixture::new();
        let root = fixture.commit(&[("README.md", "x"), ("cli/sub/main.rs", "y")], &[], "init");
        fixture.remove_tree(root, "cli");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        assert!(repo.tree_paths(&root.to_string()).is_err());
    }

    #[test]
    fn test_changed_paths_against_first_parent() {
        let fixture = Fixture::new();
        fixture.commit(&[("a.txt", "1"), ("b.txt", "1")], &[], "init");
        let second = fixture.commit(&[("b.txt", "2")], &[], "change b");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        let paths = repo.changed_paths(&second.to_string()).unwrap();
        assert_eq!(paths, vec![PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_changed_paths_of_root_commit() {
        let fixture = Fixture::new();
        let root = fixture.commit(&[("a.txt", "1")], &[], "init");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        let paths = repo.changed_paths(&root.to_string()).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_rename_reports_both_paths() {
        let fixture = Fixture::new();
        fixture.commit(&[("src/moved.txt", CONTENT)], &[], "init");
        let renamed = fixture.commit(&[("lib/moved.txt", CONTENT)], &["src/moved.txt"], "move");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        let mut paths = repo.changed_paths(&renamed.to_string()).unwrap();
        paths.sort();
        assert_eq!(
            paths,
            vec![PathBuf::from("lib/moved.txt"), PathBuf::from("src/moved.txt")]
        );
    }

    #[test]
    fn test_unknown_commit_is_an_error() {
        let fixture = Fixture::new();
        fixture.commit(&[("a.txt", "1")], &[], "init");

        let repo = GitRepo::open(fixture.temp.path()).unwrap();
        assert!(repo.changed_paths("0123456789012345678901234567890123456789").is_err());
        assert!(repo.tree_paths("not-a-hash").is_err());
    }
}
