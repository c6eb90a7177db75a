//! Tag operations

use std::collections::HashMap;

use git2::{ObjectType, Oid};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

/// Annotated tags grouped by the id of the object they point at
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_target: HashMap<String, Vec<TagInfo>>,
}

impl TagIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag under its own target id
    pub fn insert(&mut self, tag: TagInfo) {
        self.by_target
            .entry(tag.target_id.clone())
            .or_default()
            .push(tag);
    }

    /// Tags pointing at `commit_id`, in index order
    pub fn tags_for(&self, commit_id: &str) -> &[TagInfo] {
        self.by_target
            .get(commit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of tagged objects
    pub fn target_count(&self) -> usize {
        self.by_target.len()
    }

    /// Total number of tags
    pub fn len(&self) -> usize {
        self.by_target.values().map(Vec::len).sum()
    }

    /// Check if the index has no tags
    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    /// Iterate over every indexed tag
    pub fn iter(&self) -> impl Iterator<Item = &TagInfo> {
        self.by_target.values().flatten()
    }
}

impl GitRepo {
    /// Build the index of annotated tags.
    ///
    /// Lightweight tags are skipped. References are visited in name order so
    /// the index is the same for every run over an unchanged repository.
    #[instrument(skip(self))]
    pub fn tag_index(&self) -> Result<TagIndex> {
        let mut refs: Vec<(String, Oid)> = Vec::new();
        self.repo.tag_foreach(|oid, name| {
            refs.push((String::from_utf8_lossy(name).into_owned(), oid));
            true
        })?;
        refs.sort_by(|a, b| a.0.cmp(&b.0));

        let mut index = TagIndex::new();
        let mut skipped = 0usize;

        for (ref_name, oid) in refs {
            let object = self.repo.find_object(oid, None)?;
            match object.kind() {
                Some(ObjectType::Tag) => {
                    let tag = object.peel_to_tag()?;
                    index.insert(TagInfo::from(&tag));
                }
                kind => {
                    debug!(
                        reference = %ref_name,
                        kind = ?kind,
                        "lightweight tags not supported, skipping"
                    );
                    skipped += 1;
                }
            }
        }

        debug!(tags = index.len(), skipped, "built tag index");
        Ok(index)
    }
}
