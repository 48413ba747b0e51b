//! Local File System Child Loader
//!
//! Lists directory entries under a fixed root. Node ids are paths relative to
//! that root, so `/src/main.rs` is `<root>/src/main.rs` on disk.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::entities::TreeNode;
use crate::domain::ports::{ChildLoader, LoadError};
use crate::domain::services::with_root;

/// Record attached to every file system node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Loads directory listings with `tokio::fs`
#[derive(Debug, Clone)]
pub struct FsChildLoader {
    root: PathBuf,
    show_hidden: bool,
}

impl FsChildLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            show_hidden: false,
        }
    }

    /// Include dot-files
    pub fn show_hidden(mut self, show: bool) -> Self {
        self.show_hidden = show;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of the node with `id`
    pub fn resolve(&self, id: &str) -> PathBuf {
        id.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    /// The root's entries as a ready flat list, root first
    pub async fn load_top_level(&self) -> Result<Vec<TreeNode<FsEntry>>, LoadError> {
        let root = TreeNode::root(Vec::new());
        let children = self.list(&root).await?;
        Ok(with_root(children))
    }

    async fn list(&self, node: &TreeNode<FsEntry>) -> Result<Vec<TreeNode<FsEntry>>, LoadError> {
        let dir = self.resolve(&node.id);
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| map_io_error(&node.id, e))?;

        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| map_io_error(&node.id, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.show_hidden && name.starts_with('.') {
                continue;
            }
            // Broken symlinks and races with deletion read as plain files.
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            let record = FsEntry {
                path: entry.path(),
                is_dir,
            };
            children.push(TreeNode::child_of(node, name, record).with_hint(is_dir));
        }
        trace!(dir = %dir.display(), entries = children.len(), "listed directory");
        Ok(children)
    }
}

#[async_trait]
impl ChildLoader<FsEntry> for FsChildLoader {
    async fn load_children(
        &self,
        node: &TreeNode<FsEntry>,
        _previous: &[TreeNode<FsEntry>],
    ) -> Result<Vec<TreeNode<FsEntry>>, LoadError> {
        self.list(node).await
    }
}

fn map_io_error(id: &str, err: io::Error) -> LoadError {
    match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound { id: id.to_string() },
        io::ErrorKind::PermissionDenied => LoadError::PermissionDenied { id: id.to_string() },
        _ => LoadError::Unavailable {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ids(list: &[TreeNode<FsEntry>]) -> Vec<&str> {
        list.iter().map(|n| n.id.as_str()).collect()
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/bin")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        std::fs::write(dir.path().join("README.md"), "").unwrap();
        std::fs::write(dir.path().join(".env"), "").unwrap();
        dir
    }

    #[tokio::test]
    async fn top_level_lists_root_entries() {
        let dir = fixture();
        let loader = FsChildLoader::new(dir.path());

        let list = loader.load_top_level().await.unwrap();

        assert_eq!(ids(&list), vec!["/", "/README.md", "/src"]);
        assert_eq!(list[0].children, vec!["/README.md", "/src"]);
        let src = &list[2];
        assert!(src.has_children_hint);
        assert!(src.data.as_ref().unwrap().is_dir);
        assert!(!list[1].has_children_hint);
    }

    #[tokio::test]
    async fn hidden_entries_are_opt_in() {
        let dir = fixture();
        let loader = FsChildLoader::new(dir.path()).show_hidden(true);

        let list = loader.load_top_level().await.unwrap();

        assert_eq!(ids(&list), vec!["/", "/.env", "/README.md", "/src"]);
    }

    #[tokio::test]
    async fn load_children_of_nested_dir() {
        let dir = fixture();
        let loader = FsChildLoader::new(dir.path());
        let list = loader.load_top_level().await.unwrap();
        let src = list.iter().find(|n| n.id == "/src").unwrap();

        let mut children = loader.load_children(src, &[]).await.unwrap();
        children.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(ids(&children), vec!["/src/bin", "/src/lib.rs"]);
        assert!(children.iter().all(|c| c.path == "/src"));
        assert_eq!(
            children[1].data.as_ref().unwrap().path,
            dir.path().join("src").join("lib.rs")
        );
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let dir = fixture();
        let loader = FsChildLoader::new(dir.path());
        let ghost = TreeNode::new(
            "",
            "ghost",
            FsEntry {
                path: dir.path().join("ghost"),
                is_dir: true,
            },
        );

        let err = loader.load_children(&ghost, &[]).await.unwrap_err();

        assert_eq!(
            err,
            LoadError::NotFound {
                id: "/ghost".to_string()
            }
        );
    }

    #[test]
    fn resolve_maps_ids_below_root() {
        let loader = FsChildLoader::new("/data");
        assert_eq!(loader.resolve("/"), PathBuf::from("/data"));
        assert_eq!(loader.resolve("/a/b"), PathBuf::from("/data/a/b"));
    }
}
