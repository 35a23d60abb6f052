//! Storage kinds and their fixed layout under an override root
//!
//! Pure path arithmetic. Directory creation and the host fallback live in
//! `platform::storage`.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Logical storage entry points the engine asks the host for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Files,
    Data,
    ExternalFiles(Option<String>),
    Database(String),
    Cache,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Files => write!(f, "files"),
            StorageKind::Data => write!(f, "data"),
            StorageKind::ExternalFiles(None) => write!(f, "external-files"),
            StorageKind::ExternalFiles(Some(t)) => write!(f, "external-files({t})"),
            StorageKind::Database(name) => write!(f, "database({name})"),
            StorageKind::Cache => write!(f, "cache"),
        }
    }
}

/// Location of a redirected entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Path handed back to the caller
    pub path: PathBuf,
    /// Directory that must exist for `path` to be usable
    pub directory: PathBuf,
}

// Caller-supplied components are always relative to the root: only plain
// names survive, so `..`, roots and drive prefixes cannot leave it.
fn relative(component: &str) -> PathBuf {
    Path::new(&component.replace('\\', "/"))
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

impl StorageKind {
    /// Computes where this kind lives under `root`
    ///
    /// Files → `games/<namespace>`, Data → root, ExternalFiles(t) →
    /// `games/<namespace>[/t]`, Database(name) → `databases/name`,
    /// Cache → `cache`.
    pub fn layout_under(&self, root: &Path, namespace: &str) -> StorageLayout {
        let dir = |path: PathBuf| StorageLayout {
            directory: path.clone(),
            path,
        };

        match self {
            StorageKind::Files => dir(root.join("games").join(namespace)),
            StorageKind::Data => dir(root.to_path_buf()),
            StorageKind::ExternalFiles(subtype) => {
                let base = root.join("games").join(namespace);
                match subtype
                    .as_deref()
                    .map(relative)
                    .filter(|t| !t.as_os_str().is_empty())
                {
                    Some(t) => dir(base.join(t)),
                    None => dir(base),
                }
            }
            StorageKind::Database(name) => {
                let directory = root.join("databases");
                StorageLayout {
                    path: directory.join(relative(name)),
                    directory,
                }
            }
            StorageKind::Cache => dir(root.join("cache")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "com.mojang";

    #[test]
    fn files_live_under_games_namespace() {
        let layout = StorageKind::Files.layout_under(Path::new("/r"), NS);
        assert_eq!(layout.path, PathBuf::from("/r/games/com.mojang"));
        assert_eq!(layout.directory, layout.path);
    }

    #[test]
    fn data_is_the_root() {
        let layout = StorageKind::Data.layout_under(Path::new("/r"), NS);
        assert_eq!(layout.path, PathBuf::from("/r"));
    }

    #[test]
    fn external_files_with_and_without_subtype() {
        let plain = StorageKind::ExternalFiles(None).layout_under(Path::new("/r"), NS);
        assert_eq!(plain.path, PathBuf::from("/r/games/com.mojang"));

        let typed =
            StorageKind::ExternalFiles(Some("logs".into())).layout_under(Path::new("/r"), NS);
        assert_eq!(typed.path, PathBuf::from("/r/games/com.mojang/logs"));
    }

    #[test]
    fn database_path_sits_in_databases_dir() {
        let layout = StorageKind::Database("saves.db".into()).layout_under(Path::new("/r"), NS);
        assert_eq!(layout.path, PathBuf::from("/r/databases/saves.db"));
        assert_eq!(layout.directory, PathBuf::from("/r/databases"));
    }

    #[test]
    fn absolute_components_stay_under_root() {
        let layout = StorageKind::Database("/etc/passwd".into()).layout_under(Path::new("/r"), NS);
        assert!(layout.path.starts_with("/r/databases"));

        let layout =
            StorageKind::ExternalFiles(Some("/tmp".into())).layout_under(Path::new("/r"), NS);
        assert_eq!(layout.path, PathBuf::from("/r/games/com.mojang/tmp"));
    }

    #[test]
    fn parent_components_stay_under_root() {
        let root = Path::new("/r");
        let layout = StorageKind::ExternalFiles(Some("../../../outside".into())).layout_under(root, NS);
        assert_eq!(layout.path, PathBuf::from("/r/games/com.mojang/outside"));
        assert!(layout.directory.starts_with(root));

        let layout = StorageKind::Database("../../x".into()).layout_under(root, NS);
        assert_eq!(layout.path, PathBuf::from("/r/databases/x"));

        let layout = StorageKind::Database("..\\..\\saves.db".into()).layout_under(root, NS);
        assert_eq!(layout.path, PathBuf::from("/r/databases/saves.db"));

        let layout = StorageKind::ExternalFiles(Some("..".into())).layout_under(root, NS);
        assert_eq!(layout.path, PathBuf::from("/r/games/com.mojang"));
    }

    #[test]
    fn cache_dir() {
        let layout = StorageKind::Cache.layout_under(Path::new("/r"), NS);
        assert_eq!(layout.path, PathBuf::from("/r/cache"));
    }
}
