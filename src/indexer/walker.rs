use globset::GlobSet;
use ignore::WalkBuilder;
use std::path::PathBuf;
use tracing::warn;

/// Walks a workspace selecting files by glob patterns relative to its root
pub struct Walker {
    root: PathBuf,
    included: GlobSet,
    excluded: GlobSet,
}

impl Walker {
    /// Create a new Walker over `root`. A file is yielded when its path
    /// relative to `root` matches `included` and does not match `excluded`.
    pub fn new(root: PathBuf, included: GlobSet, excluded: GlobSet) -> Self {
        Self {
            root,
            included,
            excluded,
        }
    }

    /// Walk the directory tree and return an iterator of file paths
    ///
    /// This respects:
    /// - .gitignore files
    /// - Hidden file filtering
    /// - Included and excluded patterns
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let mut builder = WalkBuilder::new(&self.root);

        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        // Workspaces need not be git checkouts
        builder.require_git(false);

        // Skip .git, .bundle, settings directories and the like
        builder.hidden(true);

        builder
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(move |entry| {
                let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                    return false;
                };
                self.included.is_match(relative) && !self.excluded.is_match(relative)
            })
            .map(|entry| entry.into_path())
    }
}
