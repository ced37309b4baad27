use serde::Serialize;
use std::path::PathBuf;

const RUBY_EXTENSION: &str = ".rb";

/// A file selected for indexing, together with the load path entry it is
/// required through
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IndexablePath {
    /// Directory on the load path containing the file, if any
    pub load_path_entry: Option<PathBuf>,
    /// Absolute path of the file
    pub full_path: PathBuf,
}

impl IndexablePath {
    pub fn new(full_path: PathBuf, load_path_entry: Option<PathBuf>) -> Self {
        Self {
            load_path_entry,
            full_path,
        }
    }

    /// The string passed to `require` to load this file, e.g. `foo/bar` for
    /// `<entry>/foo/bar.rb`
    pub fn require_path(&self) -> Option<String> {
        let entry = self.load_path_entry.as_ref()?;
        let relative = self.full_path.strip_prefix(entry).ok()?;

        let relative = relative.to_string_lossy().replace('\\', "/");
        match relative.strip_suffix(RUBY_EXTENSION) {
            Some(stripped) => Some(stripped.to_string()),
            None => Some(relative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_path_strips_entry_and_extension() {
        let indexable = IndexablePath::new(
            PathBuf::from("/project/lib/foo/bar.rb"),
            Some(PathBuf::from("/project/lib")),
        );
        assert_eq!(indexable.require_path().as_deref(), Some("foo/bar"));
    }

    #[test]
    fn test_require_path_keeps_other_extensions() {
        let indexable = IndexablePath::new(
            PathBuf::from("/project/lib/tasks/db.rake"),
            Some(PathBuf::from("/project/lib")),
        );
        assert_eq!(indexable.require_path().as_deref(), Some("tasks/db.rake"));
    }

    #[test]
    fn test_require_path_without_entry() {
        let indexable = IndexablePath::new(PathBuf::from("/project/foo.rb"), None);
        assert_eq!(indexable.require_path(), None);
    }

    #[test]
    fn test_require_path_outside_entry() {
        let indexable = IndexablePath::new(
            PathBuf::from("/elsewhere/foo.rb"),
            Some(PathBuf::from("/project")),
        );
        assert_eq!(indexable.require_path(), None);
    }
}
