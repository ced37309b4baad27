//! Indexing configuration for a Ruby workspace.
//!
//! A [`Configuration`] decides which files of a workspace get indexed and
//! which leading comments are pragmas (magic comments) rather than
//! documentation. Defaults cover a conventional Ruby project; user overrides
//! arrive as a TOML table through [`Configuration::apply_config`].

mod encoding;

pub use encoding::PositionEncoding;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigurationError;
use crate::indexer::{IndexablePath, Walker};
use crate::metrics::{INDEXABLE_FILES, WALK_LATENCY};

const EXCLUDED_GEMS: &str = "excluded_gems";
const INCLUDED_GEMS: &str = "included_gems";
const EXCLUDED_PATTERNS: &str = "excluded_patterns";
const INCLUDED_PATTERNS: &str = "included_patterns";
const EXCLUDED_MAGIC_COMMENTS: &str = "excluded_magic_comments";

/// Keys accepted by [`Configuration::apply_config`]
pub const ALLOWED_KEYS: [&str; 5] = [
    EXCLUDED_GEMS,
    INCLUDED_GEMS,
    EXCLUDED_PATTERNS,
    INCLUDED_PATTERNS,
    EXCLUDED_MAGIC_COMMENTS,
];

const STRING_ARRAY: &str = "an array of strings";

#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    /// Root of the indexed workspace
    workspace_path: PathBuf,

    /// Unit for reported character offsets
    encoding: PositionEncoding,

    /// Globs (relative to the workspace) selecting files to index
    included_patterns: Vec<String>,

    /// Globs (relative to the workspace) removing files from the selection
    excluded_patterns: Vec<String>,

    /// Gems indexed even when dependency resolution would skip them
    included_gems: Vec<String>,

    /// Gems never indexed
    excluded_gems: Vec<String>,

    /// Magic comment names that are not documentation
    excluded_magic_comments: Vec<String>,

    #[serde(skip)]
    magic_comment_regex: Regex,
}

fn default_included_patterns() -> Vec<String> {
    vec!["**/*.rb".to_string()]
}

fn default_excluded_patterns() -> Vec<String> {
    vec![
        "**/{test,spec}/**/{*_test.rb,test_*.rb,*_spec.rb}".to_string(),
        "**/fixtures/**/*".to_string(),
        "tmp/**/*".to_string(),
        "vendor/bundle/**/*".to_string(),
        "node_modules/**/*".to_string(),
    ]
}

fn default_excluded_magic_comments() -> Vec<String> {
    [
        "frozen_string_literal",
        "typed",
        "compiled",
        "encoding",
        "shareable_constant_value",
        "warn_indent",
        "rubocop",
        "nodoc",
        "doc",
        "coding",
        "warn_past_scope",
    ]
    .iter()
    .map(|comment| comment.to_string())
    .collect()
}

/// Validated contents of a user configuration table
struct Overrides {
    excluded_gems: Option<Vec<String>>,
    included_gems: Option<Vec<String>>,
    excluded_patterns: Option<Vec<String>>,
    included_patterns: Option<Vec<String>>,
    excluded_magic_comments: Option<Vec<String>>,
}

impl Configuration {
    /// Default configuration rooted at the process's current directory
    pub fn new() -> Result<Self, ConfigurationError> {
        let workspace_path =
            std::env::current_dir().map_err(ConfigurationError::WorkspaceUnavailable)?;
        Self::with_workspace(workspace_path)
    }

    /// Default configuration rooted at `workspace_path`, made absolute
    /// against the current directory when relative
    pub fn with_workspace(workspace_path: impl Into<PathBuf>) -> Result<Self, ConfigurationError> {
        let workspace_path = absolute_workspace(workspace_path.into())?;
        let excluded_magic_comments = default_excluded_magic_comments();
        let magic_comment_regex = build_magic_comment_regex(&excluded_magic_comments)?;

        Ok(Self {
            workspace_path,
            encoding: PositionEncoding::default(),
            included_patterns: default_included_patterns(),
            excluded_patterns: default_excluded_patterns(),
            included_gems: Vec::new(),
            excluded_gems: Vec::new(),
            excluded_magic_comments,
            magic_comment_regex,
        })
    }

    pub fn workspace_path(&self) -> &Path {
        &self.workspace_path
    }

    pub fn set_workspace_path(
        &mut self,
        workspace_path: impl Into<PathBuf>,
    ) -> Result<(), ConfigurationError> {
        self.workspace_path = absolute_workspace(workspace_path.into())?;
        Ok(())
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: PositionEncoding) {
        self.encoding = encoding;
    }

    pub fn included_patterns(&self) -> &[String] {
        &self.included_patterns
    }

    pub fn excluded_patterns(&self) -> &[String] {
        &self.excluded_patterns
    }

    pub fn included_gems(&self) -> &[String] {
        &self.included_gems
    }

    pub fn excluded_gems(&self) -> &[String] {
        &self.excluded_gems
    }

    pub fn excluded_magic_comments(&self) -> &[String] {
        &self.excluded_magic_comments
    }

    /// Validate and merge a user configuration table.
    ///
    /// Every key must be one of [`ALLOWED_KEYS`] and every value an array of
    /// strings. The whole table is validated before anything is applied, so
    /// a rejected table leaves the configuration untouched.
    ///
    /// Values are appended to the current lists. Naming a gem as included
    /// removes it from the excluded gems and vice versa; when one table names
    /// the same gem in both lists, inclusion wins.
    pub fn apply_config(&mut self, config: &toml::Table) -> Result<(), ConfigurationError> {
        let overrides = validate_config(config)?;
        let magic_comments = match overrides.excluded_magic_comments {
            Some(comments) => {
                let mut excluded_magic_comments = self.excluded_magic_comments.clone();
                extend_unique(&mut excluded_magic_comments, comments);
                let regex = build_magic_comment_regex(&excluded_magic_comments)?;
                Some((excluded_magic_comments, regex))
            }
            None => None,
        };

        if let Some(gems) = overrides.excluded_gems {
            self.included_gems.retain(|gem| !gems.contains(gem));
            extend_unique(&mut self.excluded_gems, gems);
        }

        if let Some(gems) = overrides.included_gems {
            self.excluded_gems.retain(|gem| !gems.contains(gem));
            extend_unique(&mut self.included_gems, gems);
        }

        if let Some(patterns) = overrides.excluded_patterns {
            extend_unique(&mut self.excluded_patterns, patterns);
        }

        if let Some(patterns) = overrides.included_patterns {
            extend_unique(&mut self.included_patterns, patterns);
        }

        if let Some((excluded_magic_comments, regex)) = magic_comments {
            self.excluded_magic_comments = excluded_magic_comments;
            self.magic_comment_regex = regex;
        }

        debug!("Applied {} configuration keys", config.len());
        Ok(())
    }

    /// Matcher for comment lines that are magic comments
    pub fn magic_comment_regex(&self) -> &Regex {
        &self.magic_comment_regex
    }

    /// Whether a comment line is a magic comment rather than documentation
    pub fn is_magic_comment(&self, line: &str) -> bool {
        self.magic_comment_regex.is_match(line)
    }

    /// Enumerate the workspace files selected for indexing.
    ///
    /// A file is selected when its workspace-relative path matches an
    /// included pattern and no excluded pattern. Hidden entries and
    /// `.gitignore`d files are skipped. Results are sorted by path.
    pub fn indexables(&self) -> Result<Vec<IndexablePath>, ConfigurationError> {
        if !self.workspace_path.is_dir() {
            return Err(ConfigurationError::WorkspaceNotFound(
                self.workspace_path.clone(),
            ));
        }

        let _timer = WALK_LATENCY.start_timer();
        let included = build_glob_set(&self.included_patterns)?;
        let excluded = build_glob_set(&self.excluded_patterns)?;

        let walker = Walker::new(self.workspace_path.clone(), included, excluded);
        let mut indexables: Vec<IndexablePath> = walker
            .walk()
            .map(|full_path| IndexablePath::new(full_path, Some(self.workspace_path.clone())))
            .collect();

        indexables.sort_by(|a, b| a.full_path.cmp(&b.full_path));
        indexables.dedup();

        INDEXABLE_FILES.set(indexables.len() as f64);
        info!(
            "Found {} indexable files in {}",
            indexables.len(),
            self.workspace_path.display()
        );

        Ok(indexables)
    }
}

fn absolute_workspace(workspace_path: PathBuf) -> Result<PathBuf, ConfigurationError> {
    if workspace_path.is_absolute() {
        return Ok(workspace_path);
    }
    std::path::absolute(&workspace_path).map_err(ConfigurationError::WorkspaceUnavailable)
}

fn validate_config(config: &toml::Table) -> Result<Overrides, ConfigurationError> {
    let mut unknown: Vec<String> = config
        .keys()
        .filter(|key| !ALLOWED_KEYS.contains(&key.as_str()))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        unknown.sort();
        return Err(ConfigurationError::UnknownKeys(unknown));
    }

    let overrides = Overrides {
        excluded_gems: string_array_for(config, EXCLUDED_GEMS)?,
        included_gems: string_array_for(config, INCLUDED_GEMS)?,
        excluded_patterns: string_array_for(config, EXCLUDED_PATTERNS)?,
        included_patterns: string_array_for(config, INCLUDED_PATTERNS)?,
        excluded_magic_comments: string_array_for(config, EXCLUDED_MAGIC_COMMENTS)?,
    };

    let patterns = overrides
        .excluded_patterns
        .iter()
        .chain(overrides.included_patterns.iter())
        .flatten();
    for pattern in patterns {
        compile_glob(pattern)?;
    }

    Ok(overrides)
}

fn string_array_for(
    config: &toml::Table,
    key: &str,
) -> Result<Option<Vec<String>>, ConfigurationError> {
    config
        .get(key)
        .map(|value| string_array(key, value))
        .transpose()
}

fn string_array(key: &str, value: &toml::Value) -> Result<Vec<String>, ConfigurationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigurationError::InvalidType {
            key: key.to_string(),
            expected: STRING_ARRAY,
            found: value.type_str().to_string(),
        })?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigurationError::InvalidType {
                    key: key.to_string(),
                    expected: STRING_ARRAY,
                    found: format!("an array containing {}", item.type_str()),
                })
        })
        .collect()
}

fn extend_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

fn compile_glob(pattern: &str) -> Result<Glob, ConfigurationError> {
    // `*` must not cross directory boundaries; `**` does
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ConfigurationError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ConfigurationError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }

    builder
        .build()
        .map_err(|source| ConfigurationError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })
}

fn build_magic_comment_regex(comments: &[String]) -> Result<Regex, ConfigurationError> {
    if comments.is_empty() {
        // Never matches
        return Ok(Regex::new(r"\b\B")?);
    }

    let alternatives = comments
        .iter()
        .map(|comment| regex::escape(comment))
        .collect::<Vec<_>>()
        .join("|");

    Ok(Regex::new(&format!(r"^#[^\S\n]*({alternatives})"))?)
}
