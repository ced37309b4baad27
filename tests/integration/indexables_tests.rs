use anyhow::Result;
use std::path::PathBuf;

use ruby_indexer::IndexerContext;

use crate::helpers::{write_settings, WorkspaceBuilder};

fn rails_like_workspace() -> WorkspaceBuilder {
    WorkspaceBuilder::new()
        .file("app/models/user.rb", "class User; end")
        .file("lib/tasks/db.rake", "task :migrate")
        .file("lib/my_gem.rb", "module MyGem; end")
        .file("lib/my_gem/version.rb", "VERSION = '1.0'")
        .file("test/models/user_test.rb", "class UserTest; end")
        .file("test/test_helper.rb", "require 'minitest'")
        .file("test/support/assertions.rb", "module Assertions; end")
        .file("spec/fixtures/sample.rb", "x = 1")
        .file("spec/user_spec.rb", "describe User")
        .file("tmp/cache/scratch.rb", "y = 2")
        .file("vendor/bundle/ruby/gem.rb", "z = 3")
        .file(".bundle/config.rb", "hidden")
        .file("README.md", "# App")
}

#[test]
fn test_default_selection() -> Result<()> {
    let workspace = rails_like_workspace();
    let context = IndexerContext::from_settings(workspace.root(), None)?;

    let paths: Vec<PathBuf> = context
        .configuration()
        .indexables()?
        .into_iter()
        .map(|indexable| indexable.full_path)
        .collect();

    assert_eq!(
        paths,
        vec![
            workspace.path("app/models/user.rb"),
            workspace.path("lib/my_gem/version.rb"),
            workspace.path("lib/my_gem.rb"),
            // Only *_test.rb, test_*.rb and *_spec.rb are excluded under test/
            workspace.path("test/support/assertions.rb"),
        ]
    );

    Ok(())
}

#[test]
fn test_settings_extend_selection() -> Result<()> {
    let workspace = rails_like_workspace();
    write_settings(
        workspace.root(),
        r#"
[indexing]
included_patterns = ["lib/**/*.rake"]
excluded_patterns = ["app/**/*"]
"#,
    );

    let context = IndexerContext::from_settings(workspace.root(), None)?;
    let indexables = context.configuration().indexables()?;
    let paths: Vec<PathBuf> = indexables.iter().map(|i| i.full_path.clone()).collect();

    assert!(paths.contains(&workspace.path("lib/tasks/db.rake")));
    assert!(!paths.contains(&workspace.path("app/models/user.rb")));

    Ok(())
}

#[test]
fn test_require_paths_are_workspace_relative() -> Result<()> {
    let workspace = rails_like_workspace();
    let context = IndexerContext::from_settings(workspace.root(), None)?;

    let require_paths: Vec<String> = context
        .configuration()
        .indexables()?
        .iter()
        .filter_map(|indexable| indexable.require_path())
        .collect();

    assert!(require_paths.contains(&"lib/my_gem".to_string()));
    assert!(require_paths.contains(&"lib/my_gem/version".to_string()));

    Ok(())
}
