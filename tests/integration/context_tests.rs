use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use ruby_indexer::{
    Configuration, ConfigurationError, ConfigurationRegistry, IndexerContext, PositionEncoding,
};

use crate::helpers::{write_settings, WorkspaceBuilder};

#[test]
fn test_context_shares_one_configuration_across_threads() -> Result<()> {
    const WORKERS: usize = 8;

    let workspace = WorkspaceBuilder::new().file("lib/app.rb", "class App; end");
    let context = IndexerContext::from_settings(workspace.root(), None)?;
    let barrier = Barrier::new(WORKERS);

    thread::scope(|scope| {
        for _ in 0..WORKERS {
            scope.spawn(|| {
                barrier.wait();
                let configuration = context.configuration();
                let from_registry = context.registry().get_configuration().unwrap();
                assert!(Arc::ptr_eq(&configuration, &from_registry));
            });
        }
    });

    Ok(())
}

#[test]
fn test_registry_constructs_once_under_contention() {
    const CALLERS: usize = 32;

    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructions);
    let registry = ConfigurationRegistry::with_initializer(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        // Widen the race window
        thread::sleep(std::time::Duration::from_millis(5));
        Configuration::with_workspace("/workspace")
    });
    let barrier = Barrier::new(CALLERS);

    let results: Vec<_> = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(CALLERS);
        for _ in 0..CALLERS {
            handles.push(scope.spawn(|| {
                barrier.wait();
                registry.get_configuration().unwrap()
            }));
        }
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(constructions.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|c| Arc::ptr_eq(c, &results[0])));
}

#[test]
fn test_settings_file_drives_configuration() -> Result<()> {
    let workspace = WorkspaceBuilder::new();
    write_settings(
        workspace.root(),
        r#"
[logging]
level = "debug"

[indexing]
included_patterns = ["**/*.rake"]
excluded_patterns = ["db/**/*"]
included_gems = ["rake"]
excluded_magic_comments = ["sorbet-ignore"]
"#,
    );

    let context = IndexerContext::from_settings(workspace.root(), Some(PositionEncoding::Utf32))?;
    let configuration = context.configuration();

    assert_eq!(configuration.encoding(), PositionEncoding::Utf32);
    assert!(configuration
        .included_patterns()
        .contains(&"**/*.rake".to_string()));
    assert!(configuration
        .excluded_patterns()
        .contains(&"db/**/*".to_string()));
    assert_eq!(configuration.included_gems(), ["rake".to_string()]);
    assert!(configuration.is_magic_comment("# sorbet-ignore: true"));

    Ok(())
}

#[test]
fn test_malformed_settings_fail_construction() {
    let workspace = WorkspaceBuilder::new();
    write_settings(workspace.root(), "[indexing\n");

    let err = IndexerContext::from_settings(workspace.root(), None).unwrap_err();
    match err {
        ConfigurationError::Construction(cause) => {
            assert!(matches!(*cause, ConfigurationError::Parse { .. }));
        }
        other => panic!("expected Construction, got {:?}", other),
    }
}
