use super::*;
use crate::kernel::services::adapters::{MemoryFileProvider, ScriptedDialog};
use crate::kernel::services::ports::FileError;
use std::future::Future;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

struct Harness {
    registry: BookmarkRegistry,
    memory: MemoryFileProvider,
    dialog: Arc<ScriptedDialog>,
}

fn harness_with(answers: Vec<Option<usize>>, roots: Vec<ResourceUri>) -> Harness {
    let memory = MemoryFileProvider::new();
    let mut files = FileService::new();
    files.register_provider(Box::new(memory.clone()));
    let dialog = Arc::new(ScriptedDialog::new(answers));
    let registry = BookmarkRegistry::new(
        Arc::new(files),
        dialog.clone(),
        WorkspaceContext::new(roots),
    );
    Harness {
        registry,
        memory,
        dialog,
    }
}

fn harness(answers: Vec<Option<usize>>) -> Harness {
    harness_with(answers, vec![ResourceUri::for_memory("/work")])
}

fn uri(value: &str) -> ResourceUri {
    ResourceUri::new(value)
}

fn changes(events: Vec<BookmarkEvent>) -> Vec<BookmarkChange> {
    events
        .into_iter()
        .filter_map(|event| match event {
            BookmarkEvent::Changed(change) => Some(change),
            BookmarkEvent::Sorted(_) => None,
        })
        .collect()
}

#[test]
fn unknown_path_is_unset() {
    let h = harness(vec![]);
    assert_eq!(h.registry.bookmark_type(&uri("file:///a")), BookmarkScope::None);
    assert!(h.registry.is_empty());
}

#[test]
fn add_sets_scope_and_leaves_other_set() {
    let mut h = harness(vec![]);
    let a = uri("file:///a");

    h.registry.add_bookmark(a.clone(), BookmarkScope::Global);
    assert_eq!(h.registry.bookmark_type(&a), BookmarkScope::Global);
    assert_eq!(h.registry.global_bookmarks(), vec![a.clone()]);

    h.registry.add_bookmark(a.clone(), BookmarkScope::Workspace);
    assert_eq!(h.registry.bookmark_type(&a), BookmarkScope::Workspace);
    assert_eq!(h.registry.workspace_bookmarks(), vec![a.clone()]);
    assert!(h.registry.global_bookmarks().is_empty());
    assert_eq!(h.registry.len(), 1);
}

#[test]
fn add_none_removes_bookmark() {
    let mut h = harness(vec![]);
    let a = uri("file:///a");

    h.registry.add_bookmark(a.clone(), BookmarkScope::Workspace);
    let previous = h.registry.add_bookmark(a.clone(), BookmarkScope::None);

    assert_eq!(previous, BookmarkScope::Workspace);
    assert_eq!(h.registry.bookmark_type(&a), BookmarkScope::None);
    assert!(h.registry.workspace_bookmarks().is_empty());
}

#[test]
fn duplicate_add_keeps_single_entry() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    assert_eq!(h.registry.workspace_bookmarks().len(), 1);
}

#[test]
fn toggle_flips_between_workspace_and_global() {
    let mut h = harness(vec![]);
    let a = uri("file:///a");
    h.registry.add_bookmark(a.clone(), BookmarkScope::Workspace);

    assert_eq!(h.registry.toggle_bookmark_type(&a).unwrap(), BookmarkScope::Global);
    assert_eq!(h.registry.bookmark_type(&a), BookmarkScope::Global);
    assert_eq!(h.registry.toggle_bookmark_type(&a).unwrap(), BookmarkScope::Workspace);
    assert_eq!(h.registry.bookmark_type(&a), BookmarkScope::Workspace);
}

#[test]
fn toggle_unset_path_is_an_error_without_event() {
    let mut h = harness(vec![]);
    let mut rx = h.registry.subscribe();

    let err = h.registry.toggle_bookmark_type(&uri("file:///a")).unwrap_err();

    assert!(matches!(err, BookmarkError::NotBookmarked(_)));
    assert!(rx.drain().is_empty());
    assert_eq!(h.registry.bookmark_type(&uri("file:///a")), BookmarkScope::None);
}

#[test]
fn each_mutation_emits_one_event_with_previous_scope() {
    let mut h = harness(vec![]);
    let mut rx = h.registry.subscribe();
    let a = uri("file:///a");

    h.registry.add_bookmark(a.clone(), BookmarkScope::Workspace);
    h.registry.toggle_bookmark_type(&a).unwrap();
    h.registry.add_bookmark(a.clone(), BookmarkScope::None);

    assert_eq!(
        changes(rx.drain()),
        vec![
            BookmarkChange {
                uri: a.clone(),
                scope: BookmarkScope::Workspace,
                previous: BookmarkScope::None,
            },
            BookmarkChange {
                uri: a.clone(),
                scope: BookmarkScope::Global,
                previous: BookmarkScope::Workspace,
            },
            BookmarkChange {
                uri: a,
                scope: BookmarkScope::None,
                previous: BookmarkScope::Global,
            },
        ]
    );
}

#[test]
fn multiple_subscribers_see_the_same_events() {
    let mut h = harness(vec![]);
    let mut first = h.registry.subscribe();
    let mut second = h.registry.subscribe();

    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Global);

    assert_eq!(first.drain(), second.drain());
}

#[test]
fn sort_by_name_uses_final_segment() {
    let mut h = harness(vec![]);
    for path in ["/a/x/zeta", "/a/x/alpha", "/a/beta"] {
        h.registry.add_bookmark(uri(path), BookmarkScope::Workspace);
    }

    h.registry.sort_bookmarks(SortType::Name);

    let names: Vec<String> = h
        .registry
        .workspace_bookmarks()
        .iter()
        .map(|u| u.basename().to_string())
        .collect();
    assert_eq!(names, vec!["alpha", "beta", "zeta"]);
}

#[test]
fn sort_by_name_breaks_ties_by_depth() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("/a/b/c/name"), BookmarkScope::Global);
    h.registry.add_bookmark(uri("/a/name"), BookmarkScope::Global);

    h.registry.sort_bookmarks(SortType::Name);

    assert_eq!(
        h.registry.global_bookmarks(),
        vec![uri("/a/name"), uri("/a/b/c/name")]
    );
}

#[test]
fn sort_by_date_added_most_recent_first() {
    let mut h = harness(vec![]);
    let mut rx = h.registry.subscribe();
    for path in ["file:///c", "file:///a", "file:///b"] {
        h.registry.add_bookmark(uri(path), BookmarkScope::Workspace);
    }

    h.registry.sort_bookmarks(SortType::DateAdded);
    assert_eq!(h.registry.sort_type(), SortType::DateAdded);
    assert_eq!(
        h.registry.workspace_bookmarks(),
        vec![uri("file:///b"), uri("file:///a"), uri("file:///c")]
    );
    assert_eq!(rx.drain().last(), Some(&BookmarkEvent::Sorted(SortType::DateAdded)));

    // Re-adding counts as a new addition.
    h.registry.add_bookmark(uri("file:///c"), BookmarkScope::Workspace);
    assert_eq!(h.registry.workspace_bookmarks()[0], uri("file:///c"));
}

#[test]
fn sorting_does_not_change_membership() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Global);

    h.registry.sort_bookmarks(SortType::DateAdded);
    h.registry.sort_bookmarks(SortType::Name);

    assert_eq!(h.registry.workspace_bookmarks(), vec![uri("file:///a")]);
    assert_eq!(h.registry.global_bookmarks(), vec![uri("file:///b")]);
}

#[test]
fn import_rejects_more_than_limit() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///kept"), BookmarkScope::Global);
    let source = ResourceUri::for_memory("/big.bookmarks");
    let content: Vec<String> = (0..=MAX_IMPORT_ENTRIES)
        .map(|i| format!("file:///dir{}", i))
        .collect();
    h.memory.insert_file(&source, content.join("\n"));

    let err = block_on(h.registry.import_bookmarks(&source, BookmarkScope::Workspace)).unwrap_err();

    assert!(matches!(
        err,
        BookmarkError::TooManyEntries {
            count: 201,
            limit: 200
        }
    ));
    assert!(h.registry.workspace_bookmarks().is_empty());
    assert_eq!(h.registry.global_bookmarks(), vec![uri("file:///kept")]);
}

#[test]
fn import_accepts_exactly_limit() {
    let mut h = harness(vec![]);
    let source = ResourceUri::for_memory("/full.bookmarks");
    let content: Vec<String> = (0..MAX_IMPORT_ENTRIES)
        .map(|i| format!("file:///dir{}", i))
        .collect();
    h.memory.insert_file(&source, content.join("\n"));

    let imported = block_on(h.registry.import_bookmarks(&source, BookmarkScope::Workspace)).unwrap();
    assert_eq!(imported, MAX_IMPORT_ENTRIES);
}

#[test]
fn import_with_invalid_scheme_adds_nothing() {
    let mut h = harness(vec![]);
    let mut rx = h.registry.subscribe();
    let source = ResourceUri::for_memory("/mixed.bookmarks");
    h.memory
        .insert_file(&source, "file:///a\nhttp://example.com/b\nfile:///c");

    let err = block_on(h.registry.import_bookmarks(&source, BookmarkScope::Workspace)).unwrap_err();

    assert!(matches!(err, BookmarkError::InvalidPath(ref entry) if entry == "http://example.com/b"));
    assert_eq!(err.user_message(), "Some values in this file are not valid paths");
    assert!(h.registry.is_empty());
    assert!(rx.drain().is_empty());
}

#[test]
fn import_collapses_duplicates_and_resorts() {
    let mut h = harness(vec![]);
    let mut rx = h.registry.subscribe();
    let source = ResourceUri::for_memory("/dupes.bookmarks");
    h.memory
        .insert_file(&source, "file:///b\n\nfile:///a\nfile:///b\n");

    let imported = block_on(h.registry.import_bookmarks(&source, BookmarkScope::Global)).unwrap();

    assert_eq!(imported, 2);
    assert_eq!(
        h.registry.global_bookmarks(),
        vec![uri("file:///a"), uri("file:///b")]
    );
    let events = rx.drain();
    assert_eq!(changes(events.clone()).len(), 2);
    assert_eq!(events.last(), Some(&BookmarkEvent::Sorted(SortType::Name)));
}

#[test]
fn import_missing_file_is_read_error() {
    let mut h = harness(vec![]);
    let err = block_on(
        h.registry
            .import_bookmarks(&ResourceUri::for_memory("/nope"), BookmarkScope::Workspace),
    )
    .unwrap_err();
    assert!(matches!(err, BookmarkError::ReadError(FileError::NotFound(_))));
}

#[test]
fn export_then_import_round_trips() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    let target = ResourceUri::for_memory("/work/blueprint.bookmarks");

    let outcome = block_on(h.registry.export_bookmarks(&target, true)).unwrap();
    assert_eq!(
        outcome,
        ExportOutcome::Written {
            target: target.clone(),
            count: 2
        }
    );
    assert_eq!(
        h.memory.contents(&target),
        Some(b"file:///a\nfile:///b".to_vec())
    );

    let mut fresh = harness(vec![]);
    fresh
        .memory
        .insert_file(&target, h.memory.contents(&target).unwrap());
    block_on(fresh.registry.import_bookmarks(&target, BookmarkScope::Workspace)).unwrap();

    let mut original = h.registry.workspace_bookmarks();
    let mut restored = fresh.registry.workspace_bookmarks();
    original.sort();
    restored.sort();
    assert_eq!(original, restored);
}

#[test]
fn export_only_writes_workspace_bookmarks() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///ws"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///global"), BookmarkScope::Global);
    let target = ResourceUri::for_memory("/out.bookmarks");

    block_on(h.registry.export_bookmarks(&target, true)).unwrap();

    assert_eq!(h.memory.contents(&target), Some(b"file:///ws".to_vec()));
}

#[test]
fn export_without_workspace_root_fails() {
    let mut h = harness_with(vec![], vec![]);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    let target = ResourceUri::for_memory("/out.bookmarks");

    let err = block_on(h.registry.export_bookmarks(&target, true)).unwrap_err();

    assert!(matches!(err, BookmarkError::NoWorkspaceRoot));
    assert_eq!(h.memory.contents(&target), None);
}

#[test]
fn export_merges_valid_existing_file() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
    let target = ResourceUri::for_memory("/out.bookmarks");
    h.memory.insert_file(&target, "file:///c\nmemfs:///a\nfile:///b");

    block_on(h.registry.export_bookmarks(&target, true)).unwrap();

    assert_eq!(
        h.memory.contents(&target),
        Some(b"file:///b\nfile:///c\nmemfs:///a".to_vec())
    );
    assert!(h.dialog.prompts().is_empty());
}

#[test]
fn export_without_merge_overwrites() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
    let target = ResourceUri::for_memory("/out.bookmarks");
    h.memory.insert_file(&target, "file:///c");

    block_on(h.registry.export_bookmarks(&target, false)).unwrap();

    assert_eq!(h.memory.contents(&target), Some(b"file:///b".to_vec()));
}

#[test]
fn export_over_invalid_file_overwrites_when_confirmed() {
    let mut h = harness(vec![Some(0)]);
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
    let target = ResourceUri::for_memory("/out.bookmarks");
    h.memory.insert_file(&target, "file:///c\nhttp://bad/x");

    let outcome = block_on(h.registry.export_bookmarks(&target, true)).unwrap();

    assert!(matches!(outcome, ExportOutcome::Written { count: 1, .. }));
    assert_eq!(h.memory.contents(&target), Some(b"file:///b".to_vec()));
    let prompts = h.dialog.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].options, vec!["Overwrite", "Cancel"]);
}

#[test]
fn export_over_invalid_file_aborts_when_cancelled() {
    for answer in [Some(1), None] {
        let mut h = harness(vec![answer]);
        h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
        let target = ResourceUri::for_memory("/out.bookmarks");
        h.memory.insert_file(&target, "http://bad/x");

        let outcome = block_on(h.registry.export_bookmarks(&target, true)).unwrap();

        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert_eq!(h.memory.contents(&target), Some(b"http://bad/x".to_vec()));
    }
}

#[test]
fn export_write_failure_is_reported() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///a"), BookmarkScope::Workspace);
    h.memory.set_read_only(true);

    let err = block_on(
        h.registry
            .export_bookmarks(&ResourceUri::for_memory("/out.bookmarks"), true),
    )
    .unwrap_err();

    assert!(matches!(err, BookmarkError::WriteError(_)));
    assert_eq!(h.registry.workspace_bookmarks(), vec![uri("file:///a")]);
}

#[test]
fn prune_removes_only_missing_workspace_bookmarks() {
    let mut h = harness(vec![Some(0)]);
    let present = ResourceUri::for_memory("/work/present");
    let missing = ResourceUri::for_memory("/work/missing");
    let global_missing = ResourceUri::for_memory("/elsewhere/missing");
    h.memory.create_dir(&present);
    h.registry.add_bookmark(present.clone(), BookmarkScope::Workspace);
    h.registry.add_bookmark(missing.clone(), BookmarkScope::Workspace);
    h.registry
        .add_bookmark(global_missing.clone(), BookmarkScope::Global);
    let mut rx = h.registry.subscribe();

    let outcome = block_on(h.registry.prune_missing()).unwrap();

    assert_eq!(outcome, PruneOutcome::Pruned(vec![missing.clone()]));
    assert_eq!(h.registry.workspace_bookmarks(), vec![present]);
    assert_eq!(h.registry.global_bookmarks(), vec![global_missing]);
    assert_eq!(
        changes(rx.drain()),
        vec![BookmarkChange {
            uri: missing,
            scope: BookmarkScope::None,
            previous: BookmarkScope::Workspace,
        }]
    );
}

#[test]
fn prune_checks_local_paths() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = harness(vec![Some(0)]);
    let present = ResourceUri::from_file_path(dir.path()).unwrap();
    let gone = ResourceUri::from_file_path(&dir.path().join("gone")).unwrap();
    h.registry.add_bookmark(present.clone(), BookmarkScope::Workspace);
    h.registry.add_bookmark(gone.clone(), BookmarkScope::Workspace);

    let outcome = block_on(h.registry.prune_missing()).unwrap();

    assert_eq!(outcome, PruneOutcome::Pruned(vec![gone]));
    assert_eq!(h.registry.workspace_bookmarks(), vec![present]);
}

#[test]
fn prune_declined_is_a_no_op() {
    for answer in [Some(1), None] {
        let mut h = harness(vec![answer]);
        h.registry
            .add_bookmark(ResourceUri::for_memory("/missing"), BookmarkScope::Workspace);

        let outcome = block_on(h.registry.prune_missing()).unwrap();

        assert_eq!(outcome, PruneOutcome::Declined);
        assert_eq!(h.registry.workspace_bookmarks().len(), 1);
    }
}

#[test]
fn snapshot_and_restore_preserve_order_and_scope() {
    let mut h = harness(vec![]);
    h.registry.add_bookmark(uri("file:///z"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///y"), BookmarkScope::Global);
    h.registry.add_bookmark(uri("file:///x"), BookmarkScope::Workspace);
    let workspace = h.registry.snapshot(BookmarkScope::Workspace);
    let global = h.registry.snapshot(BookmarkScope::Global);
    assert_eq!(workspace[0].uri, uri("file:///z"));

    let mut fresh = harness(vec![]);
    let mut rx = fresh.registry.subscribe();
    fresh.registry.restore(BookmarkScope::Global, global);
    fresh.registry.restore(BookmarkScope::Workspace, workspace);
    fresh.registry.sort_bookmarks(SortType::DateAdded);

    assert_eq!(
        fresh.registry.workspace_bookmarks(),
        vec![uri("file:///x"), uri("file:///z")]
    );
    assert_eq!(fresh.registry.global_bookmarks(), vec![uri("file:///y")]);
    assert!(changes(rx.drain()).is_empty());

    fresh.registry.add_bookmark(uri("file:///new"), BookmarkScope::Workspace);
    assert_eq!(fresh.registry.workspace_bookmarks()[0], uri("file:///new"));
}

#[test]
fn restore_keeps_one_scope_per_path() {
    let mut h = harness(vec![]);
    let entry = PersistedBookmark {
        uri: uri("file:///a"),
        added: 0,
    };
    h.registry.restore(BookmarkScope::Global, vec![entry.clone()]);
    h.registry.restore(BookmarkScope::Workspace, vec![entry]);

    assert_eq!(h.registry.bookmark_type(&uri("file:///a")), BookmarkScope::Global);
    assert!(h.registry.workspace_bookmarks().is_empty());
    assert_eq!(
        h.registry.snapshot(BookmarkScope::Global),
        vec![PersistedBookmark {
            uri: uri("file:///a"),
            added: 0,
        }]
    );
}

#[test]
fn restore_global_after_workspace_moves_path() {
    let mut h = harness(vec![]);
    let entry = PersistedBookmark {
        uri: uri("file:///a"),
        added: 3,
    };
    h.registry.restore(BookmarkScope::Workspace, vec![entry.clone()]);
    h.registry.restore(BookmarkScope::Global, vec![entry]);

    assert_eq!(h.registry.bookmark_type(&uri("file:///a")), BookmarkScope::Global);
    assert!(h.registry.workspace_bookmarks().is_empty());
}

#[test]
fn restore_saturates_maximum_stamp() {
    let mut h = harness(vec![]);
    h.registry.restore(
        BookmarkScope::Workspace,
        vec![PersistedBookmark {
            uri: uri("file:///a"),
            added: u64::MAX,
        }],
    );
    h.registry.add_bookmark(uri("file:///b"), BookmarkScope::Workspace);
    h.registry.add_bookmark(uri("file:///c"), BookmarkScope::Workspace);
    h.registry.sort_bookmarks(SortType::DateAdded);

    assert_eq!(h.registry.len(), 3);
    let stamps: Vec<u64> = h
        .registry
        .snapshot(BookmarkScope::Workspace)
        .iter()
        .map(|entry| entry.added)
        .collect();
    assert_eq!(stamps, vec![u64::MAX, u64::MAX, u64::MAX]);
}
