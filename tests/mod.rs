
use gitstatus::{
    Collector, Context, Error, FormatVersion, GitCli, OperationState,
    cli::{Args, OutputFormat},
};
use helpers::{TestContext, clone_and_commit, commit, git, git_may_fail};
use pretty_assertions::assert_eq;
use std::fs;
use temp_dir::TempDir;

#[test]
fn fresh_init() {
    let ctx = TestContext::setup_init();
    let snapshot = ctx.snapshot();

    assert!(snapshot.is_initial());
    assert_eq!(snapshot.local_branch(), "main");
    assert_eq!(snapshot.head_commit(), "");
    assert!(snapshot.is_clean());
}

#[test]
fn fresh_init_with_new_file() {
    let ctx = TestContext::setup_init();
    fs::write(ctx.child("new-file"), "").unwrap();

    let snapshot = ctx.snapshot();

    assert!(snapshot.is_initial());
    assert_eq!(snapshot.untracked(), 1);
    assert!(!snapshot.is_clean());
}

#[test]
fn clean_clone() {
    let ctx = TestContext::setup_clone();
    let snapshot = ctx.snapshot();

    assert!(!snapshot.is_initial());
    assert!(!snapshot.is_detached());
    assert_eq!(snapshot.local_branch(), "main");
    assert_eq!(snapshot.remote_branch(), "origin/main");
    assert_eq!(snapshot.ahead_count(), 0);
    assert_eq!(snapshot.behind_count(), 0);
    assert_eq!(snapshot.head_commit(), ctx.short_head());
    assert_eq!(snapshot.operation_state(), OperationState::Default);
    assert!(snapshot.is_clean());
}

#[test]
fn ahead_of_upstream() {
    let ctx = TestContext::setup_clone();
    commit(ctx.dir.path(), "firstfile", "testing\n");
    commit(ctx.dir.path(), "secondfile", "testing\n");

    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.ahead_count(), 2);
    assert_eq!(snapshot.behind_count(), 0);
    assert!(snapshot.is_clean());
}

#[test]
fn diverged_from_upstream() {
    let ctx = TestContext::setup_clone();
    clone_and_commit(&ctx.remote_dir, "remote-file", "hello\n");
    git(ctx.dir.path(), &["fetch"]);
    commit(ctx.dir.path(), "local-file", "hello\n");

    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.ahead_count(), 1);
    assert_eq!(snapshot.behind_count(), 1);
}

#[test]
fn working_tree_changes() {
    let ctx = TestContext::setup_clone();
    commit(ctx.dir.path(), "testfile", "one\ntwo\n");
    fs::write(ctx.child("testfile"), "one\nthree\nfour\n").unwrap();
    fs::write(ctx.child("staged-file"), "staged\n").unwrap();
    git(ctx.dir.path(), &["add", "staged-file"]);
    fs::write(ctx.child("untracked-file"), "").unwrap();

    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.modified(), 1);
    assert_eq!(snapshot.staged(), 1);
    assert_eq!(snapshot.untracked(), 1);
    assert_eq!(snapshot.conflicted(), 0);
    assert_eq!(snapshot.insertions(), 2);
    assert_eq!(snapshot.deletions(), 1);
    assert!(!snapshot.is_clean());
}

#[test]
fn stash() {
    let ctx = TestContext::setup_clone();
    fs::write(ctx.child("initial-file"), "changed\n").unwrap();
    git(ctx.dir.path(), &["stash"]);
    fs::write(ctx.child("initial-file"), "changed again\n").unwrap();
    git(ctx.dir.path(), &["stash"]);

    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.stashed(), 2);
    assert_eq!(snapshot.modified(), 0);
    assert!(!snapshot.is_clean());
}

#[test]
fn merge_conflict() {
    let ctx = TestContext::setup_clone();
    git(ctx.dir.path(), &["checkout", "-b", "other"]);
    commit(ctx.dir.path(), "initial-file", "other\n");
    git(ctx.dir.path(), &["checkout", "main"]);
    commit(ctx.dir.path(), "initial-file", "main\n");

    assert!(!git_may_fail(ctx.dir.path(), &["merge", "other"]).status.success());

    let snapshot = ctx.snapshot();

    assert_eq!(snapshot.operation_state(), OperationState::Merging);
    assert_eq!(snapshot.conflicted(), 1);
    assert_eq!(snapshot.local_branch(), "main");
    assert!(!snapshot.is_clean());
}

#[test]
fn detached_head() {
    let ctx = TestContext::setup_clone();
    git(ctx.dir.path(), &["checkout", "--detach"]);

    let snapshot = ctx.snapshot();

    assert!(snapshot.is_detached());
    assert_eq!(snapshot.local_branch(), "");
    assert_eq!(snapshot.remote_branch(), "");
    assert_eq!(snapshot.head_commit(), ctx.short_head());
}

#[test]
fn porcelain_formats_agree() {
    let ctx = TestContext::setup_clone();
    commit(ctx.dir.path(), "testfile", "one\ntwo\n");
    commit(ctx.dir.path(), "renamed", "contents\n");
    fs::write(ctx.child("testfile"), "one\n").unwrap();
    git(ctx.dir.path(), &["mv", "renamed", "renamed-again"]);
    fs::write(ctx.child("untracked-file"), "").unwrap();

    assert_eq!(
        ctx.collect(FormatVersion::V1).unwrap(),
        ctx.collect(FormatVersion::V2).unwrap()
    );
}

#[test]
fn rename_from_status_like_path() {
    let ctx = TestContext::setup_clone();
    commit(ctx.dir.path(), "MM notes", "notes\n");
    commit(ctx.dir.path(), "?? x", "x\n");
    git(ctx.dir.path(), &["mv", "MM notes", "notes"]);
    git(ctx.dir.path(), &["mv", "?? x", "x"]);

    let v1 = ctx.collect(FormatVersion::V1).unwrap();

    assert_eq!(v1.staged(), 2);
    assert_eq!(v1.modified(), 0);
    assert_eq!(v1.untracked(), 0);
    assert_eq!(v1, ctx.collect(FormatVersion::V2).unwrap());
}

#[test]
fn porcelain_formats_agree_before_first_commit() {
    let ctx = TestContext::setup_init();
    fs::write(ctx.child("new-file"), "").unwrap();

    assert_eq!(
        ctx.collect(FormatVersion::V1).unwrap(),
        ctx.collect(FormatVersion::V2).unwrap()
    );
}

#[test]
fn cancelled_collection() {
    let ctx = TestContext::setup_clone();
    let cancelled = Context::background();
    cancelled.cancel();

    let result =
        Collector::new(GitCli::new(ctx.dir.path()), FormatVersion::V1).collect(&cancelled);

    assert!(matches!(result, Err(Error::Cancelled)));
}

#[test]
fn not_a_repository() {
    let dir = TempDir::new().unwrap();

    let result = Collector::new(GitCli::new(dir.path()), FormatVersion::V1)
        .collect(&Context::background());

    match result {
        Err(Error::ExternalQuery { command, .. }) => {
            assert_eq!(command, "git status --porcelain=v1 --branch -z")
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn run_json() {
    let ctx = TestContext::setup_clone();
    let output = gitstatus::run(&Args {
        dir: Some(ctx.dir.path().to_path_buf()),
        config: Some(ctx.plain_config()),
        ..Args::default()
    })
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["localBranch"], "main");
    assert_eq!(json["remoteBranch"], "origin/main");
    assert_eq!(json["isClean"], true);
    assert_eq!(json["operationState"], "default");
}

#[test]
fn run_tmux() {
    let ctx = TestContext::setup_clone();
    commit(ctx.dir.path(), "firstfile", "testing\n");
    fs::write(ctx.child("untracked-file"), "").unwrap();

    let output = gitstatus::run(&Args {
        dir: Some(ctx.dir.path().to_path_buf()),
        format: OutputFormat::Tmux,
        porcelain: Some(FormatVersion::V2),
        config: Some(ctx.plain_config()),
        ..Args::default()
    })
    .unwrap();

    assert_eq!(output, "⎇  main..origin/main ↑·1 - … 1");
}

#[test]
fn run_tmux_initial() {
    let ctx = TestContext::setup_init();

    let output = gitstatus::run(&Args {
        dir: Some(ctx.dir.path().to_path_buf()),
        format: OutputFormat::Tmux,
        config: Some(ctx.plain_config()),
        ..Args::default()
    })
    .unwrap();

    assert_eq!(output, "main [no commits yet] - ✔");
}
