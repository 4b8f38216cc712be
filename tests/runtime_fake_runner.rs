use std::sync::{Arc, Mutex};
use std::time::Duration;

use symwatch::engine::{RunOutcome, Runtime};
use symwatch::errors::SymwatchError;
use symwatch::exec::{CommandResult, CommandStatus};
use symwatch::fs::mock::MockFileSystem;
use symwatch::link::{ResolvedLink, TargetResolver};
use symwatch::types::ResolveMode;
use symwatch::watch::{LinkWatcher, WatchOptions};
use symwatch_test_utils::fake_runner::FakeRunner;
use symwatch_test_utils::scripted_resolver::{ScriptedResolver, Step};
use symwatch_test_utils::{init_tracing, with_timeout};

fn fast() -> WatchOptions {
    WatchOptions {
        interval: Duration::ZERO,
        max_failures: 5,
    }
}

#[tokio::test]
async fn runs_the_command_once_per_change() {
    init_tracing();
    let resolver = ScriptedResolver::new([
        Step::Target("/a"),
        Step::Target("/b"),
        Step::Target("/b"),
        Step::Target("/c"),
    ]);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let watcher = LinkWatcher::start("/t", resolver, fast()).unwrap();
    let mut runtime = Runtime::new(watcher, FakeRunner::new(Arc::clone(&executed)), "deploy");

    let outcome = with_timeout(runtime.run_with_limit(2)).await.unwrap();

    assert_eq!(outcome, RunOutcome::LimitReached);
    assert_eq!(*executed.lock().unwrap(), vec!["deploy", "deploy"]);
    assert_eq!(runtime.watcher().current(), &ResolvedLink::new("/c"));
}

#[tokio::test]
async fn failed_command_does_not_stop_the_loop() {
    init_tracing();
    let resolver = ScriptedResolver::new([
        Step::Target("/a"),
        Step::Target("/b"),
        Step::Target("/c"),
    ]);
    let executed = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeRunner::new(Arc::clone(&executed)).with_results([
        CommandResult::failed(b"boom\n".to_vec(), CommandStatus::Exited(1)),
        CommandResult::failed(Vec::new(), CommandStatus::SpawnFailed("no shell".into())),
    ]);

    let watcher = LinkWatcher::start("/t", resolver, fast()).unwrap();
    let mut runtime = Runtime::new(watcher, runner, "exit 1");

    let outcome = with_timeout(runtime.run_with_limit(2)).await.unwrap();

    assert_eq!(outcome, RunOutcome::LimitReached);
    assert_eq!(runtime.commands_run(), 2);
}

#[tokio::test]
async fn changes_during_a_command_collapse_to_the_latest_target() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.set_symlink("/srv/current", "releases/1");

    let resolver = TargetResolver::new(fs.clone(), ResolveMode::Absolute);
    let watcher = LinkWatcher::start("/srv/current", resolver, fast()).unwrap();

    let hook_fs = fs.clone();
    let executed = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeRunner::new(Arc::clone(&executed)).on_run(move |n| {
        if n == 1 {
            hook_fs.set_symlink("/srv/current", "releases/3");
            hook_fs.set_symlink("/srv/current", "releases/4");
        }
    });

    fs.set_symlink("/srv/current", "releases/2");
    let mut runtime = Runtime::new(watcher, runner, "reload");

    with_timeout(runtime.run_with_limit(2)).await.unwrap();

    assert_eq!(executed.lock().unwrap().len(), 2);
    assert_eq!(
        runtime.watcher().current(),
        &ResolvedLink::new("/srv/releases/4")
    );
}

#[tokio::test]
async fn fatal_watcher_error_ends_the_run() {
    init_tracing();
    let resolver = ScriptedResolver::new([
        Step::Target("/a"),
        Step::Target("/b"),
        Step::NotASymlink,
    ]);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let watcher = LinkWatcher::start("/t", resolver.clone(), fast()).unwrap();
    let mut runtime = Runtime::new(watcher, FakeRunner::new(Arc::clone(&executed)), "deploy");

    let err = with_timeout(runtime.run()).await.unwrap_err();

    assert!(matches!(err, SymwatchError::LinkUnavailable { attempts: 5, .. }));
    assert_eq!(runtime.commands_run(), 1);
    assert_eq!(resolver.calls(), 7);
}

#[tokio::test]
async fn shutdown_stops_the_loop_between_commands() {
    init_tracing();
    let resolver = ScriptedResolver::new([Step::Target("/a"), Step::Target("/b")]);
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let mut tx = Some(tx);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let runner = FakeRunner::new(Arc::clone(&executed)).on_run(move |_| {
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    });

    let watcher = LinkWatcher::start("/t", resolver, fast()).unwrap();
    let mut runtime = Runtime::new(watcher, runner, "deploy");

    let outcome = with_timeout(runtime.run_until(async {
        let _ = rx.await;
    }))
    .await
    .unwrap();

    assert_eq!(outcome, RunOutcome::Shutdown);
    assert_eq!(runtime.commands_run(), 1);
}

#[tokio::test]
async fn shutdown_before_any_change() {
    let resolver = ScriptedResolver::new([Step::Target("/a")]);
    let executed = Arc::new(Mutex::new(Vec::new()));

    let watcher = LinkWatcher::start("/t", resolver, fast()).unwrap();
    let mut runtime = Runtime::new(watcher, FakeRunner::new(Arc::clone(&executed)), "deploy");

    let outcome = with_timeout(runtime.run_until(async {})).await.unwrap();

    assert_eq!(outcome, RunOutcome::Shutdown);
    assert!(executed.lock().unwrap().is_empty());
}
