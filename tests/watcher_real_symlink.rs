#![cfg(unix)]

use std::time::Duration;

use symwatch::errors::SymwatchError;
use symwatch::link::TargetResolver;
use symwatch::types::ResolveMode;
use symwatch::watch::{LinkWatcher, WatchOptions};
use symwatch_test_utils::fixtures::SymlinkFixture;
use symwatch_test_utils::{init_tracing, with_timeout};

fn fast() -> WatchOptions {
    WatchOptions {
        interval: Duration::ZERO,
        max_failures: 5,
    }
}

#[tokio::test]
async fn repointed_link_is_returned_by_the_next_call() {
    init_tracing();
    let fx = SymlinkFixture::new();
    let a = fx.make_dir("a");
    let b = fx.make_dir("b");
    fx.point_to(&a);

    let mut watcher =
        LinkWatcher::start(fx.link(), TargetResolver::real(ResolveMode::Absolute), fast()).unwrap();
    assert_eq!(watcher.current().as_path(), a);

    fx.point_to(&b);
    let change = with_timeout(watcher.wait_for_change()).await.unwrap();

    assert_eq!(change.from.as_path(), a);
    assert_eq!(change.to.as_path(), b);
}

#[tokio::test]
async fn relative_repoint_is_reported_as_absolute_path() {
    init_tracing();
    let fx = SymlinkFixture::new();
    let one = fx.make_dir("release-1");
    let two = fx.make_dir("release-2");
    fx.point_to("release-1");

    let mut watcher =
        LinkWatcher::start(fx.link(), TargetResolver::real(ResolveMode::Absolute), fast()).unwrap();
    assert_eq!(watcher.current().as_path(), one);

    fx.point_to("release-2");
    let change = with_timeout(watcher.wait_for_change()).await.unwrap();
    assert_eq!(change.to.as_path(), two);
}

#[tokio::test]
async fn removed_link_becomes_unavailable() {
    init_tracing();
    let fx = SymlinkFixture::new();
    let a = fx.make_dir("a");
    fx.point_to(&a);

    let mut watcher =
        LinkWatcher::start(fx.link(), TargetResolver::real(ResolveMode::Absolute), fast()).unwrap();
    fx.remove_link();

    let err = with_timeout(watcher.wait_for_change()).await.unwrap_err();
    assert!(matches!(err, SymwatchError::LinkUnavailable { attempts: 5, .. }));
}

#[test]
fn path_that_was_never_a_symlink_fails_at_startup() {
    let fx = SymlinkFixture::new();
    let dir = fx.make_dir("plain");

    let err = LinkWatcher::start(&dir, TargetResolver::real(ResolveMode::Absolute), fast())
        .unwrap_err();
    assert!(matches!(err, SymwatchError::InvalidSymlink(_)));
}
