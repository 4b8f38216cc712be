use proptest::prelude::*;
use symwatch::errors::ResolveError;
use symwatch::link::ResolvedLink;
use symwatch::watch::{Tick, WatchCore};

fn link(n: u8) -> ResolvedLink {
    ResolvedLink::new(format!("/releases/{n}"))
}

fn failure() -> ResolveError {
    ResolveError::ReadError {
        path: "/current".into(),
        message: "gone".to_string(),
    }
}

// `None` is a failed read, `Some(n)` a successful read of release `n`.
fn reads() -> impl Strategy<Value = Vec<Option<u8>>> {
    proptest::collection::vec(prop_oneof![Just(None), (0u8..3).prop_map(Some)], 1..60)
}

proptest! {
    #[test]
    fn core_matches_reference_model(steps in reads(), max in 1u32..6) {
        let mut core = WatchCore::new(link(0), max);
        let mut current = 0u8;
        let mut run = 0u32;

        for step in steps {
            let tick = core.observe(match step {
                None => Err(failure()),
                Some(n) => Ok(link(n)),
            });

            match step {
                None => {
                    run += 1;
                    if run >= max {
                        prop_assert_eq!(tick, Tick::Fatal { attempts: run, error: failure() });
                        break;
                    }
                    prop_assert_eq!(tick, Tick::Failed { attempt: run, error: failure() });
                }
                Some(n) if n == current => {
                    run = 0;
                    prop_assert_eq!(tick, Tick::Unchanged);
                }
                Some(n) => {
                    run = 0;
                    prop_assert_eq!(tick, Tick::Changed { from: link(current), to: link(n) });
                    current = n;
                }
            }

            prop_assert_eq!(core.failures(), run);
            prop_assert_eq!(core.current(), &link(current));
        }
    }
}
