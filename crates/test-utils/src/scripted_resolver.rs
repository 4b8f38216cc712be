use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use symwatch::errors::ResolveError;
use symwatch::link::{LinkResolver, ResolvedLink};

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Step {
    Target(&'static str),
    NotASymlink,
    ReadError,
}

/// A resolver that replays a fixed script of answers, one per call, and
/// repeats the last answer forever once the script is exhausted.
///
/// Clones share the script and the call counter.
#[derive(Debug, Clone)]
pub struct ScriptedResolver {
    steps: Arc<Mutex<VecDeque<Step>>>,
    last: Arc<Mutex<Option<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedResolver {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Arc::new(Mutex::new(steps.into_iter().collect())),
            last: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LinkResolver for ScriptedResolver {
    fn resolve(&self, path: &Path) -> Result<ResolvedLink, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let step = {
            let mut steps = self.steps.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match steps.pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().expect("ScriptedResolver needs at least one step"),
            }
        };

        match step {
            Step::Target(t) => Ok(ResolvedLink::new(PathBuf::from(t))),
            Step::NotASymlink => Err(ResolveError::NotASymlink {
                path: path.to_path_buf(),
            }),
            Step::ReadError => Err(ResolveError::ReadError {
                path: path.to_path_buf(),
                message: "scripted read failure".to_string(),
            }),
        }
    }
}
