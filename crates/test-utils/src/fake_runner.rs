use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use symwatch::exec::{CommandResult, CommandRunner};

type Hook = Box<dyn FnMut(usize) + Send>;

/// A fake command runner that:
/// - records every command it is asked to run
/// - returns scripted results in order (success with no output once the
///   script runs out)
/// - optionally calls a hook with the 1-based invocation number, so a test
///   can change the world "while the command runs".
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
    results: VecDeque<CommandResult>,
    hook: Option<Hook>,
}

impl FakeRunner {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            results: VecDeque::new(),
            hook: None,
        }
    }

    pub fn with_results(mut self, results: impl IntoIterator<Item = CommandResult>) -> Self {
        self.results.extend(results);
        self
    }

    pub fn on_run(mut self, hook: impl FnMut(usize) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a mut self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = CommandResult> + Send + 'a>> {
        let count = {
            let mut guard = self.executed.lock().unwrap();
            guard.push(command.to_string());
            guard.len()
        };

        if let Some(hook) = self.hook.as_mut() {
            hook(count);
        }

        let result = self
            .results
            .pop_front()
            .unwrap_or_else(|| CommandResult::success(Vec::new()));

        Box::pin(async move { result })
    }
}
