use scenario::{
    DefaultFileResolver, FileResolver, RunError, Scenario, ScenarioExecutor, ScenarioRunner, Step,
};
use serde_json::json;
use std::{
    convert::Infallible,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, PoisonError,
    },
    time::Instant,
};
use thiserror::Error;
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

/// Error returned by the `check` command.
#[derive(Debug, Error)]
pub enum Error {
    /// Input path does not exist.
    #[error("path does not exist: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Input path holds no `.json` files.
    #[error("no JSON scenario files found in {}", .0.display())]
    NoJsonFiles(PathBuf),
    /// Some files failed to decode.
    #[error("{failed} of {total} scenario files failed")]
    Failed {
        /// Number of failing files.
        failed: usize,
        /// Number of files in the run.
        total: usize,
    },
    /// A worker thread panicked.
    #[error("worker thread {0} panicked")]
    Panic(usize),
}

/// Find all JSON files in the given path.
///
/// If path is a file, returns it in a vector.
/// If path is a directory, recursively finds all .json files.
pub fn find_all_json_tests(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension() == Some("json".as_ref()))
            .map(DirEntry::into_path)
            .collect();
        files.sort();
        files
    }
}

/// Executor that walks the steps of a scenario without running a VM.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    /// Steps visited in the last scenario.
    pub steps: usize,
    /// Transaction steps visited in the last scenario.
    pub transactions: usize,
}

impl ScenarioExecutor for DryRunExecutor {
    type Error = Infallible;

    fn execute_scenario(
        &mut self,
        scenario: &Scenario,
        _file_resolver: &dyn FileResolver,
    ) -> Result<(), Self::Error> {
        self.steps = 0;
        self.transactions = 0;
        for (index, step) in scenario.steps.iter().enumerate() {
            debug!(
                index,
                step = step.step_name(),
                comment = ?step.comment(),
                "visiting step"
            );
            if let Step::Transaction(tx_step) = step {
                debug!(tx = ?tx_step.tx_ident, tx_type = %tx_step.tx.tx_type, "transaction");
                self.transactions += 1;
            }
            self.steps += 1;
        }
        Ok(())
    }
}

struct RunnerState {
    n_errors: AtomicUsize,
    queue: Mutex<(usize, Vec<PathBuf>)>,
}

impl RunnerState {
    fn new(files: Vec<PathBuf>) -> Self {
        Self {
            n_errors: AtomicUsize::new(0),
            queue: Mutex::new((0, files)),
        }
    }

    fn next_file(&self) -> Option<PathBuf> {
        let (current_idx, queue) = &mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let idx = *current_idx;
        let path = queue.get(idx).cloned()?;
        *current_idx = idx + 1;
        Some(path)
    }
}

fn run_worker(state: &RunnerState, print_json: bool, keep_going: bool) {
    let mut runner = ScenarioRunner::new(DryRunExecutor::default(), DefaultFileResolver::default());
    loop {
        if !keep_going && state.n_errors.load(Ordering::SeqCst) > 0 {
            return;
        }

        let Some(path) = state.next_file() else {
            return;
        };

        let result = runner.run_scenario_file(&path);
        if let Err(err) = &result {
            error!(path = %path.display(), %err, "scenario check failed");
            state.n_errors.fetch_add(1, Ordering::SeqCst);
        }
        report(&path, &result, &runner.executor, print_json);
    }
}

fn report(
    path: &Path,
    result: &Result<(), RunError<Infallible>>,
    executor: &DryRunExecutor,
    print_json: bool,
) {
    if print_json {
        let outcome = match result {
            Ok(()) => json!({
                "path": path.display().to_string(),
                "pass": true,
                "steps": executor.steps,
                "transactions": executor.transactions,
            }),
            Err(err) => json!({
                "path": path.display().to_string(),
                "pass": false,
                "error": err.to_string(),
            }),
        };
        println!("{outcome}");
    } else if let Err(err) = result {
        println!("FAIL {err}");
    }
}

fn determine_thread_count(single_thread: bool, n_files: usize) -> usize {
    match (single_thread, std::thread::available_parallelism()) {
        (true, _) | (false, Err(_)) => 1,
        (false, Ok(n)) => n.get().min(n_files).max(1),
    }
}

/// Decodes every file and walks its steps, in parallel unless `single_thread` is set.
///
/// Stops handing out files after the first failure unless `keep_going` is set.
pub fn run(
    files: Vec<PathBuf>,
    single_thread: bool,
    print_json: bool,
    keep_going: bool,
) -> Result<(), Error> {
    let n_files = files.len();
    let state = &RunnerState::new(files);
    let num_threads = determine_thread_count(single_thread, n_files);
    let started = Instant::now();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| scope.spawn(move || run_worker(state, print_json, keep_going)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .try_for_each(|(i, handle)| handle.join().map_err(|_| Error::Panic(i)))
    })?;

    let n_errors = state.n_errors.load(Ordering::SeqCst);
    if !print_json {
        println!(
            "Finished checking {n_files} files in {:.3}s",
            started.elapsed().as_secs_f64()
        );
    }

    if n_errors == 0 {
        if !print_json {
            println!("All scenarios decoded!");
        }
        Ok(())
    } else {
        Err(Error::Failed {
            failed: n_errors,
            total: n_files,
        })
    }
}
