//! Background status computation.
//!
//! The worker keeps every `git` invocation off the caller's thread. It runs
//! two threads sharing one lock-guarded [`WorkState`]:
//!
//! - the request loop answers [`Request`]s immediately. A submission is
//!   recorded as pending and acknowledged; a poll swaps out the ready set.
//!   Once a burst of submissions has been quiet for the debounce window it
//!   flags the pending set for processing.
//! - the status loop waits for that flag, copies the pending set, computes
//!   emblems for the copy with the lock released, then publishes the results
//!   and retires the paths it processed.
//!
//! Each submission carries a sequence number. A path submitted again while a
//! pass is computing it keeps its newer number, so it is not retired by that
//! pass and gets processed once more.

use crate::core::{
    aggregator::{ScanOptions, StatusEngine},
    config::Settings,
    emblems::{emblem_for, Emblem, EmblemStyle},
    error::{GitEmblemsError, Result},
    locator::RepoLocator,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A message from the host side to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Compute the emblem of this path
    Submit(PathBuf),
    /// Hand over everything computed so far
    Poll,
}

/// The worker's answer to a [`Request`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Ack,
    Ready(ReadyBatch),
}

/// Whether submitted paths remain unprocessed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    StillWorking,
    AllDone,
}

/// Results computed since the previous poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyBatch {
    pub results: Vec<(PathBuf, Option<Emblem>)>,
    pub progress: Progress,
}

impl ReadyBatch {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&Option<Emblem>> {
        self.results
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, emblem)| emblem)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkerOptions {
    /// Quiet period that ends a burst of submissions
    pub debounce: Duration,
    pub scan: ScanOptions,
    pub style: EmblemStyle,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(10),
            scan: ScanOptions::default(),
            style: EmblemStyle::default(),
        }
    }
}

impl From<&Settings> for WorkerOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            debounce: settings.debounce(),
            scan: ScanOptions {
                include_ignored: settings.include_ignored,
            },
            style: EmblemStyle {
                show_clean: settings.show_clean,
            },
        }
    }
}

#[derive(Debug, Default)]
struct WorkState {
    /// Submitted and not yet retired, with the latest submission's number
    pending: HashMap<PathBuf, u64>,
    ready: HashMap<PathBuf, Option<Emblem>>,
    processing_required: bool,
    shutdown: bool,
    next_seq: u64,
}

type Shared = Arc<(Mutex<WorkState>, Condvar)>;

fn lock(state: &Mutex<WorkState>) -> MutexGuard<'_, WorkState> {
    // A panicking pass must not take the other loop down with it
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The host side of a running worker.
///
/// Dropping the handle shuts both worker threads down.
pub struct WorkerHandle {
    channel: Mutex<(Sender<Request>, Receiver<Response>)>,
    threads: Vec<JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn spawn(locator: RepoLocator, options: WorkerOptions) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let shared: Shared = Arc::new((Mutex::new(WorkState::default()), Condvar::new()));

        let request_loop = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("git-emblems-requests".to_string())
                .spawn(move || serve_requests(request_rx, response_tx, shared, options.debounce))?
        };
        let status_loop = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("git-emblems-status".to_string())
                .spawn(move || compute_statuses(locator, options, shared))?
        };

        Ok(Self {
            channel: Mutex::new((request_tx, response_rx)),
            threads: vec![request_loop, status_loop],
        })
    }

    fn round_trip(&self, request: Request) -> Result<Response> {
        let channel = self
            .channel
            .lock()
            .map_err(|_| GitEmblemsError::WorkerDisconnected)?;
        let (requests, responses) = &*channel;
        requests
            .send(request)
            .map_err(|_| GitEmblemsError::WorkerDisconnected)?;
        responses
            .recv()
            .map_err(|_| GitEmblemsError::WorkerDisconnected)
    }

    /// Queue a path for status computation
    pub fn submit(&self, path: impl Into<PathBuf>) -> Result<()> {
        match self.round_trip(Request::Submit(path.into()))? {
            Response::Ack => Ok(()),
            Response::Ready(_) => Err(GitEmblemsError::internal(
                "worker answered a submission with a ready batch",
            )),
        }
    }

    /// Take the results computed since the last poll
    pub fn poll(&self) -> Result<ReadyBatch> {
        match self.round_trip(Request::Poll)? {
            Response::Ready(batch) => Ok(batch),
            Response::Ack => Err(GitEmblemsError::internal(
                "worker acknowledged a poll instead of answering it",
            )),
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        // Replacing the sender disconnects the request loop
        let mut channel = self.channel.lock().unwrap_or_else(PoisonError::into_inner);
        channel.0 = mpsc::channel().0;
        drop(channel);
        for thread in self.threads.drain(..) {
            if thread.join().is_err() {
                log::error!("worker thread panicked");
            }
        }
    }
}

fn serve_requests(
    requests: Receiver<Request>,
    responses: Sender<Response>,
    shared: Shared,
    debounce: Duration,
) {
    let (state, wake) = &*shared;
    let mut burst_deadline: Option<Instant> = None;

    loop {
        let request = match burst_deadline {
            None => match requests.recv() {
                Ok(request) => Some(request),
                Err(_) => break,
            },
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                match requests.recv_timeout(wait) {
                    Ok(request) => Some(request),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        };

        let response = match request {
            Some(Request::Submit(path)) => {
                let mut state = lock(state);
                state.next_seq += 1;
                let seq = state.next_seq;
                state.pending.insert(path, seq);
                burst_deadline = Some(Instant::now() + debounce);
                Response::Ack
            }
            Some(Request::Poll) => {
                let mut state = lock(state);
                let results = state.ready.drain().collect();
                let progress = if state.pending.is_empty() {
                    Progress::AllDone
                } else {
                    Progress::StillWorking
                };
                Response::Ready(ReadyBatch { results, progress })
            }
            None => {
                log::debug!("submission burst ended");
                lock(state).processing_required = true;
                wake.notify_all();
                burst_deadline = None;
                continue;
            }
        };

        if responses.send(response).is_err() {
            log::error!("worker response channel closed");
            break;
        }
    }

    lock(state).shutdown = true;
    wake.notify_all();
}

fn compute_statuses(locator: RepoLocator, options: WorkerOptions, shared: Shared) {
    let (state, wake) = &*shared;
    let mut engine = StatusEngine::new(locator, options.scan);

    loop {
        let snapshot = {
            let mut guard = lock(state);
            while !guard.processing_required && !guard.shutdown {
                guard = wake.wait(guard).unwrap_or_else(PoisonError::into_inner);
            }
            if guard.shutdown {
                return;
            }
            guard.processing_required = false;
            guard.pending.clone()
        };

        log::debug!("processing {} pending paths", snapshot.len());
        engine.begin_pass();
        let results = compute_emblems(&mut engine, snapshot.keys(), options.style);

        let mut guard = lock(state);
        guard.ready.extend(results);
        for (path, seq) in snapshot {
            if guard.pending.get(&path) == Some(&seq) {
                guard.pending.remove(&path);
            }
        }
    }
}

/// Emblems for `paths`, listing each parent directory once
pub fn compute_emblems<'a>(
    engine: &mut StatusEngine,
    paths: impl IntoIterator<Item = &'a PathBuf>,
    style: EmblemStyle,
) -> Vec<(PathBuf, Option<Emblem>)> {
    let mut by_parent: HashMap<&Path, Vec<&PathBuf>> = HashMap::new();
    let mut results = Vec::new();
    for path in paths {
        match path.parent() {
            Some(parent) => by_parent.entry(parent).or_default().push(path),
            None => results.push((path.clone(), None)),
        }
    }

    for (parent, children) in by_parent {
        let listing = engine.directory_listing_status(parent);
        for path in children {
            let emblem = listing
                .get(path.as_path())
                .copied()
                .flatten()
                .and_then(|status| emblem_for(&status, style));
            results.push((path.clone(), emblem));
        }
    }
    results
}
