use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// One pending directory expansion: a canonical path and its depth below
/// the root. Immutable after creation; consumed exactly once by some worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub path: PathBuf,
    pub depth: usize,
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<WorkItem>,
    visited: HashSet<PathBuf>,
    /// Workers currently between a successful acquire and its guard drop
    expanding: usize,
}

/// The shared work queue and deduplicating visited set.
///
/// Both live under a single `Mutex` so that the membership test-and-insert
/// and the queue push are one atomic step: no two workers can push the same
/// canonical directory, even when they discover it concurrently through
/// different parent links. The visited set spans the whole run and never
/// shrinks.
///
/// Termination uses an expanding counter instead of a bare empty check. A
/// worker that finds the queue momentarily empty while another worker is
/// mid-expansion must wait, not exit: the expanding worker may be about to
/// push subdirectories that would otherwise be stranded. [`Frontier::acquire`]
/// blocks on a condvar while `queue empty && expanding > 0` and returns
/// `None` only once the queue is empty and nothing in flight can refill it.
#[derive(Debug, Default)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    work_available: Condvar,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds the frontier with the canonical root at depth 0. Called once,
    /// before any worker starts.
    pub fn seed(&self, root: PathBuf) {
        let mut state = self.lock();
        state.visited.insert(root.clone());
        state.queue.push_back(WorkItem { path: root, depth: 0 });
    }

    /// Atomically tests the visited set and, if the path is new, inserts it
    /// and appends a work item. Returns false for a duplicate already owned
    /// by some other in-flight or completed expansion.
    pub fn push_if_unvisited(&self, path: PathBuf, depth: usize) -> bool {
        let mut state = self.lock();
        if !state.visited.insert(path.clone()) {
            trace!(path = %path.display(), "already visited");
            return false;
        }
        state.queue.push_back(WorkItem { path, depth });
        self.work_available.notify_one();
        true
    }

    /// Takes the next work item, blocking while the queue is empty but some
    /// worker is still expanding. Returns `None` exactly when the queue is
    /// empty and no expansion is in flight, which is the termination
    /// condition for the whole pool.
    ///
    /// The returned guard marks this worker as expanding until it is
    /// dropped; dropping it after the frontier has fully drained wakes every
    /// waiter so all workers observe termination.
    pub fn acquire(&self) -> Option<Expansion<'_>> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.queue.pop_front() {
                state.expanding += 1;
                return Some(Expansion {
                    frontier: self,
                    item,
                });
            }
            if state.expanding == 0 {
                return None;
            }
            state = self
                .work_available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn finish_expansion(&self) {
        let mut state = self.lock();
        state.expanding -= 1;
        if state.expanding == 0 && state.queue.is_empty() {
            self.work_available.notify_all();
        }
    }

    /// Number of paths ever enqueued (including the seed)
    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }
}

/// RAII guard for one in-flight expansion.
///
/// Holds the acquired [`WorkItem`]; dropping it tells the frontier the
/// expansion is complete, releasing waiters once nothing can produce more
/// work.
#[derive(Debug)]
pub struct Expansion<'a> {
    frontier: &'a Frontier,
    item: WorkItem,
}

impl Expansion<'_> {
    pub fn item(&self) -> &WorkItem {
        &self.item
    }
}

impl Drop for Expansion<'_> {
    fn drop(&mut self) {
        self.frontier.finish_expansion();
    }
}
