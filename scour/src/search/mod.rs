/// This module implements the concurrent traversal engine, demonstrating Rust's
/// thread-safety guarantees compared to .NET's Task Parallel Library.
///
/// # .NET vs Rust Shared State
///
/// In .NET, a shared work queue typically relies on runtime-checked
/// collections:
/// ```csharp
/// var frontier = new ConcurrentQueue<(string Path, int Depth)>();
/// var visited = new ConcurrentDictionary<string, byte>();
/// // Nothing stops code from testing `visited` and pushing to `frontier`
/// // non-atomically, silently admitting duplicate work items.
/// ```
///
/// In Rust, the queue and the visited set live behind one `Mutex` inside the
/// [`Frontier`](frontier::Frontier) type, and the compiler makes it
/// impossible to touch either without holding the lock:
/// ```rust,ignore
/// if frontier.push_if_unvisited(canonical, depth + 1) {
///     // test-and-insert and the queue push happened under one lock
/// }
/// ```
///
/// # Engine Shape
///
/// [`engine::search`] seeds the frontier with the canonicalized root, spawns
/// a fixed pool of [`worker::Worker`] threads, and joins them. Each worker
/// repeatedly acquires one pending directory, lists its entries, pushes
/// newly discovered subdirectories back into the frontier, and dispatches
/// files to the [`matcher`](matcher::PatternMatcher) (names mode) or the
/// [`scanner`](scanner::FileScanner) (content mode). A worker terminates
/// only when the queue is empty and no other worker is mid-expansion, so
/// work pushed late is never stranded.
pub mod engine;
pub mod frontier;
pub mod matcher;
pub mod scanner;
pub mod worker;

pub use engine::{search, search_with_sink};
pub use frontier::{Frontier, WorkItem};
pub use matcher::PatternMatcher;
pub use scanner::{FileScanner, MatchOutcome};
