/*!
 * Document translation for bilingual output.
 *
 * This module drives sentence-by-sentence translation of a document. It is
 * split into several submodules:
 *
 * - `job`: Job description and progress accounting
 * - `orchestrator`: The per-job translation loop
 * - `session`: One-job-at-a-time execution on a spawned task
 * - `events`: Event stream from a job to its owner
 * - `cancellation`: Cooperative cancellation signal
 * - `cache`: Sentence-level memoization of translations
 */

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::cancellation::CancellationFlag;
pub use self::events::{EventSink, JobEvent};
pub use self::job::{ProgressState, TranslationJob};
pub use self::orchestrator::{JobOutcome, JobState, TranslationOrchestrator};
pub use self::session::{JobHandle, TranslationSession};

// Submodules
pub mod cache;
pub mod cancellation;
pub mod events;
pub mod job;
pub mod orchestrator;
pub mod session;
