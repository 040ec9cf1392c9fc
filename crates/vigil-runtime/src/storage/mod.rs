//! Storage contracts for sessions, signals, and analyses
//!
//! Three async traits partition ownership: the session store owns
//! sessions, the signal store owns signals partitioned by session ID,
//! and the analysis store owns analyses keyed by session ID. All
//! implementations must be safe for concurrent invocation from many
//! request handlers, and readers must never observe torn records.
//! Default in-memory implementations live in [`memory`].

use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;
use vigil_core::{CreateSessionRequest, FraudAnalysis, Session, Signal, SignalType};

mod memory;

pub use memory::{InMemoryAnalysisStore, InMemorySessionStore, InMemorySignalStore};

/// Session lifecycle storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session with a freshly assigned ID
    async fn create(&self, request: CreateSessionRequest) -> Result<Session>;

    async fn get(&self, id: Uuid) -> Result<Option<Session>>;

    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Mark a session complete, stamping `completed_at` with the
    /// current time. Idempotent on repeat, but the timestamp is
    /// refreshed each call. Returns `None` for unknown sessions.
    async fn complete(&self, id: Uuid) -> Result<Option<Session>>;

    /// Sessions for a client, newest first, capped at `limit`
    async fn list_by_client(&self, client_id: &str, limit: usize) -> Result<Vec<Session>>;
}

/// Signal storage, partitioned by session
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Append a batch atomically: a concurrent reader sees either none
    /// or all of the batch.
    async fn append(&self, session_id: Uuid, signals: Vec<Signal>) -> Result<()>;

    /// All signals for a session, sorted ascending by timestamp
    async fn get_by_session(&self, session_id: Uuid) -> Result<Vec<Signal>>;

    async fn count_by_session(&self, session_id: Uuid) -> Result<usize>;

    /// Signals of one type, sorted ascending by timestamp
    async fn get_by_session_and_type(
        &self,
        session_id: Uuid,
        signal_type: SignalType,
    ) -> Result<Vec<Signal>>;

    /// Signals within `[start, end]` (inclusive bounds, Unix-ms),
    /// sorted ascending by timestamp
    async fn get_by_session_and_time_range(
        &self,
        session_id: Uuid,
        start: i64,
        end: i64,
    ) -> Result<Vec<Signal>>;
}

/// Analysis storage, keyed by session
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Persist an analysis; last writer wins per session
    async fn save(&self, analysis: FraudAnalysis) -> Result<()>;

    async fn get_by_session(&self, session_id: Uuid) -> Result<Option<FraudAnalysis>>;

    async fn exists(&self, session_id: Uuid) -> Result<bool>;
}
