//! In-memory storage implementations
//!
//! Concurrent hash maps behind `tokio::sync::RwLock`, keyed by session
//! ID. Suitable for development and single-process deployments; data
//! is lost when the process restarts. Readers sort on demand so the
//! append path stays O(1) amortized per signal.

use super::{AnalysisStore, SessionStore, SignalStore};
use crate::error::{Result, RuntimeError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use vigil_core::{CreateSessionRequest, FraudAnalysis, Session, Signal, SignalType};

/// In-memory session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, request: CreateSessionRequest) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            client_id: request.client_id,
            device_fingerprint: request.device_fingerprint,
            created_at: Utc::now(),
            completed_at: None,
            metadata: request.metadata,
        };

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            // v4 collision within one process is a programmer invariant
            return Err(RuntimeError::StorageError(format!(
                "session id collision: {}",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());

        Ok(session)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self.sessions.read().await.contains_key(&id))
    }

    async fn complete(&self, id: Uuid) -> Result<Option<Session>> {
        let mut sessions = self.sessions.write().await;

        Ok(sessions.get_mut(&id).map(|session| {
            session.completed_at = Some(Utc::now());
            session.clone()
        }))
    }

    async fn list_by_client(&self, client_id: &str, limit: usize) -> Result<Vec<Session>> {
        let sessions = self.sessions.read().await;

        let mut matched: Vec<Session> = sessions
            .values()
            .filter(|s| s.client_id == client_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched.truncate(limit);

        Ok(matched)
    }
}

/// In-memory signal store with per-session append lists
#[derive(Default)]
pub struct InMemorySignalStore {
    signals: RwLock<HashMap<Uuid, Vec<Signal>>>,
}

impl InMemorySignalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut signals: Vec<Signal>) -> Vec<Signal> {
        signals.sort_by_key(|s| s.timestamp);
        signals
    }
}

#[async_trait]
impl SignalStore for InMemorySignalStore {
    async fn append(&self, session_id: Uuid, signals: Vec<Signal>) -> Result<()> {
        // Single write-lock hold makes the batch atomic with respect
        // to concurrent reads.
        let mut map = self.signals.write().await;
        map.entry(session_id).or_default().extend(signals);

        Ok(())
    }

    async fn get_by_session(&self, session_id: Uuid) -> Result<Vec<Signal>> {
        let map = self.signals.read().await;

        Ok(Self::sorted(
            map.get(&session_id).cloned().unwrap_or_default(),
        ))
    }

    async fn count_by_session(&self, session_id: Uuid) -> Result<usize> {
        let map = self.signals.read().await;

        Ok(map.get(&session_id).map(Vec::len).unwrap_or(0))
    }

    async fn get_by_session_and_type(
        &self,
        session_id: Uuid,
        signal_type: SignalType,
    ) -> Result<Vec<Signal>> {
        let map = self.signals.read().await;

        let matched: Vec<Signal> = map
            .get(&session_id)
            .map(|signals| {
                signals
                    .iter()
                    .filter(|s| s.signal_type == signal_type)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self::sorted(matched))
    }

    async fn get_by_session_and_time_range(
        &self,
        session_id: Uuid,
        start: i64,
        end: i64,
    ) -> Result<Vec<Signal>> {
        let map = self.signals.read().await;

        let matched: Vec<Signal> = map
            .get(&session_id)
            .map(|signals| {
                signals
                    .iter()
                    .filter(|s| s.timestamp >= start && s.timestamp <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self::sorted(matched))
    }
}

/// In-memory analysis store
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    analyses: RwLock<HashMap<Uuid, FraudAnalysis>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn save(&self, analysis: FraudAnalysis) -> Result<()> {
        let mut analyses = self.analyses.write().await;
        analyses.insert(analysis.session_id, analysis);

        Ok(())
    }

    async fn get_by_session(&self, session_id: Uuid) -> Result<Option<FraudAnalysis>> {
        Ok(self.analyses.read().await.get(&session_id).cloned())
    }

    async fn exists(&self, session_id: Uuid) -> Result<bool> {
        Ok(self.analyses.read().await.contains_key(&session_id))
    }
}
