//! RoastEngine — the per-invocation workflow state machine.
//!
//! Sequences fetch → generate → log strictly in order and publishes
//! progress for the presentation layer: the profile becomes visible as
//! soon as the fetch succeeds, before generation finishes.
//!
//! Only one invocation is current at a time. Each invocation carries a
//! monotonically increasing token; a publish whose token no longer
//! matches the latest invocation is discarded, so a superseded run can
//! never overwrite newer state. In-flight provider calls are not
//! cancelled — discarding their results on arrival is sufficient.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use instacook_core::{ServiceError, now_rfc3339};

use crate::dataset::{DatasetSink, log_interaction};
use crate::generate::RoastGenerator;
use crate::model::{LogEntry, ProfileRecord};
use crate::scrape::ProfileFetcher;

/// Workflow states visible to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowState {
    Idle,
    FetchingProfile,
    GeneratingRoast,
    Done,
    Errored,
}

/// Snapshot of the current invocation.
///
/// A profile published before a generation failure stays visible in the
/// `Errored` state: a partially completed flow still shows what
/// succeeded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    /// Invocation token. 0 until the first invocation.
    pub invocation: u64,

    pub state: FlowState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub roast: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlowSnapshot {
    fn idle() -> Self {
        Self {
            invocation: 0,
            state: FlowState::Idle,
            profile: None,
            roast: None,
            error: None,
        }
    }
}

pub struct RoastEngine {
    fetcher: ProfileFetcher,
    generator: RoastGenerator,
    sink: Option<Arc<dyn DatasetSink>>,
    state: Mutex<FlowSnapshot>,
    seq: AtomicU64,
}

impl RoastEngine {
    pub fn new(
        fetcher: ProfileFetcher,
        generator: RoastGenerator,
        sink: Option<Arc<dyn DatasetSink>>,
    ) -> Self {
        Self {
            fetcher,
            generator,
            sink,
            state: Mutex::new(FlowSnapshot::idle()),
            seq: AtomicU64::new(0),
        }
    }

    /// The fetcher, for the stateless scrape endpoint.
    pub fn fetcher(&self) -> &ProfileFetcher {
        &self.fetcher
    }

    /// The generator, for the stateless roast endpoint.
    pub fn generator(&self) -> &RoastGenerator {
        &self.generator
    }

    /// The dataset sink, if logging is enabled.
    pub fn sink(&self) -> Option<&Arc<dyn DatasetSink>> {
        self.sink.as_ref()
    }

    /// Current flow snapshot.
    pub async fn snapshot(&self) -> FlowSnapshot {
        self.state.lock().await.clone()
    }

    /// Start a new invocation for `username` and return its token.
    ///
    /// Previous profile/roast state is cleared and the chain runs on a
    /// detached task; a later invocation supersedes this one. An empty
    /// username fails immediately into `Errored`.
    ///
    /// The token is allocated while holding the state lock, so initial
    /// snapshots are always written in token order and the snapshot's
    /// invocation is the highest token handed out.
    pub async fn start(self: &Arc<Self>, username: &str) -> Result<u64, ServiceError> {
        let username = username.trim().to_string();

        let mut state = self.state.lock().await;
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if username.is_empty() {
            let err = ServiceError::Validation("username is required".into());
            *state = FlowSnapshot {
                invocation: token,
                state: FlowState::Errored,
                profile: None,
                roast: None,
                error: Some(err.to_string()),
            };
            return Err(err);
        }

        *state = FlowSnapshot {
            invocation: token,
            state: FlowState::FetchingProfile,
            profile: None,
            roast: None,
            error: None,
        };
        drop(state);

        let engine = Arc::clone(self);
        tokio::spawn(async move {
            engine.run(token, username).await;
        });

        Ok(token)
    }

    async fn run(self: Arc<Self>, token: u64, username: String) {
        let profile = match self.fetcher.fetch_profile(&username).await {
            Ok(profile) => profile,
            Err(e) => {
                self.publish(token, |s| {
                    s.state = FlowState::Errored;
                    s.error = Some(e.to_string());
                })
                .await;
                return;
            }
        };

        // Progressive reveal: the profile is visible before the roast.
        let current = self
            .publish(token, |s| {
                s.profile = Some(profile.clone());
                s.state = FlowState::GeneratingRoast;
            })
            .await;
        if !current {
            return;
        }

        let roast = match self.generator.generate_roast(&profile).await {
            Ok(roast) => roast,
            Err(e) => {
                // The fetched profile stays visible alongside the error.
                self.publish(token, |s| {
                    s.state = FlowState::Errored;
                    s.error = Some(e.to_string());
                })
                .await;
                return;
            }
        };

        let current = self
            .publish(token, |s| {
                s.roast = Some(roast.clone());
                s.state = FlowState::Done;
            })
            .await;
        if !current {
            return;
        }

        if let Some(sink) = &self.sink {
            log_interaction(
                Arc::clone(sink),
                LogEntry {
                    username,
                    roast,
                    timestamp: now_rfc3339(),
                },
            );
        }
    }

    /// Apply `f` to the snapshot iff `token` is still the latest
    /// invocation. Returns false when the result was stale.
    async fn publish<F>(&self, token: u64, f: F) -> bool
    where
        F: FnOnce(&mut FlowSnapshot),
    {
        let mut state = self.state.lock().await;
        if state.invocation != token {
            debug!(
                "discarding stale result from invocation {} (current {})",
                token, state.invocation
            );
            return false;
        }
        f(&mut state);
        true
    }
}
