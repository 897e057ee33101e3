//! Gateway doubles shared by the practice handler tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::adapters::storage::InMemorySessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::practice::{Correction, SessionSummary};
use crate::domain::scenario::test_scenario;
use crate::ports::{
    CorrectionGateway, CorrectionInput, GatewayError, SessionRegistry, SummaryGateway,
    SummaryInput,
};

/// Registry with one session already started in the café scenario.
pub async fn active_session() -> (Arc<InMemorySessionRegistry>, SessionId) {
    let registry = Arc::new(InMemorySessionRegistry::new());
    let session_id = registry.create().await;
    let shared = registry.get(&session_id).await.unwrap();
    shared.lock().await.start(test_scenario()).unwrap();
    (registry, session_id)
}

/// Correction gateway answering from a queue, unchanged when empty.
#[derive(Default)]
pub struct ScriptedCorrectionGateway {
    replies: Mutex<VecDeque<Result<Correction, GatewayError>>>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<CorrectionInput>>,
}

impl ScriptedCorrectionGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Result<Correction, GatewayError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<CorrectionInput> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CorrectionGateway for ScriptedCorrectionGateway {
    async fn correct(&self, input: CorrectionInput) -> Result<Correction, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(input.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Correction::unchanged(input.user_message)))
    }
}

/// Correction gateway that holds every call until released.
pub struct GatedCorrectionGateway {
    gate: Semaphore,
    reply: Result<Correction, GatewayError>,
    calls: AtomicUsize,
}

impl GatedCorrectionGateway {
    pub fn new(reply: Result<Correction, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CorrectionGateway for GatedCorrectionGateway {
    async fn correct(&self, _input: CorrectionInput) -> Result<Correction, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| GatewayError::unavailable("gate closed"))?;
        permit.forget();
        self.reply.clone()
    }
}

/// Summary gateway with a fixed answer.
pub struct StubSummaryGateway {
    reply: Result<SessionSummary, GatewayError>,
    inputs: Mutex<Vec<SummaryInput>>,
}

impl StubSummaryGateway {
    pub fn new(reply: Result<SessionSummary, GatewayError>) -> Self {
        Self {
            reply,
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn inputs(&self) -> Vec<SummaryInput> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryGateway for StubSummaryGateway {
    async fn summarize(&self, input: SummaryInput) -> Result<SessionSummary, GatewayError> {
        self.inputs.lock().unwrap().push(input);
        self.reply.clone()
    }
}

/// Polls until `check` holds, yielding to other tasks in between.
pub async fn wait_until<F: Fn() -> bool>(check: F) {
    for _ in 0..1000 {
        if check() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
