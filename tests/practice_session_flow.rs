//! Session flow tests across the application layer.
//!
//! Handlers are wired to the LLM gateways over a slow `MockAIProvider`, so
//! the tests can act on a session while a correction or summary is still
//! outstanding.

use std::sync::Arc;
use std::time::Duration;

use lingoflow::adapters::ai::MockAIProvider;
use lingoflow::adapters::gateways::{LlmCorrectionGateway, LlmSummaryGateway};
use lingoflow::adapters::storage::InMemorySessionRegistry;
use lingoflow::application::handlers::practice::{
    CreateSessionCommand, CreateSessionHandler, EndSessionCommand, EndSessionHandler,
    GetSessionHandler, GetSessionQuery, ResetSessionCommand, ResetSessionHandler,
    SaveVocabularyCommand, SaveVocabularyHandler, SendMessageCommand, SendMessageError,
    SendMessageHandler, StartSessionCommand, StartSessionHandler, SummaryOutcome,
};
use lingoflow::domain::foundation::{ErrorCode, SessionId};
use lingoflow::domain::practice::{PracticeSession, SessionPhase, TurnOutcome};
use lingoflow::domain::scenario::ScenarioCatalog;
use lingoflow::ports::SessionRegistry;

const CORRECTION: &str = r#"{"correction": true, "correctedText": "Ich hätte gern ein Zimmer.", "explanationEn": "'hätte gern' is a polite way to ask for something."}"#;

const SUMMARY: &str = r#"{"performanceOverview": "Gut gemacht!", "keyVocabulary": ["das Zimmer"], "grammarPoints": [], "practiceSuggestions": ["Ask about breakfast."]}"#;

struct Harness {
    registry: Arc<InMemorySessionRegistry>,
    provider: MockAIProvider,
    send: Arc<SendMessageHandler>,
    vocabulary: SaveVocabularyHandler,
    end: EndSessionHandler,
    reset: ResetSessionHandler,
    get: GetSessionHandler,
}

impl Harness {
    async fn new(provider: MockAIProvider) -> (Self, SessionId) {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let shared_provider = Arc::new(provider.clone());
        let catalog = Arc::new(ScenarioCatalog::builtin().unwrap());

        let session_id = CreateSessionHandler::new(registry.clone())
            .handle(CreateSessionCommand)
            .await
            .session_id;
        StartSessionHandler::new(registry.clone(), catalog)
            .handle(StartSessionCommand {
                session_id,
                scenario_id: "hotel-reception".to_string(),
            })
            .await
            .unwrap();

        let harness = Self {
            send: Arc::new(
                SendMessageHandler::new(
                    registry.clone(),
                    Arc::new(LlmCorrectionGateway::new(shared_provider.clone())),
                )
                .with_reply_delay(Duration::ZERO),
            ),
            vocabulary: SaveVocabularyHandler::new(registry.clone()),
            end: EndSessionHandler::new(
                registry.clone(),
                Arc::new(LlmSummaryGateway::new(shared_provider)),
            ),
            reset: ResetSessionHandler::new(registry.clone()),
            get: GetSessionHandler::new(registry.clone()),
            registry,
            provider,
        };
        (harness, session_id)
    }

    async fn snapshot(&self, session_id: SessionId) -> PracticeSession {
        self.get
            .handle(GetSessionQuery { session_id })
            .await
            .unwrap()
    }

    async fn wait_for_calls(&self, count: usize) {
        for _ in 0..200 {
            if self.provider.call_count() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("provider was never called");
    }

    fn send_in_background(
        &self,
        session_id: SessionId,
        text: &str,
    ) -> tokio::task::JoinHandle<Result<lingoflow::application::handlers::practice::SendMessageResult, SendMessageError>>
    {
        let send = self.send.clone();
        let cmd = SendMessageCommand {
            session_id,
            text: text.to_string(),
        };
        tokio::spawn(async move { send.handle(cmd).await })
    }
}

#[tokio::test]
async fn session_stays_usable_while_correction_is_outstanding() {
    let provider = MockAIProvider::new()
        .with_response(CORRECTION)
        .with_delay(Duration::from_millis(100));
    let (harness, session_id) = Harness::new(provider).await;

    let pending = harness.send_in_background(session_id, "Ich will ein Zimmer");
    harness.wait_for_calls(1).await;

    let snapshot = harness.snapshot(session_id).await;
    assert!(snapshot.is_correction_pending());
    assert_eq!(snapshot.messages().len(), 2);

    let saved = harness
        .vocabulary
        .handle(SaveVocabularyCommand {
            session_id,
            word: "Zimmer".to_string(),
        })
        .await
        .unwrap();
    assert!(saved.added);

    let result = pending.await.unwrap().unwrap();
    assert!(matches!(result.outcome, TurnOutcome::Applied(_)));
    assert_eq!(result.session.messages().len(), 3);
    assert_eq!(result.session.saved_vocabulary(), &["Zimmer".to_string()]);
    assert_eq!(result.session.corrections().len(), 1);
}

#[tokio::test]
async fn second_send_is_rejected_without_provider_call() {
    let provider = MockAIProvider::new()
        .with_response(CORRECTION)
        .with_delay(Duration::from_millis(100));
    let (harness, session_id) = Harness::new(provider).await;

    let pending = harness.send_in_background(session_id, "Ich will ein Zimmer");
    harness.wait_for_calls(1).await;

    let err = harness
        .send
        .handle(SendMessageCommand {
            session_id,
            text: "Haben Sie ein Zimmer frei?".to_string(),
        })
        .await
        .err()
        .unwrap();
    assert_eq!(err.code(), ErrorCode::CorrectionInFlight);
    assert_eq!(harness.snapshot(session_id).await.messages().len(), 2);

    pending.await.unwrap().unwrap();
    assert_eq!(harness.provider.call_count(), 1);
}

#[tokio::test]
async fn correction_after_reset_is_discarded() {
    let provider = MockAIProvider::new()
        .with_response(CORRECTION)
        .with_delay(Duration::from_millis(100));
    let (harness, session_id) = Harness::new(provider).await;

    let pending = harness.send_in_background(session_id, "Ich will ein Zimmer");
    harness.wait_for_calls(1).await;
    harness
        .reset
        .handle(ResetSessionCommand { session_id })
        .await
        .unwrap();

    let result = pending.await.unwrap().unwrap();
    assert_eq!(result.outcome, TurnOutcome::Discarded);

    let snapshot = harness.snapshot(session_id).await;
    assert_eq!(snapshot.phase(), SessionPhase::Idle);
    assert!(snapshot.messages().is_empty());
    assert!(snapshot.corrections().is_empty());
}

#[tokio::test]
async fn correction_after_end_is_discarded() {
    let provider = MockAIProvider::new()
        .with_response(CORRECTION)
        .with_delay(Duration::from_millis(100));
    let (harness, session_id) = Harness::new(provider).await;

    let pending = harness.send_in_background(session_id, "Ich will ein Zimmer");
    harness.wait_for_calls(1).await;
    let ended = harness
        .end
        .handle(EndSessionCommand { session_id })
        .await
        .unwrap();
    assert_eq!(ended.session.phase(), SessionPhase::Ended);

    let result = pending.await.unwrap().unwrap();
    assert_eq!(result.outcome, TurnOutcome::Discarded);
    assert_eq!(harness.snapshot(session_id).await.messages().len(), 2);
}

#[tokio::test]
async fn end_is_immediate_and_summary_follows() {
    let provider = MockAIProvider::new()
        .with_response(SUMMARY)
        .with_delay(Duration::from_millis(50));
    let (harness, session_id) = Harness::new(provider).await;

    let ended = harness
        .end
        .handle(EndSessionCommand { session_id })
        .await
        .unwrap();
    assert_eq!(ended.session.phase(), SessionPhase::Ended);
    assert!(ended.session.is_summary_pending());
    assert_eq!(harness.provider.call_count(), 0);

    let outcome = ended.job.run().await;

    assert_eq!(outcome, SummaryOutcome::Generated);
    let snapshot = harness.snapshot(session_id).await;
    assert_eq!(snapshot.summary().unwrap().performance_overview, "Gut gemacht!");
}

#[tokio::test]
async fn summary_after_reset_is_discarded() {
    let provider = MockAIProvider::new().with_response(SUMMARY);
    let (harness, session_id) = Harness::new(provider).await;

    let ended = harness
        .end
        .handle(EndSessionCommand { session_id })
        .await
        .unwrap();
    harness
        .reset
        .handle(ResetSessionCommand { session_id })
        .await
        .unwrap();

    assert_eq!(ended.job.run().await, SummaryOutcome::Discarded);
    assert!(harness.snapshot(session_id).await.summary().is_none());
    assert_eq!(harness.registry.len().await, 1);
}
