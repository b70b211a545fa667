//! End-to-end interview loop tests with scripted capabilities and a mock
//! backend: turn commits, fallback behavior, interruption, countdown expiry,
//! and the resource-release guarantees on every exit path.

mod support;

use std::sync::Arc;
use std::time::Duration;
use support::{FakeCapture, RecordingSpeechOutput, ScriptedSpeechInput, StaticScanner};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerohire::api::BackendClient;
use zerohire::config::Config;
use zerohire::interview::{
    FALLBACK_APOLOGY, InterviewOutcome, InterviewRoom, ProctorSignal, RoomCommand, Speaker,
};
use zerohire::speech::{RecognitionEvent, SpeechInput, SpeechOutput};
use zerohire::vision::{BlendShapes, FaceScanner, HeadlessCapture, MediaCapture, NullScanner};

async fn mount_interact_reply(server: &MockServer, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/api/interact"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": reply })),
        )
        .mount(server)
        .await;
}

async fn mount_report(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex("^/api/report/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "overall_score": 75,
            "strengths": ["engaged"],
            "weaknesses": [],
            "summary": "solid session",
            "recommendation": "Hire"
        })))
        .mount(server)
        .await;
}

/// Millisecond-scale timings so the suites run in real time.
fn test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.backend.origin = server.uri();
    config.backend.request_timeout_secs = 5;
    config.backend.connect_timeout_secs = 2;
    config.interview.duration_secs = 120;
    config.interview.silence_debounce_ms = 80;
    config.interview.listen_delay_ms = 20;
    config
}

#[allow(clippy::type_complexity)]
fn launch(
    config: Config,
    speech_in: Arc<dyn SpeechInput>,
    speech_out: Arc<dyn SpeechOutput>,
    capture: Arc<dyn MediaCapture>,
    scanner: Arc<dyn FaceScanner>,
) -> (
    tokio::task::JoinHandle<Result<InterviewOutcome, zerohire::ZeroError>>,
    mpsc::Sender<RoomCommand>,
    mpsc::Sender<ProctorSignal>,
) {
    let client = Arc::new(BackendClient::new(&config.backend));
    let (commands_tx, commands_rx) = mpsc::channel(8);
    let (proctor_tx, proctor_rx) = mpsc::channel(8);
    let room = InterviewRoom::new(
        config,
        client,
        speech_in,
        speech_out,
        capture,
        scanner,
        "it-session",
        "Backend Engineer",
    );
    let handle = tokio::spawn(room.run(commands_rx, proctor_rx));
    (handle, commands_tx, proctor_tx)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 5s");
}

#[tokio::test]
async fn full_turn_commits_transcript_and_ships_emotion() {
    let server = MockServer::start().await;
    mount_interact_reply(&server, "Interesting. Why Rust?").await;
    mount_report(&server).await;

    let speech_in = ScriptedSpeechInput::new(vec![vec![
        RecognitionEvent::Interim("I enjoy".into()),
        RecognitionEvent::Final("I enjoy building APIs".into()),
        RecognitionEvent::Ended,
    ]]);
    let speech_out = RecordingSpeechOutput::new();
    let capture = FakeCapture::with_frames(3);
    let scanner = Arc::new(StaticScanner(BlendShapes {
        brow_inner_up: 0.5,
        mouth_smile: 0.0,
        eye_squint: 0.0,
    }));

    let (handle, commands, _proctor) = launch(
        test_config(&server),
        speech_in.clone(),
        speech_out.clone(),
        capture.clone(),
        scanner,
    );

    // Greeting spoken, answer committed, reply spoken, microphone reopened.
    wait_until(|| speech_in.start_count() >= 2).await;
    commands.send(RoomCommand::End).await.unwrap();
    let outcome = handle.await.unwrap().unwrap();

    let entries = outcome.transcript.entries();
    assert_eq!(entries[0].speaker, Speaker::Ai);
    assert!(entries[0].text.starts_with("Good day! I'm Zero"));
    assert_eq!(entries[1].speaker, Speaker::Candidate);
    assert_eq!(entries[1].text, "I enjoy building APIs");
    assert_eq!(entries[2].speaker, Speaker::Ai);
    assert_eq!(entries[2].text, "Interesting. Why Rust?");

    let spoken = speech_out.spoken();
    assert!(spoken.iter().any(|u| u.contains("backend engineer work")));
    assert!(spoken.contains(&"Interesting. Why Rust?".to_string()));

    // The sampled emotion (brow raise 0.5 ⇒ Nervous) rode along.
    let interactions: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/api/interact")
        .collect();
    assert_eq!(interactions.len(), 1);
    let body = String::from_utf8_lossy(&interactions[0].body).into_owned();
    assert!(body.contains("Nervous"), "body was {body}");
    assert!(body.contains("0.5"), "body was {body}");

    // Resource-release guarantees.
    assert!(speech_in.is_stopped());
    assert!(speech_out.was_cancelled());
    assert!(capture.is_released());

    assert_eq!(outcome.report.overall_score, 75.0);
    assert_eq!(outcome.report.recommendation, "Hire");
}

#[tokio::test]
async fn ending_mid_listening_releases_everything_and_drops_pending_turn() {
    let server = MockServer::start().await;
    mount_interact_reply(&server, "unused").await;
    mount_report(&server).await;

    let mut config = test_config(&server);
    // A debounce long enough that the pending turn can never commit.
    config.interview.silence_debounce_ms = 60_000;

    let speech_in = ScriptedSpeechInput::new(vec![vec![RecognitionEvent::Final(
        "half an answer".into(),
    )]]);
    let speech_out = RecordingSpeechOutput::new();
    let capture = FakeCapture::with_frames(1);

    let (handle, commands, _proctor) = launch(
        config,
        speech_in.clone(),
        speech_out.clone(),
        capture.clone(),
        Arc::new(NullScanner),
    );

    wait_until(|| speech_in.start_count() >= 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    commands.send(RoomCommand::End).await.unwrap();
    let outcome = handle.await.unwrap().unwrap();

    // Only the greeting made it in; the uncommitted turn is gone.
    assert_eq!(outcome.transcript.len(), 1);
    assert_eq!(outcome.transcript.entries()[0].speaker, Speaker::Ai);

    assert!(speech_in.is_stopped());
    assert!(speech_out.was_cancelled());
    assert!(capture.is_released());
}

#[tokio::test]
async fn countdown_expiry_runs_the_same_end_sequence() {
    let server = MockServer::start().await;
    mount_interact_reply(&server, "unused").await;
    mount_report(&server).await;

    let mut config = test_config(&server);
    config.interview.duration_secs = 1;

    let speech_in = ScriptedSpeechInput::new(vec![]);
    let speech_out = RecordingSpeechOutput::new();
    let capture = FakeCapture::with_frames(1);

    let (handle, _commands, _proctor) = launch(
        config,
        speech_in.clone(),
        speech_out.clone(),
        capture.clone(),
        Arc::new(NullScanner),
    );

    // No explicit end: expiry alone must terminate and release.
    let outcome = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("interview did not end on countdown expiry")
        .unwrap()
        .unwrap();

    assert!(speech_in.is_stopped());
    assert!(speech_out.was_cancelled());
    assert!(capture.is_released());
    assert_eq!(outcome.report.overall_score, 75.0);
}

#[tokio::test]
async fn interaction_failure_substitutes_the_fallback_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interact"))
        .respond_with(ResponseTemplate::new(500).set_body_string("brain offline"))
        .mount(&server)
        .await;
    mount_report(&server).await;

    let speech_in = ScriptedSpeechInput::new(vec![vec![RecognitionEvent::Final(
        "hello there".into(),
    )]]);
    let speech_out = RecordingSpeechOutput::new();

    let (handle, commands, _proctor) = launch(
        test_config(&server),
        speech_in.clone(),
        speech_out.clone(),
        Arc::new(HeadlessCapture),
        Arc::new(NullScanner),
    );

    // The loop survives the failure: the apology is spoken, not a crash.
    wait_until(|| speech_out.spoken().iter().any(|u| u == FALLBACK_APOLOGY)).await;
    commands.send(RoomCommand::End).await.unwrap();
    let outcome = handle.await.unwrap().unwrap();

    let last_ai = outcome
        .transcript
        .entries()
        .iter()
        .rev()
        .find(|e| e.speaker == Speaker::Ai)
        .unwrap();
    assert_eq!(last_ai.text, FALLBACK_APOLOGY);

    // With no camera, the committed turn carried the neutral default.
    let interactions: Vec<_> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/api/interact")
        .collect();
    let body = String::from_utf8_lossy(&interactions[0].body).into_owned();
    assert!(body.contains("neutral"), "body was {body}");
    assert!(body.contains("0.0"), "body was {body}");
}

#[tokio::test]
async fn control_interrupts_ai_speech_and_opens_the_microphone() {
    let server = MockServer::start().await;
    mount_interact_reply(&server, "Go on.").await;
    mount_report(&server).await;

    let speech_in = ScriptedSpeechInput::new(vec![vec![
        RecognitionEvent::Final("let me jump in".into()),
        RecognitionEvent::Ended,
    ]]);
    // A long pace keeps the greeting "audible" until the interrupt.
    let speech_out = RecordingSpeechOutput::with_pace(Duration::from_secs(60));

    let (handle, commands, _proctor) = launch(
        test_config(&server),
        speech_in.clone(),
        speech_out.clone(),
        Arc::new(HeadlessCapture),
        Arc::new(NullScanner),
    );

    wait_until(|| !speech_out.spoken().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    commands.send(RoomCommand::Interact).await.unwrap();

    wait_until(|| speech_in.start_count() >= 1).await;
    assert!(speech_out.was_cancelled());

    // The interrupted candidate turn still commits and gets a reply.
    wait_until(|| speech_out.spoken().iter().any(|u| u == "Go on.")).await;
    commands.send(RoomCommand::End).await.unwrap();
    let outcome = handle.await.unwrap().unwrap();

    assert!(
        outcome
            .transcript
            .entries()
            .iter()
            .any(|e| e.speaker == Speaker::Candidate && e.text == "let me jump in")
    );
}

#[tokio::test]
async fn violations_accumulate_and_dismissal_resets() {
    let server = MockServer::start().await;
    mount_interact_reply(&server, "unused").await;
    mount_report(&server).await;

    let speech_in = ScriptedSpeechInput::new(vec![]);
    let speech_out = RecordingSpeechOutput::new();

    let (handle, commands, proctor) = launch(
        test_config(&server),
        speech_in,
        speech_out,
        Arc::new(HeadlessCapture),
        Arc::new(NullScanner),
    );

    proctor.send(ProctorSignal::VisibilityLost).await.unwrap();
    proctor.send(ProctorSignal::VisibilityLost).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    commands.send(RoomCommand::DismissWarning).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    proctor.send(ProctorSignal::FocusLost).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    commands.send(RoomCommand::End).await.unwrap();
    let outcome = handle.await.unwrap().unwrap();

    // Two violations, reset on dismissal, then exactly one more.
    assert_eq!(outcome.violations.count, 1);
    assert_eq!(outcome.violations.last, Some("Window Blur Detected"));
}
