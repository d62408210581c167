//! Integration tests for the full pipeline: discovery through pitch, plus
//! the stale-result and forward-invalidation guarantees of the session
//! orchestrator.
//!
//! All tests run against `MockAI` with a paused clock, so races between
//! overlapping requests are deterministic.

use std::sync::Arc;
use std::time::Duration;

use leadscout::{
    AiError, BusinessLead, Citation, LeadPipeline, MockAI, Opportunity, PipelineConfig,
    PitchFocus, PitchLength, PitchOptions, PitchTone, StageState,
};

fn lead(name: &str) -> BusinessLead {
    BusinessLead {
        id: format!("id-{name}"),
        name: name.to_string(),
        address: "1 Main St".into(),
        rating: 3.2,
        reviews: 40,
        website: None,
        opportunities: vec![Opportunity::LowReputation, Opportunity::MissingInfo],
    }
}

// Script needles keyed to distinctive phrases of each stage's prompt: the
// research prompt carries "Name: <lead>", the gap prompt carries
// "capabilities this business is missing", the pitch prompt carries
// "outreach pitch".
const GAP_NEEDLE: &str = "capabilities this business is missing";
const PITCH_NEEDLE: &str = "outreach pitch";

#[tokio::test]
async fn discovery_to_pitch_happy_path() {
    let ai = MockAI::new()
        .with_reply(
            "\"Dentist\"",
            r#"[{"name":"Smile Co","address":"1 Main St","rating":3.2,"reviews":40}]"#,
        )
        .with_cited_reply(
            "Name: Smile Co",
            "Smile Co has no website and relies on a quiet Facebook page.",
            vec![Citation::new("https://facebook.com/smileco").with_title("Smile Co | Facebook")],
        )
        .with_reply(GAP_NEEDLE, "Here you go:\n```json\n[\"No Chatbot\",\"No Booking\"]\n```")
        .with_reply(
            PITCH_NEEDLE,
            "Hi Smile Co team - people are looking for a dentist like you and not finding you online.",
        );
    let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

    let leads = pipeline.run_discovery("Dentist", "Austin, TX").await.unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].rating, 3.2);
    assert_eq!(leads[0].reviews, 40);
    assert_eq!(
        leads[0].opportunities,
        vec![Opportunity::LowReputation, Opportunity::MissingInfo]
    );

    let audit = pipeline.run_audit(&leads[0]).await.unwrap();
    assert_eq!(audit.gaps, vec!["No Chatbot", "No Booking"]);
    assert_eq!(audit.sources.len(), 1);
    assert_eq!(audit.sources[0].title, "Smile Co | Facebook");

    let options = PitchOptions {
        focus: PitchFocus::WebsitePresence,
        tone: PitchTone::Friendly,
        length: PitchLength::Short,
    };
    let pitch = pipeline.generate_pitch(options).await.unwrap();
    assert!(pitch.contains("Smile Co"));

    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.discovery_state, StageState::Succeeded);
    assert_eq!(snapshot.audit_state, StageState::Succeeded);
    assert_eq!(snapshot.pitch_state, StageState::Succeeded);
    assert_eq!(snapshot.pitch.as_deref(), Some(pitch.as_str()));
    assert_eq!(snapshot.selected.unwrap().name, "Smile Co");
}

#[tokio::test]
async fn pitch_with_no_gaps_still_mentions_the_business() {
    let ai = MockAI::new()
        .with_reply("Name: Smile Co", "Clean bill of digital health.")
        .with_reply(GAP_NEEDLE, "[]")
        .with_reply(PITCH_NEEDLE, "Smile Co already shines online - here is the one thing left.");
    let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

    pipeline.run_audit(&lead("Smile Co")).await.unwrap();

    let options = PitchOptions {
        focus: PitchFocus::WebsitePresence,
        ..PitchOptions::default()
    };
    let pitch = pipeline.generate_pitch(options).await.unwrap();
    assert!(!pitch.is_empty());
    assert!(pitch.contains("Smile Co"));
}

#[tokio::test(start_paused = true)]
async fn stale_audit_is_discarded() {
    // Lead A's research call is slow; the user clicks lead B before it
    // resolves. B's audit must win no matter when A's arrives.
    let ai = MockAI::new()
        .with_delayed_reply(
            "Name: Alpha Plumbing",
            "Deep dive on Alpha Plumbing.",
            Duration::from_secs(5),
        )
        .with_reply("Name: Beta Plumbing", "Quick look at Beta Plumbing.")
        .with_reply(GAP_NEEDLE, "[]");
    let pipeline = Arc::new(LeadPipeline::new(ai, PipelineConfig::default()));

    let first = {
        let pipeline = pipeline.clone();
        let a = lead("Alpha Plumbing");
        tokio::spawn(async move { pipeline.run_audit(&a).await })
    };
    // Let the first audit issue its token and park in the provider call.
    tokio::time::sleep(Duration::from_millis(1)).await;

    let second = {
        let pipeline = pipeline.clone();
        let b = lead("Beta Plumbing");
        tokio::spawn(async move { pipeline.run_audit(&b).await })
    };

    let (first, second) = tokio::join!(first, second);
    let stale = first.unwrap().unwrap();
    let fresh = second.unwrap().unwrap();

    // Both calls completed; only the newer one reached shared state.
    assert_eq!(stale.content, "Deep dive on Alpha Plumbing.");
    assert_eq!(fresh.content, "Quick look at Beta Plumbing.");

    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.selected.unwrap().name, "Beta Plumbing");
    assert_eq!(snapshot.audit.unwrap().content, "Quick look at Beta Plumbing.");
    assert_eq!(snapshot.audit_state, StageState::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn stale_audit_failure_does_not_mark_newer_request_failed() {
    let ai = MockAI::new()
        .with_delayed_failure(
            "Name: Alpha Plumbing",
            AiError::Network("slow death".into()),
            Duration::from_secs(5),
        )
        .with_reply("Name: Beta Plumbing", "Quick look at Beta Plumbing.")
        .with_reply(GAP_NEEDLE, "[]");
    let pipeline = Arc::new(LeadPipeline::new(ai, PipelineConfig::default()));

    let first = {
        let pipeline = pipeline.clone();
        let a = lead("Alpha Plumbing");
        tokio::spawn(async move { pipeline.run_audit(&a).await })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;

    let second = {
        let pipeline = pipeline.clone();
        let b = lead("Beta Plumbing");
        tokio::spawn(async move { pipeline.run_audit(&b).await })
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.unwrap().is_err());
    assert!(second.unwrap().is_ok());

    // The late failure belonged to a superseded request; display state
    // still reflects the successful newer audit.
    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.audit_state, StageState::Succeeded);
    assert_eq!(snapshot.audit.unwrap().content, "Quick look at Beta Plumbing.");
}

#[tokio::test(start_paused = true)]
async fn stale_pitch_is_discarded_when_selection_changes() {
    let ai = MockAI::new()
        .with_reply("Name: Alpha Plumbing", "Audit of Alpha.")
        .with_reply("Name: Beta Plumbing", "Audit of Beta.")
        .with_reply(GAP_NEEDLE, "[]")
        .with_delayed_reply(PITCH_NEEDLE, "A pitch for Alpha Plumbing.", Duration::from_secs(5));
    let pipeline = Arc::new(LeadPipeline::new(ai, PipelineConfig::default()));

    pipeline.run_audit(&lead("Alpha Plumbing")).await.unwrap();

    let pitch_task = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.generate_pitch(PitchOptions::default()).await })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Selecting another lead invalidates the in-flight pitch.
    pipeline.run_audit(&lead("Beta Plumbing")).await.unwrap();

    let stale_pitch = pitch_task.await.unwrap().unwrap();
    assert_eq!(stale_pitch, "A pitch for Alpha Plumbing.");

    let snapshot = pipeline.snapshot();
    assert!(snapshot.pitch.is_none());
    assert_eq!(snapshot.pitch_state, StageState::Idle);
    assert_eq!(snapshot.selected.unwrap().name, "Beta Plumbing");
}

#[tokio::test(start_paused = true)]
async fn new_discovery_clears_everything_downstream() {
    let ai = MockAI::new()
        .with_reply(
            "\"Dentist\"",
            r#"[{"name":"Smile Co","address":"1 Main St","rating":3.2,"reviews":40}]"#,
        )
        .with_delayed_reply("\"Florist\"", r#"[{"name":"Bloom Co","address":"2 Oak Ave"}]"#, Duration::from_secs(5))
        .with_reply("Name: Smile Co", "Audit of Smile Co.")
        .with_reply(GAP_NEEDLE, "[]")
        .with_reply(PITCH_NEEDLE, "A pitch for Smile Co.");
    let pipeline = Arc::new(LeadPipeline::new(ai, PipelineConfig::default()));

    let leads = pipeline.run_discovery("Dentist", "Austin, TX").await.unwrap();
    pipeline.run_audit(&leads[0]).await.unwrap();
    pipeline.generate_pitch(PitchOptions::default()).await.unwrap();
    assert!(pipeline.snapshot().pitch.is_some());

    let search = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.run_discovery("Florist", "Austin, TX").await })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;

    // Downstream state is cleared before the new search's results arrive.
    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.discovery_state, StageState::InFlight);
    assert!(snapshot.selected.is_none());
    assert!(snapshot.audit.is_none());
    assert!(snapshot.pitch.is_none());
    assert_eq!(snapshot.audit_state, StageState::Idle);
    assert_eq!(snapshot.pitch_state, StageState::Idle);

    let new_leads = search.await.unwrap().unwrap();
    assert_eq!(new_leads[0].name, "Bloom Co");

    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.discovery_state, StageState::Succeeded);
    assert_eq!(snapshot.leads.len(), 1);
    assert_eq!(snapshot.leads[0].name, "Bloom Co");
}

#[tokio::test]
async fn audit_failure_is_isolated_to_its_stage() {
    let ai = MockAI::new()
        .with_reply(
            "\"Dentist\"",
            r#"[{"name":"Smile Co","address":"1 Main St","rating":3.2,"reviews":40}]"#,
        )
        .with_failure("Name: Smile Co", AiError::Provider("quota exhausted".into()));
    let pipeline = LeadPipeline::new(ai, PipelineConfig::default());

    let leads = pipeline.run_discovery("Dentist", "Austin, TX").await.unwrap();
    let result = pipeline.run_audit(&leads[0]).await;
    assert!(result.is_err());

    // Discovery results survive an audit failure.
    let snapshot = pipeline.snapshot();
    assert_eq!(snapshot.discovery_state, StageState::Succeeded);
    assert_eq!(snapshot.leads.len(), 1);
    assert!(matches!(snapshot.audit_state, StageState::Failed(_)));
}
