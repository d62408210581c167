//! End-to-end prospecting demo against the live Gemini API.
//!
//! Discovers businesses for a category/location, audits the first lead,
//! and drafts a pitch from the audit.
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run --example prospect_demo --features gemini -- "Dentist" "Austin, TX"
//! ```

use leadscout::ai::Gemini;
use leadscout::{LeadPipeline, PipelineConfig, PitchFocus, PitchLength, PitchOptions, PitchTone};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadscout=debug,gemini_client=debug".into()),
        )
        .init();

    let config = PipelineConfig::default();
    let mut args = std::env::args().skip(1);
    let category = args.next().unwrap_or_else(|| config.default_category.clone());
    let location = args.next().unwrap_or_else(|| config.default_location.clone());

    let pipeline = LeadPipeline::new(Gemini::from_env()?, config);

    println!("Searching for {category} in {location}...");
    let leads = pipeline.run_discovery(&category, &location).await?;
    if leads.is_empty() {
        println!("No businesses found.");
        return Ok(());
    }

    for lead in &leads {
        let tags: Vec<_> = lead.opportunities.iter().map(|o| o.label()).collect();
        println!(
            "  {} ({} stars, {} reviews) {}",
            lead.name,
            lead.rating,
            lead.reviews,
            if tags.is_empty() {
                String::new()
            } else {
                format!("[{}]", tags.join(", "))
            }
        );
    }

    let target = &leads[0];
    println!("\nAuditing {}...", target.name);
    let audit = pipeline.run_audit(target).await?;
    println!("{}\n", audit.content);
    for gap in &audit.gaps {
        println!("  gap: {gap}");
    }
    for source in &audit.sources {
        println!("  source: {} ({})", source.title, source.uri);
    }

    let options = PitchOptions {
        focus: if target.website.is_some() {
            PitchFocus::Automation
        } else {
            PitchFocus::WebsitePresence
        },
        tone: PitchTone::Friendly,
        length: PitchLength::Medium,
    };
    println!("\nDrafting pitch...");
    let pitch = pipeline.generate_pitch(options).await?;
    println!("\n{pitch}");

    Ok(())
}
