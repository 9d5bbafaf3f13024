use anyhow::Context;
use participation::config::AppConfig;
use participation::demo::{DEMO_USER_ID, DemoApi};
use participation::orchestrate::ParticipationLoader;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;
    if !config.demo_mode {
        warn!(
            base_url = %config.api.base_url,
            "demo_mode is off but this binary only ships the demo source; using sample data"
        );
    }

    let loader = ParticipationLoader::new(DemoApi::new());
    let Some(view) = loader
        .load(DEMO_USER_ID)
        .await
        .context("Aggregation pass failed")?
    else {
        warn!("Aggregation pass was superseded before it finished");
        return Ok(());
    };

    info!(
        user_id = %view.user_id,
        hackathons = view.hackathons.len(),
        failures = view.failures.len(),
        "Aggregated participation state"
    );

    for participation in &view.hackathons {
        let submission_phase = participation
            .submission
            .as_ref()
            .map(|s| s.phase.label())
            .unwrap_or("-");
        info!(
            hackathon = %participation.hackathon.title,
            joined = participation.is_joined(),
            teams = participation.roster.teams.len(),
            individuals = participation.roster.individuals.len(),
            action = ?participation.gate.action,
            disabled = participation.gate.disabled,
            submission = submission_phase,
            "Hackathon"
        );
    }

    for failure in &view.failures {
        warn!(source = ?failure.source, message = %failure.message, "Source failure survived");
    }

    Ok(())
}
