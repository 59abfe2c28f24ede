use std::env;
use std::error::Error;
use std::sync::Arc;

use consorcio_core::{config::CoreConfig, model::Screen, ConsorcioCore};
use consorcio_providers::http_client::imp::reqwest_client::ReqwestClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_demo=info,consorcio_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::from_env()?;
    let core = ConsorcioCore::new(Some(config), Arc::new(ReqwestClient::default()))?;

    //
    // Startup: without a stored session only the login screen is shown
    //

    core.session_service.start().await;
    println!("Screen: {}", core.navigation_service.rendered_screen());

    if core.navigation_service.rendered_screen() == Screen::Login {
        let email = env::var("CONSORCIO_DEMO_EMAIL")?;
        let password = env::var("CONSORCIO_DEMO_PASSWORD")?;

        if core.session_service.sign_in(&email, &password).await.is_err() {
            let notice = core.store.read(|state| state.notice.to_owned());
            println!("Sign-in failed: {notice:?}");
            return Ok(());
        }
        println!("Screen: {}", core.navigation_service.rendered_screen());
    }

    //
    // Dashboard
    //

    let summary = core.dashboard_service.summary();
    println!(
        "Claims: {} ({} open), expenses: {:.2}",
        summary.claim_count, summary.open_claims, summary.total_expenses
    );

    let state = core.store.snapshot();
    for slice in &state.chart {
        println!("  {:<20} {:>12.2} {}", slice.label, slice.value, slice.color);
    }
    for claim in &state.claims {
        println!("  [{}] {} ({})", claim.status, claim.title, claim.created_at);
    }

    //
    // Claims screen: file a claim when one is given
    //

    core.navigation_service.navigate(Screen::Claims);
    if let Ok(title) = env::var("CONSORCIO_DEMO_CLAIM") {
        core.claim_service.set_draft_title(title);
        match core.claim_service.submit().await {
            Ok(claim) => println!("Filed claim {}", claim.id),
            Err(error) => println!("Could not file claim: {error}"),
        }
    }

    if core.store.read(|state| state.session.is_some()) {
        core.session_service.sign_out().await?;
        println!("Screen: {}", core.navigation_service.rendered_screen());
    }

    Ok(())
}
