//! Single batch run: aggregate once, then run every enabled recipe.

use crate::client::{build_http_client, PoeClient};
use crate::config::Settings;
use crate::error::Result;
use crate::inventory::{aggregate, Inventories};
use crate::recipes::{RecipeKind, RecipeOutcome};

pub async fn run(settings: &Settings) -> Result<Vec<(RecipeKind, RecipeOutcome)>> {
    let http = build_http_client(settings.request_timeout)?;
    let client = PoeClient::from_settings(http, settings);

    tracing::info!(
        "Fetching items for {} in {} ({})",
        settings.account_name,
        settings.league,
        settings.realm
    );
    let inventories = aggregate(
        &client,
        &settings.account_name,
        &settings.realm,
        &settings.league,
    )
    .await?;

    let outcomes = run_recipes(settings, &inventories)?;
    for (recipe, outcome) in &outcomes {
        println!("{}", render(*recipe, outcome));
    }
    Ok(outcomes)
}

/// Runs enabled, recognized recipes in configuration order, each once.
/// Unknown names are skipped.
pub fn run_recipes(
    settings: &Settings,
    inventories: &Inventories,
) -> Result<Vec<(RecipeKind, RecipeOutcome)>> {
    let mut recipes: Vec<RecipeKind> = Vec::new();
    for name in &settings.enabled_recipes {
        match name.parse::<RecipeKind>() {
            Ok(recipe) if !recipes.contains(&recipe) => recipes.push(recipe),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping {}", e),
        }
    }

    if recipes.is_empty() {
        tracing::info!("No recipes enabled");
        return Ok(Vec::new());
    }

    let mut outcomes = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let outcome = recipe.run(inventories)?;
        if let RecipeOutcome::Found(groups) = &outcome {
            tracing::info!("{}: {} groups found", recipe, groups.len());
        }
        outcomes.push((recipe, outcome));
    }
    Ok(outcomes)
}

pub fn render(recipe: RecipeKind, outcome: &RecipeOutcome) -> String {
    match outcome {
        RecipeOutcome::NothingFound => format!("{}: nothing found", recipe),
        RecipeOutcome::Found(groups) => {
            let body = serde_json::to_string_pretty(groups)
                .unwrap_or_else(|_| format!("{:?}", groups));
            format!("{}:\n{}", recipe, body)
        }
    }
}
