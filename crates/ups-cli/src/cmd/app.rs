use anyhow::{Context, Result};
use ups_core::{ApplicationFilter, UpsClient};
use ups_schema::NewApplication;

use crate::AppCommands;
use crate::ui;

pub async fn run(client: &UpsClient, command: AppCommands, json: bool) -> Result<()> {
    match command {
        AppCommands::List { filters, all } => list(client, &filters, all, json).await,
        AppCommands::Create {
            name,
            description,
            developer,
        } => {
            let mut app = NewApplication::new(name);
            if let Some(description) = description {
                app = app.with_description(description);
            }
            if let Some(developer) = developer {
                app = app.with_developer(developer);
            }
            create(client, &app, json).await
        }
        AppCommands::Delete { id } => delete(client, &id).await,
    }
}

/// List applications matching `key=value` filters.
pub async fn list(client: &UpsClient, filters: &[String], all: bool, json: bool) -> Result<()> {
    let admin = client.applications();
    let apps = if all {
        admin.find_all().await
    } else {
        let filter = ApplicationFilter::parse(filters)?;
        admin.find(&filter).await
    }
    .context("Failed to list applications")?;

    if json {
        return ui::print_json(&apps);
    }
    if apps.is_empty() {
        println!("No applications found.");
        return Ok(());
    }

    println!("{}", ui::table::applications(&apps));
    if !all && filters.is_empty() && apps.len() == client.page_size() {
        eprintln!("Showing the first page only. Use --all to list every application.");
    }
    Ok(())
}

pub async fn create(client: &UpsClient, app: &NewApplication, json: bool) -> Result<()> {
    let created = client
        .applications()
        .create(app)
        .await
        .with_context(|| format!("Failed to create application '{}'", app.name))?;

    if json {
        return ui::print_json(&created);
    }
    ui::print_application(&created);
    Ok(())
}

pub async fn delete(client: &UpsClient, id: &str) -> Result<()> {
    client
        .applications()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete application {id}"))?;
    println!("Deleted application {id}");
    Ok(())
}
