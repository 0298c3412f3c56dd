use anyhow::{Context, Result};
use std::path::Path;
use ups_core::{UpsClient, VariantFilter};
use ups_schema::{IosCertificate, NewAndroidVariant, NewIosVariant, NewVariant};

use crate::VariantCommands;
use crate::ui;

pub async fn run(client: &UpsClient, command: VariantCommands, json: bool) -> Result<()> {
    match command {
        VariantCommands::List {
            app_id,
            filters,
            all,
        } => list(client, &app_id, &filters, all, json).await,
        VariantCommands::CreateAndroid {
            app_id,
            name,
            google_key,
            project_number,
            description,
            developer,
        } => {
            let mut variant = NewAndroidVariant::new(name, google_key);
            if let Some(project_number) = project_number {
                variant = variant.with_project_number(project_number);
            }
            if let Some(description) = description {
                variant = variant.with_description(description);
            }
            if let Some(developer) = developer {
                variant = variant.with_developer(developer);
            }
            create(client, &app_id, &variant.into(), json).await
        }
        VariantCommands::CreateIos {
            app_id,
            name,
            certificate,
            password,
            production,
            description,
            developer,
        } => {
            let certificate = read_certificate(&certificate).await?;
            let mut variant = NewIosVariant::new(name, certificate, password).production(production);
            if let Some(description) = description {
                variant = variant.with_description(description);
            }
            if let Some(developer) = developer {
                variant = variant.with_developer(developer);
            }
            create(client, &app_id, &variant.into(), json).await
        }
        VariantCommands::Delete { app_id, variant_id } => {
            delete(client, &app_id, &variant_id).await
        }
    }
}

/// List the variants of `app_id` matching `key=value` filters.
pub async fn list(
    client: &UpsClient,
    app_id: &str,
    filters: &[String],
    all: bool,
    json: bool,
) -> Result<()> {
    let admin = client.variants(app_id);
    let variants = if all {
        admin.find_all().await
    } else {
        let filter = VariantFilter::parse(filters)?;
        admin.find(&filter).await
    }
    .with_context(|| format!("Failed to list variants of {app_id}"))?;

    if json {
        return ui::print_json(&variants);
    }
    if variants.is_empty() {
        println!("No variants found.");
        return Ok(());
    }

    println!("{}", ui::table::variants(&variants));
    if !all && filters.is_empty() && variants.len() == client.page_size() {
        eprintln!("Showing the first page only. Use --all to list every variant.");
    }
    Ok(())
}

pub async fn create(
    client: &UpsClient,
    app_id: &str,
    variant: &NewVariant,
    json: bool,
) -> Result<()> {
    let created = client
        .variants(app_id)
        .create(variant)
        .await
        .with_context(|| {
            format!(
                "Failed to create {} variant '{}' under {app_id}",
                variant.variant_type(),
                variant.name()
            )
        })?;

    if json {
        return ui::print_json(&created);
    }
    ui::print_variant(&created);
    Ok(())
}

pub async fn delete(client: &UpsClient, app_id: &str, variant_id: &str) -> Result<()> {
    client
        .variants(app_id)
        .delete(variant_id)
        .await
        .with_context(|| format!("Failed to delete variant {variant_id} of {app_id}"))?;
    println!("Deleted variant {variant_id}");
    Ok(())
}

async fn read_certificate(path: &Path) -> Result<IosCertificate> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read certificate {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "certificate.p12".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(IosCertificate::new(file_name, bytes))
}
