//! Terminal output: tables for listings, key/value blocks for single items.

pub mod table;

use anyhow::Result;
use serde::Serialize;
use ups_schema::{PushApplication, Variant, VariantKind};

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_application(app: &PushApplication) {
    print!("{}", application_details(app));
}

pub fn print_variant(variant: &Variant) {
    print!("{}", variant_details(variant));
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<16}{value}\n"));
}

fn application_details(app: &PushApplication) -> String {
    let mut out = format!("Created application '{}'\n", app.name);
    field(&mut out, "pushApplicationID", &app.push_application_id);
    field(&mut out, "masterSecret", &app.master_secret);
    field(&mut out, "developer", &app.developer);
    if let Some(description) = &app.description {
        field(&mut out, "description", description);
    }
    out
}

fn variant_details(variant: &Variant) -> String {
    let mut out = format!(
        "Created {} variant '{}'\n",
        variant.variant_type(),
        variant.name
    );
    field(&mut out, "variantID", &variant.variant_id);
    field(&mut out, "secret", &variant.secret);
    field(&mut out, "developer", &variant.developer);
    match &variant.kind {
        VariantKind::Android { project_number, .. } => {
            if let Some(project_number) = project_number {
                field(&mut out, "projectNumber", project_number);
            }
        }
        VariantKind::Ios { production, .. } => {
            field(&mut out, "production", if *production { "yes" } else { "no" });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_details_show_credentials() {
        let app = PushApplication {
            id: "internal".to_string(),
            push_application_id: "app-1".to_string(),
            name: "Demo".to_string(),
            description: None,
            developer: "admin".to_string(),
            master_secret: "s3cret".to_string(),
            variants: Vec::new(),
        };
        let text = application_details(&app);
        assert!(text.starts_with("Created application 'Demo'"));
        assert!(text.contains("app-1"));
        assert!(text.contains("s3cret"));
        assert!(!text.contains("description"));
    }

    #[test]
    fn test_variant_details_never_print_the_google_key() {
        let variant = Variant {
            id: "internal".to_string(),
            variant_id: "v-1".to_string(),
            name: "Droid".to_string(),
            description: None,
            developer: "admin".to_string(),
            secret: "vs".to_string(),
            kind: VariantKind::Android {
                google_key: "server-key".to_string(),
                project_number: Some("42".to_string()),
            },
        };
        let text = variant_details(&variant);
        assert!(text.starts_with("Created android variant 'Droid'"));
        assert!(text.contains("42"));
        assert!(!text.contains("server-key"));
    }
}
