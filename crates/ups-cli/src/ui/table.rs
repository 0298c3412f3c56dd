//! Listing tables

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use ups_schema::{PushApplication, Variant};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

pub fn applications(apps: &[PushApplication]) -> Table {
    let mut table = new_table(&["pushApplicationID", "Name", "Developer", "Variants"]);
    for app in apps {
        table.add_row(vec![
            app.push_application_id.clone(),
            app.name.clone(),
            app.developer.clone(),
            app.variants.len().to_string(),
        ]);
    }
    table
}

pub fn variants(variants: &[Variant]) -> Table {
    let mut table = new_table(&["variantID", "Name", "Type", "Developer"]);
    for variant in variants {
        table.add_row(vec![
            variant.variant_id.clone(),
            variant.name.clone(),
            variant.variant_type().to_string(),
            variant.developer.clone(),
        ]);
    }
    table
}
