use adservice_core::catalog::default_catalog;
use adservice_core::Ad;
use anyhow::Result;
use serde::Serialize;

use crate::output::{print_json, print_table};

#[derive(Serialize)]
struct CategoryView<'a> {
    name: &'a str,
    ads: &'a [Ad],
}

pub fn run(json: bool) -> Result<()> {
    let catalog = default_catalog()?;

    if json {
        let categories: Vec<CategoryView<'_>> = catalog
            .entries()
            .map(|(name, ads)| CategoryView { name, ads })
            .collect();
        return print_json(&serde_json::json!({ "categories": categories }));
    }

    let rows: Vec<Vec<String>> = catalog
        .entries()
        .flat_map(|(name, ads)| {
            ads.iter()
                .map(move |ad| vec![name.to_string(), ad.redirect_url.clone(), ad.text.clone()])
        })
        .collect();
    print_table(&["CATEGORY", "REDIRECT URL", "TEXT"], &rows);
    Ok(())
}
