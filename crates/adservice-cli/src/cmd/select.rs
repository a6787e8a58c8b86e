use std::sync::Arc;

use adservice_core::catalog::default_catalog;
use adservice_core::random::{RandomSource, SeededRandom, ThreadRandom};
use adservice_core::selector::Selector;
use anyhow::Result;

use crate::output::{print_json, print_table};

/// Run the selector against the built-in catalog. No flag lookup happens.
pub fn run(keys: Vec<String>, seed: Option<u64>, json: bool) -> Result<()> {
    let random: Arc<dyn RandomSource> = match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    let selector = Selector::new(Arc::new(default_catalog()?), random);
    let selection = selector.select(&keys);

    if json {
        return print_json(&serde_json::json!({
            "ads": selection.ads,
            "requestType": selection.request_type,
            "responseType": selection.response_type,
        }));
    }

    println!(
        "request: {}  response: {}",
        selection.request_type, selection.response_type
    );
    let rows: Vec<Vec<String>> = selection
        .ads
        .iter()
        .map(|ad| vec![ad.redirect_url.clone(), ad.text.clone()])
        .collect();
    print_table(&["REDIRECT URL", "TEXT"], &rows);
    Ok(())
}
