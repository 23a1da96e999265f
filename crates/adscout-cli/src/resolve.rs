//! The `resolve` command: industry id → category name lookups.

use std::path::Path;

use adscout_core::{load_taxonomy, Taxonomy};

pub(crate) fn run_resolve(taxonomy_path: &Path, ids: &[String]) -> anyhow::Result<()> {
    let taxonomy = load_taxonomy(taxonomy_path)?;
    for line in resolve_lines(&taxonomy, ids) {
        println!("{line}");
    }
    Ok(())
}

/// `<id>\t<name>` per id, with `-` for ids that do not resolve.
fn resolve_lines(taxonomy: &Taxonomy, ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|id| format!("{id}\t{}", taxonomy.display_name(id)))
        .collect()
}
