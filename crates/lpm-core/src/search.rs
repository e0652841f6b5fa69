use lpm_error::Result;
use lpm_registry::{CatalogEntry, IndexCache};
use lpm_settings::Context;

pub struct SearchManager<'a> {
    ctx: &'a Context,
}

impl<'a> SearchManager<'a> {
    pub const fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Entries whose name or description contains every term, ignoring case.
    pub fn search(&self, terms: &[String]) -> Result<Vec<CatalogEntry>> {
        let index = IndexCache::open(&self.ctx.folders.index_file())?;
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();

        Ok(index
            .catalog()
            .iter()
            .filter(|entry| matches_all(entry, &terms))
            .cloned()
            .collect())
    }
}

fn matches_all(entry: &CatalogEntry, terms: &[String]) -> bool {
    let name = entry.name.to_lowercase();
    let description = entry
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    terms
        .iter()
        .all(|term| name.contains(term) || description.contains(term))
}
