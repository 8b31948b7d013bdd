//! Releaser report: which of a group's productions the catalog holds.

use scene_vault_db::CatalogStore;
use scene_vault_demozoo::types::platform_tag;
use scene_vault_demozoo::{Fetch, ProductionSource};

use crate::error::SyncError;

/// One production of a releaser and the local records linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaserEntry {
    pub production_id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub platform: Option<&'static str>,
    /// Ids of live catalog records linked to this production.
    pub records: Vec<i64>,
}

impl ReleaserEntry {
    pub fn is_linked(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Fetch a releaser's productions and mark each as linked or unlinked.
pub fn releaser_report(
    source: &dyn ProductionSource,
    store: &dyn CatalogStore,
    releaser_id: u64,
) -> Result<Vec<ReleaserEntry>, SyncError> {
    let productions = match source.releaser_productions(releaser_id)? {
        Fetch::Found(list) => list,
        Fetch::Gone => return Err(SyncError::ReleaserNotFound(releaser_id)),
        Fetch::Unusable(status) => return Err(SyncError::Unavailable(status)),
    };

    let mut entries = Vec::with_capacity(productions.len());
    for prod in productions {
        let records = store
            .find_by_production(prod.id)?
            .into_iter()
            .map(|r| r.id)
            .collect();
        entries.push(ReleaserEntry {
            production_id: prod.id,
            platform: prod.platforms.first().and_then(|p| platform_tag(&p.name)),
            title: prod.title,
            release_date: prod.release_date,
            records,
        });
    }
    log::debug!(
        "releaser {releaser_id}: {} productions, {} linked",
        entries.len(),
        entries.iter().filter(|e| e.is_linked()).count()
    );
    Ok(entries)
}
