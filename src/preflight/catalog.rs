//! Catalog preflight check.

use super::CheckResult;
use crate::core::catalog::CatalogRegistry;

/// Check every catalog source can be scanned.
pub fn check(catalogs: &CatalogRegistry) -> Vec<CheckResult> {
    if catalogs.is_empty() {
        return vec![CheckResult::ok("Catalogs", "none configured")];
    }

    catalogs
        .iter()
        .map(|catalog| {
            let name = format!("Catalog {}", catalog.source().display());
            match catalog.classify() {
                Ok(scan) if scan.skipped.is_empty() => CheckResult::ok(
                    &name,
                    &format!("{} shows, {} movies", scan.shows.len(), scan.movies.len()),
                ),
                Ok(scan) => CheckResult::ok(
                    &name,
                    &format!(
                        "{} shows, {} movies, {} skipped",
                        scan.shows.len(),
                        scan.movies.len(),
                        scan.skipped.len()
                    ),
                ),
                Err(e) => CheckResult::fail(
                    &name,
                    &e.to_string(),
                    "Check the [[catalogs]] source path in the config file",
                ),
            }
        })
        .collect()
}
