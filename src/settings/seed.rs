use std::process::ExitCode;

use tracing::{error, info, instrument};

use crate::error::StoreError;
use crate::settings::{model::NewSiteSetting, repo::SettingsStore};

/// Outcome of one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Inserts every default whose key is missing. Existing rows are left as they are.
///
/// Stops at the first store error; rows inserted before it stay committed.
#[instrument(skip_all, fields(total = defaults.len()))]
pub async fn seed_site_settings(
    store: &dyn SettingsStore,
    defaults: Vec<NewSiteSetting>,
) -> Result<SeedReport, StoreError> {
    let mut report = SeedReport { total: defaults.len(), ..SeedReport::default() };

    for setting in defaults {
        if store.find_by_key(&setting.key).await?.is_some() {
            info!(key = %setting.key, "setting already exists, skipped");
            report.skipped += 1;
            continue;
        }

        let key = setting.key.clone();
        let category = setting.category.clone();
        store.insert(setting).await?;
        info!(key = %key, category = %category, "setting created");
        report.created += 1;
    }

    info!(
        created = report.created,
        skipped = report.skipped,
        total = report.total,
        "site settings seeded"
    );
    Ok(report)
}

/// Runs the seed and turns the outcome into the process status: 0 on success, 1 on any error.
pub async fn run_seed(store: &dyn SettingsStore, defaults: Vec<NewSiteSetting>) -> ExitCode {
    match seed_site_settings(store, defaults).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "seeding failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::settings::{defaults::default_settings, memory::MemorySettingsStore};

    #[tokio::test]
    async fn second_run_skips_everything() {
        let store = MemorySettingsStore::new();
        let n = default_settings().len();

        let first = seed_site_settings(&store, default_settings()).await.unwrap();
        assert_eq!(first, SeedReport { created: n, skipped: 0, total: n });

        let second = seed_site_settings(&store, default_settings()).await.unwrap();
        assert_eq!(second, SeedReport { created: 0, skipped: n, total: n });
        assert_eq!(store.len(), n);
    }

    #[tokio::test]
    async fn existing_values_are_never_overwritten() {
        let store = MemorySettingsStore::new();
        store
            .insert(NewSiteSetting {
                key: "feature_flags".into(),
                category: "features".into(),
                value: json!({ "maintenanceMode": true }),
                is_public: true,
                description: None,
            })
            .await
            .unwrap();

        let report = seed_site_settings(&store, default_settings()).await.unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.created, report.total - 1);
        assert_eq!(store.value_of("feature_flags"), Some(json!({ "maintenanceMode": true })));
    }

    #[tokio::test]
    async fn first_failure_aborts_and_keeps_prior_inserts() {
        let store = MemorySettingsStore::failing_after(3);
        let err = seed_site_settings(&store, default_settings()).await;
        assert!(err.is_err());
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn exit_status_follows_the_outcome() {
        let store = MemorySettingsStore::new();
        assert_eq!(run_seed(&store, default_settings()).await, ExitCode::SUCCESS);
        // Everything already present still counts as success.
        assert_eq!(run_seed(&store, default_settings()).await, ExitCode::SUCCESS);

        let failing = MemorySettingsStore::failing_after(0);
        assert_eq!(run_seed(&failing, default_settings()).await, ExitCode::FAILURE);
        assert_eq!(failing.len(), 0);
    }
}
