use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{Settings, SettingsChanged, SettingsPatch};
use super::repo::SettingsStore;
use crate::error::AppError;

/// Single writer for user settings: persists first, then notifies.
///
/// Updates for one user run one at a time, so a patch always merges onto
/// the row the previous patch wrote.
#[derive(Clone)]
pub struct SettingsHub {
    store: Arc<dyn SettingsStore>,
    tx: broadcast::Sender<SettingsChanged>,
    writers: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SettingsHub {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            store,
            tx,
            writers: Arc::new(DashMap::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingsChanged> {
        self.tx.subscribe()
    }

    /// Stored settings, or defaults for a user who never saved any.
    pub async fn get(&self, user_id: Uuid) -> anyhow::Result<Settings> {
        Ok(self.store.load(user_id).await?.unwrap_or_default())
    }

    pub async fn update(&self, user_id: Uuid, patch: SettingsPatch) -> Result<Settings, AppError> {
        if let Some(goals) = &patch.goals {
            goals.validate().map_err(AppError::BadRequest)?;
        }

        let lock = self.writers.entry(user_id).or_default().clone();
        let result = {
            let _turn = lock.lock().await;
            self.merge_save_publish(user_id, patch).await
        };
        drop(lock);
        // Forget the lock once no other update for this user holds it.
        self.writers
            .remove_if(&user_id, |_, l| Arc::strong_count(l) == 1);
        result
    }

    async fn merge_save_publish(
        &self,
        user_id: Uuid,
        patch: SettingsPatch,
    ) -> Result<Settings, AppError> {
        let mut settings = self.get(user_id).await?;
        patch.apply_to(&mut settings);
        self.store.save(user_id, &settings).await?;

        // Err only means nobody is listening.
        let receivers = self
            .tx
            .send(SettingsChanged {
                user_id,
                settings: settings.clone(),
            })
            .unwrap_or(0);
        debug!(%user_id, receivers, "settings change published");
        info!(%user_id, theme = ?settings.theme, "settings updated");
        Ok(settings)
    }
}
