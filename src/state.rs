use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::items::repo::PgItemStore;
use crate::nutrition::repo::PgReportStore;
use crate::profiles::repo::PgProfileStore;
use crate::recommendations::repo::PgRecommendationStore;
use crate::store::{ItemStore, MemoryStore, ProfileStore, RecommendationStore, ReportStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Set only when backed by PostgreSQL; used for migrations.
    pub db: Option<PgPool>,
    pub profiles: Arc<dyn ProfileStore>,
    pub items: Arc<dyn ItemStore>,
    pub recommendations: Arc<dyn RecommendationStore>,
    pub reports: Arc<dyn ReportStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data is not persisted");
            return Ok(Self::in_memory(config));
        };

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(url)
            .await
            .context("failed to connect to PostgreSQL")?;

        Ok(Self {
            profiles: Arc::new(PgProfileStore::new(db.clone())),
            items: Arc::new(PgItemStore::new(db.clone())),
            recommendations: Arc::new(PgRecommendationStore::new(db.clone())),
            reports: Arc::new(PgReportStore::new(db.clone())),
            db: Some(db),
            config,
        })
    }

    /// All four stores share one [`MemoryStore`] so profile deletes cascade.
    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config,
            db: None,
            profiles: store.clone(),
            items: store.clone(),
            recommendations: store.clone(),
            reports: store,
        }
    }

    pub fn fake() -> Self {
        Self::in_memory(Arc::new(AppConfig::default()))
    }
}
