//! Shared application services handed to every handler.

use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;
use tokio::runtime::Handle;

use pizzeria_core::{Entity, IngredientId};
use pizzeria_infra::{
    EngineError, HttpRecipeClient, InMemoryIngredientStore, InMemoryRecipeBook, IngredientStore,
    PricingEngine, RecipeLookup,
};
use pizzeria_inventory::{Ingredient, NewIngredient};

use crate::config::AppConfig;

pub type SharedStore = Arc<dyn IngredientStore>;
pub type SharedRecipes = Arc<dyn RecipeLookup>;

pub struct AppServices {
    engine: PricingEngine<SharedStore, SharedRecipes>,
}

impl AppServices {
    pub fn new(store: SharedStore, recipes: SharedRecipes) -> Self {
        Self {
            engine: PricingEngine::new(store, recipes),
        }
    }

    /// Empty in-memory store with the given canned recipes.
    pub fn in_memory(recipes: InMemoryRecipeBook) -> Self {
        Self::new(
            Arc::new(InMemoryIngredientStore::new()),
            Arc::new(recipes),
        )
    }

    /// Wire the collaborators named by `config`.
    ///
    /// Must be called from inside a Tokio runtime; the HTTP and Postgres
    /// adapters capture its handle.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let recipes: SharedRecipes = match &config.recipe_service_url {
            Some(url) => {
                tracing::info!(%url, timeout = ?config.recipe_timeout, "using remote recipe service");
                Arc::new(
                    HttpRecipeClient::new(url.clone(), config.recipe_timeout, Handle::current())
                        .context("failed to build recipe service client")?,
                )
            }
            None => {
                tracing::warn!("RECIPE_SERVICE_URL not set; serving from an empty in-memory recipe book");
                Arc::new(InMemoryRecipeBook::new())
            }
        };

        let store = build_store(config).await?;
        Ok(Self::new(store, recipes))
    }

    pub fn engine(&self) -> &PricingEngine<SharedStore, SharedRecipes> {
        &self.engine
    }

    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>, EngineError> {
        Ok(self.engine.store().list()?)
    }

    pub fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, EngineError> {
        Ok(self.engine.store().get(id)?)
    }

    pub fn create_ingredient(&self, attrs: NewIngredient) -> Result<Ingredient, EngineError> {
        let created = self.engine.store().create(attrs)?;
        tracing::info!(ingredient_id = %created.id(), "ingredient created");
        Ok(created)
    }

    /// Replace every attribute of an existing ingredient.
    pub fn update_ingredient(
        &self,
        id: IngredientId,
        attrs: NewIngredient,
    ) -> Result<Ingredient, EngineError> {
        self.engine.store().get(id)?;
        let updated = Ingredient::from_parts(id, attrs);
        self.engine.store().save(updated.clone())?;
        Ok(updated)
    }

    pub fn delete_ingredient(&self, id: IngredientId) -> Result<(), EngineError> {
        self.engine.store().delete(id)?;
        tracing::info!(ingredient_id = %id, "ingredient deleted");
        Ok(())
    }
}

/// Errors from running a service call on the blocking pool.
#[derive(Debug, Error)]
pub enum BlockingError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run a synchronous service call on the blocking pool.
///
/// The engine's adapters may block on network I/O, so handlers never call it
/// directly from an async worker thread.
pub async fn run_blocking<T, F>(services: Arc<AppServices>, f: F) -> Result<T, BlockingError>
where
    T: Send + 'static,
    F: FnOnce(&AppServices) -> Result<T, EngineError> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || f(&services)).await??)
}

#[cfg(feature = "postgres")]
async fn build_store(config: &AppConfig) -> anyhow::Result<SharedStore> {
    match &config.database_url {
        Some(url) => {
            let store = pizzeria_infra::store::PostgresIngredientStore::connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            tracing::info!("using postgres ingredient store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory ingredient store");
            Ok(Arc::new(InMemoryIngredientStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store(config: &AppConfig) -> anyhow::Result<SharedStore> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the `postgres` feature");
    }
    Ok(Arc::new(InMemoryIngredientStore::new()))
}
