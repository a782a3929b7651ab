//! HTTP client for the recipe service.
//!
//! `GET {base_url}/{id}` returning a JSON [`Recipe`]. Like the Postgres store,
//! calls block on the captured runtime handle and must run off the async
//! worker threads.

use std::time::Duration;

use reqwest::StatusCode;
use tokio::runtime::Handle;

use pizzeria_core::RecipeId;
use pizzeria_pricing::Recipe;

use super::{RecipeLookup, RecipeLookupError};

#[derive(Debug, Clone)]
pub struct HttpRecipeClient {
    base_url: String,
    client: reqwest::Client,
    handle: Handle,
}

impl HttpRecipeClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        handle: Handle,
    ) -> Result<Self, RecipeLookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecipeLookupError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            handle,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn recipe_url(&self, id: RecipeId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn fetch(&self, id: RecipeId) -> Result<Recipe, RecipeLookupError> {
        let res = self
            .client
            .get(self.recipe_url(id))
            .send()
            .await
            .map_err(|e| RecipeLookupError::Transport(e.to_string()))?;

        if res.status() == StatusCode::NOT_FOUND {
            return Err(RecipeLookupError::NotFound(id));
        }
        let res = res
            .error_for_status()
            .map_err(|e| RecipeLookupError::Transport(e.to_string()))?;

        res.json::<Recipe>()
            .await
            .map_err(|e| RecipeLookupError::Decode(e.to_string()))
    }
}

impl RecipeLookup for HttpRecipeClient {
    fn fetch_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeLookupError> {
        tracing::debug!(recipe_id = %id, url = %self.recipe_url(id), "fetching recipe");
        self.handle.block_on(self.fetch(id))
    }
}
