//! In-memory catalog for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::catalog::{Agent, BlogPost, Listing};
use crate::domain::foundation::RecordId;
use crate::ports::{CatalogError, CatalogReader};

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    listings: RwLock<HashMap<String, Listing>>,
    posts: RwLock<HashMap<String, BlogPost>>,
    agents: RwLock<HashMap<String, Agent>>,
    /// When set, every read fails as if the backend were down.
    unavailable: RwLock<bool>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, id: &str, listing: Listing) -> Self {
        self.listings.write().unwrap().insert(id.to_string(), listing);
        self
    }

    pub fn with_blog_post(self, id: &str, post: BlogPost) -> Self {
        self.posts.write().unwrap().insert(id.to_string(), post);
        self
    }

    pub fn with_agent(self, id: &str, agent: Agent) -> Self {
        self.agents.write().unwrap().insert(id.to_string(), agent);
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap() = unavailable;
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if *self.unavailable.read().unwrap() {
            Err(CatalogError::Unavailable("in-memory catalog offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn listing(&self, id: &RecordId) -> Result<Option<Listing>, CatalogError> {
        self.check_available()?;
        Ok(self.listings.read().unwrap().get(id.as_str()).cloned())
    }

    async fn blog_post(&self, id: &RecordId) -> Result<Option<BlogPost>, CatalogError> {
        self.check_available()?;
        Ok(self.posts.read().unwrap().get(id.as_str()).cloned())
    }

    async fn agent(&self, id: &RecordId) -> Result<Option<Agent>, CatalogError> {
        self.check_available()?;
        Ok(self.agents.read().unwrap().get(id.as_str()).cloned())
    }
}
