//! Persistence seams for the handlers.
//!
//! A [`Connector`] opens one store per invocation and releases it once the
//! response is built. Each handler issues exactly one statement through the
//! store it was given.

pub mod postgres;

use async_trait::async_trait;

use crate::core::models::{
    ContentItem, ContentKind, NewContent, NewRegistration, Registration, RegistrationUpdate,
};
use crate::errors::ApiError;

pub use postgres::{PgConnector, PgStore};

#[async_trait]
pub trait Connector: Send + Sync {
    type Store: Send;

    async fn connect(&self) -> Result<Self::Store, ApiError>;

    /// Closes the store. Called on every path after a successful `connect`.
    async fn release(&self, store: Self::Store);
}

#[async_trait]
pub trait ContentStore: Send {
    /// All rows of `kind`, newest first.
    async fn list(&mut self, kind: ContentKind) -> Result<Vec<ContentItem>, ApiError>;

    async fn insert(&mut self, item: NewContent) -> Result<ContentItem, ApiError>;

    /// Returns the number of rows removed.
    async fn delete(&mut self, kind: ContentKind, id: i32) -> Result<u64, ApiError>;
}

#[async_trait]
pub trait RegistrationStore: Send {
    /// All registrations, newest first.
    async fn list(&mut self) -> Result<Vec<Registration>, ApiError>;

    async fn insert(&mut self, registration: NewRegistration) -> Result<Registration, ApiError>;

    async fn update(
        &mut self,
        id: i32,
        update: &RegistrationUpdate,
    ) -> Result<Option<Registration>, ApiError>;

    async fn delete(&mut self, id: i32) -> Result<Option<Registration>, ApiError>;
}
