//! The record store capability behind listing queries.
//!
//! A store either drives [`listing::list`](crate::listing::list) itself over
//! its candidate set ([`MemoryStore`]) or pushes filtering, ordering and
//! windowing down into its query language. Both must return identical pages
//! for identical inputs.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::listing::{self, ListQuery, ListRecord, Page};

/// Source of listing pages for records of type `T`.
#[async_trait]
pub trait RecordStore<T>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return the page of records selected by `query`.
    async fn list(&self, query: &ListQuery) -> Result<Page<T>, Self::Error>;
}

/// In-memory store that keeps records in insertion order and evaluates
/// queries with the reference engine.
#[derive(Debug)]
pub struct MemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Append a record to the end of the candidate set.
    pub async fn insert(&self, record: T) {
        self.records.write().await.push(record);
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: ListRecord + Clone + Send + Sync,
{
    type Error = Infallible;

    async fn list(&self, query: &ListQuery) -> Result<Page<T>, Self::Error> {
        let records = self.records.read().await;
        Ok(listing::list(query, records.as_slice()))
    }
}
