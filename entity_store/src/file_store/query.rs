//! Predicate-based read operations.
//!
//! Every query composes the caller's predicate with the implicit
//! "not soft-deleted" filter through plain closure composition, then runs a
//! linear scan over the collection loaded from the file.

use std::collections::HashMap;
use std::hash::Hash;

use super::core::FileStore;
use crate::entity::Entity;
use crate::errors::StoreError;
use crate::query::{Page, SortOrder};

impl<T: Entity> FileStore<T> {
    /// All active records matching `predicate`.
    pub async fn find<P>(&self, predicate: P) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .filter(|r| !r.is_deleted() && predicate(r))
            .collect())
    }

    /// One 1-based page of the records matching the optional filter, plus
    /// the total match count across all pages.
    ///
    /// Page numbers below 1 are clamped to 1.
    pub async fn find_paged<P>(
        &self,
        page_number: usize,
        page_size: usize,
        filter: Option<P>,
    ) -> Result<Page<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;

        let matched: Vec<T> = records
            .into_iter()
            .filter(|r| !r.is_deleted() && filter.as_ref().is_none_or(|f| f(r)))
            .collect();
        let total_count = matched.len();

        let page_number = page_number.max(1);
        let items = matched
            .into_iter()
            .skip((page_number - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(Page {
            items,
            total_count,
            page_number,
            page_size,
        })
    }

    /// Matching records sorted by the extracted key.
    pub async fn find_sorted<P, F, K>(
        &self,
        predicate: P,
        key: F,
        order: SortOrder,
    ) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
        F: Fn(&T) -> K,
        K: Ord,
    {
        let mut matched = self.find(predicate).await?;
        matched.sort_by(|a, b| {
            let ord = key(a).cmp(&key(b));
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(matched)
    }

    /// The first `n` matching records, in stored order.
    pub async fn find_take<P>(&self, predicate: P, n: usize) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let mut matched = self.find(predicate).await?;
        matched.truncate(n);
        Ok(matched)
    }

    /// Matching records after skipping the first `n`.
    pub async fn find_skip<P>(&self, predicate: P, n: usize) -> Result<Vec<T>, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.find(predicate).await?.into_iter().skip(n).collect())
    }

    /// Matching records grouped by the extracted key.
    pub async fn find_grouped<P, F, K>(
        &self,
        predicate: P,
        key: F,
    ) -> Result<HashMap<K, Vec<T>>, StoreError>
    where
        P: Fn(&T) -> bool,
        F: Fn(&T) -> K,
        K: Eq + Hash,
    {
        let matched = self.find(predicate).await?;
        let mut groups: HashMap<K, Vec<T>> = HashMap::new();
        for record in matched {
            groups.entry(key(&record)).or_default().push(record);
        }
        Ok(groups)
    }
}
