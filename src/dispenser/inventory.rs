//! File-backed stock inventories
//!
//! Each service is one newline-delimited text file under the stock
//! directory; the first line is the next record to dispense. Taking a
//! record rewrites the file without it, so stock only ever shrinks.

use crate::dispenser::{DispenseError, DispenseResult};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Store of dispensable records, one flat file per service
#[derive(Clone)]
pub struct InventoryStore {
    /// Directory holding one `<service>.txt` per stocked service
    stock_dir: PathBuf,
    /// Per-service locks so a read-rewrite cycle is never interleaved
    /// with another pop against the same file
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl InventoryStore {
    /// Create a store over an existing stock directory.
    ///
    /// Stock files are provisioned out of band; the store never creates
    /// one.
    #[must_use]
    pub fn new(stock_dir: impl Into<PathBuf>) -> Self {
        Self {
            stock_dir: stock_dir.into(),
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Look at the next record for a service without taking it.
    ///
    /// Returns `Ok(None)` when the service is stocked but holds no
    /// records.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no stock file exists for the service.
    pub async fn peek_first(&self, service: &str) -> DispenseResult<Option<String>> {
        let path = self.stock_path(service)?;
        let content = read_stock(&path, service).await?;
        Ok(split_first(&content).map(|(first, _)| first.to_owned()))
    }

    /// Take the next record for a service and persist the remainder.
    ///
    /// Pops against the same service are serialized; the stock file is
    /// either rewritten without its first record or left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no stock file exists for the service,
    /// `Empty` when it holds no records, and `Persist` when the rewrite
    /// fails.
    pub async fn pop_first(&self, service: &str) -> DispenseResult<String> {
        let path = self.stock_path(service)?;

        let lock = self.lock_for(service);
        let _guard = lock.lock().await;

        let content = read_stock(&path, service).await?;
        let Some((first, rest)) = split_first(&content) else {
            return Err(DispenseError::Empty(service.to_owned()));
        };

        persist(&path, service, rest).await?;
        debug!(service, remaining = count_records(rest), "Record taken");
        Ok(first.to_owned())
    }

    /// Number of records left for a service.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no stock file exists for the service.
    pub async fn record_count(&self, service: &str) -> DispenseResult<usize> {
        let path = self.stock_path(service)?;
        let content = read_stock(&path, service).await?;
        Ok(count_records(&content))
    }

    /// Names of every stocked service, sorted.
    #[must_use]
    pub fn service_names(&self) -> Vec<String> {
        let pattern = self.stock_dir.join("*.txt");
        let Some(pattern) = pattern.to_str() else {
            return Vec::new();
        };

        let mut names: Vec<String> = glob::glob(pattern)
            .map(|paths| {
                paths
                    .filter_map(Result::ok)
                    .filter_map(|path| {
                        path.file_stem()
                            .and_then(|stem| stem.to_str())
                            .map(str::to_owned)
                    })
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Resolve the stock file for a service token.
    ///
    /// A service names exactly one file inside the stock directory;
    /// tokens that would escape it cannot name a resource.
    fn stock_path(&self, service: &str) -> DispenseResult<PathBuf> {
        if service.is_empty() || service == "." || service == ".." || service.contains(['/', '\\'])
        {
            warn!(service, "Service token does not name a stock file");
            return Err(DispenseError::NotFound(service.to_owned()));
        }
        Ok(self.stock_dir.join(format!("{service}.txt")))
    }

    fn lock_for(&self, service: &str) -> Arc<Mutex<()>> {
        self.locks.entry(service.to_owned()).or_default().clone()
    }
}

async fn read_stock(path: &Path, service: &str) -> DispenseResult<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(service, error = %err, "Could not read stock file");
            }
            Err(DispenseError::NotFound(service.to_owned()))
        }
    }
}

/// Rewrite a stock file through a temporary sibling, so a failed write
/// leaves the original as it was.
async fn persist(path: &Path, service: &str, rest: &str) -> DispenseResult<()> {
    let tmp = path.with_extension(format!("txt.{}.tmp", Uuid::new_v4().simple()));

    if let Err(err) = tokio::fs::write(&tmp, rest).await {
        return Err(DispenseError::Persist {
            service: service.to_owned(),
            source: err,
        });
    }

    if let Err(err) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(DispenseError::Persist {
            service: service.to_owned(),
            source: err,
        });
    }

    Ok(())
}

/// Split raw stock content into the first record and the remainder.
///
/// A record only exists up to a newline; content without one is treated
/// as holding no records at all, matching the stock files this bot
/// inherits.
fn split_first(content: &str) -> Option<(&str, &str)> {
    let newline = content.find('\n')?;
    Some((&content[..newline], &content[newline + 1..]))
}

/// Number of dispensable records in raw stock content.
fn count_records(content: &str) -> usize {
    content.matches('\n').count()
}
