//! In-memory snapshot of employee records shown by the table.
//!
//! A load is split into [`RecordStore::begin_load`] and [`RecordStore::finish_load`] so that the
//! fetch itself runs without holding the store. Each load gets a ticket; only the most recently
//! issued ticket may replace the snapshot, so a superseded fetch that resolves late is dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use tokio::sync::RwLock;

use crate::client::EmployeeSource;
use crate::errors::AppError;
use crate::models::employee::{find_duplicate_id, Employee, EmployeeId};

pub type SharedStore = Arc<RwLock<RecordStore>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Employee>,
    loading: bool,
    error: Option<AppError>,
    issued: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the snapshot. A repeated id replaces the earlier entry in place.
    pub fn with_records(records: Vec<Employee>) -> Self {
        let mut store = Self::default();
        for record in records {
            store.upsert(record);
        }
        store
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Marks the store as loading and returns the ticket the fetch result must be applied with.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.loading = true;
        LoadTicket(self.issued)
    }

    /// Applies a fetch result. Returns `Ok(None)` when the ticket was superseded by a later load.
    ///
    /// On failure the previous snapshot is kept and the error is exposed through [`RecordStore::error`].
    /// A collection that repeats an id counts as a failed fetch.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Employee>, AppError>,
    ) -> Result<Option<usize>, AppError> {
        if ticket.0 != self.issued {
            warn!("Discarding result of superseded load #{}", ticket.0);
            return Ok(None);
        }

        self.loading = false;
        let result = result.and_then(|records| {
            let duplicate = find_duplicate_id(&records).map(EmployeeId::to_string);
            match duplicate {
                Some(id) => Err(AppError::FetchError(format!("Duplicate employee id {}", id))),
                None => Ok(records),
            }
        });
        match result {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.error = None;
                self.loaded_at = Some(Utc::now());
                info!("Loaded {} employee records", count);
                Ok(Some(count))
            }
            Err(err) => {
                error!("Failed to load employee records: {}", err);
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Fetches the whole collection from `source` and replaces the snapshot.
    pub async fn load<S: EmployeeSource>(&mut self, source: &S) -> Result<usize, AppError> {
        let ticket = self.begin_load();
        let result = source.fetch_all().await;
        Ok(self.finish_load(ticket, result)?.unwrap_or(self.records.len()))
    }

    pub fn get_all(&self) -> &[Employee] {
        &self.records
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Replaces the record with the same id in place, or appends it.
    pub fn upsert(&mut self, record: Employee) -> UpsertOutcome {
        match self.records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                debug!("Replacing employee {}", record.id);
                *existing = record;
                UpsertOutcome::Replaced
            }
            None => {
                debug!("Appending employee {}", record.id);
                self.records.push(record);
                UpsertOutcome::Inserted
            }
        }
    }

    /// Drops the record with `id`. Returns the removed record, or `None` if it was absent.
    pub fn remove(&mut self, id: &EmployeeId) -> Option<Employee> {
        let position = self.records.iter().position(|record| &record.id == id)?;
        Some(self.records.remove(position))
    }
}

/// Loads into a shared store without holding its lock across the fetch.
///
/// Overlapping calls are allowed; whichever load started last wins.
pub async fn load_shared<S: EmployeeSource>(store: &SharedStore, source: &S) -> Result<usize, AppError> {
    let ticket = store.write().await.begin_load();
    let result = source.fetch_all().await;
    let mut guard = store.write().await;
    let applied = guard.finish_load(ticket, result)?;
    Ok(applied.unwrap_or(guard.len()))
}
