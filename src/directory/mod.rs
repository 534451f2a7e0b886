//! Employee directory page: the store, the table and the editor wired together.
//!
//! Table row actions and editor submissions flow back into the [`RecordStore`] here. The editor
//! itself never touches the store.

use log::{info, warn};

use crate::client::EmployeeSource;
use crate::config::Config;
use crate::editor::{EditorError, EditorMode, EditorOptions, RecordEditor};
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeId, Field};
use crate::store::{RecordStore, UpsertOutcome};
use crate::table::{RowAction, TableView};

pub struct Directory<S> {
    source: S,
    store: RecordStore,
    editor: RecordEditor,
    table: TableView,
    next_id: fn() -> EmployeeId,
}

impl<S: EmployeeSource> Directory<S> {
    pub fn new(source: S, options: EditorOptions) -> Self {
        Directory {
            source,
            store: RecordStore::new(),
            editor: RecordEditor::new(options),
            table: TableView::default(),
            next_id: EmployeeId::generate,
        }
    }

    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(
            source,
            EditorOptions {
                strict_image_url: config.strict_image_url,
            },
        )
    }

    /// Overrides how ids are assigned to newly created records.
    pub fn with_id_generator(mut self, next_id: fn() -> EmployeeId) -> Self {
        self.next_id = next_id;
        self
    }

    pub async fn refresh(&mut self) -> Result<usize, AppError> {
        let loaded = self.store.load(&self.source).await?;
        if let Some(EditorMode::Edit(id)) = self.editor.mode() {
            if self.store.get(id).is_none() {
                warn!("Employee {} disappeared on refresh; closing editor", id);
                self.editor.cancel();
            }
        }
        Ok(loaded)
    }

    pub fn records(&self) -> &[Employee] {
        self.store.get_all()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn editor(&self) -> &RecordEditor {
        &self.editor
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        &mut self.table
    }

    /// Toolbar action: start a new record.
    pub fn open_create(&mut self) {
        self.editor.open_empty();
    }

    pub fn dispatch(&mut self, action: RowAction) -> Result<(), AppError> {
        match action {
            RowAction::EditRequested(id) => {
                let record = self
                    .store
                    .get(&id)
                    .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;
                self.editor.open_with(record);
                Ok(())
            }
            RowAction::DeleteRequested(id) => {
                if self.store.remove(&id).is_some() {
                    info!("Deleted employee {}", id);
                } else {
                    info!("Delete requested for unknown employee {}", id);
                }
                if self.editor.mode() == Some(&EditorMode::Edit(id)) {
                    self.editor.cancel();
                }
                Ok(())
            }
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), EditorError> {
        self.editor.set_field(field, value)
    }

    /// Submits the editor and stores the completed record.
    pub fn submit(&mut self) -> Result<Employee, EditorError> {
        let draft = self.editor.submit()?;
        let record = draft.into_employee(self.next_id);
        match self.store.upsert(record.clone()) {
            UpsertOutcome::Inserted => info!("Created employee {}", record.id),
            UpsertOutcome::Replaced => info!("Updated employee {}", record.id),
        }
        Ok(record)
    }

    pub fn cancel(&mut self) {
        self.editor.cancel();
    }

    pub fn render(&self) -> String {
        let error = self.store.error().map(|err| err.to_string());
        self.table
            .render(self.store.get_all(), self.store.is_loading(), error.as_deref())
    }
}
