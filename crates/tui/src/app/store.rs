//! Ledger view state and the reducer that owns every change to it.
//!
//! Network work never happens here: [`LedgerState::dispatch`] only mutates
//! state and returns the [`Command`] the app has to run. Results come back as
//! further actions.

use std::collections::HashSet;

use api_types::caixa::{Caixa, Extrato, Status};
use chrono::{DateTime, Local};

use super::draft::{DraftField, EntryDraft, NewEntryChecked};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Form(DraftField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Mounted,
    Reload,
    SearchFocused,
    FilterEdited(String),
    FilterSubmitted,
    FilterCancelled,
    SnapshotLoaded {
        seq: u64,
        snapshot: Extrato,
        at: DateTime<Local>,
    },
    SnapshotFailed {
        seq: u64,
        message: String,
    },
    FormToggled,
    FieldFocused(DraftField),
    DraftChanged {
        field: DraftField,
        value: String,
    },
    StatusChanged(Status),
    FormSubmitted,
    EntryCreated,
    CreateFailed(String),
    SelectNext,
    SelectPrev,
    DeleteRequested(i64),
    DeleteConfirmed,
    DeleteDeclined,
    EntryDeleted(i64),
    DeleteFailed {
        id: i64,
        message: String,
    },
    ToastDismissed,
}

/// Side effect requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { seq: u64, filter: Option<String> },
    Create(NewEntryChecked),
    Delete(i64),
}

#[derive(Debug, Default)]
pub struct LedgerState {
    /// Last accepted snapshot; `None` until the first load succeeds.
    pub snapshot: Option<Extrato>,
    /// Filter used by every load. Only changes on submit.
    pub filter: String,
    pub filter_input: String,
    pub form_visible: bool,
    pub draft: EntryDraft,
    pub focus: Focus,
    pub selected: usize,
    pub confirm_delete: Option<i64>,
    pub toast: Option<ToastState>,
    pub last_refresh: Option<DateTime<Local>>,
    pub loading: bool,
    latest_load: u64,
    creating: bool,
    deleting: HashSet<i64>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Caixa] {
        self.snapshot
            .as_ref()
            .map(|snapshot| snapshot.extrato.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_entry(&self) -> Option<&Caixa> {
        self.entries().get(self.selected)
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Mounted | Action::Reload => Some(self.issue_load()),
            Action::SearchFocused => {
                self.focus = Focus::Search;
                None
            }
            Action::FilterEdited(value) => {
                self.filter_input = value;
                None
            }
            Action::FilterSubmitted => {
                self.filter = self.filter_input.clone();
                self.focus = Focus::Table;
                Some(self.issue_load())
            }
            Action::FilterCancelled => {
                self.filter_input = self.filter.clone();
                self.focus = Focus::Table;
                None
            }
            Action::SnapshotLoaded { seq, snapshot, at } => {
                if seq < self.latest_load {
                    tracing::debug!(seq, latest = self.latest_load, "discarding stale snapshot");
                    return None;
                }
                self.loading = false;
                self.selected = self
                    .selected
                    .min(snapshot.extrato.len().saturating_sub(1));
                self.snapshot = Some(snapshot);
                self.last_refresh = Some(at);
                None
            }
            Action::SnapshotFailed { seq, message } => {
                if seq < self.latest_load {
                    return None;
                }
                self.loading = false;
                self.toast = Some(error_toast(format!("Erro ao buscar dados: {message}")));
                None
            }
            Action::FormToggled => {
                self.form_visible = !self.form_visible;
                self.focus = if self.form_visible {
                    Focus::Form(DraftField::Tipo)
                } else {
                    Focus::Table
                };
                None
            }
            Action::FieldFocused(field) => {
                if self.form_visible {
                    self.focus = Focus::Form(field);
                }
                None
            }
            Action::DraftChanged { field, value } => {
                if let Some(slot) = self.draft.field_mut(field) {
                    *slot = value;
                }
                None
            }
            Action::StatusChanged(status) => {
                self.draft.status = status;
                None
            }
            Action::FormSubmitted => {
                if !self.form_visible || self.creating {
                    return None;
                }
                match self.draft.validate() {
                    Ok(entry) => {
                        self.creating = true;
                        Some(Command::Create(entry))
                    }
                    Err(err) => {
                        self.toast = Some(error_toast(err.to_string()));
                        None
                    }
                }
            }
            Action::EntryCreated => {
                self.creating = false;
                self.form_visible = false;
                self.draft = EntryDraft::default();
                self.focus = Focus::Table;
                self.toast = Some(ToastState {
                    message: "Cadastrado.".to_string(),
                    level: ToastLevel::Success,
                });
                Some(self.issue_load())
            }
            Action::CreateFailed(message) => {
                self.creating = false;
                self.toast = Some(error_toast(format!("Erro ao cadastrar: {message}")));
                None
            }
            Action::SelectNext => {
                let len = self.entries().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
                None
            }
            Action::SelectPrev => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::DeleteRequested(id) => {
                if !self.deleting.contains(&id) {
                    self.confirm_delete = Some(id);
                }
                None
            }
            Action::DeleteConfirmed => {
                let id = self.confirm_delete.take()?;
                self.deleting.insert(id);
                Some(Command::Delete(id))
            }
            Action::DeleteDeclined => {
                self.confirm_delete = None;
                None
            }
            Action::EntryDeleted(id) => {
                self.deleting.remove(&id);
                self.toast = Some(ToastState {
                    message: "Excluído.".to_string(),
                    level: ToastLevel::Success,
                });
                Some(self.issue_load())
            }
            Action::DeleteFailed { id, message } => {
                self.deleting.remove(&id);
                self.toast = Some(error_toast(format!("Erro ao excluir: {message}")));
                None
            }
            Action::ToastDismissed => {
                self.toast = None;
                None
            }
        }
    }

    fn issue_load(&mut self) -> Command {
        self.latest_load += 1;
        self.loading = true;
        Command::Load {
            seq: self.latest_load,
            filter: (!self.filter.is_empty()).then(|| self.filter.clone()),
        }
    }
}

fn error_toast(message: String) -> ToastState {
    ToastState {
        message,
        level: ToastLevel::Error,
    }
}
