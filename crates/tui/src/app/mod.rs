mod draft;
mod store;

use std::time::Duration;

use api_types::caixa::{Extrato, Status};
use chrono::Local;
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use draft::DraftField;
pub use store::{Action, Command, Focus, LedgerState, ToastLevel, ToastState};

/// Result of a request, sent back to the event loop by the task that ran it.
#[derive(Debug)]
pub enum Outcome {
    Loaded {
        seq: u64,
        result: std::result::Result<Extrato, ClientError>,
    },
    Created(std::result::Result<(), ClientError>),
    Deleted {
        id: i64,
        result: std::result::Result<(), ClientError>,
    },
}

pub struct App {
    client: Client,
    pub state: LedgerState,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::new(&config.api_url)?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            state: LedgerState::new(),
            outcome_tx,
            outcome_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);
        self.dispatch(Action::Mounted);

        while !self.should_quit {
            while let Ok(outcome) = self.outcome_rx.try_recv() {
                self.apply_outcome(outcome);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state, self.client.endpoint()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Some(command) = self.state.dispatch(action) {
            self.execute(command);
        }
    }

    fn execute(&self, command: Command) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();

        match command {
            Command::Load { seq, filter } => {
                tokio::spawn(async move {
                    let result = client.list(filter.as_deref()).await;
                    report(&tx, Outcome::Loaded { seq, result });
                });
            }
            Command::Create(entry) => {
                let payload = entry.payload().clone();
                tokio::spawn(async move {
                    let result = client.create(&payload).await;
                    report(&tx, Outcome::Created(result));
                });
            }
            Command::Delete(id) => {
                tokio::spawn(async move {
                    let result = client.delete(id).await;
                    report(&tx, Outcome::Deleted { id, result });
                });
            }
        }
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        let action = match outcome {
            Outcome::Loaded {
                seq,
                result: Ok(snapshot),
            } => {
                tracing::debug!(seq, entries = snapshot.extrato.len(), "ledger loaded");
                Action::SnapshotLoaded {
                    seq,
                    snapshot,
                    at: Local::now(),
                }
            }
            Outcome::Loaded {
                seq,
                result: Err(err),
            } => {
                tracing::error!(seq, "failed to fetch ledger: {err}");
                Action::SnapshotFailed {
                    seq,
                    message: message_for_error(&err),
                }
            }
            Outcome::Created(Ok(())) => {
                tracing::info!("entry created");
                Action::EntryCreated
            }
            Outcome::Created(Err(err)) => {
                tracing::error!("failed to create entry: {err}");
                Action::CreateFailed(message_for_error(&err))
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                tracing::info!(id, "entry deleted");
                Action::EntryDeleted(id)
            }
            Outcome::Deleted {
                id,
                result: Err(err),
            } => {
                tracing::error!(id, "failed to delete entry: {err}");
                Action::DeleteFailed {
                    id,
                    message: message_for_error(&err),
                }
            }
        };
        self.dispatch(action);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        match action {
            AppAction::None => return,
            AppAction::Quit => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if self.state.toast.is_some() {
            self.dispatch(Action::ToastDismissed);
        }

        if self.state.confirm_delete.is_some() {
            self.handle_confirm_key(action);
            return;
        }

        match self.state.focus {
            Focus::Table => self.handle_table_key(action),
            Focus::Search => self.handle_search_key(action),
            Focus::Form(field) => self.handle_form_key(field, action),
        }
    }

    fn handle_confirm_key(&mut self, action: AppAction) {
        match action {
            AppAction::Submit | AppAction::Input('s' | 'S' | 'y' | 'Y') => {
                self.dispatch(Action::DeleteConfirmed);
            }
            AppAction::Cancel | AppAction::Input('n' | 'N') => {
                self.dispatch(Action::DeleteDeclined);
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q' | 'Q') => self.should_quit = true,
            AppAction::Input('/') => self.dispatch(Action::SearchFocused),
            AppAction::NextField => {
                if self.state.form_visible {
                    self.dispatch(Action::FieldFocused(DraftField::Tipo));
                } else {
                    self.dispatch(Action::SearchFocused);
                }
            }
            AppAction::Input('a' | 'A') => self.dispatch(Action::FormToggled),
            AppAction::Input('r' | 'R') => self.dispatch(Action::Reload),
            AppAction::Input('j' | 'J') | AppAction::Down => self.dispatch(Action::SelectNext),
            AppAction::Input('k' | 'K') | AppAction::Up => self.dispatch(Action::SelectPrev),
            AppAction::Input('d' | 'D') | AppAction::Delete => {
                if let Some(id) = self.state.selected_entry().map(|caixa| caixa.id) {
                    self.dispatch(Action::DeleteRequested(id));
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => {
                let mut value = self.state.filter_input.clone();
                value.push(ch);
                self.dispatch(Action::FilterEdited(value));
            }
            AppAction::Backspace => {
                let mut value = self.state.filter_input.clone();
                value.pop();
                self.dispatch(Action::FilterEdited(value));
            }
            AppAction::Submit => self.dispatch(Action::FilterSubmitted),
            AppAction::Cancel => self.dispatch(Action::FilterCancelled),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, field: DraftField, action: AppAction) {
        match action {
            AppAction::Submit => self.dispatch(Action::FormSubmitted),
            AppAction::Cancel => self.dispatch(Action::FormToggled),
            AppAction::NextField | AppAction::Down => {
                self.dispatch(Action::FieldFocused(field.next()));
            }
            AppAction::Up => self.dispatch(Action::FieldFocused(field.prev())),
            _ if field == DraftField::Status => self.handle_status_key(action),
            AppAction::Input(ch) => self.edit_draft(field, |value| value.push(ch)),
            AppAction::Backspace => self.edit_draft(field, |value| {
                value.pop();
            }),
            _ => {}
        }
    }

    fn handle_status_key(&mut self, action: AppAction) {
        let current = self.state.draft.status;
        let status = match action {
            AppAction::Left | AppAction::Right | AppAction::Input(' ') => current.toggled(),
            AppAction::Input('1') => Status::Receita,
            AppAction::Input('0') => Status::Despesa,
            _ => return,
        };
        self.dispatch(Action::StatusChanged(status));
    }

    fn edit_draft(&mut self, field: DraftField, edit: impl FnOnce(&mut String)) {
        let Some(current) = self.state.draft.field(field) else {
            return;
        };
        let mut value = current.to_string();
        edit(&mut value);
        self.dispatch(Action::DraftChanged { field, value });
    }

    #[cfg(test)]
    async fn next_outcome(&mut self) -> Option<Outcome> {
        self.outcome_rx.recv().await
    }
}

fn report(tx: &UnboundedSender<Outcome>, outcome: Outcome) {
    if tx.send(outcome).is_err() {
        tracing::debug!("event loop is gone, dropping request outcome");
    }
}

fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::NotFound => "registro não encontrado.".to_string(),
        ClientError::Validation(message) => format!("dados inválidos: {message}"),
        ClientError::Server { status, message } => {
            format!("erro do servidor ({}): {message}", status.as_u16())
        }
        ClientError::Transport(err) => format!("servidor inacessível: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::testing::{MockBackend, caixa};

    fn app_for(backend: &MockBackend) -> App {
        let config = AppConfig {
            api_url: backend.url.clone(),
            ..AppConfig::default()
        };
        App::new(&config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    async fn settle(app: &mut App) {
        let outcome = app.next_outcome().await.unwrap();
        app.apply_outcome(outcome);
    }

    async fn mounted(backend: &MockBackend) -> App {
        let mut app = app_for(backend);
        app.dispatch(Action::Mounted);
        settle(&mut app).await;
        app
    }

    #[tokio::test]
    async fn mount_shows_server_snapshot() {
        let backend = MockBackend::spawn(vec![caixa(1, "Salário", 1000.0, Status::Receita)]).await;
        let app = mounted(&backend).await;

        let snapshot = app.state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.extrato.len(), 1);
        assert_eq!(snapshot.receitas, 1000.0);
        assert_eq!(snapshot.despesas, 0.0);
        assert_eq!(snapshot.valor_total, 1000.0);
        assert!(app.state.last_refresh.is_some());
        assert_eq!(backend.queries(), vec![None]);
    }

    #[tokio::test]
    async fn search_submits_filter_once() {
        let backend = MockBackend::spawn(vec![
            caixa(1, "Salário", 1000.0, Status::Receita),
            caixa(2, "Aluguel", 400.0, Status::Despesa),
        ])
        .await;
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "alu");
        assert_eq!(backend.queries().len(), 1);

        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(backend.queries(), vec![None, Some("alu".to_string())]);
        assert_eq!(app.state.entries().len(), 1);
        assert_eq!(app.state.entries()[0].tipo, "Aluguel");
    }

    #[tokio::test]
    async fn create_closes_form_and_refetches() {
        let backend = MockBackend::spawn(Vec::new()).await;
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Char('a'));
        assert!(app.state.form_visible);
        type_text(&mut app, "Mercado");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "42,5");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        settle(&mut app).await; // created
        settle(&mut app).await; // reloaded

        let created = backend.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].tipo, "Mercado");
        assert_eq!(created[0].valor, 42.5);
        assert_eq!(created[0].status, Status::Despesa);

        assert!(!app.state.form_visible);
        assert_eq!(app.state.draft, draft::EntryDraft::default());
        assert_eq!(app.state.entries().len(), 1);
        assert_eq!(app.state.snapshot.as_ref().unwrap().despesas, 42.5);
    }

    #[tokio::test]
    async fn rejected_create_keeps_form_open() {
        let backend = MockBackend::spawn(Vec::new()).await;
        backend.fail_create("tipo duplicado");
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Mercado");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "10");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert!(app.state.form_visible);
        assert_eq!(app.state.draft.tipo, "Mercado");
        assert_eq!(app.state.draft.valor, "10");
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.contains("tipo duplicado"));
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let backend = MockBackend::spawn(vec![caixa(1, "Salário", 1000.0, Status::Receita)]).await;
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.confirm_delete, Some(1));
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.state.confirm_delete, None);
        assert!(app.outcome_rx.try_recv().is_err());
        assert!(backend.deleted().is_empty());
        assert_eq!(backend.queries().len(), 1);
        assert_eq!(app.state.entries().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_entry_after_refetch() {
        let backend = MockBackend::spawn(vec![
            caixa(1, "Salário", 1000.0, Status::Receita),
            caixa(2, "Aluguel", 400.0, Status::Despesa),
        ])
        .await;
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('s'));
        settle(&mut app).await; // deleted
        settle(&mut app).await; // reloaded

        assert_eq!(backend.deleted(), vec![2]);
        let snapshot = app.state.snapshot.as_ref().unwrap();
        assert!(!snapshot.contains(2));
        assert_eq!(snapshot.valor_total, 1000.0);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row_visible() {
        let backend = MockBackend::spawn(vec![caixa(1, "Salário", 1000.0, Status::Receita)]).await;
        backend.fail_delete();
        let mut app = mounted(&backend).await;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert!(app.state.snapshot.as_ref().unwrap().contains(1));
        assert_eq!(
            app.state.toast.as_ref().map(|toast| toast.level),
            Some(ToastLevel::Error)
        );
    }

    #[tokio::test]
    async fn q_quits_from_table_but_types_in_search() {
        let backend = MockBackend::spawn(Vec::new()).await;
        let mut app = app_for(&backend);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.state.filter_input, "q");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.filter_input, "");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(
            message_for_error(&ClientError::Server {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".to_string(),
            }),
            "erro do servidor (500): boom"
        );
        assert_eq!(
            message_for_error(&ClientError::NotFound),
            "registro não encontrado."
        );
    }
}
