//! In-process stand-in for the ledger backend, used by the client and app tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use api_types::{
    ErrorBody,
    caixa::{Caixa, CaixaNew, Extrato, Status},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};

pub fn caixa(id: i64, tipo: &str, valor: f64, status: Status) -> Caixa {
    Caixa {
        id,
        tipo: tipo.to_string(),
        valor,
        status,
    }
}

#[derive(Debug, Default)]
struct Ledger {
    entries: Vec<Caixa>,
    next_id: i64,
    queries: Vec<Option<String>>,
    created: Vec<CaixaNew>,
    deleted: Vec<i64>,
    create_error: Option<String>,
    delete_error: bool,
}

type Shared = Arc<Mutex<Ledger>>;

pub struct MockBackend {
    pub url: String,
    ledger: Shared,
}

impl MockBackend {
    pub async fn spawn(entries: Vec<Caixa>) -> Self {
        let next_id = entries.iter().map(|caixa| caixa.id).max().unwrap_or(0) + 1;
        let ledger = Arc::new(Mutex::new(Ledger {
            entries,
            next_id,
            ..Ledger::default()
        }));

        let router = Router::new()
            .route("/api/caixas", get(list).post(create))
            .route("/api/caixas/{id}", delete(remove))
            .with_state(ledger.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            ledger,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap()
    }

    /// `tipo` query parameter of every GET received, in order.
    pub fn queries(&self) -> Vec<Option<String>> {
        self.lock().queries.clone()
    }

    pub fn created(&self) -> Vec<CaixaNew> {
        self.lock().created.clone()
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.lock().deleted.clone()
    }

    pub fn fail_create(&self, message: &str) {
        self.lock().create_error = Some(message.to_string());
    }

    pub fn fail_delete(&self) {
        self.lock().delete_error = true;
    }
}

async fn list(
    State(ledger): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Extrato> {
    let mut ledger = ledger.lock().unwrap();
    let tipo = params.get("tipo").cloned();
    ledger.queries.push(tipo.clone());

    let needle = tipo.unwrap_or_default().to_lowercase();
    let extrato: Vec<Caixa> = ledger
        .entries
        .iter()
        .filter(|caixa| caixa.tipo.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    let sum = |status: Status| {
        extrato
            .iter()
            .filter(|caixa| caixa.status == status)
            .map(|caixa| caixa.valor)
            .sum::<f64>()
    };
    let receitas = sum(Status::Receita);
    let despesas = sum(Status::Despesa);

    Json(Extrato {
        extrato,
        receitas,
        despesas,
        valor_total: receitas - despesas,
    })
}

async fn create(State(ledger): State<Shared>, Json(body): Json<CaixaNew>) -> Response {
    let mut ledger = ledger.lock().unwrap();
    if let Some(error) = ledger.create_error.clone() {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorBody { error })).into_response();
    }

    let id = ledger.next_id;
    ledger.next_id += 1;
    let caixa = caixa(id, &body.tipo, body.valor, body.status);
    ledger.entries.push(caixa.clone());
    ledger.created.push(body);
    (StatusCode::CREATED, Json(caixa)).into_response()
}

async fn remove(State(ledger): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut ledger = ledger.lock().unwrap();
    if ledger.delete_error {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let before = ledger.entries.len();
    ledger.entries.retain(|caixa| caixa.id != id);
    if ledger.entries.len() == before {
        return StatusCode::NOT_FOUND;
    }
    ledger.deleted.push(id);
    StatusCode::NO_CONTENT
}
