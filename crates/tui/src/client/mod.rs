use api_types::{
    CAIXAS_PATH, ErrorBody,
    caixa::{CaixaNew, Extrato},
};
use reqwest::{Response, StatusCode, Url};
use thiserror::Error;

use crate::error::{AppError, Result};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the `/api/caixas` resource.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(api_url: &str) -> Result<Self> {
        let invalid = |reason: String| AppError::InvalidUrl {
            url: api_url.to_string(),
            reason,
        };
        let base = Url::parse(api_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }

        Ok(Self {
            endpoint: format!("{}/{}", base.as_str().trim_end_matches('/'), CAIXAS_PATH),
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches entries and totals. The `tipo` query parameter is sent only for
    /// a non-empty filter.
    pub async fn list(&self, filter: Option<&str>) -> std::result::Result<Extrato, ClientError> {
        let mut req = self.http.get(&self.endpoint);
        if let Some(tipo) = filter.filter(|tipo| !tipo.is_empty()) {
            req = req.query(&[("tipo", tipo)]);
        }
        tracing::debug!(filter = ?filter, "GET {}", self.endpoint);

        let res = req.send().await?;
        if res.status().is_success() {
            return Ok(res.json::<Extrato>().await?);
        }
        Err(error_from(res).await)
    }

    pub async fn create(&self, payload: &CaixaNew) -> std::result::Result<(), ClientError> {
        tracing::debug!(tipo = %payload.tipo, valor = payload.valor, "POST {}", self.endpoint);

        let res = self.http.post(&self.endpoint).json(payload).send().await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from(res).await)
    }

    pub async fn delete(&self, id: i64) -> std::result::Result<(), ClientError> {
        let url = format!("{}/{id}", self.endpoint);
        tracing::debug!("DELETE {url}");

        let res = self.http.delete(url).send().await?;
        if res.status().is_success() {
            return Ok(());
        }
        Err(error_from(res).await)
    }
}

async fn error_from(res: Response) -> ClientError {
    let status = res.status();
    let message = res
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Server { status, message },
    }
}

#[cfg(test)]
mod tests {
    use api_types::caixa::Status;

    use super::*;
    use crate::testing::{MockBackend, caixa};

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(AppError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Client::new("ftp://ledger.local"),
            Err(AppError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = Client::new("http://127.0.0.1:5000/").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/api/caixas");
        let client = Client::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:5000/api/caixas");
    }

    #[tokio::test]
    async fn list_omits_tipo_for_empty_filter() {
        let backend = MockBackend::spawn(vec![caixa(1, "Salário", 1000.0, Status::Receita)]).await;
        let client = Client::new(&backend.url).unwrap();

        client.list(None).await.unwrap();
        client.list(Some("")).await.unwrap();
        client.list(Some("Sal ário & co")).await.unwrap();

        assert_eq!(
            backend.queries(),
            vec![None, None, Some("Sal ário & co".to_string())]
        );
    }

    #[tokio::test]
    async fn list_returns_server_totals() {
        let backend = MockBackend::spawn(vec![
            caixa(1, "Salário", 1000.0, Status::Receita),
            caixa(2, "Aluguel", 400.0, Status::Despesa),
        ])
        .await;
        let client = Client::new(&backend.url).unwrap();

        let extrato = client.list(None).await.unwrap();
        assert_eq!(extrato.extrato.len(), 2);
        assert_eq!(extrato.receitas, 1000.0);
        assert_eq!(extrato.despesas, 400.0);
        assert_eq!(extrato.valor_total, 600.0);
    }

    #[tokio::test]
    async fn create_then_delete_round_trip() {
        let backend = MockBackend::spawn(Vec::new()).await;
        let client = Client::new(&backend.url).unwrap();

        client
            .create(&CaixaNew {
                tipo: "Mercado".to_string(),
                valor: 42.5,
                status: Status::Despesa,
            })
            .await
            .unwrap();
        let extrato = client.list(None).await.unwrap();
        let id = extrato.extrato[0].id;

        client.delete(id).await.unwrap();
        assert!(!client.list(None).await.unwrap().contains(id));
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let backend = MockBackend::spawn(Vec::new()).await;
        let client = Client::new(&backend.url).unwrap();

        assert!(matches!(client.delete(99).await, Err(ClientError::NotFound)));

        backend.fail_create("tipo is required");
        let err = client
            .create(&CaixaNew {
                tipo: "x".to_string(),
                valor: 1.0,
                status: Status::Receita,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ref msg) if msg == "tipo is required"));
    }

    #[tokio::test]
    async fn transport_error_when_backend_is_down() {
        let client = Client::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.list(None).await,
            Err(ClientError::Transport(_))
        ));
    }
}
