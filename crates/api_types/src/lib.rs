use serde::{Deserialize, Serialize};

/// Path of the ledger resource, relative to the backend base URL.
pub const CAIXAS_PATH: &str = "api/caixas";

pub mod caixa {
    use super::*;

    /// Classification of a ledger entry.
    ///
    /// On the wire this is the integer `1` (income) or `0` (expense); any other
    /// value is rejected when decoding.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(try_from = "u8", into = "u8")]
    pub enum Status {
        #[default]
        Receita,
        Despesa,
    }

    impl Status {
        pub fn label(self) -> &'static str {
            match self {
                Self::Receita => "Receita",
                Self::Despesa => "Despesa",
            }
        }

        pub fn code(self) -> u8 {
            match self {
                Self::Receita => 1,
                Self::Despesa => 0,
            }
        }

        pub fn toggled(self) -> Self {
            match self {
                Self::Receita => Self::Despesa,
                Self::Despesa => Self::Receita,
            }
        }
    }

    impl From<Status> for u8 {
        fn from(status: Status) -> Self {
            status.code()
        }
    }

    impl TryFrom<u8> for Status {
        type Error = String;

        fn try_from(value: u8) -> Result<Self, Self::Error> {
            match value {
                1 => Ok(Self::Receita),
                0 => Ok(Self::Despesa),
                other => Err(format!("invalid status {other}, expected 0 or 1")),
            }
        }
    }

    /// One ledger line as returned by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Caixa {
        pub id: i64,
        pub tipo: String,
        pub valor: f64,
        pub status: Status,
    }

    /// Request body for `POST /api/caixas`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CaixaNew {
        pub tipo: String,
        pub valor: f64,
        pub status: Status,
    }

    /// Response body for `GET /api/caixas`.
    ///
    /// The three totals are computed by the server and must be displayed as
    /// received, never recomputed from `extrato`.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct Extrato {
        #[serde(default)]
        pub extrato: Vec<Caixa>,
        pub receitas: f64,
        pub despesas: f64,
        pub valor_total: f64,
    }

    impl Extrato {
        pub fn contains(&self, id: i64) -> bool {
            self.extrato.iter().any(|caixa| caixa.id == id)
        }
    }
}

/// Error body some backends send with non-success responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::caixa::*;

    #[test]
    fn status_decodes_from_integer() {
        let caixa: Caixa =
            serde_json::from_str(r#"{"id":1,"tipo":"Salário","valor":1000,"status":1}"#).unwrap();
        assert_eq!(caixa.status, Status::Receita);
        assert_eq!(caixa.valor, 1000.0);

        let caixa: Caixa =
            serde_json::from_str(r#"{"id":2,"tipo":"Aluguel","valor":850.5,"status":0}"#).unwrap();
        assert_eq!(caixa.status, Status::Despesa);
    }

    #[test]
    fn status_rejects_out_of_domain_values() {
        let res = serde_json::from_str::<Caixa>(r#"{"id":1,"tipo":"x","valor":1,"status":2}"#);
        assert!(res.is_err());
    }

    #[test]
    fn new_entry_serializes_status_as_integer() {
        let body = CaixaNew {
            tipo: "Mercado".to_string(),
            valor: 12.5,
            status: Status::Despesa,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"tipo": "Mercado", "valor": 12.5, "status": 0})
        );
    }

    #[test]
    fn extrato_tolerates_missing_list() {
        let extrato: Extrato =
            serde_json::from_str(r#"{"receitas":0,"despesas":0,"valor_total":0}"#).unwrap();
        assert!(extrato.extrato.is_empty());
        assert!(!extrato.contains(1));
    }

    #[test]
    fn default_status_is_income() {
        assert_eq!(Status::default(), Status::Receita);
        assert_eq!(Status::Receita.toggled(), Status::Despesa);
    }
}
