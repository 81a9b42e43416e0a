use api_types::caixa::{CaixaNew, Status};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Tipo,
    Valor,
    Status,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            Self::Tipo => Self::Valor,
            Self::Valor => Self::Status,
            Self::Status => Self::Tipo,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Tipo => Self::Status,
            Self::Valor => Self::Tipo,
            Self::Status => Self::Valor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Informe o tipo.")]
    EmptyTipo,
    #[error("Valor inválido: {0}")]
    InvalidValor(String),
    #[error("O valor não pode ser negativo.")]
    NegativeValor,
}

/// Unvalidated contents of the create form.
///
/// `valor` is kept as typed text so the user can correct it after a failed
/// submission; it only becomes a number in [`EntryDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub tipo: String,
    pub valor: String,
    pub status: Status,
}

impl EntryDraft {
    /// Text of an editable field; the status field is a toggle and has none.
    pub fn field(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::Tipo => Some(&self.tipo),
            DraftField::Valor => Some(&self.valor),
            DraftField::Status => None,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::Tipo => Some(&mut self.tipo),
            DraftField::Valor => Some(&mut self.valor),
            DraftField::Status => None,
        }
    }

    pub fn validate(&self) -> Result<NewEntryChecked, DraftError> {
        let tipo = self.tipo.trim();
        if tipo.is_empty() {
            return Err(DraftError::EmptyTipo);
        }

        let raw = self.valor.trim();
        // Accept the decimal comma users type in pt-BR.
        let valor = raw
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|valor| valor.is_finite())
            .ok_or_else(|| DraftError::InvalidValor(raw.to_string()))?;
        if valor < 0.0 {
            return Err(DraftError::NegativeValor);
        }

        Ok(NewEntryChecked(CaixaNew {
            tipo: tipo.to_string(),
            valor,
            status: self.status,
        }))
    }
}

/// A creation payload that went through [`EntryDraft::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntryChecked(CaixaNew);

impl NewEntryChecked {
    pub fn payload(&self) -> &CaixaNew {
        &self.0
    }
}
