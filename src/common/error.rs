// src/common/error.rs

use std::fmt;

use thiserror::Error;

/// As quatro coleções remotas que o adaptador conhece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Products,
    Categories,
    Suppliers,
    StockMovements,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Products => "products",
            Entity::Categories => "categories",
            Entity::Suppliers => "suppliers",
            Entity::StockMovements => "stock-movements",
        };
        write!(f, "{name}")
    }
}

/// Operação que estava em curso quando a fonte falhou.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    LowStock,
    Movements,
    Report,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::LowStock => "low_stock",
            Operation::Movements => "movements",
            Operation::Report => "report",
        };
        write!(f, "{name}")
    }
}

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
//
// "Fallback engatado" NÃO entra aqui de propósito: engatar o fallback é um
// aviso, não uma falha. Ele aparece como flag no resultado do resolver
// (ver `LowStockReport`) e como log de warn.
#[derive(Debug, Error)]
pub enum AppError {
    // Uma única coleção remota falhou (transporte ou erro do servidor).
    // Sem retry nesta camada.
    #[error("Falha na fonte de dados ({entity}/{operation}): {cause}")]
    Source {
        entity: Entity,
        operation: Operation,
        #[source]
        cause: anyhow::Error,
    },

    // Um registro viola uma invariante do modelo (ex: quantidade zero).
    #[error("Registro inválido: {0}")]
    DataIntegrity(String),

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do cliente")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn source(entity: Entity, operation: Operation, cause: impl Into<anyhow::Error>) -> Self {
        AppError::Source {
            entity,
            operation,
            cause: cause.into(),
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self, AppError::Source { .. })
    }
}
