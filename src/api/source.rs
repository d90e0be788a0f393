// src/api/source.rs

use async_trait::async_trait;

use crate::{
    common::error::AppError,
    models::inventory::{Product, StockMovement},
};

// Seams consumidas pelo resolver e pelo agregador. Em produção quem
// implementa são `ProductApi` e `StockMovementApi`; nos testes, stubs em
// memória — a lógica de agregação não precisa de rede para ser exercitada.

#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Listing completo de produtos.
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError>;

    /// Endpoint dedicado, pré-filtrado no servidor.
    async fn fetch_low_stock(&self) -> Result<Vec<Product>, AppError>;
}

#[async_trait]
pub trait MovementSource: Send + Sync {
    /// Listing completo de movimentações.
    async fn fetch_movements(&self) -> Result<Vec<StockMovement>, AppError>;
}
