// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::inventory::StockMovement;

// Uma fatia do gráfico de categorias. Fica em Vec (e não em map) porque a
// ordem dos buckets é a ordem do primeiro encontro no listing de produtos.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub name: String,
    pub quantity: u64,
}

// O snapshot publicado para a apresentação. Derivado, nunca persistido.
// Um ciclo monta um snapshot inteiro e publica de uma vez; leitor nenhum
// enxerga campos de ciclos diferentes misturados.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub product_count: usize,
    pub low_stock_count: usize,
    // Precisão cheia aqui; arredondar só na apresentação.
    pub total_stock_value: Decimal,
    pub category_distribution: Vec<CategorySlice>,
    pub recent_movements: Vec<StockMovement>,
    // Aviso de sessão: o resolver de estoque baixo está no modo fallback.
    pub low_stock_fallback: bool,
    pub generated_at: DateTime<Utc>,
}
