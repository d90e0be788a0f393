// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- 1. Categorias ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

// --- 2. Fornecedores ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// --- 3. Produtos ---

// A referência de categoria chega de duas formas dependendo do serializer do
// lado do servidor: ou o id puro, ou o objeto aninhado com o nome. O enum
// untagged aceita as duas sem o caller precisar saber qual veio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Detail(CategorySummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub price: Decimal,
    pub cost: Decimal,
    pub stock_quantity: u32,
    // Pode vir ausente/nulo de fontes antigas; a regra é tratar como 0.
    #[serde(default)]
    pub reorder_level: Option<u32>,
    #[serde(default)]
    pub supplier: Option<i64>,
    #[serde(default)]
    pub supplier_name: Option<String>,
    // O servidor também manda o campo derivado; guardamos o que veio, mas a
    // verdade local é sempre `is_low_stock()`.
    #[serde(default, rename = "is_low_stock")]
    pub server_low_stock: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Rótulo do bucket para produtos sem categoria resolvível.
pub const SEM_CATEGORIA: &str = "Sem categoria";

impl Product {
    /// Limiar efetivo de reposição. Ausente vale 0.
    pub fn reorder_threshold(&self) -> u32 {
        self.reorder_level.unwrap_or(0)
    }

    /// Invariante central: estoque baixo <=> quantidade <= limiar.
    /// Tem de bater com o endpoint dedicado dado o mesmo snapshot do produto.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.reorder_threshold()
    }

    /// Nome de categoria para agregação: objeto aninhado primeiro, depois o
    /// campo read-only `category_name`, senão o bucket "Sem categoria".
    pub fn category_label(&self) -> &str {
        if let Some(CategoryRef::Detail(detail)) = &self.category {
            return &detail.name;
        }
        self.category_name.as_deref().unwrap_or(SEM_CATEGORIA)
    }
}

// --- 4. Movimentações de Estoque ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,  // Entrada de estoque
    Out, // Saída de estoque
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: i64,
    pub product: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: u32,
    pub movement_type: MovementType,
    pub unit_price: Decimal,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- 5. Payloads de escrita ---
// Validados no adaptador antes de irem para a rede.

// `range` do validator não cobre Decimal; checagem manual.
fn nao_negativo(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        let mut err = validator::ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SupplierPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub sku: String,
    pub description: Option<String>,
    pub category: Option<i64>,
    #[validate(custom(function = "nao_negativo"))]
    pub price: Decimal,
    #[validate(custom(function = "nao_negativo"))]
    pub cost: Decimal,
    pub stock_quantity: u32,
    pub reorder_level: u32,
    pub supplier: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StockMovementPayload {
    pub product: i64,
    #[validate(range(min = 1))]
    pub quantity: u32,
    pub movement_type: MovementType,
    #[validate(custom(function = "nao_negativo"))]
    pub unit_price: Decimal,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

// Uma movimentação criada é imutável em produto/tipo/quantidade: mudar esses
// campos exigiria re-derivar o estoque retroativamente, o que o cliente não
// faz. O payload de update só admite o que PODE mudar.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StockMovementUpdate {
    #[validate(custom(function = "nao_negativo"))]
    pub unit_price: Decimal,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

// --- 6. Relatório de período ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementReport {
    pub entrada_total: Decimal,
    pub saida_total: Decimal,
    pub balanco: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn reorder_level_ausente_vale_zero() {
        let produto: Product = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "Parafuso", "sku": "PAR-01",
            "price": 1.5, "cost": 0.9, "stock_quantity": 0
        }))
        .unwrap();

        assert_eq!(produto.reorder_threshold(), 0);
        // quantidade 0 <= limiar 0: ainda é estoque baixo
        assert!(produto.is_low_stock());
    }

    #[test]
    fn is_low_stock_compara_com_o_limiar() {
        let mut produto: Product = serde_json::from_value(serde_json::json!({
            "id": 2, "name": "Porca", "sku": "POR-01",
            "price": 0.5, "cost": 0.2,
            "stock_quantity": 10, "reorder_level": 10
        }))
        .unwrap();

        assert!(produto.is_low_stock()); // igual ao limiar conta
        produto.stock_quantity = 11;
        assert!(!produto.is_low_stock());
    }

    #[test]
    fn categoria_aninhada_tem_prioridade_sobre_category_name() {
        let produto: Product = serde_json::from_value(serde_json::json!({
            "id": 3, "name": "Arruela", "sku": "ARR-01",
            "price": 0.1, "cost": 0.05, "stock_quantity": 4,
            "category": {"name": "Fixação"},
            "category_name": "Outra"
        }))
        .unwrap();

        assert_eq!(produto.category_label(), "Fixação");
    }

    #[test]
    fn categoria_por_id_cai_no_category_name() {
        let produto: Product = serde_json::from_value(serde_json::json!({
            "id": 4, "name": "Prego", "sku": "PRE-01",
            "price": 0.2, "cost": 0.1, "stock_quantity": 7,
            "category": 12,
            "category_name": "Fixação"
        }))
        .unwrap();

        assert!(matches!(produto.category, Some(CategoryRef::Id(12))));
        assert_eq!(produto.category_label(), "Fixação");
    }

    #[test]
    fn sem_categoria_usa_o_bucket_padrao() {
        let produto: Product = serde_json::from_value(serde_json::json!({
            "id": 5, "name": "Avulso", "sku": "AVU-01",
            "price": 1.0, "cost": 0.5, "stock_quantity": 5
        }))
        .unwrap();

        assert_eq!(produto.category_label(), SEM_CATEGORIA);
    }

    #[test]
    fn movement_type_serializa_minusculo() {
        assert_eq!(serde_json::to_string(&MovementType::In).unwrap(), "\"in\"");
        assert_eq!(
            serde_json::from_str::<MovementType>("\"out\"").unwrap(),
            MovementType::Out
        );
    }

    #[test]
    fn payload_de_movimentacao_exige_quantidade_positiva() {
        use validator::Validate;

        let payload = StockMovementPayload {
            product: 1,
            quantity: 0,
            movement_type: MovementType::In,
            unit_price: dec("2.50"),
            reference: None,
            notes: None,
        };
        assert!(payload.validate().is_err());
    }
}
