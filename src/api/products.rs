// src/api/products.rs

use async_trait::async_trait;
use validator::Validate;

use crate::{
    api::client::ApiClient,
    api::source::ProductSource,
    common::error::{AppError, Entity, Operation},
    models::inventory::{Product, ProductPayload, StockMovement},
};

#[derive(Clone)]
pub struct ProductApi {
    client: ApiClient,
}

impl ProductApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        self.client
            .get_list(Entity::Products, Operation::List, "products/")
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Product, AppError> {
        self.client
            .get_one(Entity::Products, Operation::Get, &format!("products/{id}/"))
            .await
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        payload.validate()?;
        self.client
            .post(Entity::Products, "products/", payload)
            .await
    }

    pub async fn update(&self, id: i64, payload: &ProductPayload) -> Result<Product, AppError> {
        payload.validate()?;
        self.client
            .put(Entity::Products, &format!("products/{id}/"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.client
            .delete(Entity::Products, &format!("products/{id}/"))
            .await
    }

    /// Endpoint dedicado de estoque baixo (pré-filtrado no servidor).
    pub async fn low_stock(&self) -> Result<Vec<Product>, AppError> {
        self.client
            .get_list(Entity::Products, Operation::LowStock, "products/low_stock/")
            .await
    }

    /// Histórico de movimentações de um produto.
    pub async fn movements(&self, id: i64) -> Result<Vec<StockMovement>, AppError> {
        self.client
            .get_list(
                Entity::Products,
                Operation::Movements,
                &format!("products/{id}/movements/"),
            )
            .await
    }
}

#[async_trait]
impl ProductSource for ProductApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
        self.list_all().await
    }

    async fn fetch_low_stock(&self) -> Result<Vec<Product>, AppError> {
        self.low_stock().await
    }
}
