// src/api/stock_movements.rs

use async_trait::async_trait;
use validator::Validate;

use crate::{
    api::client::ApiClient,
    api::source::MovementSource,
    common::error::{AppError, Entity, Operation},
    models::inventory::{
        MovementReport, StockMovement, StockMovementPayload, StockMovementUpdate,
    },
};

#[derive(Clone)]
pub struct StockMovementApi {
    client: ApiClient,
}

impl StockMovementApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<StockMovement>, AppError> {
        self.client
            .get_list(Entity::StockMovements, Operation::List, "stock-movements/")
            .await
    }

    pub async fn get(&self, id: i64) -> Result<StockMovement, AppError> {
        self.client
            .get_one(
                Entity::StockMovements,
                Operation::Get,
                &format!("stock-movements/{id}/"),
            )
            .await
    }

    pub async fn create(&self, payload: &StockMovementPayload) -> Result<StockMovement, AppError> {
        payload.validate()?;
        self.client
            .post(Entity::StockMovements, "stock-movements/", payload)
            .await
    }

    // Update só aceita os campos mutáveis (preço unitário, referência,
    // notas); produto/tipo/quantidade ficam congelados no tipo do payload.
    pub async fn update(
        &self,
        id: i64,
        payload: &StockMovementUpdate,
    ) -> Result<StockMovement, AppError> {
        payload.validate()?;
        self.client
            .put(
                Entity::StockMovements,
                &format!("stock-movements/{id}/"),
                payload,
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        // Apagar movimentação mexe no estoque corrente do produto no servidor.
        tracing::warn!(
            movimentacao = id,
            "Excluindo movimentação; o estoque do produto será reajustado pelo servidor"
        );
        self.client
            .delete(Entity::StockMovements, &format!("stock-movements/{id}/"))
            .await
    }

    /// Relatório de período: totais de entrada, saída e balanço.
    pub async fn report(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<MovementReport, AppError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date", start));
        }
        if let Some(end) = end_date {
            query.push(("end_date", end));
        }
        self.client
            .get_one_with_query(
                Entity::StockMovements,
                Operation::Report,
                "stock-movements/report/",
                &query,
            )
            .await
    }
}

#[async_trait]
impl MovementSource for StockMovementApi {
    async fn fetch_movements(&self) -> Result<Vec<StockMovement>, AppError> {
        self.list_all().await
    }
}
