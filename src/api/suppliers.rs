// src/api/suppliers.rs

use validator::Validate;

use crate::{
    api::client::ApiClient,
    common::error::{AppError, Entity, Operation},
    models::inventory::{Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct SupplierApi {
    client: ApiClient,
}

impl SupplierApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<Supplier>, AppError> {
        self.client
            .get_list(Entity::Suppliers, Operation::List, "suppliers/")
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Supplier, AppError> {
        self.client
            .get_one(
                Entity::Suppliers,
                Operation::Get,
                &format!("suppliers/{id}/"),
            )
            .await
    }

    pub async fn create(&self, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        payload.validate()?;
        self.client
            .post(Entity::Suppliers, "suppliers/", payload)
            .await
    }

    pub async fn update(&self, id: i64, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        payload.validate()?;
        self.client
            .put(Entity::Suppliers, &format!("suppliers/{id}/"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.client
            .delete(Entity::Suppliers, &format!("suppliers/{id}/"))
            .await
    }
}
