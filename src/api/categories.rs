// src/api/categories.rs

use validator::Validate;

use crate::{
    api::client::ApiClient,
    common::error::{AppError, Entity, Operation},
    models::inventory::{Category, CategoryPayload},
};

// Excluir uma categoria referenciada por produtos é problema do servidor
// (FK com SET_NULL); o cliente só repassa a operação.
#[derive(Clone)]
pub struct CategoryApi {
    client: ApiClient,
}

impl CategoryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        self.client
            .get_list(Entity::Categories, Operation::List, "categories/")
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Category, AppError> {
        self.client
            .get_one(
                Entity::Categories,
                Operation::Get,
                &format!("categories/{id}/"),
            )
            .await
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;
        self.client
            .post(Entity::Categories, "categories/", payload)
            .await
    }

    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;
        self.client
            .put(Entity::Categories, &format!("categories/{id}/"), payload)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.client
            .delete(Entity::Categories, &format!("categories/{id}/"))
            .await
    }
}
