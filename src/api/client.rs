// src/api/client.rs

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::common::error::{AppError, Entity, Operation};

// Dependendo da paginação do servidor, um listing chega como array puro ou
// como envelope `{"results": [...]}`. Normalizamos aqui; caller nunca vê o
// envelope.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Envelope { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Envelope { results } => results,
        }
    }
}

/// Cliente HTTP compartilhado pelas quatro coleções. Sem retry: qualquer
/// falha de transporte ou status de erro vira um único `AppError::Source`.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
        entity: Entity,
        operation: Operation,
    ) -> Result<reqwest::Response, AppError> {
        request
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|cause| AppError::source(entity, operation, cause))
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        entity: Entity,
        operation: Operation,
        path: &str,
    ) -> Result<Vec<T>, AppError> {
        let resp = self
            .send_checked(self.http.get(self.url(path)), entity, operation)
            .await?;
        let listing: Listing<T> = resp
            .json()
            .await
            .map_err(|cause| AppError::source(entity, operation, cause))?;
        Ok(listing.into_vec())
    }

    pub async fn get_one<T: DeserializeOwned>(
        &self,
        entity: Entity,
        operation: Operation,
        path: &str,
    ) -> Result<T, AppError> {
        let resp = self
            .send_checked(self.http.get(self.url(path)), entity, operation)
            .await?;
        resp.json()
            .await
            .map_err(|cause| AppError::source(entity, operation, cause))
    }

    pub async fn get_one_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        entity: Entity,
        operation: Operation,
        path: &str,
        query: &Q,
    ) -> Result<T, AppError> {
        let resp = self
            .send_checked(self.http.get(self.url(path)).query(query), entity, operation)
            .await?;
        resp.json()
            .await
            .map_err(|cause| AppError::source(entity, operation, cause))
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        entity: Entity,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let resp = self
            .send_checked(
                self.http.post(self.url(path)).json(body),
                entity,
                Operation::Create,
            )
            .await?;
        resp.json()
            .await
            .map_err(|cause| AppError::source(entity, Operation::Create, cause))
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        entity: Entity,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let resp = self
            .send_checked(
                self.http.put(self.url(path)).json(body),
                entity,
                Operation::Update,
            )
            .await?;
        resp.json()
            .await
            .map_err(|cause| AppError::source(entity, Operation::Update, cause))
    }

    pub async fn delete(&self, entity: Entity, path: &str) -> Result<(), AppError> {
        self.send_checked(
            self.http.delete(self.url(path)),
            entity,
            Operation::Delete,
        )
        .await?;
        Ok(())
    }
}
