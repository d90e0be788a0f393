// src/services/low_stock_service.rs

use std::sync::{Arc, Mutex};

use crate::{api::source::ProductSource, common::error::AppError, models::inventory::Product};

/// Os dois modos do resolver. Começa confiando no endpoint dedicado; a
/// primeira falha derruba para `Fallback` pelo resto da sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowStockMode {
    /// Confia no endpoint `products/low_stock/` (pré-filtrado no servidor).
    Primary,
    /// Recalcula localmente a partir do listing completo de produtos.
    Fallback,
}

/// Resultado de uma resolução. `fallback` é o aviso visível ao usuário de
/// que o modo degradado foi usado nesta sessão.
#[derive(Debug, Clone)]
pub struct LowStockReport {
    pub products: Vec<Product>,
    pub fallback: bool,
}

#[derive(Clone)]
pub struct LowStockResolver<S> {
    source: S,
    // Só leituras/escritas curtas, nunca segurado através de um await.
    mode: Arc<Mutex<LowStockMode>>,
}

impl<S: ProductSource> LowStockResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            mode: Arc::new(Mutex::new(LowStockMode::Primary)),
        }
    }

    pub fn mode(&self) -> LowStockMode {
        *self.mode.lock().expect("mutex de modo envenenado")
    }

    fn set_mode(&self, mode: LowStockMode) {
        *self.mode.lock().expect("mutex de modo envenenado") = mode;
    }

    /// Resolve o conjunto de produtos com estoque baixo.
    ///
    /// Em `Primary`, tenta o endpoint dedicado; se ele falhar, a transição
    /// para `Fallback` é permanente e o caminho de fallback roda NA MESMA
    /// chamada — nenhum ciclo é perdido. Em `Fallback`, o endpoint dedicado
    /// não é tentado de novo (só via `retry_primary`).
    pub async fn resolve(&self) -> Result<LowStockReport, AppError> {
        if self.mode() == LowStockMode::Primary {
            match self.source.fetch_low_stock().await {
                Ok(products) => {
                    return Ok(LowStockReport {
                        products,
                        fallback: false,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        "Endpoint de estoque baixo indisponível, mudando para \
                         recomputação local pelo resto da sessão: {err}"
                    );
                    self.set_mode(LowStockMode::Fallback);
                }
            }
        }
        self.resolve_fallback().await
    }

    /// Caminho de fallback: busca o listing completo e aplica a mesma regra
    /// que o servidor aplicaria (`stock_quantity <= reorder_level`, limiar
    /// ausente vale 0).
    async fn resolve_fallback(&self) -> Result<LowStockReport, AppError> {
        let products = self.source.fetch_products().await?;
        let low: Vec<Product> = products.into_iter().filter(Product::is_low_stock).collect();
        Ok(LowStockReport {
            products: low,
            fallback: true,
        })
    }

    /// Re-tentativa manual do endpoint dedicado (a transição automática é
    /// unidirecional). Sucesso volta o resolver para `Primary`; falha mantém
    /// `Fallback` e devolve o erro para quem pediu a re-tentativa.
    pub async fn retry_primary(&self) -> Result<LowStockReport, AppError> {
        match self.source.fetch_low_stock().await {
            Ok(products) => {
                self.set_mode(LowStockMode::Primary);
                tracing::info!("✅ Endpoint de estoque baixo respondeu; voltando ao modo primário");
                Ok(LowStockReport {
                    products,
                    fallback: false,
                })
            }
            Err(err) => Err(err),
        }
    }
}
