// src/services/dashboard_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::{
    api::source::{MovementSource, ProductSource},
    common::error::AppError,
    models::{
        dashboard::{CategorySlice, DashboardSnapshot},
        inventory::{Product, StockMovement},
    },
    services::low_stock_service::{LowStockMode, LowStockResolver},
};

/// Quantas movimentações entram no feed "últimas movimentações".
pub const RECENT_MOVEMENTS_LIMIT: usize = 5;

/// Valor total do estoque: Σ preço × quantidade. Precisão cheia; ver
/// `movement_value::round_display` para a borda de apresentação.
pub fn stock_value(products: &[Product]) -> Decimal {
    products
        .iter()
        .map(|p| p.price * Decimal::from(p.stock_quantity))
        .sum()
}

/// Distribuição de quantidade por categoria, na ordem do primeiro encontro.
/// Produto sem categoria resolvível cai no bucket "Sem categoria".
pub fn category_distribution(products: &[Product]) -> Vec<CategorySlice> {
    let mut buckets: Vec<CategorySlice> = Vec::new();
    for product in products {
        let label = product.category_label();
        match buckets.iter_mut().find(|bucket| bucket.name == label) {
            Some(bucket) => bucket.quantity += u64::from(product.stock_quantity),
            None => buckets.push(CategorySlice {
                name: label.to_string(),
                quantity: u64::from(product.stock_quantity),
            }),
        }
    }
    buckets
}

/// Feed de movimentações recentes: ordena explicitamente por `created_at`
/// descendente antes de truncar, em vez de confiar na ordem da fonte.
pub fn recent_movements(mut movements: Vec<StockMovement>) -> Vec<StockMovement> {
    movements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    movements.truncate(RECENT_MOVEMENTS_LIMIT);
    movements
}

/// Agrega produtos e movimentações no snapshot do dashboard.
///
/// O fetch de produtos é obrigatório: se falhar, o ciclo inteiro falha e o
/// snapshot anterior continua publicado. Os dois fetches opcionais (estoque
/// baixo e movimentações) são isolados: cada falha vira o default vazio da
/// métrica, com log, sem abortar o ciclo.
#[derive(Clone)]
pub struct DashboardAggregator<P, M> {
    products: P,
    movements: M,
    resolver: LowStockResolver<P>,
    snapshot_tx: watch::Sender<Option<DashboardSnapshot>>,
}

impl<P, M> DashboardAggregator<P, M>
where
    P: ProductSource + Clone,
    M: MovementSource,
{
    pub fn new(products: P, movements: M, resolver: LowStockResolver<P>) -> Self {
        let (snapshot_tx, _) = watch::channel(None);
        Self {
            products,
            movements,
            resolver,
            snapshot_tx,
        }
    }

    /// Roda um ciclo e devolve o snapshot calculado, SEM publicar. Quem
    /// decide publicar (ou descartar, no caso de cancelamento) é o chamador
    /// — na prática, o `PollingScheduler`.
    pub async fn run_cycle(&self) -> Result<DashboardSnapshot, AppError> {
        // 1. Produtos primeiro (obrigatório). Tudo que depende deles só roda
        //    depois deste await completar.
        let products = self.products.fetch_products().await?;

        // 2. Fetches opcionais em paralelo, cada um isolado.
        let (low_stock, movements) =
            tokio::join!(self.resolver.resolve(), self.movements.fetch_movements());

        let (low_stock_count, low_stock_fallback) = match low_stock {
            Ok(report) => (report.products.len(), report.fallback),
            Err(err) => {
                tracing::warn!("Contagem de estoque baixo indisponível neste ciclo: {err}");
                (0, self.resolver.mode() == LowStockMode::Fallback)
            }
        };

        let recent = match movements {
            Ok(list) => recent_movements(list),
            Err(err) => {
                tracing::warn!("Movimentações recentes indisponíveis neste ciclo: {err}");
                Vec::new()
            }
        };

        // 3. Merge puro: um snapshot novo, montado inteiro antes de
        //    qualquer publicação.
        Ok(DashboardSnapshot {
            product_count: products.len(),
            low_stock_count,
            total_stock_value: stock_value(&products),
            category_distribution: category_distribution(&products),
            recent_movements: recent,
            low_stock_fallback,
            generated_at: Utc::now(),
        })
    }

    /// Publicação atômica: o snapshot antigo fica visível até o novo estar
    /// pronto; leitor nenhum vê estado meio atualizado.
    pub fn publish(&self, snapshot: DashboardSnapshot) {
        self.snapshot_tx.send_replace(Some(snapshot));
    }

    /// Roda um ciclo e publica o resultado. Conveniência para chamadas
    /// avulsas fora do scheduler.
    pub async fn refresh(&self) -> Result<DashboardSnapshot, AppError> {
        let snapshot = self.run_cycle().await?;
        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    /// Último snapshot publicado, sem bloquear. `None` antes do primeiro
    /// ciclo bem-sucedido.
    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Canal de push para a apresentação: cada publicação acorda os
    /// assinantes com o snapshot novo.
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    pub fn resolver(&self) -> &LowStockResolver<P> {
        &self.resolver
    }
}
