// src/config.rs

use std::{env, time::Duration};

use crate::{
    api::{ApiClient, CategoryApi, ProductApi, StockMovementApi, SupplierApi},
    services::{
        dashboard_service::DashboardAggregator, low_stock_service::LowStockResolver,
        scheduler::DEFAULT_POLL_INTERVAL,
    },
};

// O contexto explícito da aplicação: as quatro coleções do adaptador, o
// resolver de estoque baixo e o agregador do dashboard, todos compartilhando
// o mesmo cliente HTTP. Nada de estado global/estático — o modo do resolver
// e o último snapshot vivem aqui e são compartilhados por clone (Arc por
// dentro).
#[derive(Clone)]
pub struct AppState {
    pub products: ProductApi,
    pub categories: CategoryApi,
    pub suppliers: SupplierApi,
    pub stock_movements: StockMovementApi,
    pub low_stock: LowStockResolver<ProductApi>,
    pub dashboard: DashboardAggregator<ProductApi, StockMovementApi>,
    pub poll_interval: Duration,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, a aplicação
    // não deve iniciar.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_url =
            env::var("API_URL").unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        let poll_interval = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let client = ApiClient::new(&api_url)?;
        tracing::info!("✅ Cliente configurado para a API em {}", api_url);

        // --- Monta o gráfico de dependências ---
        let products = ProductApi::new(client.clone());
        let categories = CategoryApi::new(client.clone());
        let suppliers = SupplierApi::new(client.clone());
        let stock_movements = StockMovementApi::new(client);

        let low_stock = LowStockResolver::new(products.clone());
        let dashboard = DashboardAggregator::new(
            products.clone(),
            stock_movements.clone(),
            low_stock.clone(),
        );

        Ok(Self {
            products,
            categories,
            suppliers,
            stock_movements,
            low_stock,
            dashboard,
            poll_interval,
        })
    }
}
