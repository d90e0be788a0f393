// src/lib.rs

// Declaração dos nossos módulos
pub mod api;
pub mod common;
pub mod config;
pub mod models;
pub mod services;

// A superfície que a apresentação consome
pub use common::error::AppError;
pub use config::AppState;
pub use models::dashboard::{CategorySlice, DashboardSnapshot};
pub use services::dashboard_service::DashboardAggregator;
pub use services::low_stock_service::{LowStockMode, LowStockReport, LowStockResolver};
pub use services::movement_value::{line_value, period_total, round_display};
pub use services::scheduler::PollingScheduler;
