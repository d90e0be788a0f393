pub mod dashboard_service;
pub use dashboard_service::DashboardAggregator;
pub mod low_stock_service;
pub use low_stock_service::{LowStockMode, LowStockReport, LowStockResolver};
pub mod movement_value;
pub mod scheduler;
pub use scheduler::PollingScheduler;
