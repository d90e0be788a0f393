pub mod client;
pub use client::ApiClient;
pub mod source;
pub use source::{MovementSource, ProductSource};
pub mod products;
pub use products::ProductApi;
pub mod categories;
pub use categories::CategoryApi;
pub mod suppliers;
pub use suppliers::SupplierApi;
pub mod stock_movements;
pub use stock_movements::StockMovementApi;
