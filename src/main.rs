// src/main.rs

use estoque_client::services::movement_value::round_display;
use estoque_client::{AppState, PollingScheduler};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve
    // iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o cliente de estoque.");

    // Liga o polling: um ciclo imediato e depois um a cada período.
    let scheduler = PollingScheduler::start(app_state.dashboard.clone(), app_state.poll_interval);
    let mut snapshots = app_state.dashboard.subscribe();

    tracing::info!(
        "🚀 Cliente de estoque no ar (ciclo a cada {:?}); Ctrl-C para sair",
        app_state.poll_interval
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(snapshot) = snapshots.borrow_and_update().clone() else {
                    continue;
                };
                tracing::info!(
                    "📊 Dashboard: {} produtos | {} com estoque baixo{} | valor total R$ {}",
                    snapshot.product_count,
                    snapshot.low_stock_count,
                    if snapshot.low_stock_fallback { " (recontagem local)" } else { "" },
                    round_display(snapshot.total_stock_value),
                );
            }
        }
    }

    tracing::info!("Encerrando; ciclo em voo (se houver) será descartado");
    scheduler.stop();
    scheduler.join().await;
}
