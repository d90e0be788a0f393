// src/services/scheduler.rs

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::{
    api::source::{MovementSource, ProductSource},
    services::dashboard_service::DashboardAggregator,
};

/// Período padrão entre ciclos de agregação.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Re-executa a agregação num período fixo e sob demanda, com no máximo UM
/// ciclo em voo. Tick que dispara com ciclo rodando coalesce para o próximo
/// tick periódico (comportamento Skip do interval), nunca um extra imediato.
///
/// Cancelar (`stop`) corta disparos futuros; um ciclo já em voo roda até o
/// fim e tem o resultado descartado, nunca publicado.
pub struct PollingScheduler {
    shutdown: watch::Sender<bool>,
    refresh: Arc<Notify>,
    handle: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    pub fn start<P, M>(aggregator: DashboardAggregator<P, M>, period: Duration) -> Self
    where
        P: ProductSource + Clone + Send + Sync + 'static,
        M: MovementSource + Clone + Send + Sync + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let refresh = Arc::new(Notify::new());
        let refresh_rx = Arc::clone(&refresh);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // Ticks perdidos durante um ciclo longo viram UM próximo tick no
            // período normal, não uma rajada de recuperação.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // O primeiro tick dispara imediatamente: ciclo na ativação.
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = refresh_rx.notified() => {}
                    _ = shutdown_rx.changed() => break,
                }

                match aggregator.run_cycle().await {
                    Ok(snapshot) => {
                        // Cancelado durante o ciclo? Resultado vai fora.
                        if *shutdown_rx.borrow() {
                            tracing::debug!("Ciclo concluído após cancelamento; snapshot descartado");
                            break;
                        }
                        aggregator.publish(snapshot);
                    }
                    Err(err) => {
                        // O snapshot anterior continua publicado.
                        tracing::error!("Ciclo de agregação falhou, mantendo o último snapshot: {err}");
                    }
                }
            }
        });

        Self {
            shutdown,
            refresh,
            handle: Some(handle),
        }
    }

    /// Pede um ciclo fora do período. Se já há ciclo em voo, o pedido fica
    /// pendente e roda uma única vez depois dele.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// Para os disparos futuros. Não interrompe ciclo em voo; o resultado
    /// dele é descartado.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Espera a task do scheduler encerrar (depois de `stop`).
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::models::inventory::{Product, StockMovement};
    use crate::services::low_stock_service::LowStockResolver;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Fonte stub cujo fetch de produtos demora um tempo simulado; com o
    // relógio do tokio pausado dá para cravar a linha do tempo dos ciclos.
    #[derive(Clone)]
    struct SlowSource {
        delay: Duration,
        cycles_started: Arc<AtomicUsize>,
    }

    impl SlowSource {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                cycles_started: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ProductSource for SlowSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, AppError> {
            self.cycles_started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(Vec::new())
        }

        async fn fetch_low_stock(&self) -> Result<Vec<Product>, AppError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl MovementSource for SlowSource {
        async fn fetch_movements(&self) -> Result<Vec<StockMovement>, AppError> {
            Ok(Vec::new())
        }
    }

    fn aggregator(source: SlowSource) -> DashboardAggregator<SlowSource, SlowSource> {
        let resolver = LowStockResolver::new(source.clone());
        DashboardAggregator::new(source.clone(), source, resolver)
    }

    #[tokio::test(start_paused = true)]
    async fn dispara_imediatamente_na_ativacao() {
        let source = SlowSource::new(Duration::from_millis(1));
        let started = Arc::clone(&source.cycles_started);
        let agg = aggregator(source);

        let scheduler = PollingScheduler::start(agg.clone(), Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert!(agg.latest().is_some());
        scheduler.stop();
        scheduler.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_durante_ciclo_em_voo_coalescem_num_unico_ciclo() {
        // ciclo de 75s num período de 30s: os ticks de t=30 e t=60 caem
        // dentro do primeiro ciclo em voo
        let source = SlowSource::new(Duration::from_secs(75));
        let started = Arc::clone(&source.cycles_started);
        let agg = aggregator(source);

        let scheduler = PollingScheduler::start(agg, Duration::from_secs(30));

        // até t=85: só o ciclo da ativação começou (t=0..75)
        tokio::time::sleep(Duration::from_secs(85)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        // o próximo tick pós-coalescência é o periódico de t=90: UM ciclo a
        // mais, não dois
        tokio::time::sleep(Duration::from_secs(20)).await; // t=105
        assert_eq!(started.load(Ordering::SeqCst), 2);

        scheduler.stop();
        scheduler.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_now_roda_um_ciclo_fora_do_periodo() {
        let source = SlowSource::new(Duration::from_millis(1));
        let started = Arc::clone(&source.cycles_started);
        let agg = aggregator(source);

        let scheduler = PollingScheduler::start(agg, Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        scheduler.refresh_now();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);

        scheduler.stop();
        scheduler.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancelamento_descarta_o_ciclo_em_voo() {
        let source = SlowSource::new(Duration::from_secs(10));
        let agg = aggregator(source);

        let scheduler = PollingScheduler::start(agg.clone(), Duration::from_secs(30));
        // deixa o ciclo da ativação entrar em voo e cancela no meio
        tokio::time::sleep(Duration::from_secs(2)).await;
        scheduler.stop();
        scheduler.join().await;

        // o ciclo rodou até o fim mas nada foi publicado
        assert!(agg.latest().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn depois_do_stop_nao_ha_mais_ciclos() {
        let source = SlowSource::new(Duration::from_millis(1));
        let started = Arc::clone(&source.cycles_started);
        let agg = aggregator(source);

        let scheduler = PollingScheduler::start(agg, Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(1)).await;
        scheduler.stop();
        scheduler.join().await;

        let antes = started.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(started.load(Ordering::SeqCst), antes);
    }
}
