use chrono::Duration;
use log::*;
use neonbite_engine::{OrderFlowApi, SqliteDatabase};
use tokio::task::JoinHandle;

use crate::mailer::SmtpMailer;

/// Starts the fulfilment sweeper. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// The sweeper re-runs the soft checkout steps (cart cleanup, confirmation email) for fulfilments that have sat
/// below `Notified` for longer than `stalled_after`.
pub fn start_fulfilment_sweeper(
    db: SqliteDatabase,
    mailer: SmtpMailer,
    sweep_interval: Duration,
    stalled_after: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = sweep_interval.to_std().unwrap_or(std::time::Duration::from_secs(60));
        let mut timer = tokio::time::interval(period);
        let api = OrderFlowApi::new(db, mailer);
        info!(
            "🧹️ Fulfilment sweeper started. Fulfilments stalled for more than {}s are retried every {}s.",
            stalled_after.num_seconds(),
            period.as_secs()
        );
        loop {
            timer.tick().await;
            trace!("🧹️ Running fulfilment sweep");
            match api.retry_stalled(stalled_after).await {
                Ok(result) if result.examined == 0 => trace!("🧹️ Nothing to sweep"),
                Ok(result) => info!("🧹️ Sweep complete. {result}"),
                Err(e) => error!("🧹️ Error running fulfilment sweep: {e}"),
            }
        }
    })
}
