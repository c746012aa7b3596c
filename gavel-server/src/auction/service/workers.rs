use {
    super::Service,
    crate::server::{
        EXIT_CHECK_INTERVAL,
        SHOULD_EXIT,
    },
    anyhow::Result,
    std::sync::atomic::Ordering,
    tokio_stream::{
        wrappers::IntervalStream,
        StreamExt,
    },
};

impl Service {
    /// Background sweep driver. Ticks at the configured interval and runs one
    /// expiration pass per tick until shutdown is requested; the passes
    /// themselves fan out through the task tracker, so a slow pass never
    /// delays the exit check.
    pub async fn run_expiration_loop(&self) -> Result<()> {
        tracing::info!(
            interval = ?self.config.sweep_interval,
            "Starting expiration sweeper..."
        );
        let mut exit_check_interval = tokio::time::interval(EXIT_CHECK_INTERVAL);
        let mut sweep_ticks =
            IntervalStream::new(tokio::time::interval(self.config.sweep_interval));
        while !SHOULD_EXIT.load(Ordering::Acquire) {
            tokio::select! {
                _ = sweep_ticks.next() => {
                    self.expire_auctions().await;
                }
                _ = exit_check_interval.tick() => {}
            }
        }
        tracing::info!("Shutting down expiration sweeper...");
        Ok(())
    }
}
