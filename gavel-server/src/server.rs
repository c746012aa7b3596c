use {
    crate::{
        api,
        auction::{
            repository::{
                Database,
                JournalDatabase,
                NoOpDatabase,
            },
            service::{
                self,
                Service,
            },
        },
        clock::SystemClock,
        config::{
            Config,
            RunOptions,
        },
        metrics_api,
    },
    anyhow::anyhow,
    axum_prometheus::PrometheusMetricLayerBuilder,
    futures::future::join_all,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        tokio::signal::ctrl_c().await.unwrap();
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let db: Box<dyn Database> = match &config.persistence.journal {
        Some(path) => Box::new(JournalDatabase::new(path).await?),
        None => {
            tracing::warn!("No journal configured; auction state will not survive a restart");
            Box::new(NoOpDatabase)
        }
    };
    let initial_auctions = db
        .load_auctions()
        .await
        .map_err(|err| anyhow!("Failed to replay the auction journal: {:?}", err))?;
    if !initial_auctions.is_empty() {
        tracing::info!(
            count = initial_auctions.len(),
            "Restored auctions from the journal"
        );
    }

    let task_tracker = TaskTracker::new();
    let service = Service::new(
        db,
        initial_auctions,
        service::Config {
            sweep_interval:     config.auction.sweep_interval,
            ending_soon_window: config.auction.ending_soon_window,
        },
        Arc::new(SystemClock),
        task_tracker.clone(),
    );

    let (metric_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("gavel")
        .with_default_metrics()
        .build_pair();

    let expiration_loop = tokio::spawn({
        let service = service.clone();
        async move { service.run_expiration_loop().await }
    });
    let metrics_loop = tokio::spawn(metrics_api::start_metrics(
        run_options.clone(),
        metric_handle,
    ));
    let server_loop = tokio::spawn(api::start_api(run_options, service, metric_layer));
    join_all(vec![expiration_loop, metrics_loop, server_loop]).await;

    // Let in-flight expiration tasks finish before the process exits.
    task_tracker.close();
    task_tracker.wait().await;
    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
