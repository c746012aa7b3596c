#[cfg(test)]
use mockall::automock;
use {
    crate::auction::entities,
    axum::async_trait,
    std::{
        collections::HashMap,
        fmt::Debug,
        path::{
            Path,
            PathBuf,
        },
    },
    tokio::{
        fs::{
            File,
            OpenOptions,
        },
        io::AsyncWriteExt,
        sync::Mutex,
    },
    tracing::instrument,
};

/// Durable storage behind the in-memory registry. The engine only defines
/// the interface: load everything once at startup, save one full record per
/// committed mutation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn load_auctions(&self) -> anyhow::Result<Vec<entities::Auction>>;
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
    async fn update_auction(&self, auction: &entities::Auction) -> anyhow::Result<()>;
}

/// Append-only JSON-lines journal. Every save appends the full auction
/// record; replay keeps the highest-version record per id. Appends are
/// serialized on an internal mutex, never on a per-auction lock.
#[derive(Debug)]
pub struct JournalDatabase {
    path: PathBuf,
    file: Mutex<File>,
}

impl JournalDatabase {
    pub async fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    async fn append(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(auction)?;
        line.push(b'\n');
        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl Database for JournalDatabase {
    #[instrument(
        target = "metrics",
        name = "db_load_auctions",
        fields(category = "db_queries", result = "success", name = "load_auctions"),
        skip_all
    )]
    async fn load_auctions(&self) -> anyhow::Result<Vec<entities::Auction>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };

        let mut latest: HashMap<entities::AuctionId, entities::Auction> = HashMap::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<entities::Auction>(line) {
                Ok(auction) => {
                    match latest.get(&auction.id) {
                        Some(existing) if existing.version >= auction.version => {}
                        _ => {
                            latest.insert(auction.id, auction);
                        }
                    };
                }
                Err(err) => {
                    // A torn tail line from an unclean shutdown is expected;
                    // anything else in the middle of the file is worth a look.
                    tracing::warn!(error = ?err, "Skipping unreadable journal line");
                }
            }
        }
        Ok(latest.into_values().collect())
    }

    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(category = "db_queries", result = "success", name = "add_auction"),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        self.append(auction)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction",
        fields(category = "db_queries", result = "success", name = "update_auction"),
        skip_all
    )]
    async fn update_auction(&self, auction: &entities::Auction) -> anyhow::Result<()> {
        self.append(auction)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })
    }
}

/// Used when journaling is disabled in the config; the registry then lives
/// purely in memory.
#[derive(Debug, Default)]
pub struct NoOpDatabase;

#[async_trait]
impl Database for NoOpDatabase {
    async fn load_auctions(&self) -> anyhow::Result<Vec<entities::Auction>> {
        Ok(Vec::new())
    }

    async fn add_auction(&self, _auction: &entities::Auction) -> anyhow::Result<()> {
        Ok(())
    }

    async fn update_auction(&self, _auction: &entities::Auction) -> anyhow::Result<()> {
        Ok(())
    }
}
