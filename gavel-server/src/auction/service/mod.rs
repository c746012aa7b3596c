use {
    super::{
        entities,
        repository::{
            Database,
            Repository,
        },
    },
    crate::clock::Clock,
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

pub mod buy_now;
pub mod cancel_auction;
pub mod create_auction;
pub mod expire_auctions;
pub mod get_auction;
pub mod get_auctions;
pub mod get_by_bidder;
pub mod get_by_seller;
pub mod get_ending_soon;
pub mod get_featured;
pub mod get_watched;
pub mod place_bid;
pub mod unwatch_auction;
pub mod verification;
pub mod watch_auction;
pub mod workers;

pub struct Config {
    /// How often the expiration sweeper scans for past-due active auctions.
    pub sweep_interval:     Duration,
    /// Default window for the ending-soon listing.
    pub ending_soon_window: Duration,
}

pub struct ServiceInner {
    config:       Config,
    clock:        Arc<dyn Clock>,
    repo:         Arc<Repository>,
    task_tracker: TaskTracker,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: Box<dyn Database>,
        initial_auctions: Vec<entities::Auction>,
        config: Config,
        clock: Arc<dyn Clock>,
        task_tracker: TaskTracker,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            clock,
            repo: Arc::new(Repository::new(db, initial_auctions)),
            task_tracker,
        }))
    }
}

#[cfg(test)]
pub mod tests {
    use {
        super::*,
        crate::{
            auction::repository::MockDatabase,
            clock::tests::ManualClock,
        },
        time::{
            macros::datetime,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    pub const TEST_START: OffsetDateTime = datetime!(2024-05-23 21:00:00 UTC);

    /// A database that accepts every write. Per-call expectations belong in
    /// the tests that care about journaling.
    pub fn mock_database() -> MockDatabase {
        let mut db = MockDatabase::new();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction().returning(|_| Ok(()));
        db
    }

    pub fn test_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(TEST_START))
    }

    pub fn auction_create(seller_id: Uuid) -> entities::AuctionCreate {
        entities::AuctionCreate {
            seller:            entities::Seller {
                id:         seller_id,
                name:       "alice".to_string(),
                reputation: 10,
            },
            title:             "Vintage rangefinder camera".to_string(),
            description:       "1970s rangefinder, recently serviced.".to_string(),
            category:          entities::Category::Electronics,
            image_url:         None,
            quantity:          1,
            starting_price:    1000,
            buy_now_price:     None,
            min_bid_increment: 100,
            reserve_price:     None,
            duration:          Duration::from_secs(3600),
            featured:          false,
        }
    }

    pub fn bidder(name: &str) -> entities::Bidder {
        entities::Bidder {
            id:   Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    impl Service {
        pub fn new_with_mocks(db: MockDatabase, clock: Arc<ManualClock>) -> Self {
            Service(Arc::new(ServiceInner {
                config: Config {
                    sweep_interval:     Duration::from_secs(5),
                    ending_soon_window: Duration::from_secs(3600),
                },
                clock,
                repo: Arc::new(Repository::new(Box::new(db), Vec::new())),
                task_tracker: TaskTracker::new(),
            }))
        }
    }
}
