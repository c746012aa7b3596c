use {
    super::entities,
    std::{
        collections::HashMap,
        sync::atomic::AtomicU64,
    },
    tokio::sync::{
        Mutex,
        RwLock,
    },
};

mod add_auction;
mod add_watcher;
mod get_auction;
mod get_auctions;
mod get_or_create_auction_lock;
mod mark_cancelled;
mod mark_ended;
mod mark_sold;
mod models;
mod record_bid;
mod remove_auction_lock;
mod remove_watcher;
mod save_auction;

pub use models::*;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub auctions:     RwLock<HashMap<entities::AuctionId, entities::Auction>>,
    pub auction_lock: Mutex<HashMap<entities::AuctionId, entities::AuctionLock>>,
    pub next_seq:     AtomicU64,
}

impl InMemoryStore {
    fn new(initial: Vec<entities::Auction>) -> Self {
        let next_seq = initial.iter().map(|a| a.seq + 1).max().unwrap_or(0);
        Self {
            auctions:     RwLock::new(initial.into_iter().map(|a| (a.id, a)).collect()),
            auction_lock: Mutex::new(HashMap::new()),
            next_seq:     AtomicU64::new(next_seq),
        }
    }
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
}

impl Repository {
    /// `initial` is the journal replay; terminal auctions are kept so the
    /// query layer can keep serving history.
    pub fn new(db: Box<dyn Database>, initial: Vec<entities::Auction>) -> Self {
        Self {
            in_memory_store: InMemoryStore::new(initial),
            db,
        }
    }
}
