use {
    super::bid::Bid,
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        collections::HashSet,
        sync::Arc,
        time::Duration,
    },
    time::OffsetDateTime,
    tokio::sync::Mutex,
    uuid::Uuid,
};

pub type AuctionId = Uuid;
pub type UserId = Uuid;

/// Indivisible currency units (e.g. cents).
pub type Amount = u64;

/// Per-auction mutual exclusion handle. Mutating operations on the same
/// auction id serialize on this lock; operations on different ids never
/// contend.
pub type AuctionLock = Arc<Mutex<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Electronics,
    Fashion,
    Home,
    Sports,
    Collectibles,
    Vehicles,
    Books,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    /// Reached its end time without being sold.
    Ended,
    /// Taken at the buy-now price.
    Sold,
    /// Withdrawn by the seller before any bids arrived.
    Cancelled,
    /// Terminal like `Ended`. Accepted from replayed journals written by
    /// storage layers that distinguish the two; the engine itself writes
    /// `Ended`.
    Expired,
}

impl AuctionStatus {
    pub fn is_active(self) -> bool {
        matches!(self, AuctionStatus::Active)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

/// Orderings offered by the active-auction listing. Ties are broken by
/// insertion sequence, so repeated queries return identical orderings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    EndingSoon,
    NewlyListed,
    PriceAscending,
    PriceDescending,
    MostBids,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id:         UserId,
    pub name:       String,
    pub reputation: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidder {
    pub id:   UserId,
    pub name: String,
}

/// The validated-at-the-door description of a new auction.
#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub seller:            Seller,
    pub title:             String,
    pub description:       String,
    pub category:          Category,
    pub image_url:         Option<String>,
    pub quantity:          u32,
    pub starting_price:    Amount,
    pub buy_now_price:     Option<Amount>,
    pub min_bid_increment: Amount,
    pub reserve_price:     Option<Amount>,
    pub duration:          Duration,
    pub featured:          bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    pub id:                AuctionId,
    /// Registry insertion sequence. Listings use it as the stable tie-break
    /// so results are deterministic across repeated calls.
    pub seq:               u64,
    /// Bumped on every committed mutation. Journal replay keeps the record
    /// with the highest version per id.
    pub version:           u64,
    pub seller:            Seller,
    pub title:             String,
    pub description:       String,
    pub category:          Category,
    pub image_url:         Option<String>,
    pub quantity:          u32,
    pub starting_price:    Amount,
    pub current_price:     Amount,
    pub buy_now_price:     Option<Amount>,
    pub min_bid_increment: Amount,
    pub reserve_price:     Option<Amount>,
    pub reserve_met:       bool,
    pub bids:              Vec<Bid>,
    pub bid_count:         u64,
    pub highest_bidder:    Option<Bidder>,
    pub start_time:        OffsetDateTime,
    pub end_time:          OffsetDateTime,
    pub status:            AuctionStatus,
    pub featured:          bool,
    pub watchers:          HashSet<UserId>,
    pub watcher_count:     u64,
    pub created_at:        OffsetDateTime,
    pub updated_at:        OffsetDateTime,
}

impl Auction {
    /// Smallest amount the next bid must reach.
    pub fn minimum_next_bid(&self) -> Amount {
        self.current_price.saturating_add(self.min_bid_increment)
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.end_time
    }

    /// True when no reserve price is set or the current price has reached it.
    /// The current price never decreases, so this can never flip back to false.
    pub fn derive_reserve_met(&self) -> bool {
        self.reserve_price
            .map_or(true, |reserve| self.current_price >= reserve)
    }
}

impl AuctionCreate {
    pub fn into_auction(self, id: AuctionId, now: OffsetDateTime) -> Auction {
        let mut auction = Auction {
            id,
            seq: 0,
            version: 0,
            seller: self.seller,
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            quantity: self.quantity,
            starting_price: self.starting_price,
            current_price: self.starting_price,
            buy_now_price: self.buy_now_price,
            min_bid_increment: self.min_bid_increment,
            reserve_price: self.reserve_price,
            reserve_met: false,
            bids: Vec::new(),
            bid_count: 0,
            highest_bidder: None,
            start_time: now,
            end_time: now + self.duration,
            status: AuctionStatus::Active,
            featured: self.featured,
            watchers: HashSet::new(),
            watcher_count: 0,
            created_at: now,
            updated_at: now,
        };
        auction.reserve_met = auction.derive_reserve_met();
        auction
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::macros::datetime,
    };

    fn base_create() -> AuctionCreate {
        AuctionCreate {
            seller:            Seller {
                id:         Uuid::new_v4(),
                name:       "alice".to_string(),
                reputation: 10,
            },
            title:             "Vintage rangefinder camera".to_string(),
            description:       "Recently serviced.".to_string(),
            category:          Category::Electronics,
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

    #[test]
    fn test_into_auction_derives_timing_and_price() {
        let now = datetime!(2024-05-23 21:00:00 UTC);
        let auction = base_create().into_auction(Uuid::new_v4(), now);
        assert_eq!(auction.status, AuctionStatus::Active);
        assert_eq!(auction.current_price, 1000);
        assert_eq!(auction.start_time, now);
        assert_eq!(auction.end_time, now + Duration::from_secs(3600));
        assert_eq!(auction.bid_count, 0);
        assert!(auction.bids.is_empty());
    }

    #[test]
    fn test_reserve_met_without_reserve() {
        let now = datetime!(2024-05-23 21:00:00 UTC);
        let auction = base_create().into_auction(Uuid::new_v4(), now);
        assert!(auction.reserve_met);
    }

    #[test]
    fn test_reserve_met_with_unmet_reserve() {
        let now = datetime!(2024-05-23 21:00:00 UTC);
        let mut create = base_create();
        create.reserve_price = Some(2000);
        let auction = create.into_auction(Uuid::new_v4(), now);
        assert!(!auction.reserve_met);
    }

    #[test]
    fn test_minimum_next_bid() {
        let now = datetime!(2024-05-23 21:00:00 UTC);
        let auction = base_create().into_auction(Uuid::new_v4(), now);
        assert_eq!(auction.minimum_next_bid(), 1100);
    }
}
