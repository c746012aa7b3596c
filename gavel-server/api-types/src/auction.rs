use {
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;
pub type BidId = Uuid;
pub type UserId = Uuid;

/// Monetary amounts are indivisible currency units (e.g. cents).
pub type Amount = u64;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
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

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Ended,
    Sold,
    Cancelled,
    Expired,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Soonest end time first. This is the default order.
    #[default]
    EndingSoon,
    /// Most recently created first.
    NewlyListed,
    PriceAsc,
    PriceDesc,
    /// Highest bid count first.
    MostBids,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct Seller {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:         UserId,
    #[schema(example = "alice")]
    pub name:       String,
    /// Marketplace reputation score supplied by the identity provider.
    #[schema(example = 87)]
    pub reputation: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct Bidder {
    #[schema(example = "b1dde4ee-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:   UserId,
    #[schema(example = "bob")]
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct Bid {
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:           BidId,
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id:   AuctionId,
    pub bidder:       Bidder,
    #[schema(example = 1100)]
    pub amount:       Amount,
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// Whether the bid was placed by an automated agent rather than a person.
    #[serde(default)]
    pub auto_bid:     bool,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug, PartialEq)]
pub struct Auction {
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                AuctionId,
    pub seller:            Seller,
    #[schema(example = "Vintage rangefinder camera")]
    pub title:             String,
    #[schema(example = "1970s rangefinder, recently serviced, comes with the original case.")]
    pub description:       String,
    pub category:          Category,
    #[schema(example = "https://images.example.com/camera.jpg")]
    pub image_url:         Option<String>,
    #[schema(example = 1, minimum = 1)]
    pub quantity:          u32,
    #[schema(example = 1000)]
    pub starting_price:    Amount,
    #[schema(example = 1100)]
    pub current_price:     Amount,
    #[schema(example = 5000)]
    pub buy_now_price:     Option<Amount>,
    #[schema(example = 100)]
    pub min_bid_increment: Amount,
    #[schema(example = 2000)]
    pub reserve_price:     Option<Amount>,
    /// True when no reserve price is set or the current price has reached it.
    pub reserve_met:       bool,
    /// Full bid history, in the order the bids were accepted.
    pub bids:              Vec<Bid>,
    #[schema(example = 2)]
    pub bid_count:         u64,
    pub highest_bidder:    Option<Bidder>,
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub start_time:        OffsetDateTime,
    #[schema(example = "2024-05-23T22:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub end_time:          OffsetDateTime,
    pub status:            AuctionStatus,
    pub featured:          bool,
    #[schema(example = 7)]
    pub watcher_count:     u64,
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at:        OffsetDateTime,
    #[schema(example = "2024-05-23T21:30:00.000000Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at:        OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug, PartialEq)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

impl<T: Into<Auction>> From<Vec<T>> for Auctions {
    fn from(auctions: Vec<T>) -> Self {
        Auctions {
            items: auctions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct CreateAuction {
    pub seller:            Seller,
    #[schema(example = "Vintage rangefinder camera")]
    pub title:             String,
    #[schema(example = "1970s rangefinder, recently serviced, comes with the original case.")]
    pub description:       String,
    pub category:          Category,
    #[schema(example = "https://images.example.com/camera.jpg")]
    pub image_url:         Option<String>,
    /// Number of identical items on offer. Must be at least 1.
    #[schema(example = 1, minimum = 1)]
    pub quantity:          u32,
    #[schema(example = 1000)]
    pub starting_price:    Amount,
    /// Price at which any non-seller may immediately end the auction in their favor.
    #[schema(example = 5000)]
    pub buy_now_price:     Option<Amount>,
    #[schema(example = 100)]
    pub min_bid_increment: Amount,
    /// Seller-set minimum acceptable price. Never ends the auction by itself.
    #[schema(example = 2000)]
    pub reserve_price:     Option<Amount>,
    /// Auction lifetime starting now, in seconds.
    #[schema(example = 3600, minimum = 1)]
    pub duration_secs:     u64,
    #[serde(default)]
    pub featured:          bool,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct PlaceBid {
    pub bidder:   Bidder,
    #[schema(example = 1100)]
    pub amount:   Amount,
    #[serde(default)]
    pub auto_bid: bool,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug, PartialEq)]
pub struct BidResult {
    #[schema(example = "OK")]
    pub status:    String,
    /// The unique id created to identify the bid.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:        BidId,
    /// Auction price after this bid was applied.
    #[schema(example = 1100)]
    pub new_price: Amount,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct BuyNow {
    pub buyer: Bidder,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct CancelAuction {
    /// Must match the auction's seller id.
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub seller_id: UserId,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug, PartialEq)]
pub struct WatchResult {
    /// Whether the user is watching the auction after this call.
    pub watching:      bool,
    /// False when the call was a no-op (the membership already matched).
    pub changed:       bool,
    #[schema(example = 7)]
    pub watcher_count: u64,
}

#[derive(Clone, Serialize, Deserialize, IntoParams)]
pub struct GetAuctionsQueryParams {
    /// Restrict results to one item category.
    #[param(example = "electronics", value_type = Option<String>)]
    pub category:  Option<Category>,
    /// Inclusive lower bound on the current price.
    #[param(example = 1000)]
    pub min_price: Option<Amount>,
    /// Inclusive upper bound on the current price.
    #[param(example = 5000)]
    pub max_price: Option<Amount>,
    /// Case-insensitive substring match over title and description.
    #[param(example = "camera")]
    pub search:    Option<String>,
    #[param(default = "ending-soon", value_type = Option<String>)]
    #[serde(default)]
    pub sort:      SortOrder,
}

#[derive(Clone, Serialize, Deserialize, IntoParams)]
pub struct GetEndingSoonQueryParams {
    /// Window size in seconds. Defaults to the server-configured window.
    #[param(example = 3600)]
    pub within_secs: Option<u64>,
}
