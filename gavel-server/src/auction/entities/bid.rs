use {
    super::auction::{
        Amount,
        AuctionId,
        Bidder,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BidId = Uuid;

/// An accepted offer against an auction. Immutable once appended; the owning
/// auction exclusively holds its bid list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id:           BidId,
    pub auction_id:   AuctionId,
    pub bidder:       Bidder,
    pub amount:       Amount,
    pub submitted_at: OffsetDateTime,
    pub auto_bid:     bool,
}
