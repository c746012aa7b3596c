use {
    super::auction::{
        Amount,
        AuctionStatus,
    },
    std::fmt,
};

/// Business-rule outcomes of the auction engine. All of these are expected
/// and recoverable; they are returned as values and never panic. The
/// `Display` form is the canonical reason string surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuctionError {
    /// No auction exists with the requested id.
    NotFound,
    /// The auction has already reached a terminal status.
    InactiveAuction(AuctionStatus),
    /// The auction's end time has passed, even if the sweeper has not
    /// transitioned it yet.
    AuctionExpired,
    /// Sellers cannot bid on or buy their own auctions.
    SelfTransaction,
    /// The amount does not reach current price + minimum increment.
    BidTooLow { minimum: Amount },
    /// The auction has no buy-now price configured.
    BuyNowUnavailable,
    /// Cancellation rules were not met.
    CancelDenied { reason: String },
    /// The creation request violated a structural rule (non-positive price,
    /// increment or duration, zero quantity).
    InvalidAuction(String),
}

impl fmt::Display for AuctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionError::NotFound => {
                write!(f, "Auction with the specified id was not found")
            }
            AuctionError::InactiveAuction(status) => {
                write!(f, "Auction is no longer active (status: {})", status)
            }
            AuctionError::AuctionExpired => {
                write!(f, "Auction has passed its end time")
            }
            AuctionError::SelfTransaction => {
                write!(f, "Sellers cannot bid on or buy their own auction")
            }
            AuctionError::BidTooLow { minimum } => {
                write!(f, "Bid too low: the minimum acceptable bid is {}", minimum)
            }
            AuctionError::BuyNowUnavailable => {
                write!(f, "Auction has no buy-now price")
            }
            AuctionError::CancelDenied { reason } => {
                write!(f, "Cancellation denied: {}", reason)
            }
            AuctionError::InvalidAuction(msg) => {
                write!(f, "Invalid auction: {}", msg)
            }
        }
    }
}

impl std::error::Error for AuctionError {}
