use {
    crate::auction::entities::{
        Amount,
        Auction,
        AuctionCreate,
        AuctionError,
        UserId,
    },
    time::OffsetDateTime,
};

/// Pure decision functions for the engine's business rules. Everything here
/// works on a snapshot and a caller-supplied "now"; no locks, no I/O. The
/// registry serializes callers per auction id, so each check runs against
/// the immediately-prior accepted state.

/// Structural rules for a new auction.
pub fn verify_new_auction(create: &AuctionCreate) -> Result<(), AuctionError> {
    if create.quantity == 0 {
        return Err(AuctionError::InvalidAuction(
            "quantity must be at least 1".to_string(),
        ));
    }
    if create.starting_price == 0 {
        return Err(AuctionError::InvalidAuction(
            "starting price must be positive".to_string(),
        ));
    }
    if create.min_bid_increment == 0 {
        return Err(AuctionError::InvalidAuction(
            "minimum bid increment must be positive".to_string(),
        ));
    }
    if create.duration.is_zero() {
        return Err(AuctionError::InvalidAuction(
            "duration must be positive".to_string(),
        ));
    }
    if create.buy_now_price == Some(0) {
        return Err(AuctionError::InvalidAuction(
            "buy-now price must be positive".to_string(),
        ));
    }
    if create.reserve_price == Some(0) {
        return Err(AuctionError::InvalidAuction(
            "reserve price must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Bid acceptance rules, evaluated in canonical order. The expiry check is
/// intentionally independent of the sweeper: a late bid must be rejected
/// even if the auction still reads as active.
pub fn verify_bid(
    auction: &Auction,
    bidder_id: UserId,
    amount: Amount,
    now: OffsetDateTime,
) -> Result<(), AuctionError> {
    if !auction.status.is_active() {
        return Err(AuctionError::InactiveAuction(auction.status));
    }
    if auction.is_expired(now) {
        return Err(AuctionError::AuctionExpired);
    }
    if bidder_id == auction.seller.id {
        return Err(AuctionError::SelfTransaction);
    }
    let minimum = auction.minimum_next_bid();
    if amount < minimum {
        return Err(AuctionError::BidTooLow { minimum });
    }
    Ok(())
}

/// Buy-now rules. Disjoint from bidding: no increment check, no reserve
/// semantics, and no expiry check of its own — an active auction can be
/// taken at the fixed price until the sweeper transitions it. Returns the
/// price the sale will settle at.
pub fn verify_buy_now(auction: &Auction, buyer_id: UserId) -> Result<Amount, AuctionError> {
    if !auction.status.is_active() {
        return Err(AuctionError::InactiveAuction(auction.status));
    }
    let price = auction
        .buy_now_price
        .ok_or(AuctionError::BuyNowUnavailable)?;
    if buyer_id == auction.seller.id {
        return Err(AuctionError::SelfTransaction);
    }
    Ok(price)
}

/// Cancellation rules: only the seller, only while active, only before any
/// bid has been accepted.
pub fn verify_cancel(auction: &Auction, caller_id: UserId) -> Result<(), AuctionError> {
    if !auction.status.is_active() {
        return Err(AuctionError::InactiveAuction(auction.status));
    }
    if caller_id != auction.seller.id {
        return Err(AuctionError::CancelDenied {
            reason: "only the seller can cancel an auction".to_string(),
        });
    }
    if auction.bid_count > 0 {
        return Err(AuctionError::CancelDenied {
            reason: format!("auction already has {} bid(s)", auction.bid_count),
        });
    }
    Ok(())
}
