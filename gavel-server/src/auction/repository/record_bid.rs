use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Applies one accepted bid as a single atomic commit: price, highest
    /// bidder, bid list, count, reserve flag and update time all move
    /// together, so no partial state is ever observable. The caller must
    /// hold this auction's lock; journaling happens after that lock is
    /// released.
    pub async fn record_bid(
        &self,
        auction_id: entities::AuctionId,
        bid: entities::Bid,
    ) -> Option<entities::Auction> {
        let mut auctions = self.in_memory_store.auctions.write().await;
        let auction = auctions.get_mut(&auction_id)?;
        auction.current_price = bid.amount;
        auction.highest_bidder = Some(bid.bidder.clone());
        auction.updated_at = bid.submitted_at;
        auction.bids.push(bid);
        auction.bid_count = auction.bids.len() as u64;
        auction.reserve_met = auction.derive_reserve_met();
        auction.version += 1;
        Some(auction.clone())
    }
}
