use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    /// Buy-now commit: ends the auction in the buyer's favor at the fixed
    /// price without appending a bid. `end_time` is rewritten to the actual
    /// termination instant. Caller must hold this auction's lock.
    pub async fn mark_sold(
        &self,
        auction_id: entities::AuctionId,
        buyer: entities::Bidder,
        price: entities::Amount,
        now: OffsetDateTime,
    ) -> Option<entities::Auction> {
        let mut auctions = self.in_memory_store.auctions.write().await;
        let auction = auctions.get_mut(&auction_id)?;
        auction.status = entities::AuctionStatus::Sold;
        auction.current_price = price;
        auction.highest_bidder = Some(buyer);
        auction.end_time = now;
        auction.updated_at = now;
        auction.reserve_met = auction.derive_reserve_met();
        auction.version += 1;
        Some(auction.clone())
    }
}
