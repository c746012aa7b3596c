use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    /// Expiry transition: status and update time only, prices and bids are
    /// untouched and `end_time` keeps its original value. Caller must hold
    /// this auction's lock.
    pub async fn mark_ended(
        &self,
        auction_id: entities::AuctionId,
        now: OffsetDateTime,
    ) -> Option<entities::Auction> {
        let mut auctions = self.in_memory_store.auctions.write().await;
        let auction = auctions.get_mut(&auction_id)?;
        auction.status = entities::AuctionStatus::Ended;
        auction.updated_at = now;
        auction.version += 1;
        Some(auction.clone())
    }
}
