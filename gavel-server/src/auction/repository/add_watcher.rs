use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    /// Idempotent membership add. Returns the updated snapshot and whether
    /// the set actually changed; a re-add leaves the record untouched.
    /// Caller must hold this auction's lock.
    pub async fn add_watcher(
        &self,
        auction_id: entities::AuctionId,
        user_id: entities::UserId,
        now: OffsetDateTime,
    ) -> Option<(entities::Auction, bool)> {
        let mut auctions = self.in_memory_store.auctions.write().await;
        let auction = auctions.get_mut(&auction_id)?;
        let changed = auction.watchers.insert(user_id);
        if changed {
            auction.watcher_count = auction.watchers.len() as u64;
            auction.updated_at = now;
            auction.version += 1;
        }
        Some((auction.clone(), changed))
    }
}
