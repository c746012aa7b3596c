use {
    super::Service,
    crate::auction::entities,
};

impl Service {
    /// Re-checks under the lock so a concurrent buy-now or an earlier sweep
    /// pass turns this into a no-op.
    async fn expire_auction_for_lock(
        &self,
        auction_id: entities::AuctionId,
        lock: entities::AuctionLock,
    ) -> Option<entities::Auction> {
        let _lock = lock.lock().await;
        let auction = self.repo.get_auction(auction_id).await?;
        let now = self.clock.now();
        if !auction.status.is_active() || !auction.is_expired(now) {
            return None;
        }
        self.repo.mark_ended(auction_id, now).await
    }

    #[tracing::instrument(skip_all, fields(auction_id = %auction_id))]
    pub async fn expire_auction(&self, auction_id: entities::AuctionId) {
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.expire_auction_for_lock(auction_id, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        if let Some(auction) = result {
            tracing::info!(end_time = %auction.end_time, "Auction reached its end time");
            self.repo.save_auction(&auction).await;
        }
    }

    /// One sweeper pass. Scans a snapshot for active auctions past their end
    /// time and hands each one to a tracked task; the per-auction work takes
    /// the same lock as user traffic, so the scan itself stays lock-free.
    pub async fn expire_auctions(&self) {
        let now = self.clock.now();
        for auction in self.repo.get_auctions().await {
            if auction.status.is_active() && auction.is_expired(now) {
                self.task_tracker.spawn({
                    let service = self.clone();
                    async move {
                        service.expire_auction(auction.id).await;
                    }
                });
            }
        }
    }
}
