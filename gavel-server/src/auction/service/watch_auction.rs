use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

#[derive(Clone)]
pub struct WatchAuctionInput {
    pub auction_id: entities::AuctionId,
    pub user_id:    entities::UserId,
}

#[derive(Debug)]
pub struct WatchOutcome {
    pub watching:      bool,
    pub changed:       bool,
    pub watcher_count: u64,
}

impl Service {
    async fn watch_auction_for_lock(
        &self,
        input: WatchAuctionInput,
        lock: entities::AuctionLock,
    ) -> Result<(entities::Auction, bool), RestError> {
        let _lock = lock.lock().await;
        let now = self.clock.now();
        self.repo
            .add_watcher(input.auction_id, input.user_id, now)
            .await
            .ok_or(entities::AuctionError::NotFound.into())
    }

    /// Subscribe a user to an auction's updates. Watching is idempotent and
    /// independent of the auction's status, so a sale can still be followed
    /// to its conclusion.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn watch_auction(
        &self,
        input: WatchAuctionInput,
    ) -> Result<WatchOutcome, RestError> {
        let auction_id = input.auction_id;
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.watch_auction_for_lock(input, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        let (auction, changed) = result?;
        if changed {
            self.repo.save_auction(&auction).await;
        }
        Ok(WatchOutcome {
            watching: true,
            changed,
            watcher_count: auction.watcher_count,
        })
    }
}
