use {
    super::{
        watch_auction::WatchOutcome,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

#[derive(Clone)]
pub struct UnwatchAuctionInput {
    pub auction_id: entities::AuctionId,
    pub user_id:    entities::UserId,
}

impl Service {
    async fn unwatch_auction_for_lock(
        &self,
        input: UnwatchAuctionInput,
        lock: entities::AuctionLock,
    ) -> Result<(entities::Auction, bool), RestError> {
        let _lock = lock.lock().await;
        let now = self.clock.now();
        self.repo
            .remove_watcher(input.auction_id, input.user_id, now)
            .await
            .ok_or(entities::AuctionError::NotFound.into())
    }

    /// Drop a user's subscription. Unwatching a user who never watched is a
    /// no-op, reported through the `changed` flag.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn unwatch_auction(
        &self,
        input: UnwatchAuctionInput,
    ) -> Result<WatchOutcome, RestError> {
        let auction_id = input.auction_id;
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.unwatch_auction_for_lock(input, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        let (auction, changed) = result?;
        if changed {
            self.repo.save_auction(&auction).await;
        }
        Ok(WatchOutcome {
            watching: false,
            changed,
            watcher_count: auction.watcher_count,
        })
    }
}
