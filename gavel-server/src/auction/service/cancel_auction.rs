use {
    super::{
        verification,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

#[derive(Clone)]
pub struct CancelAuctionInput {
    pub auction_id: entities::AuctionId,
    pub seller_id:  entities::UserId,
}

impl Service {
    async fn cancel_auction_for_lock(
        &self,
        input: CancelAuctionInput,
        lock: entities::AuctionLock,
    ) -> Result<entities::Auction, RestError> {
        let _lock = lock.lock().await;
        let auction = self
            .repo
            .get_auction(input.auction_id)
            .await
            .ok_or(entities::AuctionError::NotFound)?;

        verification::verify_cancel(&auction, input.seller_id)?;
        let now = self.clock.now();
        let auction = self
            .repo
            .mark_cancelled(input.auction_id, now)
            .await
            .ok_or(entities::AuctionError::NotFound)?;
        Ok(auction)
    }

    /// Withdraw a listing. Only the seller may cancel, and only while the
    /// auction has no bids; once someone has committed money the listing must
    /// run to its end.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn cancel_auction(
        &self,
        input: CancelAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction_id = input.auction_id;
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.cancel_auction_for_lock(input, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        let auction = result?;
        self.repo.save_auction(&auction).await;
        Ok(auction)
    }
}
