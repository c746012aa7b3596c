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
pub struct BuyNowInput {
    pub auction_id: entities::AuctionId,
    pub buyer:      entities::Bidder,
}

impl Service {
    async fn buy_now_for_lock(
        &self,
        input: BuyNowInput,
        lock: entities::AuctionLock,
    ) -> Result<entities::Auction, RestError> {
        let _lock = lock.lock().await;
        let auction = self
            .repo
            .get_auction(input.auction_id)
            .await
            .ok_or(entities::AuctionError::NotFound)?;

        let price = verification::verify_buy_now(&auction, input.buyer.id)?;
        let now = self.clock.now();
        let auction = self
            .repo
            .mark_sold(input.auction_id, input.buyer, price, now)
            .await
            .ok_or(entities::AuctionError::NotFound)?;
        Ok(auction)
    }

    /// Immediate purchase at the listed buy-now price. The sale closes the
    /// auction on the spot: the closing time becomes the purchase time and no
    /// bid record is written.
    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn buy_now(&self, input: BuyNowInput) -> Result<entities::Auction, RestError> {
        let auction_id = input.auction_id;
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.buy_now_for_lock(input, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        let auction = result?;
        self.repo.save_auction(&auction).await;
        Ok(auction)
    }
}
