use {
    super::{
        verification,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
    uuid::Uuid,
};

#[derive(Clone)]
pub struct PlaceBidInput {
    pub auction_id: entities::AuctionId,
    pub bidder:     entities::Bidder,
    pub amount:     entities::Amount,
    pub auto_bid:   bool,
}

impl Service {
    /// Check-then-update under this auction's lock. Validation re-reads the
    /// latest snapshot, so concurrent bids are serialized and each one is
    /// checked against the immediately-prior accepted state.
    async fn place_bid_for_lock(
        &self,
        input: PlaceBidInput,
        lock: entities::AuctionLock,
    ) -> Result<(entities::Auction, entities::Bid), RestError> {
        let _lock = lock.lock().await;
        let auction = self
            .repo
            .get_auction(input.auction_id)
            .await
            .ok_or(entities::AuctionError::NotFound)?;

        let now = self.clock.now();
        verification::verify_bid(&auction, input.bidder.id, input.amount, now)?;

        let bid = entities::Bid {
            id:           Uuid::new_v4(),
            auction_id:   input.auction_id,
            bidder:       input.bidder,
            amount:       input.amount,
            submitted_at: now,
            auto_bid:     input.auto_bid,
        };
        let auction = self
            .repo
            .record_bid(input.auction_id, bid.clone())
            .await
            .ok_or(entities::AuctionError::NotFound)?;
        Ok((auction, bid))
    }

    #[tracing::instrument(
        skip_all,
        fields(auction_id = %input.auction_id, bid_id),
        err(level = tracing::Level::TRACE)
    )]
    pub async fn place_bid(
        &self,
        input: PlaceBidInput,
    ) -> Result<entities::Bid, RestError> {
        let auction_id = input.auction_id;
        let auction_lock = self.repo.get_or_create_auction_lock(auction_id).await;
        let result = self.place_bid_for_lock(input, auction_lock).await;
        self.repo.remove_auction_lock(&auction_id).await;

        let (auction, bid) = result?;
        tracing::Span::current().record("bid_id", bid.id.to_string());
        self.repo.save_auction(&auction).await;
        Ok(bid)
    }
}
