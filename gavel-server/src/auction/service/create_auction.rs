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

pub struct CreateAuctionInput {
    pub auction_create: entities::AuctionCreate,
}

impl Service {
    /// Opens a new auction. The record is journaled before it becomes
    /// visible, so a persistence fault here surfaces to the caller instead
    /// of silently producing a non-durable auction.
    #[tracing::instrument(skip_all, fields(auction_id), err(level = tracing::Level::TRACE))]
    pub async fn create_auction(
        &self,
        input: CreateAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        verification::verify_new_auction(&input.auction_create)?;

        let now = self.clock.now();
        let auction = input.auction_create.into_auction(Uuid::new_v4(), now);
        tracing::Span::current().record("auction_id", auction.id.to_string());

        let auction = self.repo.add_auction(auction).await.map_err(|err| {
            tracing::error!(error = ?err, "Failed to journal new auction");
            RestError::TemporarilyUnavailable
        })?;
        Ok(auction)
    }
}
