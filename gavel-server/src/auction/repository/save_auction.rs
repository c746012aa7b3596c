use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Best-effort journaling of an already-published record. Must only be
    /// called after the auction's lock has been released: the in-memory
    /// commit is authoritative and a journal failure is logged, not
    /// propagated.
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn save_auction(&self, auction: &entities::Auction) {
        tracing::Span::current().record("auction_id", auction.id.to_string());
        if let Err(err) = self.db.update_auction(auction).await {
            tracing::error!(error = ?err, "Failed to journal auction update");
        }
    }
}
