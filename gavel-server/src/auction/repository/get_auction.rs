use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Owned snapshot of one auction. Validation always re-reads through
    /// here so each bid is checked against the immediately-prior accepted
    /// state.
    pub async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Option<entities::Auction> {
        self.in_memory_store
            .auctions
            .read()
            .await
            .get(&auction_id)
            .cloned()
    }
}
