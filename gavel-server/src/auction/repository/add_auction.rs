use {
    super::Repository,
    crate::auction::entities,
    std::sync::atomic::Ordering,
};

impl Repository {
    async fn add_in_memory_auction(&self, auction: entities::Auction) {
        self.in_memory_store
            .auctions
            .write()
            .await
            .insert(auction.id, auction);
    }

    // NOTE: Do not call this function directly. Instead call `create_auction` from `Service`.
    //
    // The id is unpublished at this point, so no per-auction lock exists yet;
    // the journal write happens before the record becomes visible and a
    // failure aborts the creation.
    pub async fn add_auction(
        &self,
        mut auction: entities::Auction,
    ) -> anyhow::Result<entities::Auction> {
        auction.seq = self.in_memory_store.next_seq.fetch_add(1, Ordering::SeqCst);
        self.db.add_auction(&auction).await?;
        self.add_in_memory_auction(auction.clone()).await;
        Ok(auction)
    }
}
