use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    /// Owned snapshot of the whole registry. Callers filter and sort on the
    /// clone so a slow listing never blocks writers. Order is unspecified;
    /// the query layer sorts by `seq` where insertion order matters.
    pub async fn get_auctions(&self) -> Vec<entities::Auction> {
        self.in_memory_store
            .auctions
            .read()
            .await
            .values()
            .cloned()
            .collect()
    }
}
