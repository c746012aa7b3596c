use {
    super::Service,
    crate::auction::entities,
};

pub struct GetWatchedInput {
    pub user_id: entities::UserId,
}

impl Service {
    /// Every auction on the user's watch list, any status, in listing order.
    pub async fn get_watched(&self, input: GetWatchedInput) -> Vec<entities::Auction> {
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| auction.watchers.contains(&input.user_id))
            .collect();
        auctions.sort_by_key(|a| a.seq);
        auctions
    }
}
