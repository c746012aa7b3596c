use {
    super::{
        get_auctions::sort_auctions,
        Service,
    },
    crate::auction::entities,
};

impl Service {
    /// Active auctions flagged as featured at creation, soonest-ending first.
    pub async fn get_featured(&self) -> Vec<entities::Auction> {
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| auction.status.is_active() && auction.featured)
            .collect();
        sort_auctions(&mut auctions, entities::SortOrder::EndingSoon);
        auctions
    }
}
