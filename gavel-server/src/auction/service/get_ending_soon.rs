use {
    super::{
        get_auctions::sort_auctions,
        Service,
    },
    crate::auction::entities,
    std::time::Duration,
};

#[derive(Clone, Debug, Default)]
pub struct GetEndingSoonInput {
    /// Look-ahead window; the configured default applies when unset.
    pub within: Option<Duration>,
}

impl Service {
    /// Active auctions whose end time falls inside the look-ahead window,
    /// soonest first. Auctions already past their end time are excluded even
    /// if the sweeper has not reached them yet.
    pub async fn get_ending_soon(&self, input: GetEndingSoonInput) -> Vec<entities::Auction> {
        let now = self.clock.now();
        let horizon = now + input.within.unwrap_or(self.config.ending_soon_window);
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| {
                auction.status.is_active()
                    && auction.end_time > now
                    && auction.end_time <= horizon
            })
            .collect();
        sort_auctions(&mut auctions, entities::SortOrder::EndingSoon);
        auctions
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::service::{
            create_auction::CreateAuctionInput,
            tests::{
                auction_create,
                mock_database,
                test_clock,
            },
        },
        uuid::Uuid,
    };

    async fn list_with_duration(service: &Service, secs: u64) -> entities::Auction {
        let mut create = auction_create(Uuid::new_v4());
        create.duration = Duration::from_secs(secs);
        service
            .create_auction(CreateAuctionInput {
                auction_create: create,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ending_soon_window_and_order() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let soon = list_with_duration(&service, 600).await;
        let sooner = list_with_duration(&service, 60).await;
        let _later = list_with_duration(&service, 7200).await; // outside the window

        // Config window in tests is one hour.
        let listed = service.get_ending_soon(GetEndingSoonInput::default()).await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![sooner.id, soon.id]);
    }

    #[tokio::test]
    async fn test_ending_soon_window_boundary_is_inclusive() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let at_edge = list_with_duration(&service, 3600).await;
        let _past_edge = list_with_duration(&service, 3601).await;

        let listed = service.get_ending_soon(GetEndingSoonInput::default()).await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![at_edge.id]);
    }

    #[tokio::test]
    async fn test_ending_soon_excludes_past_due() {
        let clock = test_clock();
        let service = Service::new_with_mocks(mock_database(), clock.clone());
        let _expired = list_with_duration(&service, 60).await;
        clock.advance(Duration::from_secs(120));
        let upcoming = list_with_duration(&service, 600).await;

        let listed = service.get_ending_soon(GetEndingSoonInput::default()).await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![upcoming.id]);
    }

    #[tokio::test]
    async fn test_ending_soon_honors_custom_window() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let near = list_with_duration(&service, 120).await;
        let _far = list_with_duration(&service, 600).await;

        let listed = service
            .get_ending_soon(GetEndingSoonInput {
                within: Some(Duration::from_secs(300)),
            })
            .await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![near.id]);
    }
}
