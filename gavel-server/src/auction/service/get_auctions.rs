use {
    super::Service,
    crate::auction::entities,
    std::cmp::Reverse,
};

#[derive(Clone, Debug, Default)]
pub struct GetAuctionsInput {
    pub category:  Option<entities::Category>,
    pub min_price: Option<entities::Amount>,
    pub max_price: Option<entities::Amount>,
    pub search:    Option<String>,
    pub sort:      entities::SortOrder,
}

fn matches_filters(auction: &entities::Auction, input: &GetAuctionsInput) -> bool {
    if let Some(category) = input.category {
        if auction.category != category {
            return false;
        }
    }
    if let Some(min_price) = input.min_price {
        if auction.current_price < min_price {
            return false;
        }
    }
    if let Some(max_price) = input.max_price {
        if auction.current_price > max_price {
            return false;
        }
    }
    if let Some(search) = &input.search {
        let needle = search.to_lowercase();
        if !auction.title.to_lowercase().contains(&needle)
            && !auction.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

/// Order a result set. Every variant falls back to the insertion sequence so
/// equal keys keep their original listing order.
pub(super) fn sort_auctions(auctions: &mut [entities::Auction], sort: entities::SortOrder) {
    match sort {
        entities::SortOrder::EndingSoon => auctions.sort_by_key(|a| (a.end_time, a.seq)),
        entities::SortOrder::NewlyListed => {
            auctions.sort_by_key(|a| (Reverse(a.created_at), a.seq))
        }
        entities::SortOrder::PriceAscending => {
            auctions.sort_by_key(|a| (a.current_price, a.seq))
        }
        entities::SortOrder::PriceDescending => {
            auctions.sort_by_key(|a| (Reverse(a.current_price), a.seq))
        }
        entities::SortOrder::MostBids => auctions.sort_by_key(|a| (Reverse(a.bid_count), a.seq)),
    }
}

impl Service {
    /// List active auctions with optional filters. Price filters apply to the
    /// current price, and the text filter is a case-insensitive substring
    /// match over title and description. Active auctions past their end time
    /// stay listed until the expiration sweeper transitions them.
    pub async fn get_auctions(&self, input: GetAuctionsInput) -> Vec<entities::Auction> {
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| auction.status.is_active() && matches_filters(auction, &input))
            .collect();
        sort_auctions(&mut auctions, input.sort);
        auctions
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::{
                Category,
                SortOrder,
            },
            service::{
                buy_now::BuyNowInput,
                cancel_auction::CancelAuctionInput,
                create_auction::CreateAuctionInput,
                place_bid::PlaceBidInput,
                tests::{
                    auction_create,
                    bidder,
                    mock_database,
                    test_clock,
                },
            },
        },
        std::time::Duration,
        uuid::Uuid,
    };

    struct Listing {
        title:          &'static str,
        description:    &'static str,
        category:       Category,
        starting_price: u64,
        duration_secs:  u64,
    }

    async fn list(service: &Service, listing: Listing) -> entities::Auction {
        let mut create = auction_create(Uuid::new_v4());
        create.title = listing.title.to_string();
        create.description = listing.description.to_string();
        create.category = listing.category;
        create.starting_price = listing.starting_price;
        create.duration = Duration::from_secs(listing.duration_secs);
        service
            .create_auction(CreateAuctionInput {
                auction_create: create,
            })
            .await
            .unwrap()
    }

    fn camera() -> Listing {
        Listing {
            title:          "Vintage rangefinder camera",
            description:    "1970s rangefinder, recently serviced.",
            category:       Category::Electronics,
            starting_price: 1000,
            duration_secs:  3600,
        }
    }

    fn overcoat() -> Listing {
        Listing {
            title:          "Wool overcoat",
            description:    "Charcoal grey, barely worn.",
            category:       Category::Fashion,
            starting_price: 500,
            duration_secs:  1800,
        }
    }

    fn amplifier() -> Listing {
        Listing {
            title:          "Tube amplifier",
            description:    "Pairs well with any camera-shy hi-fi corner.",
            category:       Category::Electronics,
            starting_price: 2000,
            duration_secs:  7200,
        }
    }

    fn ids(auctions: &[entities::Auction]) -> Vec<entities::AuctionId> {
        auctions.iter().map(|a| a.id).collect()
    }

    #[tokio::test]
    async fn test_list_active_excludes_terminal_statuses() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let kept = list(&service, camera()).await;

        let seller_id = Uuid::new_v4();
        let mut create = auction_create(seller_id);
        create.buy_now_price = Some(5000);
        let sold = service
            .create_auction(CreateAuctionInput {
                auction_create: create,
            })
            .await
            .unwrap();
        service
            .buy_now(BuyNowInput {
                auction_id: sold.id,
                buyer:      bidder("b1"),
            })
            .await
            .unwrap();

        let seller_id = Uuid::new_v4();
        let cancelled = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(seller_id),
            })
            .await
            .unwrap();
        service
            .cancel_auction(CancelAuctionInput {
                auction_id: cancelled.id,
                seller_id,
            })
            .await
            .unwrap();

        let listed = service.get_auctions(GetAuctionsInput::default()).await;
        assert_eq!(ids(&listed), vec![kept.id]);
    }

    #[tokio::test]
    async fn test_filter_by_category() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await;
        let _a2 = list(&service, overcoat()).await;
        let a3 = list(&service, amplifier()).await;

        let listed = service
            .get_auctions(GetAuctionsInput {
                category: Some(Category::Electronics),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![a1.id, a3.id]);
    }

    #[tokio::test]
    async fn test_filter_by_price_window_is_inclusive() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await; // 1000
        let _a2 = list(&service, overcoat()).await; // 500
        let _a3 = list(&service, amplifier()).await; // 2000

        let listed = service
            .get_auctions(GetAuctionsInput {
                min_price: Some(1000),
                max_price: Some(1000),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![a1.id]);

        let listed = service
            .get_auctions(GetAuctionsInput {
                min_price: Some(501),
                ..Default::default()
            })
            .await;
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_price_filter_tracks_current_price() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let auction = list(&service, camera()).await; // starts at 1000
        service
            .place_bid(PlaceBidInput {
                auction_id: auction.id,
                bidder:     bidder("b1"),
                amount:     1500,
                auto_bid:   false,
            })
            .await
            .unwrap();

        let listed = service
            .get_auctions(GetAuctionsInput {
                max_price: Some(1200),
                ..Default::default()
            })
            .await;
        assert!(listed.is_empty());

        let listed = service
            .get_auctions(GetAuctionsInput {
                min_price: Some(1200),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![auction.id]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_title_and_description() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await;
        let _a2 = list(&service, overcoat()).await;
        let a3 = list(&service, amplifier()).await;

        let listed = service
            .get_auctions(GetAuctionsInput {
                search: Some("CAMERA".to_string()),
                ..Default::default()
            })
            .await;
        // Title match on the first, description match on the third.
        assert_eq!(ids(&listed), vec![a1.id, a3.id]);
    }

    #[tokio::test]
    async fn test_sort_ending_soon_breaks_ties_by_insertion() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        // Same clock instant and same duration: identical end times.
        let a1 = list(&service, camera()).await;
        let a2 = list(&service, camera()).await;
        let a3 = list(&service, overcoat()).await; // ends sooner

        let listed = service.get_auctions(GetAuctionsInput::default()).await;
        assert_eq!(ids(&listed), vec![a3.id, a1.id, a2.id]);
    }

    #[tokio::test]
    async fn test_sort_newly_listed() {
        let clock = test_clock();
        let service = Service::new_with_mocks(mock_database(), clock.clone());
        let a1 = list(&service, camera()).await;
        clock.advance(Duration::from_secs(60));
        let a2 = list(&service, overcoat()).await;
        let a3 = list(&service, amplifier()).await; // same instant as a2

        let listed = service
            .get_auctions(GetAuctionsInput {
                sort: SortOrder::NewlyListed,
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![a2.id, a3.id, a1.id]);
    }

    #[tokio::test]
    async fn test_sort_by_price_both_directions() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await; // 1000
        let a2 = list(&service, overcoat()).await; // 500
        let a3 = list(&service, amplifier()).await; // 2000

        let ascending = service
            .get_auctions(GetAuctionsInput {
                sort: SortOrder::PriceAscending,
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&ascending), vec![a2.id, a1.id, a3.id]);

        let descending = service
            .get_auctions(GetAuctionsInput {
                sort: SortOrder::PriceDescending,
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&descending), vec![a3.id, a1.id, a2.id]);
    }

    #[tokio::test]
    async fn test_sort_most_bids_with_insertion_tiebreak() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await;
        let a2 = list(&service, overcoat()).await;
        let a3 = list(&service, amplifier()).await;

        let b1 = bidder("b1");
        for amount in [1100u64, 1200] {
            service
                .place_bid(PlaceBidInput {
                    auction_id: a2.id,
                    bidder:     b1.clone(),
                    amount,
                    auto_bid:   false,
                })
                .await
                .unwrap();
        }

        let listed = service
            .get_auctions(GetAuctionsInput {
                sort: SortOrder::MostBids,
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![a2.id, a1.id, a3.id]);
    }

    #[tokio::test]
    async fn test_filters_compose() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let a1 = list(&service, camera()).await;
        let _a2 = list(&service, overcoat()).await;
        let _a3 = list(&service, amplifier()).await; // camera-shy but priced out

        let listed = service
            .get_auctions(GetAuctionsInput {
                category: Some(Category::Electronics),
                min_price: Some(800),
                max_price: Some(1500),
                search: Some("camera".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(ids(&listed), vec![a1.id]);
    }

    #[tokio::test]
    async fn test_past_due_active_auctions_stay_listed() {
        let clock = test_clock();
        let service = Service::new_with_mocks(mock_database(), clock.clone());
        let auction = list(&service, camera()).await;

        clock.advance(Duration::from_secs(4000));
        let listed = service.get_auctions(GetAuctionsInput::default()).await;
        assert_eq!(ids(&listed), vec![auction.id]);
    }
}
