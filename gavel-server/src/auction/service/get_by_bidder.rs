use {
    super::Service,
    crate::auction::entities,
};

pub struct GetByBidderInput {
    pub bidder_id: entities::UserId,
}

impl Service {
    /// Every auction the user has bid on, any status, in listing order. An
    /// auction counts once no matter how many of its bids are theirs.
    pub async fn get_by_bidder(&self, input: GetByBidderInput) -> Vec<entities::Auction> {
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| auction.bids.iter().any(|bid| bid.bidder.id == input.bidder_id))
            .collect();
        auctions.sort_by_key(|a| a.seq);
        auctions
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::service::{
            create_auction::CreateAuctionInput,
            place_bid::PlaceBidInput,
            tests::{
                auction_create,
                bidder,
                mock_database,
                test_clock,
            },
        },
        uuid::Uuid,
    };

    #[tokio::test]
    async fn test_by_bidder_deduplicates_and_ignores_outbid_status() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let first = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(Uuid::new_v4()),
            })
            .await
            .unwrap();
        let second = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(Uuid::new_v4()),
            })
            .await
            .unwrap();

        let b1 = bidder("b1");
        let b2 = bidder("b2");
        // b1 bids twice on the first auction and is then outbid by b2.
        for (bidder, amount) in [(&b1, 1100u64), (&b1, 1200), (&b2, 1300)] {
            service
                .place_bid(PlaceBidInput {
                    auction_id: first.id,
                    bidder:     bidder.clone(),
                    amount,
                    auto_bid:   false,
                })
                .await
                .unwrap();
        }
        service
            .place_bid(PlaceBidInput {
                auction_id: second.id,
                bidder:     b1.clone(),
                amount:     1100,
                auto_bid:   false,
            })
            .await
            .unwrap();

        let listed = service
            .get_by_bidder(GetByBidderInput { bidder_id: b1.id })
            .await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let listed = service
            .get_by_bidder(GetByBidderInput { bidder_id: b2.id })
            .await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id]);
    }

    #[tokio::test]
    async fn test_by_bidder_without_bids_is_empty() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(Uuid::new_v4()),
            })
            .await
            .unwrap();

        let listed = service
            .get_by_bidder(GetByBidderInput {
                bidder_id: Uuid::new_v4(),
            })
            .await;
        assert!(listed.is_empty());
    }
}
