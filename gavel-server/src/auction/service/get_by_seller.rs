use {
    super::Service,
    crate::auction::entities,
};

pub struct GetBySellerInput {
    pub seller_id: entities::UserId,
}

impl Service {
    /// Every auction the seller has listed, any status, in listing order.
    pub async fn get_by_seller(&self, input: GetBySellerInput) -> Vec<entities::Auction> {
        let mut auctions: Vec<entities::Auction> = self
            .repo
            .get_auctions()
            .await
            .into_iter()
            .filter(|auction| auction.seller.id == input.seller_id)
            .collect();
        auctions.sort_by_key(|a| a.seq);
        auctions
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::AuctionStatus,
            service::{
                cancel_auction::CancelAuctionInput,
                create_auction::CreateAuctionInput,
                tests::{
                    auction_create,
                    mock_database,
                    test_clock,
                },
            },
        },
        uuid::Uuid,
    };

    #[tokio::test]
    async fn test_by_seller_spans_statuses_in_listing_order() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let seller_id = Uuid::new_v4();

        let first = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(seller_id),
            })
            .await
            .unwrap();
        let second = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(seller_id),
            })
            .await
            .unwrap();
        let _other = service
            .create_auction(CreateAuctionInput {
                auction_create: auction_create(Uuid::new_v4()),
            })
            .await
            .unwrap();
        service
            .cancel_auction(CancelAuctionInput {
                auction_id: first.id,
                seller_id,
            })
            .await
            .unwrap();

        let listed = service
            .get_by_seller(GetBySellerInput { seller_id })
            .await;
        let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(listed[0].status, AuctionStatus::Cancelled);
        assert_eq!(listed[1].status, AuctionStatus::Active);
    }

    #[tokio::test]
    async fn test_by_seller_unknown_user_is_empty() {
        let service = Service::new_with_mocks(mock_database(), test_clock());
        let listed = service
            .get_by_seller(GetBySellerInput {
                seller_id: Uuid::new_v4(),
            })
            .await;
        assert!(listed.is_empty());
    }
}
