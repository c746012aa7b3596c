use {
    super::{
        entities,
        service::{
            buy_now::BuyNowInput,
            cancel_auction::CancelAuctionInput,
            create_auction::CreateAuctionInput,
            get_auction::GetAuctionInput,
            get_auctions::GetAuctionsInput,
            get_by_bidder::GetByBidderInput,
            get_by_seller::GetBySellerInput,
            get_ending_soon::GetEndingSoonInput,
            get_watched::GetWatchedInput,
            place_bid::PlaceBidInput,
            unwatch_auction::UnwatchAuctionInput,
            watch_auction::WatchAuctionInput,
            Service,
        },
    },
    crate::api::RestError,
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        Json,
    },
    gavel_api_types::{
        auction::{
            Auction,
            AuctionId,
            Auctions,
            AuctionStatus,
            Bid,
            BidResult,
            Bidder,
            BuyNow,
            CancelAuction,
            Category,
            CreateAuction,
            GetAuctionsQueryParams,
            GetEndingSoonQueryParams,
            PlaceBid,
            Seller,
            SortOrder,
            UserId,
            WatchResult,
        },
        ErrorBodyResponse,
    },
    std::time::Duration,
};

/// List a new auction.
///
/// The auction opens immediately and runs for `duration_secs`; the returned
/// body carries the server-assigned id and the computed end time.
#[utoipa::path(post, path = "/v1/auctions", request_body = CreateAuction, responses(
    (status = 200, description = "Auction was created successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_auction(
    State(service): State<Service>,
    Json(create_auction): Json<CreateAuction>,
) -> Result<Json<Auction>, RestError> {
    let auction = service
        .create_auction(CreateAuctionInput {
            auction_create: create_auction.into(),
        })
        .await?;
    Ok(Json(auction.into()))
}

/// List active auctions.
///
/// Optional filters narrow by category, current-price window, and a
/// case-insensitive text search over title and description.
#[utoipa::path(get, path = "/v1/auctions",
    params(GetAuctionsQueryParams),
    responses(
    (status = 200, description = "Active auctions matching the query", body = Auctions),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(service): State<Service>,
    Query(params): Query<GetAuctionsQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = service
        .get_auctions(GetAuctionsInput {
            category:  params.category.map(Into::into),
            min_price: params.min_price,
            max_price: params.max_price,
            search:    params.search,
            sort:      params.sort.into(),
        })
        .await;
    Ok(Json(auctions.into()))
}

/// List active auctions closing within the look-ahead window, soonest first.
#[utoipa::path(get, path = "/v1/auctions/ending-soon",
    params(GetEndingSoonQueryParams),
    responses(
    (status = 200, description = "Active auctions ending within the window", body = Auctions),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_ending_soon(
    State(service): State<Service>,
    Query(params): Query<GetEndingSoonQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = service
        .get_ending_soon(GetEndingSoonInput {
            within: params.within_secs.map(Duration::from_secs),
        })
        .await;
    Ok(Json(auctions.into()))
}

/// List active auctions curated onto the featured shelf.
#[utoipa::path(get, path = "/v1/auctions/featured", responses(
    (status = 200, description = "Active featured auctions", body = Auctions),
),)]
pub async fn get_featured(State(service): State<Service>) -> Result<Json<Auctions>, RestError> {
    Ok(Json(service.get_featured().await.into()))
}

/// Fetch one auction by id, whatever its status.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}",
    params(("auction_id" = String, Path, description = "Auction id to query for")),
    responses(
    (status = 200, description = "The auction with the specified id", body = Auction),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    State(service): State<Service>,
    Path(auction_id): Path<AuctionId>,
) -> Result<Json<Auction>, RestError> {
    let auction = service.get_auction(GetAuctionInput { auction_id }).await?;
    Ok(Json(auction.into()))
}

/// Bid on an auction.
///
/// The bid must come from someone other than the seller, arrive before the
/// end time, and reach the current price plus the minimum increment. A
/// rejected bid leaves the auction untouched.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/bids",
    request_body = PlaceBid,
    params(("auction_id" = String, Path, description = "Auction id to bid on")),
    responses(
    (status = 200, description = "Bid was placed successfully", body = BidResult),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_bid(
    State(service): State<Service>,
    Path(auction_id): Path<AuctionId>,
    Json(place_bid): Json<PlaceBid>,
) -> Result<Json<BidResult>, RestError> {
    let bid = service
        .place_bid(PlaceBidInput {
            auction_id,
            bidder: place_bid.bidder.into(),
            amount: place_bid.amount,
            auto_bid: place_bid.auto_bid,
        })
        .await?;
    Ok(Json(BidResult {
        status:    "OK".to_string(),
        id:        bid.id,
        new_price: bid.amount,
    }))
}

/// Buy an auction outright at its buy-now price.
///
/// Ends the auction immediately in the buyer's favor; no bid record is
/// created and the end time becomes the purchase time.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/buy-now",
    request_body = BuyNow,
    params(("auction_id" = String, Path, description = "Auction id to purchase")),
    responses(
    (status = 200, description = "Auction was purchased successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_buy_now(
    State(service): State<Service>,
    Path(auction_id): Path<AuctionId>,
    Json(buy_now): Json<BuyNow>,
) -> Result<Json<Auction>, RestError> {
    let auction = service
        .buy_now(BuyNowInput {
            auction_id,
            buyer: buy_now.buyer.into(),
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Cancel an auction.
///
/// Only the seller may cancel, and only while the auction is active with no
/// bids.
#[utoipa::path(post, path = "/v1/auctions/{auction_id}/cancel",
    request_body = CancelAuction,
    params(("auction_id" = String, Path, description = "Auction id to cancel")),
    responses(
    (status = 200, description = "Auction was cancelled successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn post_cancel_auction(
    State(service): State<Service>,
    Path(auction_id): Path<AuctionId>,
    Json(cancel_auction): Json<CancelAuction>,
) -> Result<Json<Auction>, RestError> {
    let auction = service
        .cancel_auction(CancelAuctionInput {
            auction_id,
            seller_id: cancel_auction.seller_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

/// Add a user to an auction's watch list. Idempotent.
#[utoipa::path(put, path = "/v1/auctions/{auction_id}/watchers/{user_id}",
    params(
        ("auction_id" = String, Path, description = "Auction id to watch"),
        ("user_id" = String, Path, description = "User to add to the watch list"),
    ),
    responses(
    (status = 200, description = "Watch list membership after the call", body = WatchResult),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn put_watcher(
    State(service): State<Service>,
    Path((auction_id, user_id)): Path<(AuctionId, UserId)>,
) -> Result<Json<WatchResult>, RestError> {
    let outcome = service
        .watch_auction(WatchAuctionInput {
            auction_id,
            user_id,
        })
        .await?;
    Ok(Json(WatchResult {
        watching:      outcome.watching,
        changed:       outcome.changed,
        watcher_count: outcome.watcher_count,
    }))
}

/// Remove a user from an auction's watch list. Idempotent.
#[utoipa::path(delete, path = "/v1/auctions/{auction_id}/watchers/{user_id}",
    params(
        ("auction_id" = String, Path, description = "Auction id to stop watching"),
        ("user_id" = String, Path, description = "User to remove from the watch list"),
    ),
    responses(
    (status = 200, description = "Watch list membership after the call", body = WatchResult),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn delete_watcher(
    State(service): State<Service>,
    Path((auction_id, user_id)): Path<(AuctionId, UserId)>,
) -> Result<Json<WatchResult>, RestError> {
    let outcome = service
        .unwatch_auction(UnwatchAuctionInput {
            auction_id,
            user_id,
        })
        .await?;
    Ok(Json(WatchResult {
        watching:      outcome.watching,
        changed:       outcome.changed,
        watcher_count: outcome.watcher_count,
    }))
}

/// List every auction the seller has created, any status.
#[utoipa::path(get, path = "/v1/sellers/{user_id}/auctions",
    params(("user_id" = String, Path, description = "Seller to query for")),
    responses(
    (status = 200, description = "Auctions listed by the seller", body = Auctions),
),)]
pub async fn get_auctions_by_seller(
    State(service): State<Service>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = service
        .get_by_seller(GetBySellerInput {
            seller_id: user_id,
        })
        .await;
    Ok(Json(auctions.into()))
}

/// List every auction the user has bid on, any status.
#[utoipa::path(get, path = "/v1/bidders/{user_id}/auctions",
    params(("user_id" = String, Path, description = "Bidder to query for")),
    responses(
    (status = 200, description = "Auctions the user has bid on", body = Auctions),
),)]
pub async fn get_auctions_by_bidder(
    State(service): State<Service>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = service
        .get_by_bidder(GetByBidderInput {
            bidder_id: user_id,
        })
        .await;
    Ok(Json(auctions.into()))
}

/// List every auction on the user's watch list, any status.
#[utoipa::path(get, path = "/v1/users/{user_id}/watched",
    params(("user_id" = String, Path, description = "User whose watch list to query")),
    responses(
    (status = 200, description = "Auctions the user is watching", body = Auctions),
),)]
pub async fn get_watched_auctions(
    State(service): State<Service>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = service.get_watched(GetWatchedInput { user_id }).await;
    Ok(Json(auctions.into()))
}

impl From<Category> for entities::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Electronics => entities::Category::Electronics,
            Category::Fashion => entities::Category::Fashion,
            Category::Home => entities::Category::Home,
            Category::Sports => entities::Category::Sports,
            Category::Collectibles => entities::Category::Collectibles,
            Category::Vehicles => entities::Category::Vehicles,
            Category::Books => entities::Category::Books,
            Category::Other => entities::Category::Other,
        }
    }
}

impl From<entities::Category> for Category {
    fn from(category: entities::Category) -> Self {
        match category {
            entities::Category::Electronics => Category::Electronics,
            entities::Category::Fashion => Category::Fashion,
            entities::Category::Home => Category::Home,
            entities::Category::Sports => Category::Sports,
            entities::Category::Collectibles => Category::Collectibles,
            entities::Category::Vehicles => Category::Vehicles,
            entities::Category::Books => Category::Books,
            entities::Category::Other => Category::Other,
        }
    }
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Ended => AuctionStatus::Ended,
            entities::AuctionStatus::Sold => AuctionStatus::Sold,
            entities::AuctionStatus::Cancelled => AuctionStatus::Cancelled,
            entities::AuctionStatus::Expired => AuctionStatus::Expired,
        }
    }
}

impl From<SortOrder> for entities::SortOrder {
    fn from(sort: SortOrder) -> Self {
        match sort {
            SortOrder::EndingSoon => entities::SortOrder::EndingSoon,
            SortOrder::NewlyListed => entities::SortOrder::NewlyListed,
            SortOrder::PriceAsc => entities::SortOrder::PriceAscending,
            SortOrder::PriceDesc => entities::SortOrder::PriceDescending,
            SortOrder::MostBids => entities::SortOrder::MostBids,
        }
    }
}

impl From<Seller> for entities::Seller {
    fn from(seller: Seller) -> Self {
        entities::Seller {
            id:         seller.id,
            name:       seller.name,
            reputation: seller.reputation,
        }
    }
}

impl From<entities::Seller> for Seller {
    fn from(seller: entities::Seller) -> Self {
        Seller {
            id:         seller.id,
            name:       seller.name,
            reputation: seller.reputation,
        }
    }
}

impl From<Bidder> for entities::Bidder {
    fn from(bidder: Bidder) -> Self {
        entities::Bidder {
            id:   bidder.id,
            name: bidder.name,
        }
    }
}

impl From<entities::Bidder> for Bidder {
    fn from(bidder: entities::Bidder) -> Self {
        Bidder {
            id:   bidder.id,
            name: bidder.name,
        }
    }
}

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
        Bid {
            id:           bid.id,
            auction_id:   bid.auction_id,
            bidder:       bid.bidder.into(),
            amount:       bid.amount,
            submitted_at: bid.submitted_at,
            auto_bid:     bid.auto_bid,
        }
    }
}

impl From<CreateAuction> for entities::AuctionCreate {
    fn from(create: CreateAuction) -> Self {
        entities::AuctionCreate {
            seller:            create.seller.into(),
            title:             create.title,
            description:       create.description,
            category:          create.category.into(),
            image_url:         create.image_url,
            quantity:          create.quantity,
            starting_price:    create.starting_price,
            buy_now_price:     create.buy_now_price,
            min_bid_increment: create.min_bid_increment,
            reserve_price:     create.reserve_price,
            duration:          Duration::from_secs(create.duration_secs),
            featured:          create.featured,
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Auction {
            id:                auction.id,
            seller:            auction.seller.into(),
            title:             auction.title,
            description:       auction.description,
            category:          auction.category.into(),
            image_url:         auction.image_url,
            quantity:          auction.quantity,
            starting_price:    auction.starting_price,
            current_price:     auction.current_price,
            buy_now_price:     auction.buy_now_price,
            min_bid_increment: auction.min_bid_increment,
            reserve_price:     auction.reserve_price,
            reserve_met:       auction.reserve_met,
            bids:              auction.bids.into_iter().map(Into::into).collect(),
            bid_count:         auction.bid_count,
            highest_bidder:    auction.highest_bidder.map(Into::into),
            start_time:        auction.start_time,
            end_time:          auction.end_time,
            status:            auction.status.into(),
            featured:          auction.featured,
            watcher_count:     auction.watcher_count,
            created_at:        auction.created_at,
            updated_at:        auction.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auction_conversion_hides_watcher_identities() {
        let create = crate::auction::service::tests::auction_create(uuid::Uuid::new_v4());
        let mut auction =
            create.into_auction(uuid::Uuid::new_v4(), crate::auction::service::tests::TEST_START);
        auction.watchers.insert(uuid::Uuid::new_v4());
        auction.watcher_count = 1;

        let api: Auction = auction.clone().into();
        assert_eq!(api.watcher_count, 1);
        assert_eq!(api.id, auction.id);
        assert_eq!(api.status, AuctionStatus::Active);
        // Serialized form carries the count, never the member ids.
        let json = serde_json::to_value(&api).unwrap();
        assert!(json.get("watchers").is_none());
        assert_eq!(json["watcher_count"], 1);
    }

    #[test]
    fn test_create_auction_conversion_maps_duration() {
        let api = CreateAuction {
            seller:            Seller {
                id:         uuid::Uuid::new_v4(),
                name:       "alice".to_string(),
                reputation: 10,
            },
            title:             "Vintage rangefinder camera".to_string(),
            description:       "1970s rangefinder, recently serviced.".to_string(),
            category:          Category::Electronics,
            image_url:         None,
            quantity:          1,
            starting_price:    1000,
            buy_now_price:     Some(5000),
            min_bid_increment: 100,
            reserve_price:     None,
            duration_secs:     3600,
            featured:          false,
        };
        let create: entities::AuctionCreate = api.into();
        assert_eq!(create.duration, Duration::from_secs(3600));
        assert_eq!(create.category, entities::Category::Electronics);
        assert_eq!(create.buy_now_price, Some(5000));
    }
}
