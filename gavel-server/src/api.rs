use {
    crate::{
        auction::{
            api::{
                delete_watcher,
                get_auction,
                get_auctions,
                get_auctions_by_bidder,
                get_auctions_by_seller,
                get_ending_soon,
                get_featured,
                get_watched_auctions,
                post_auction,
                post_bid,
                post_buy_now,
                post_cancel_auction,
                put_watcher,
            },
            entities,
            service::Service,
        },
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
    },
    anyhow::Result,
    axum::{
        http::StatusCode,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
            put,
        },
        Json,
        Router,
    },
    axum_prometheus::PrometheusMetricLayer,
    clap::crate_version,
    gavel_api_types::{
        auction as auction_api_types,
        ErrorBodyResponse,
        Route,
    },
    std::sync::atomic::Ordering,
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Gavel Auction Server API {}", crate_version!())
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[derive(Clone, Debug, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// A business rule rejected the operation
    Auction(entities::AuctionError),
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl From<entities::AuctionError> for RestError {
    fn from(err: entities::AuctionError) -> Self {
        RestError::Auction(err)
    }
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::Auction(err) => {
                let status = match err {
                    entities::AuctionError::NotFound => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_status_and_message().1)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub async fn start_api(
    run_options: RunOptions,
    service: Service,
    metric_layer: PrometheusMetricLayer<'static>,
) -> Result<()> {
    // Make sure functions included in the paths section have distinct names,
    // otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
    paths(
    crate::auction::api::post_auction,
    crate::auction::api::get_auctions,
    crate::auction::api::get_ending_soon,
    crate::auction::api::get_featured,
    crate::auction::api::get_auction,
    crate::auction::api::post_bid,
    crate::auction::api::post_buy_now,
    crate::auction::api::post_cancel_auction,
    crate::auction::api::put_watcher,
    crate::auction::api::delete_watcher,
    crate::auction::api::get_auctions_by_seller,
    crate::auction::api::get_auctions_by_bidder,
    crate::auction::api::get_watched_auctions,
    ),
    components(
    schemas(
    auction_api_types::Auction,
    auction_api_types::Auctions,
    auction_api_types::AuctionStatus,
    auction_api_types::Bid,
    auction_api_types::BidResult,
    auction_api_types::Bidder,
    auction_api_types::BuyNow,
    auction_api_types::CancelAuction,
    auction_api_types::Category,
    auction_api_types::CreateAuction,
    auction_api_types::PlaceBid,
    auction_api_types::Seller,
    auction_api_types::SortOrder,
    auction_api_types::WatchResult,
    ErrorBodyResponse,
    ),
    responses(
    ErrorBodyResponse,
    auction_api_types::Auction,
    auction_api_types::Auctions,
    auction_api_types::BidResult,
    auction_api_types::WatchResult,
    ),
    ),
    tags(
    (name = "Gavel Auction Server", description = "Gavel runs timed auctions end to end: it accepts \
    listings, validates and applies bids, settles buy-now purchases, and expires auctions that \
    reach their end time.")
    )
    )]
    struct ApiDoc;

    let auction_routes = Router::new()
        .route("/", post(post_auction).get(get_auctions))
        .route("/ending-soon", get(get_ending_soon))
        .route("/featured", get(get_featured))
        .route("/:auction_id", get(get_auction))
        .route("/:auction_id/bids", post(post_bid))
        .route("/:auction_id/buy-now", post(post_buy_now))
        .route("/:auction_id/cancel", post(post_cancel_auction))
        .route(
            "/:auction_id/watchers/:user_id",
            put(put_watcher).delete(delete_watcher),
        );
    let seller_routes = Router::new().route("/:user_id/auctions", get(get_auctions_by_seller));
    let bidder_routes = Router::new().route("/:user_id/auctions", get(get_auctions_by_bidder));
    let user_routes = Router::new().route("/:user_id/watched", get(get_watched_auctions));

    let v1_routes = Router::new().nest(
        Route::V1.as_ref(),
        Router::new()
            .nest(Route::Auction.as_ref(), auction_routes)
            .nest(Route::Seller.as_ref(), seller_routes)
            .nest(Route::Bidder.as_ref(), bidder_routes)
            .nest(Route::User.as_ref(), user_routes),
    );

    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(Route::Docs.as_ref(), ApiDoc::openapi()))
        .merge(v1_routes)
        .route(
            Route::OpenApi.as_ref(),
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(Route::Root.as_ref(), get(root))
        .route(Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .layer(metric_layer)
        .with_state(service);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(address = %run_options.server.listen_addr, "Serving REST API...");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_status_mapping() {
        let cases = [
            (
                RestError::Auction(entities::AuctionError::NotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                RestError::Auction(entities::AuctionError::AuctionExpired),
                StatusCode::BAD_REQUEST,
            ),
            (
                RestError::Auction(entities::AuctionError::BidTooLow { minimum: 1100 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                RestError::BadParameters("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RestError::TemporarilyUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_status_and_message().0, expected);
        }
    }

    #[test]
    fn test_bid_too_low_message_names_minimum() {
        let err = RestError::Auction(entities::AuctionError::BidTooLow { minimum: 1100 });
        assert_eq!(
            err.to_status_and_message().1,
            "Bid too low: the minimum acceptable bid is 1100"
        );
    }
}
