use {
    ::serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

pub mod auction;

#[derive(ToResponse, ToSchema, Serialize, Deserialize)]
#[response(description = "An error occurred processing the request")]
pub struct ErrorBodyResponse {
    pub error: String,
}

#[derive(AsRefStr, Clone, Debug)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "v1")]
    V1,
    #[strum(serialize = "auctions")]
    Auction,
    #[strum(serialize = "sellers")]
    Seller,
    #[strum(serialize = "bidders")]
    Bidder,
    #[strum(serialize = "users")]
    User,
    #[strum(serialize = "")]
    Root,
    #[strum(serialize = "live")]
    Liveness,
    #[strum(serialize = "docs")]
    Docs,
    #[strum(serialize = "docs/openapi.json")]
    OpenApi,
}
