mod auction;
mod bid;
mod error;

pub use {
    auction::*,
    bid::*,
    error::*,
};
