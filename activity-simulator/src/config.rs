use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    url::Url,
};

// `Options` is a structop definition to provide clean command-line args for the simulator.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the simulator.
    Run(RunOptions),

    /// Seed the marketplace with a batch of listings and exit.
    Seed(SeedOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Base URL of the auction server.
    #[arg(long = "server-url")]
    #[arg(env = "SERVER_URL")]
    #[arg(default_value = "http://127.0.0.1:9000")]
    pub server_url: Url,

    /// Seconds to wait between simulated marketplace actions.
    #[arg(long = "interval")]
    #[arg(default_value = "2")]
    pub interval: u64,

    /// Size of the simulated user pool.
    #[arg(long = "users")]
    #[arg(default_value = "8")]
    pub users: u64,
}

#[derive(Args, Clone, Debug)]
pub struct SeedOptions {
    /// Base URL of the auction server.
    #[arg(long = "server-url")]
    #[arg(env = "SERVER_URL")]
    #[arg(default_value = "http://127.0.0.1:9000")]
    pub server_url: Url,

    /// Number of listings to create.
    #[arg(long = "count")]
    #[arg(default_value = "12")]
    pub count: u64,
}
