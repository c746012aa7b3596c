use {
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::{
        fs,
        path::PathBuf,
        time::Duration,
    },
};

mod server;

#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file with auction engine and persistence settings
    #[arg(long = "config")]
    #[arg(env = "GAVEL_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auction:     AuctionConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        // Open and read the YAML file
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuctionConfig {
    /// How often the expiration sweeper scans for past-due auctions.
    #[serde(with = "humantime_serde", default = "default_sweep_interval")]
    pub sweep_interval:     Duration,
    /// Default look-ahead window for the ending-soon listing.
    #[serde(with = "humantime_serde", default = "default_ending_soon_window")]
    pub ending_soon_window: Duration,
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_ending_soon_window() -> Duration {
    Duration::from_secs(3600)
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            sweep_interval:     default_sweep_interval(),
            ending_soon_window: default_ending_soon_window(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Append-only journal file for auction state. Persistence is disabled
    /// when unset.
    pub journal: Option<PathBuf>,
}
