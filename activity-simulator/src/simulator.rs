use {
    crate::config::{
        RunOptions,
        SeedOptions,
    },
    anyhow::{
        anyhow,
        Result,
    },
    gavel_api_types::{
        auction::{
            Amount,
            Auction,
            Auctions,
            BidResult,
            Bidder,
            BuyNow,
            CancelAuction,
            Category,
            CreateAuction,
            PlaceBid,
            Seller,
            UserId,
            WatchResult,
        },
        ErrorBodyResponse,
    },
    rand::{
        random,
        seq::SliceRandom,
    },
    reqwest::{
        Client,
        Response,
    },
    serde::de::DeserializeOwned,
    std::time::Duration,
    url::Url,
    uuid::Uuid,
};

struct CatalogItem {
    title:       &'static str,
    description: &'static str,
    category:    Category,
    image_url:   Option<&'static str>,
    base_price:  Amount,
}

const CATALOG: &[CatalogItem] = &[
    CatalogItem {
        title:       "Vintage rangefinder camera",
        description: "1970s rangefinder, recently serviced, comes with the original case.",
        category:    Category::Electronics,
        image_url:   Some("https://images.example.com/camera.jpg"),
        base_price:  1000,
    },
    CatalogItem {
        title:       "Tube guitar amplifier",
        description: "Hand-wired 15W combo, new power tubes, light wear on the tolex.",
        category:    Category::Electronics,
        image_url:   None,
        base_price:  2200,
    },
    CatalogItem {
        title:       "Wool winter overcoat",
        description: "Heavy herringbone overcoat, size 40R, barely worn.",
        category:    Category::Fashion,
        image_url:   None,
        base_price:  450,
    },
    CatalogItem {
        title:       "Mid-century walnut desk",
        description: "Solid walnut writing desk with two drawers, refinished top.",
        category:    Category::Home,
        image_url:   Some("https://images.example.com/desk.jpg"),
        base_price:  3200,
    },
    CatalogItem {
        title:       "Carbon road bike frame",
        description: "54cm frameset, no cracks, headset and seatpost included.",
        category:    Category::Sports,
        image_url:   None,
        base_price:  5400,
    },
    CatalogItem {
        title:       "First-edition fantasy novel",
        description: "First printing with dust jacket, tight binding, light shelf wear.",
        category:    Category::Books,
        image_url:   None,
        base_price:  800,
    },
    CatalogItem {
        title:       "Silver pocket watch",
        description: "Working keywind pocket watch, engraved case, runs a minute fast.",
        category:    Category::Collectibles,
        image_url:   Some("https://images.example.com/watch.jpg"),
        base_price:  1500,
    },
    CatalogItem {
        title:       "Classic scooter, needs work",
        description: "1965 scooter, turns over but does not start, sold as a project.",
        category:    Category::Vehicles,
        image_url:   None,
        base_price:  9000,
    },
    CatalogItem {
        title:       "Box of assorted vinyl records",
        description: "Around 60 LPs, mostly jazz and soul, graded VG or better.",
        category:    Category::Other,
        image_url:   None,
        base_price:  600,
    },
];

const PERSONA_NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy",
];

/// Persona ids are stable across passes so bid histories and watch lists
/// accumulate on the server instead of every pass looking like a new user.
fn persona_id(index: u64) -> UserId {
    Uuid::from_u128((0xD1CEu128 << 96) | u128::from(index))
}

fn persona_name(index: u64) -> String {
    let name = PERSONA_NAMES[(index % PERSONA_NAMES.len() as u64) as usize];
    let round = index / PERSONA_NAMES.len() as u64;
    if round == 0 {
        name.to_string()
    } else {
        format!("{name}{round}")
    }
}

fn bidder_persona(index: u64) -> Bidder {
    Bidder {
        id:   persona_id(index),
        name: persona_name(index),
    }
}

fn seller_persona(index: u64) -> Seller {
    Seller {
        id:         persona_id(index),
        name:       persona_name(index),
        reputation: ((index * 37 + 11) % 100) as i32,
    }
}

fn setup_client() -> Result<Client> {
    Ok(Client::builder().timeout(Duration::from_secs(10)).build()?)
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    let body = response.json::<ErrorBodyResponse>().await?;
    Err(anyhow!("{} ({})", body.error, status))
}

async fn fetch_active_auctions(client: &Client, server_url: &Url) -> Result<Vec<Auction>> {
    let url = server_url.join("v1/auctions")?;
    let auctions: Auctions = parse_response(client.get(url).send().await?).await?;
    Ok(auctions.items)
}

async fn create_random_auction(client: &Client, server_url: &Url, users: u64) -> Result<()> {
    let item = CATALOG
        .choose(&mut rand::thread_rng())
        .ok_or(anyhow!("Catalog is empty"))?;
    let seller = seller_persona(random::<u64>() % users);
    // Vary the opening price so identical catalog items don't all list alike.
    let starting_price = item.base_price + item.base_price * (random::<u64>() % 50) / 100;
    let create = CreateAuction {
        seller:            seller.clone(),
        title:             item.title.to_string(),
        description:       item.description.to_string(),
        category:          item.category,
        image_url:         item.image_url.map(str::to_string),
        quantity:          1,
        starting_price,
        buy_now_price:     (random::<u64>() % 2 == 0).then_some(starting_price * 6),
        min_bid_increment: (starting_price / 20).max(1),
        reserve_price:     (random::<u64>() % 100 < 30).then_some(starting_price * 2),
        duration_secs:     random::<u64>() % 780 + 120,
        featured:          random::<u64>() % 6 == 0,
    };
    let url = server_url.join("v1/auctions")?;
    let auction: Auction = parse_response(client.post(url).json(&create).send().await?).await?;
    tracing::info!(
        "{} listed {} at {} (auction {})",
        seller.name,
        auction.title,
        auction.starting_price,
        auction.id
    );
    Ok(())
}

async fn place_random_bid(
    client: &Client,
    server_url: &Url,
    auction: &Auction,
    users: u64,
) -> Result<()> {
    let bidder = bidder_persona(random::<u64>() % users);
    let step = auction.min_bid_increment.max(1);
    let amount = auction
        .current_price
        .saturating_add(step.saturating_mul(random::<u64>() % 3 + 1));
    let url = server_url.join(&format!("v1/auctions/{}/bids", auction.id))?;
    let body = PlaceBid {
        bidder: bidder.clone(),
        amount,
        auto_bid: true,
    };
    let response = client.post(url).json(&body).send().await?;
    // Losing a bidding race or bumping into the seller's own listing is an
    // expected outcome, not a simulator failure.
    match parse_response::<BidResult>(response).await {
        Ok(result) => tracing::info!(
            "{} bid {} on {} (bid {})",
            bidder.name,
            amount,
            auction.title,
            result.id
        ),
        Err(err) => tracing::info!("Bid of {} on {} rejected: {}", amount, auction.title, err),
    }
    Ok(())
}

async fn attempt_buy_now(
    client: &Client,
    server_url: &Url,
    auction: &Auction,
    users: u64,
) -> Result<()> {
    let buyer = bidder_persona(random::<u64>() % users);
    let url = server_url.join(&format!("v1/auctions/{}/buy-now", auction.id))?;
    let body = BuyNow {
        buyer: buyer.clone(),
    };
    let response = client.post(url).json(&body).send().await?;
    match parse_response::<Auction>(response).await {
        Ok(sold) => tracing::info!(
            "{} bought {} outright for {}",
            buyer.name,
            sold.title,
            sold.current_price
        ),
        Err(err) => tracing::info!("Buy-now on {} rejected: {}", auction.title, err),
    }
    Ok(())
}

async fn toggle_watch(
    client: &Client,
    server_url: &Url,
    auction: &Auction,
    users: u64,
    add: bool,
) -> Result<()> {
    let user = bidder_persona(random::<u64>() % users);
    let url = server_url.join(&format!(
        "v1/auctions/{}/watchers/{}",
        auction.id, user.id
    ))?;
    let request = if add {
        client.put(url)
    } else {
        client.delete(url)
    };
    let result: WatchResult = parse_response(request.send().await?).await?;
    tracing::info!(
        "{} {} {} ({} watchers)",
        user.name,
        if add { "watches" } else { "unwatched" },
        auction.title,
        result.watcher_count
    );
    Ok(())
}

async fn cancel_unbid_auction(client: &Client, server_url: &Url, active: &[Auction]) -> Result<()> {
    let unbid: Vec<&Auction> = active
        .iter()
        .filter(|auction| auction.bid_count == 0)
        .collect();
    match unbid.choose(&mut rand::thread_rng()) {
        Some(auction) => {
            let url = server_url.join(&format!("v1/auctions/{}/cancel", auction.id))?;
            let body = CancelAuction {
                seller_id: auction.seller.id,
            };
            let response = client.post(url).json(&body).send().await?;
            match parse_response::<Auction>(response).await {
                Ok(cancelled) => tracing::info!(
                    "{} withdrew {}",
                    cancelled.seller.name,
                    cancelled.title
                ),
                Err(err) => tracing::info!("Cancel of {} rejected: {}", auction.title, err),
            }
        }
        None => tracing::info!("No listing without bids to withdraw"),
    }
    Ok(())
}

async fn browse(client: &Client, server_url: &Url, active: &[Auction]) -> Result<()> {
    let url = server_url.join("v1/auctions/ending-soon")?;
    let closing: Auctions = parse_response(client.get(url).send().await?).await?;
    tracing::info!("Listings closing within the window: {}", closing.items.len());
    if let Some(auction) = active.choose(&mut rand::thread_rng()) {
        let url = server_url.join(&format!("v1/auctions/{}", auction.id))?;
        let detail: Auction = parse_response(client.get(url).send().await?).await?;
        tracing::info!(
            "{}: price {} after {} bids",
            detail.title,
            detail.current_price,
            detail.bid_count
        );
    }
    Ok(())
}

pub async fn run_simulator(options: RunOptions) -> Result<()> {
    let client = setup_client()?;
    let active = fetch_active_auctions(&client, &options.server_url).await?;
    tracing::info!("Active auctions: {}", active.len());

    let roll = random::<u64>() % 100;
    if active.is_empty() || roll < 25 {
        return create_random_auction(&client, &options.server_url, options.users).await;
    }
    let auction = active
        .choose(&mut rand::thread_rng())
        .ok_or(anyhow!("No active auction to act on"))?;
    if roll < 70 {
        place_random_bid(&client, &options.server_url, auction, options.users).await
    } else if roll < 80 {
        toggle_watch(&client, &options.server_url, auction, options.users, true).await
    } else if roll < 86 {
        match auction.buy_now_price {
            Some(_) => attempt_buy_now(&client, &options.server_url, auction, options.users).await,
            None => place_random_bid(&client, &options.server_url, auction, options.users).await,
        }
    } else if roll < 92 {
        cancel_unbid_auction(&client, &options.server_url, &active).await
    } else if roll < 96 {
        toggle_watch(&client, &options.server_url, auction, options.users, false).await
    } else {
        browse(&client, &options.server_url, &active).await
    }
}

pub async fn seed_market(options: SeedOptions) -> Result<()> {
    let client = setup_client()?;
    for _ in 0..options.count {
        create_random_auction(&client, &options.server_url, PERSONA_NAMES.len() as u64).await?;
    }
    tracing::info!("Seeded {} listings", options.count);
    Ok(())
}
