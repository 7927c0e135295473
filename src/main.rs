//! PredictX server and command-line entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use predictx::api::{create_router, AppState};
use predictx::betting::{BetQuote, PlaceBetRequest, QUICK_AMOUNTS};
use predictx::config::Config;
use predictx::error::WalletError;
use predictx::market::Category;
use predictx::metrics;
use predictx::portfolio::BetFilter;
use predictx::service::{HttpMarketService, MarketService, MockMarketService};
use predictx::utils::{format_odds, format_signed_usd, format_usd, shutdown_signal};
use predictx::wallet::{
    short_address, FileStore, LocalWalletProvider, MemoryStore, SessionStore, WalletProvider,
    WalletSessionManager,
};

/// PredictX prediction-market client.
#[derive(Parser, Debug)]
#[command(name = "predictx")]
#[command(about = "Browse prediction markets, quote payouts and place bets")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// List markets.
    Markets {
        /// Only markets in this category.
        #[arg(short, long)]
        category: Option<Category>,

        /// Case-insensitive search over title and description.
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show portfolio stats, bets and recent activity.
    Portfolio {
        /// Which bets to list: active, closed or all.
        #[arg(short, long, default_value = "active")]
        status: BetFilter,
    },

    /// Quote the payout for a stake.
    Payout {
        /// Stake in dollars.
        #[arg(long)]
        amount: Decimal,

        /// Outcome probability in percent.
        #[arg(long)]
        probability: Decimal,
    },

    /// Place a simulated bet.
    PlaceBet {
        /// Market id, e.g. `c1`.
        #[arg(long)]
        market: String,

        /// Outcome id, e.g. `c1-1`.
        #[arg(long)]
        outcome: String,

        /// Stake in dollars.
        #[arg(long)]
        amount: Decimal,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let loaded = Config::load();

    // Initialize logging
    let (log_level, log_json) = match &loaded {
        Ok(config) => (config.rust_log.clone(), config.log_json),
        Err(_) => ("info".to_string(), false),
    };
    let filter = if args.verbose {
        EnvFilter::new("predictx=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(log_json.then(|| fmt::layer().json()))
        .with((!log_json).then(fmt::layer))
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Markets { category, search }) => {
            cmd_markets(loaded?, category, search).await
        }
        Some(Command::Portfolio { status }) => cmd_portfolio(loaded?, status).await,
        Some(Command::Payout {
            amount,
            probability,
        }) => {
            cmd_payout(amount, probability);
            Ok(())
        }
        Some(Command::PlaceBet {
            market,
            outcome,
            amount,
        }) => cmd_place_bet(loaded?, market, outcome, amount).await,
        Some(Command::Serve { port }) => cmd_serve(loaded?, port.or(args.port)).await,
        None => cmd_serve(loaded?, args.port).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(loaded: predictx::Result<Config>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PREDICTX - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match loaded {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Checking wallet... ");
    match &config.wallet_private_key {
        Some(key) => match LocalWalletProvider::from_private_key(key) {
            Ok(provider) => {
                println!("OK");
                println!("  Wallet address: {}", provider.address());
            }
            Err(e) => {
                println!("FAILED");
                println!("  Error: {}", e);
                return Err(anyhow::anyhow!("Private key invalid"));
            }
        },
        None => println!("NONE (connect will report a missing provider)"),
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port: {}", config.port);
    println!("  Origin: {}", config.origin());
    println!(
        "  Storage: {}",
        config.storage_path.as_deref().unwrap_or("memory")
    );
    println!(
        "  Backend: {}",
        config.backend_url.as_deref().unwrap_or("built-in fixtures")
    );
    println!(
        "  Simulated latency: {}",
        if config.simulate_latency { "Enabled" } else { "Disabled" }
    );
    println!(
        "  Metrics: {}",
        if config.metrics_enabled { "Enabled" } else { "Disabled" }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// List markets, filtered by category or search.
async fn cmd_markets(
    config: Config,
    category: Option<Category>,
    search: Option<String>,
) -> anyhow::Result<()> {
    let service = build_service(&config)?;

    let markets = service.browse_markets(category, search.as_deref()).await?;

    println!("======================================================================");
    match category {
        Some(category) => println!("{} MARKETS", category.label().to_uppercase()),
        None => println!("ALL MARKETS"),
    }
    println!("======================================================================");

    if markets.is_empty() {
        println!("No markets found");
    }
    for market in &markets {
        let star = if market.featured { "*" } else { " " };
        println!("{} [{}] {} ({} Vol., ends {})", star, market.id, market.title, market.volume, market.end_date);
        for outcome in &market.outcomes {
            println!("      {:<12} {:>3}%  ({})", outcome.name, outcome.probability, outcome.id);
        }
    }

    println!("----------------------------------------------------------------------");
    println!("{} market(s)", markets.len());
    Ok(())
}

/// Print the dashboard.
async fn cmd_portfolio(config: Config, status: BetFilter) -> anyhow::Result<()> {
    let service = build_service(&config)?;

    let stats = service.fetch_portfolio_stats().await?;
    let bets = match status {
        BetFilter::Active => service.fetch_active_bets().await?,
        BetFilter::Closed => service.fetch_closed_bets().await?,
        BetFilter::All => service.fetch_all_bets().await?,
    };
    let activity = service.fetch_recent_activity().await?;

    println!("======================================================================");
    println!("PORTFOLIO");
    println!("======================================================================");
    println!("  Total Invested: {}", format_usd(stats.total_invested));
    println!("  Current Value:  {}", format_usd(stats.current_value));
    println!("  Profit/Loss:    {}", format_signed_usd(stats.total_profit_loss));
    println!("  Active Bets:    {}", stats.active_bets_count);
    println!("  Win Rate:       {}%", stats.win_rate);

    println!("----------------------------------------------------------------------");
    println!("{} bets:", status);
    for bet in &bets {
        println!(
            "  [{}] {} - {} {} @ {} -> {} ({}, {})",
            bet.id,
            bet.market_title,
            bet.selected_outcome,
            format_usd(bet.bet_amount),
            format_odds(bet.odds),
            format_usd(bet.potential_payout),
            bet.status,
            bet.placed_at
        );
    }

    println!("----------------------------------------------------------------------");
    println!("Recent activity:");
    for item in &activity {
        println!(
            "  {} {:<40} {}",
            item.timestamp,
            item.description,
            format_signed_usd(item.amount)
        );
    }
    Ok(())
}

/// Print a payout quote.
fn cmd_payout(amount: Decimal, probability: Decimal) {
    let quote = BetQuote::new(amount, probability);

    println!("Stake:        {}", format_usd(quote.amount));
    println!("Probability:  {}%", quote.probability);
    println!("Payout:       {}", format_usd(quote.display_payout()));
    println!("Profit:       {}", format_signed_usd(quote.profit));
    println!("Return:       {}%", quote.return_pct().round_dp(2));

    let presets: Vec<String> = QUICK_AMOUNTS
        .iter()
        .map(|a| {
            let quote = BetQuote::new(Decimal::from(*a), probability);
            format!("${} -> {}", a, format_usd(quote.display_payout()))
        })
        .collect();
    println!("Quick amounts: {}", presets.join(", "));
}

/// Place a simulated bet and print the result.
async fn cmd_place_bet(
    config: Config,
    market_id: String,
    outcome_id: String,
    amount: Decimal,
) -> anyhow::Result<()> {
    let service = build_service(&config)?;

    let market = service
        .fetch_market_by_id(&market_id)
        .await?
        .with_context(|| format!("market {} not found", market_id))?;
    let outcome = market
        .outcome(&outcome_id)
        .with_context(|| format!("market {} has no outcome {}", market_id, outcome_id))?
        .clone();

    let quote = BetQuote::new(amount, Decimal::from(outcome.probability));
    let result = service
        .place_bet(PlaceBetRequest::new(&market.id, &outcome.id, amount))
        .await?;

    if result.success {
        println!("{}", result.message);
        println!(
            "  {} on \"{}\" - Potential payout: {}",
            format_usd(amount),
            outcome.name,
            format_usd(quote.display_payout())
        );
        if let Some(bet_id) = &result.bet_id {
            println!("  Bet id: {}", bet_id);
        }
        Ok(())
    } else {
        println!("FAILED: {}", result.message);
        Err(anyhow::anyhow!(result.message))
    }
}

/// Run the HTTP API until a shutdown signal.
async fn cmd_serve(config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config.validated().map_err(|e| {
        error!("{}", e);
        e
    })?;
    info!("Configuration loaded successfully");

    let metrics_handle = if config.metrics_enabled {
        metrics::install_prometheus()
    } else {
        None
    };

    let service = build_service(&config)?;
    let wallet = build_wallet(&config)?;

    let state = AppState::new(service, wallet.clone()).with_metrics(metrics_handle);

    match wallet.restore().await {
        Some(address) => info!("Restored wallet session for {}", short_address(&address)),
        None => info!("No wallet session to restore"),
    }
    let _accounts_listener = wallet.listen();

    let port = port_override.unwrap_or(config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    state.set_ready(true);
    axum::serve(listener, create_router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.set_ready(false);
    info!("predictx stopped");
    Ok(())
}

fn build_service(config: &Config) -> predictx::Result<Arc<dyn MarketService>> {
    match &config.backend_url {
        Some(url) => {
            info!("Using backend at {}", url);
            Ok(Arc::new(HttpMarketService::new(url)?))
        }
        None => Ok(Arc::new(MockMarketService::with_latency(
            config.simulate_latency,
        ))),
    }
}

fn build_wallet(config: &Config) -> predictx::Result<WalletSessionManager> {
    let provider: Option<Arc<dyn WalletProvider>> = match &config.wallet_private_key {
        Some(key) => {
            let provider = LocalWalletProvider::from_private_key(key)
                .map_err(WalletError::from)?
                .preauthorized();
            info!("Wallet provider ready for {}", short_address(&provider.address()));
            Some(Arc::new(provider))
        }
        None => {
            warn!("WALLET_PRIVATE_KEY not set; wallet connects will fail");
            None
        }
    };

    let store: Arc<dyn SessionStore> = match &config.storage_path {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(MemoryStore::new()),
    };

    Ok(WalletSessionManager::new(provider, store, config.origin()))
}
