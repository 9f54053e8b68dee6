//! fxquote CLI - fetch the FX feeds and print a quote for one pair
//!
//! ## Example Usage
//!
//! ```bash
//! # Quote EUR/USD at 0.55% margin on a 10,000 volume
//! fxquote EUR/USD --margin 0.55 --volume 10000
//!
//! # Spreadsheet rate only, write the rendered tables to a file
//! fxquote GBP/USD --no-live --output tables.html
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use fxquote::calculator;
use fxquote::currency::CurrencyPair;
use fxquote::dashboard::{Dashboard, DashboardConfig, DashboardView};
use std::fs;
use std::path::PathBuf;
use std::process;

/// fxquote: FX margin/volume quoting from published sheet feeds
#[derive(Parser)]
#[command(name = "fxquote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "FX margin/volume quoting from published sheet feeds", long_about = None)]
struct Cli {
    /// Currency pair, e.g. EUR/USD or EURUSD
    #[arg(value_name = "PAIR", default_value = "EUR/USD")]
    pair: String,

    /// Margin in percent (0.15 to 3.00, 0.05 steps)
    #[arg(short, long, default_value = "0.55")]
    margin: f64,

    /// Trade volume in base currency units (0 skips amount/revenue figures)
    #[arg(short, long, default_value = "10000")]
    volume: f64,

    /// Write the rendered holiday/events tables to this HTML file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the rates CSV URL
    #[arg(long)]
    rates_url: Option<String>,

    /// Override the events CSV URL
    #[arg(long)]
    events_url: Option<String>,

    /// Override the live endpoint URL
    #[arg(long)]
    live_url: Option<String>,

    /// Skip the live endpoint and use the spreadsheet rate only
    #[arg(long)]
    no_live: bool,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    if let Err(e) = run(cli).await {
        // The CLI analogue of replacing the page body with a red message.
        eprintln!("{}", format!("Error: {}", e).red().bold());
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let pair: CurrencyPair = cli.pair.parse()?;
    let margin = cli.margin / 100.0;
    if !(0.0015..=0.03).contains(&margin) {
        bail!(
            "Margin {}% is outside the offered 0.15%-3.00% range",
            cli.margin
        );
    }
    if cli.volume < 0.0 {
        bail!("Volume must not be negative");
    }

    let mut config = DashboardConfig::for_pair(pair);
    if let Some(url) = cli.rates_url {
        config.rates_url = url;
    }
    if let Some(url) = cli.events_url {
        config.events_url = url;
    }
    if let Some(url) = cli.live_url {
        config.live_endpoint = Some(url);
    }
    if cli.no_live {
        config.live_endpoint = None;
    }

    let mut dashboard = Dashboard::new(config)?;
    let view = dashboard.init(margin, cli.volume).await?;

    print_quote(pair, margin, &dashboard, &view);

    if let Some(path) = cli.output {
        let html = format!(
            "<h2>Upcoming Settlement Holidays</h2>\n{}\n<h2>Upcoming Events</h2>\n{}\n",
            view.holidays_html, view.events_html
        );
        fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nTables written to {}", path.display());
    }

    Ok(())
}

fn print_quote(pair: CurrencyPair, margin: f64, dashboard: &Dashboard, view: &DashboardView) {
    println!(
        "{}  market rate {}  ({}, updated {})",
        pair.to_string().bold(),
        view.market_rate.green(),
        dashboard.rate_source,
        view.last_update
    );
    println!("Margin: {}", calculator::margin_label(margin));
    println!();

    let q = &view.quote;
    println!("Offer rate ({}):    {}", pair, q.offer_rate);
    println!("Inverse rate ({}):  {}", pair.inverse(), q.inverse_rate);
    println!("Exchange {} -> {}", q.base_volume, q.offer_amount);
    println!("Exchange {} -> {}", q.quote_volume, q.inverse_amount);
    println!("Revenue on sell:        {}", q.revenue_on_sell);
    println!("Revenue on buyback:     {}", q.revenue_on_buyback);
}
