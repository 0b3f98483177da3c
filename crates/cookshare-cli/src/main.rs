// ============================================================================
// cookshare - CLI front end for the CookShare token gate
// ============================================================================
// Usage:
//   cookshare recipes [--category C] [--search Q]   List featured recipes
//   cookshare experts                               List expert chefs
//   cookshare connect                               Connect the wallet
//   cookshare balance                               Show token balance
//   cookshare claim                                 Claim the daily reward
//   cookshare unlock <ID> [--yes]                   Unlock a recipe
//
// Configuration comes from COOKSHARE_* variables (a .env file is loaded).
// ============================================================================

use anyhow::{anyhow, bail, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use cookshare_core::access::{ChainTask, ConfirmationReply, PromptReply};
use cookshare_core::wallet::{ConnectOutcome, Notifier};
use cookshare_core::{AppConfig, Expert, ExploreStore, Recipe};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "cookshare=info,cookshare_core=info";

/// CookShare recipe explorer
#[derive(Parser)]
#[command(name = "cookshare", version, about = "Browse CookShare recipes and unlock them with tokens")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List featured recipes
    Recipes {
        /// Category: All, Asian, Italian, Mexican, Desserts, Vegan
        #[arg(long)]
        category: Option<String>,

        /// Match against title and chef
        #[arg(long)]
        search: Option<String>,
    },

    /// List expert chefs
    Experts,

    /// Connect the wallet and show the account
    Connect,

    /// Show the connected account's token balance
    Balance,

    /// Claim the daily token reward
    Claim,

    /// Unlock a recipe by paying its token cost
    Unlock {
        /// Recipe ID
        recipe_id: String,

        /// Confirm without prompting
        #[arg(long)]
        yes: bool,
    },
}

/// Notices go to stderr so stdout stays parseable
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

fn format_timestamp(ts: i64) -> String {
    Utc.timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("(invalid: {})", ts))
}

fn recipe_line(recipe: &Recipe) -> String {
    format!(
        "{:<4} {:<22} {:<18} {:<9} {:>4.1}  {:<7} {:<7} {} tokens",
        recipe.id,
        recipe.title,
        recipe.chef,
        recipe.category,
        recipe.rating,
        recipe.time,
        recipe.difficulty.label(),
        recipe.coin_cost
    )
}

fn expert_line(expert: &Expert) -> String {
    format!(
        "{:<4} {:<20} {:<24} {:>4.1}  {:>8}  {:>7}",
        expert.id, expert.name, expert.specialty, expert.rating, expert.students, expert.recipes
    )
}

fn init_logging() -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    init_logging()?;
    if let Err(e) = dotenv {
        debug!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let mut store = ExploreStore::from_config(&config, Arc::new(StderrNotifier));

    match cli.command {
        Commands::Recipes { category, search } => cmd_recipes(&mut store, category, search, cli.json),
        Commands::Experts => cmd_experts(&store, cli.json),
        Commands::Connect => cmd_connect(&mut store, cli.json).await,
        Commands::Balance => cmd_balance(&mut store, cli.json).await,
        Commands::Claim => cmd_claim(&store, cli.json).await,
        Commands::Unlock { recipe_id, yes } => cmd_unlock(&mut store, &recipe_id, yes, cli.json).await,
    }
}

fn cmd_recipes(store: &mut ExploreStore, category: Option<String>, search: Option<String>, json: bool) -> Result<()> {
    if let Some(category) = category {
        store.select_category(&category)?;
    }
    if let Some(search) = search {
        store.set_search_query(search);
    }
    let recipes = store.visible_recipes();

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    println!(
        "{:<4} {:<22} {:<18} {:<9} {:>4}  {:<7} {:<7} {}",
        "ID", "TITLE", "CHEF", "CATEGORY", "RATE", "TIME", "LEVEL", "COST"
    );
    println!("{}", "-".repeat(90));
    for recipe in &recipes {
        println!("{}", recipe_line(recipe));
    }
    println!("\nTotal: {} recipes", recipes.len());
    Ok(())
}

fn cmd_experts(store: &ExploreStore, json: bool) -> Result<()> {
    let experts = store.experts();

    if json {
        println!("{}", serde_json::to_string_pretty(experts)?);
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:<24} {:>4}  {:>8}  {:>7}",
        "ID", "NAME", "SPECIALTY", "RATE", "STUDENTS", "RECIPES"
    );
    println!("{}", "-".repeat(74));
    for expert in experts {
        println!("{}", expert_line(expert));
    }
    println!("\nTotal: {} experts", experts.len());
    Ok(())
}

/// Connect, returning an error for any outcome other than a connected account
async fn connect(store: &mut ExploreStore) -> Result<String> {
    match store.connect_wallet().await {
        ConnectOutcome::Connected(address) => Ok(address),
        ConnectOutcome::ProviderMissing => bail!("No wallet provider configured"),
        ConnectOutcome::Failed(reason) => bail!("Wallet connection failed: {}", reason),
    }
}

async fn cmd_connect(store: &mut ExploreStore, json: bool) -> Result<()> {
    let outcome = store.connect_wallet().await;
    let info = store.session_info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    match outcome {
        ConnectOutcome::Connected(address) => {
            println!("Connected: {} ({})", info.short_address.unwrap_or_default(), address)
        }
        ConnectOutcome::ProviderMissing => println!("Not connected."),
        ConnectOutcome::Failed(reason) => println!("Not connected: {}", reason),
    }
    Ok(())
}

async fn cmd_balance(store: &mut ExploreStore, json: bool) -> Result<()> {
    connect(store).await?;
    let info = store
        .balance()
        .await?
        .ok_or_else(|| anyhow!("Balance unavailable without a ledger contract"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}: {} tokens", info.address, info.balance_formatted);
    }
    Ok(())
}

async fn cmd_claim(store: &ExploreStore, json: bool) -> Result<()> {
    match store.claim_daily_reward() {
        Some(task) => report_task(task, json).await,
        None => {
            println!("No wallet provider; nothing claimed.");
            Ok(())
        }
    }
}

async fn cmd_unlock(store: &mut ExploreStore, recipe_id: &str, yes: bool, json: bool) -> Result<()> {
    store.request_unlock(recipe_id)?;
    let prompt = store
        .unlock_prompt()
        .ok_or_else(|| anyhow!("No unlock pending for recipe {}", recipe_id))?;

    let confirmed = yes || ask(&prompt).await?;
    if !confirmed {
        if let Some(recipe) = store.cancel_unlock() {
            println!("Cancelled unlock of {}.", recipe.title);
        }
        return Ok(());
    }

    match store.confirm_unlock() {
        Some(task) => report_task(task, json).await,
        None => {
            println!("No wallet provider; unlock closed without a transfer.");
            Ok(())
        }
    }
}

/// Ask until the reply is a clear confirm or cancel. End of input cancels.
async fn ask(prompt: &str) -> Result<bool> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout
            .write_all(format!("{} Continue? [yes/no] ", prompt).as_bytes())
            .await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        match ConfirmationReply::classify(&line) {
            PromptReply::Confirm => return Ok(true),
            PromptReply::Cancel => return Ok(false),
            PromptReply::Unclear => println!("Please answer yes or no."),
        }
    }
}

async fn report_task(task: ChainTask, json: bool) -> Result<()> {
    let kind = task.kind().clone();
    let submitted = format_timestamp(task.submitted_at());
    let receipt = task.outcome().await?;

    if json {
        let report = serde_json::json!({
            "call": kind,
            "submitted_at": submitted,
            "receipt": receipt,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} of {} tokens confirmed in {} (submitted {})",
            kind.label(),
            kind.tokens(),
            receipt.transaction_hash,
            submitted
        );
    }
    Ok(())
}
