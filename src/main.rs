use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scorecard::calendar::{legend, render_user_block};
use scorecard::{
    ChatMessage, GameId, InMemoryResultStore, Member, MemberDirectory, Scoreboard,
    ScoreboardConfig, SymbolSet,
};

/// Replays a recorded chat log and prints the leaderboard and calendars.
#[derive(Parser, Debug)]
#[command(name = "scorecard", version)]
struct Args {
    /// JSON array of messages: author_id, timestamp, text, mentioned_user_ids
    #[arg(long)]
    input: PathBuf,

    /// JSON array of members ({"id": .., "names": [..]}) used to resolve @handles
    #[arg(long)]
    members: Option<PathBuf>,

    /// Day to compute stats for (YYYY-MM-DD); defaults to today in the configured offset
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[arg(long, default_value = "wordle")]
    game: GameId,

    /// Months of calendar per player (1-12); overrides SCORECARD_MONTH_COUNT
    #[arg(long)]
    months: Option<u8>,

    /// emoji or ascii; overrides SCORECARD_SYMBOL_SET
    #[arg(long)]
    symbols: Option<SymbolSet>,

    /// Print the leaderboard as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorecard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ScoreboardConfig::from_env().context("reading SCORECARD_* settings")?;
    if let Some(months) = args.months {
        config.month_count = months;
    }
    if let Some(symbols) = args.symbols {
        config.symbol_set = symbols;
    }

    let messages: Vec<ChatMessage> = read_json(&args.input)?;
    let directory = match &args.members {
        Some(path) => MemberDirectory::new(read_json::<Vec<Member>>(path)?),
        None => MemberDirectory::default(),
    };

    let board = Scoreboard::builder(Arc::new(InMemoryResultStore::new()))
        .with_directory(directory)
        .with_config(config)
        .build()?;

    let as_of = match args.as_of {
        Some(day) => day,
        None => board.config().day_boundary()?.local_date(Utc::now()),
    };
    info!(messages = messages.len(), game = %args.game, %as_of, "Replaying chat log");

    let report = board.ingest_log(&messages).await?;
    info!("{}", report.summary());

    if args.json {
        let rows = board.get_leaderboard(args.game, as_of).await?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", board.leaderboard_text(args.game, as_of).await?);

    let config = board.config().clone();
    if config.symbol_set == SymbolSet::Ascii {
        if let Some(game) = board.registry().get(args.game) {
            println!();
            println!("{}", legend(game));
        }
    }
    for player in board.players(args.game).await? {
        let months = board
            .get_calendar(&player, args.game, config.month_count, as_of, config.symbol_set)
            .await?;
        println!();
        println!("{}", render_user_block(&player, &months));
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
