//! hagere-admin: operator console for winning distributions
//!
//! talks to the hagere online backend; all settlement math happens there.
//! this binary fetches, reviews and approves per-game payout shares.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use hagere_client::{AdminClient, ClientConfig, Session, API_URL_ENV};
use hagere_distribution::{
    summarize_games, ApprovalAction, ApprovalState, DistributionRecord, ReviewSurface,
    StatusFilter,
};

#[derive(Parser)]
#[command(name = "hagere-admin")]
#[command(about = "operator console for hagere online winning distributions", long_about = None)]
struct Cli {
    /// backend base URL
    #[arg(long, env = API_URL_ENV, default_value = hagere_client::DEFAULT_BASE_URL)]
    api_url: String,

    /// bearer token for the admin session
    #[arg(long, env = "HAGERE_API_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List games with summary cards
    Games {
        /// start of the date range (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start: Option<String>,

        /// end of the date range
        #[arg(long)]
        end: Option<String>,
    },

    /// Review one game's distribution rows
    Distribute {
        /// game to fetch
        #[arg(long)]
        game_id: String,

        /// force the backend to recompute shares
        #[arg(long)]
        redistribute: bool,

        /// search term over game id, owner and phone
        #[arg(long, default_value = "")]
        search: String,

        /// status filter: all, approved or pending
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// zero-based page
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// rows per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },

    /// Approve a game's pending distribution rows
    Approve {
        /// game to approve
        #[arg(long)]
        game_id: String,

        /// optional note recorded with the approval
        #[arg(long)]
        note: Option<String>,

        /// confirm the dispatch; without it only the summary is shown
        #[arg(long)]
        yes: bool,
    },

    /// Cross-game distribution ledger
    Ledger {
        /// start of the date range
        #[arg(long)]
        start: Option<String>,

        /// end of the date range
        #[arg(long)]
        end: Option<String>,

        /// restrict to one beneficiary phone
        #[arg(long)]
        phone: Option<String>,
    },

    /// Ledger-wide winning summary
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hagere_admin=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!("backend: {}", cli.api_url);
    let session = match cli.token {
        Some(token) => Session::with_token(token),
        None => {
            warn!("no token set; backend will reject protected endpoints");
            Session::new()
        }
    };
    let client = AdminClient::new(ClientConfig::new(&cli.api_url), session)?;

    match cli.command {
        Commands::Games { start, end } => handle_games(&client, start, end).await,
        Commands::Distribute {
            game_id,
            redistribute,
            search,
            status,
            page,
            page_size,
        } => handle_distribute(&client, &game_id, redistribute, &search, status, page, page_size)
            .await,
        Commands::Approve { game_id, note, yes } => {
            handle_approve(&client, &game_id, note, yes).await
        }
        Commands::Ledger { start, end, phone } => {
            handle_ledger(&client, start, end, phone).await
        }
        Commands::Summary => handle_summary(&client).await,
    }
}

async fn handle_games(
    client: &AdminClient,
    start: Option<String>,
    end: Option<String>,
) -> Result<()> {
    let games = client
        .games_by_date_range(parse_date_arg(start.as_deref())?, parse_date_arg(end.as_deref())?)
        .await?;

    let summary = summarize_games(&games);
    println!("games: {}  completed: {}", summary.total_games, summary.completed_games);
    println!(
        "players: {}  bets: {}  cuts: {}",
        summary.total_players,
        money(summary.total_bets),
        money(summary.total_cuts)
    );
    println!();

    println!(
        "{:<14} {:<20} {:>8} {:>10} {:>10}  status",
        "game", "date", "players", "bet", "cut"
    );
    for game in &games {
        println!(
            "{:<14} {:<20} {:>8} {:>10} {:>10}  {}",
            game.game_id,
            date(game.date),
            game.number_of_players,
            money(game.bet_amount),
            money(game.cut_amount),
            if game.game_completed { "completed" } else { "in progress" }
        );
    }
    if games.is_empty() {
        println!("no games found; try widening the date range");
    }

    Ok(())
}

/// fetch one game into a review surface, applying the view flags
async fn load_surface(
    client: &AdminClient,
    game_id: &str,
    redistribute: bool,
    search: &str,
    status: StatusFilter,
    page: usize,
    page_size: usize,
) -> Result<ReviewSurface> {
    let mut surface = ReviewSurface::new(page_size);
    let token = surface.begin_fetch();
    let rows = client
        .distribute_winnings(game_id, redistribute)
        .await
        .with_context(|| format!("fetching distribution for {game_id}"))?;
    surface.apply_fetch(token, rows);

    surface.set_search(search);
    surface.set_status_filter(status);
    surface.set_page(page);
    Ok(surface)
}

async fn handle_distribute(
    client: &AdminClient,
    game_id: &str,
    redistribute: bool,
    search: &str,
    status: StatusFilter,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let surface =
        load_surface(client, game_id, redistribute, search, status, page, page_size).await?;

    let summary = surface.summary();
    println!(
        "total winning: {}  player winning: {}  distributable: {}  distribution: {}",
        money(summary.total_winning),
        money(summary.player_winning),
        money(summary.total_distributable),
        money(summary.total_amount)
    );
    println!(
        "rows: {}  approved: {}  pending: {}",
        surface.filtered().len(),
        summary.approved_count,
        summary.pending_count
    );
    println!();

    render_rows(&surface.page_rows());
    println!(
        "page {}/{}  (filter: {} '{}')",
        surface.page() + 1,
        surface.page_count(),
        surface.status_filter().label(),
        surface.search_term()
    );

    Ok(())
}

async fn handle_approve(
    client: &AdminClient,
    game_id: &str,
    note: Option<String>,
    yes: bool,
) -> Result<()> {
    let mut surface = load_surface(
        client,
        game_id,
        false,
        "",
        StatusFilter::All,
        0,
        hagere_distribution::DEFAULT_PAGE_SIZE,
    )
    .await?;

    let batch = surface.approval_batch(note);
    if !batch.spans_single_game() {
        bail!("refusing to approve: batch spans more than one game");
    }

    // approval summary: overall totals, then the grouped breakdowns
    let totals = batch.totals();
    println!(
        "pending approvals: {}  total amount: {}  players: {}",
        totals.count,
        money(totals.total_amount),
        totals.total_players
    );

    println!("\nby phone:");
    for group in batch.by_phone() {
        println!(
            "  {:<14} {:<16} {:>5} {:>12}",
            group.key,
            group.owner().unwrap_or("unknown"),
            group.count(),
            money(group.total_amount)
        );
    }
    println!("by role:");
    for group in batch.by_role() {
        println!("  {:<14} {:>5} {:>12}", group.key, group.count(), money(group.total_amount));
    }
    if let Some(note) = &batch.note {
        println!("note: {note}");
    }

    let mut approval = ApprovalState::default();
    if !approval.can_confirm(&batch) {
        println!("\nnothing to approve for {game_id}");
        return Ok(());
    }
    if !yes {
        println!("\nreview the summary above, then re-run with --yes to confirm");
        return Ok(());
    }

    // confirm is scoped to the batch's game; the surface guarantees one game
    let target = batch.game_id().map(str::to_string);
    let Some(target) = target else {
        return Ok(());
    };

    approval = approval.reduce(ApprovalAction::Confirm);
    info!(game_id = %target, count = batch.len(), "dispatching approval");

    approval = match client.approve_distribution(&target).await {
        Ok(approved) => approval.reduce(ApprovalAction::ServerOk { approved }),
        Err(e) => approval.reduce(ApprovalAction::ServerError { message: e.to_string() }),
    };

    match &approval {
        ApprovalState::Succeeded { approved } => {
            println!("\nApproval Successful! {} records approved", approved.len());
        }
        ApprovalState::Failed { error } => {
            println!("\napproval failed: {error}");
            println!("re-run with --yes to retry");
        }
        // confirm was dispatched, so the machine cannot still be idle/loading
        state => warn!(?state, "unexpected approval state"),
    }
    let succeeded = approval.is_succeeded();
    approval.reduce(ApprovalAction::Close);

    if succeeded {
        // explicit refresh so the pending view reflects the server's state
        let token = surface.begin_fetch();
        let rows = client.distribute_winnings(&target, false).await?;
        surface.apply_fetch(token, rows);
        surface.set_status_filter(StatusFilter::Pending);
        println!("pending after refresh: {}", surface.pending_count());
        surface.reset();
    }

    if succeeded {
        Ok(())
    } else {
        bail!("distribution for {game_id} was not approved")
    }
}

async fn handle_ledger(
    client: &AdminClient,
    start: Option<String>,
    end: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let rows = client
        .winning_distribution(
            parse_date_arg(start.as_deref())?,
            parse_date_arg(end.as_deref())?,
            phone.as_deref(),
        )
        .await?;

    // per-beneficiary amounts are the only safe sum across games
    let total_amount: f64 = rows.iter().map(|r| r.amount).sum();
    println!("showing {} results  total amount: {}", rows.len(), money(total_amount));
    println!();
    render_rows(&rows);

    Ok(())
}

async fn handle_summary(client: &AdminClient) -> Result<()> {
    let summary = client.winning_summary().await?;

    println!("games:          {}", summary.total_games);
    println!("total winning:  {}", money(summary.total_winning));
    println!("distributable:  {}", money(summary.total_distributable));
    println!("distributed:    {}", money(summary.total_distributed));
    println!("approved:       {}", summary.approved_count);
    println!("pending:        {}", summary.pending_count);

    Ok(())
}

fn render_rows(rows: &[DistributionRecord]) {
    println!(
        "{:<14} {:<20} {:<16} {:<14} {:>9} {:>7} {:>12} {:<9} {:<9}",
        "game", "date", "owner", "phone", "players", "pct", "amount", "deposit", "status"
    );
    for row in rows {
        println!(
            "{:<14} {:<20} {:<16} {:<14} {:>4}/{:>4} {:>6.1}% {:>12} {:<9} {:<9}",
            row.game_id,
            date(row.date),
            row.owner,
            row.phone,
            row.your_players,
            row.total_players,
            row.your_percent,
            money(row.amount),
            if row.deposited { "yes" } else { "pending" },
            if row.approved { "approved" } else { "pending" }
        );
    }
    if rows.is_empty() {
        println!("no distribution records found");
    }
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn date(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "n/a".into(),
    }
}

/// accept plain dates or full RFC 3339 timestamps
fn parse_date_arg(arg: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let Some(arg) = arg else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(arg) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    let day = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {arg}"))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .context("invalid time of day")?;
    Ok(Some(midnight.and_utc()))
}
