//! Roundnet Scoreboard Demo
//!
//! Plays a scripted match against an in-memory store and checks that a
//! fresh load reproduces the same state.

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roundnet::{
    core::hash::short_hex,
    game::view::OverlayView,
    sync::{ChannelSync, MemoryStore},
    GameSettings, Player, Scope, Scoreboard, ServeConfiguration, Team, VERSION,
};

const CHANNEL: &str = "demo-court";

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    info!("Roundnet Scoreboard v{}", VERSION);

    let settings = GameSettings::from_env().context("invalid scoreboard settings")?;
    info!(
        win_points = settings.win_points,
        hardcap = settings.hardcap,
        set_mode = %settings.set_mode,
        "settings loaded"
    );

    demo_match(settings)
}

/// Winner of a scripted rally.
fn rally_winner(set: u8, point: u32) -> Team {
    if (point * 7 + set as u32 * 3) % 5 < 3 {
        Team::A
    } else {
        Team::B
    }
}

fn demo_match(settings: GameSettings) -> Result<()> {
    info!("=== Starting Demo Match ===");

    let store = MemoryStore::new();
    let mut sync = ChannelSync::new(store, CHANNEL);
    let mut board = Scoreboard::new(settings)?;
    sync.publish(&board)?;

    let configs: Vec<ServeConfiguration> = ServeConfiguration::all().collect();
    let max_sets = settings.set_mode.max_sets();

    for set in 1..=max_sets {
        if set > 1 {
            sync.change_set(&mut board, 1)?;
        }
        let config = configs[(set as usize - 1) % configs.len()];
        sync.set_serve_configuration(&mut board, set, config)?;
        info!(set, server = %config.starting_server, receiver = %config.starting_receiver, "set started");

        let mut point = 0;
        while board.set_winner(set).is_none() {
            let team = rally_winner(set, point);
            let score = board.state().score(set, team) + 1;
            sync.edit_score(&mut board, team, set, score)?;
            point += 1;
        }

        let (a, b) = board.state().scores(set);
        info!(set, score_a = a, score_b = b, winner = ?board.set_winner(set), "set finished");

        if board.match_winner().is_some() {
            break;
        }
    }

    let Some(winner) = board.match_winner() else {
        bail!("match ended without a winner");
    };
    sync.edit_squad_score(&mut board, winner, 1)?;

    // Print final results
    info!("=== Match Results ===");
    let view = OverlayView::recompute(&board);
    for summary in &view.sets {
        info!(
            "Set {}: {} - {}{}",
            summary.set,
            summary.score_a,
            summary.score_b,
            if summary.overtime { " (overtime)" } else { "" }
        );
    }
    info!("Winner: team {} ({} - {})", winner, view.set_scores[0], view.set_scores[1]);

    let stats = board.statistics(Scope::WholeMatch);
    for team in Team::ALL {
        let team_stats = stats.team(team);
        info!(
            "Team {}: {}/{} breaks ({}%)",
            team, team_stats.breaks, team_stats.break_opportunities, team_stats.break_percentage
        );
    }
    for player in Player::ALL {
        let p = stats.player(player);
        info!(
            "Player {}: sideouts {}/{} ({}%), breaks {}/{} ({}%)",
            player,
            p.sideouts,
            p.sideout_opportunities,
            p.sideout_percentage,
            p.breaks,
            p.break_opportunities,
            p.break_percentage
        );
    }
    if stats.unattributed_points > 0 {
        info!(points = stats.unattributed_points, "points without rotation");
    }
    info!("Events logged: {}", board.log().len());

    // Verify the store round trip
    info!("=== Verifying Store Round Trip ===");
    let hash = board.state().compute_hash();
    let reloaded = sync.load()?;
    let reload_hash = reloaded.state().compute_hash();

    info!("Local State Hash:    {}", hex::encode(hash));
    info!("Reloaded State Hash: {}", hex::encode(reload_hash));

    if hash != reload_hash || reloaded.log() != board.log() {
        bail!("reloaded scoreboard differs: {} vs {}", short_hex(&hash), short_hex(&reload_hash));
    }
    info!("ROUND TRIP VERIFIED: Hashes match!");
    Ok(())
}
