use quadris_engine::{BoardSnapshot, GameBoard, PieceSeed};
use serde::Serialize;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence, as 32 hexadecimal digits (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Print the final board state as JSON to stdout on exit
    #[clap(long)]
    summary_json: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: PieceSeed,
    snapshot: BoardSnapshot,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, summary_json } = arg;

    let board = seed.map_or_else(GameBoard::new, GameBoard::with_seed);
    let mut app = PlayApp::new(board);
    Tui::new().run(&mut app)?;

    let summary = SessionSummary {
        seed: app.board().seed(),
        snapshot: app.board().snapshot(),
    };
    let stats = &summary.snapshot.stats;
    eprintln!("Seed: {}", summary.seed);
    eprintln!(
        "Score: {}, Lines: {}, Level: {}, Pieces: {} ({})",
        stats.score(),
        stats.cleared_lines(),
        stats.level(),
        stats.dropped_pieces(),
        summary.snapshot.status,
    );

    if *summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
