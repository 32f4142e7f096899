//! Prints the properties of a position or of every position in a PGN file
//!
//! ```text
//! properties <fen> [--mate <plies>] [--text]
//! properties --pgn <file> [--mate <plies>] [--text]
//! ```
//!
//! Output is JSON unless `--text` asks for one readable line per property.

use chess_properties_core::analysis::{analyze_game, GameAnalysis};
use chess_properties_core::parser::parse_pgn_file;
use chess_properties_core::{
    AnalysisType, MetaBoard, Metadata, PatternDetector, Property, SearchLimits,
};

fn usage() -> ! {
    eprintln!("Usage: properties <fen> [--mate <plies>] [--text]");
    eprintln!("       properties --pgn <file> [--mate <plies>] [--text]");
    std::process::exit(1);
}

fn fail(context: &str, e: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", context, e);
    std::process::exit(1);
}

fn describe(property: &Property) -> String {
    format!("{}: {}", property.display_name(), property.description())
}

fn metadata_text(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return "no properties".to_string();
    }
    metadata
        .properties()
        .iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join("\n")
}

fn games_text(analyses: &[GameAnalysis]) -> String {
    let mut lines = Vec::new();
    for analysis in analyses {
        lines.push(analysis.summary.clone());
        for annotation in &analysis.annotations {
            let san = annotation.san.as_deref().unwrap_or("start");
            for property in &annotation.properties {
                lines.push(format!("  {:>3} {:<8} {}", annotation.ply, san, describe(property)));
            }
        }
    }
    lines.join("\n")
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let mut fen = None;
    let mut pgn = None;
    let mut mate = None;
    let mut text = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--pgn" => pgn = Some(args.next().unwrap_or_else(|| usage())),
            "--mate" => {
                let plies = args.next().and_then(|p| p.parse::<u32>().ok());
                mate = Some(plies.unwrap_or_else(|| usage()));
            }
            "--text" => text = true,
            _ if fen.is_none() => fen = Some(arg),
            _ => usage(),
        }
    }

    let mut detector = PatternDetector::new().limits(SearchLimits::default().parallel(true));
    if let Some(plies) = mate {
        detector = detector.with_mate_search(plies);
    }

    let output = match (fen, pgn) {
        (Some(fen), None) => {
            let mut board = MetaBoard::from_fen(AnalysisType::Snapshot, &fen)
                .unwrap_or_else(|e| fail("Invalid position", e));
            let metadata = board
                .annotate_all(&detector)
                .unwrap_or_else(|e| fail("Analysis failed", e));
            if text {
                Ok(metadata_text(metadata))
            } else {
                serde_json::to_string_pretty(metadata)
            }
        }
        (None, Some(path)) => {
            let games = parse_pgn_file(&path)
                .unwrap_or_else(|e| fail(&format!("Failed to read {}", path), e));
            let analyses = games
                .iter()
                .map(|game| analyze_game(game, &detector))
                .collect::<Result<Vec<_>, _>>()
                .unwrap_or_else(|e| fail("Analysis failed", e));
            if text {
                Ok(games_text(&analyses))
            } else {
                serde_json::to_string_pretty(&analyses)
            }
        }
        _ => usage(),
    };

    match output {
        Ok(out) => println!("{}", out),
        Err(e) => fail("Failed to serialize", e),
    }
}
