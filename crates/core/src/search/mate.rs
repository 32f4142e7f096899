//! Alternating search for forced checkmate

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use shakmaty::{Chess, Color, Move, Position};
use tracing::{debug, trace};

use super::limits::{CancelToken, SearchLimits};
use super::move_to_uci;
use crate::error::{Error, Result};

/// Result of a completed forced-mate search
#[derive(Debug, Clone)]
pub struct MateOutcome {
    pub mate: bool,
    /// First mating move in legal move order
    pub first_move: Option<Move>,
    /// Nodes visited, including abandoned branches
    pub nodes: u64,
}

/// Forced-mate search with a fixed ply bound.
///
/// Plies are single half-moves: a mate in one needs 1 ply, a mate in two
/// needs 3. The side to move is the mating side. It must have some move
/// after which every defence still loses within the remaining plies;
/// stalemating the defender is a failure.
///
/// # Example
/// ```ignore
/// let outcome = MateSearch::new(3)
///     .parallel(true)
///     .deadline(Duration::from_secs(5))
///     .run(&position, Color::Black)?;
/// ```
#[derive(Debug, Clone)]
pub struct MateSearch {
    plies: u32,
    limits: SearchLimits,
    cancel: Option<CancelToken>,
}

impl MateSearch {
    pub fn new(plies: u32) -> Self {
        Self {
            plies,
            limits: SearchLimits::default(),
            cancel: None,
        }
    }

    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.limits.parallel = parallel;
        self
    }

    pub fn deadline(mut self, budget: Duration) -> Self {
        let ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self.limits.deadline_ms = Some(ms);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Searches for a forced mate of `mated`, who must not be on move.
    pub fn run(&self, position: &Chess, mated: Color) -> Result<MateOutcome> {
        if self.plies < 1 {
            return Err(Error::InvalidArgument(format!(
                "ply bound must be at least 1, got {}",
                self.plies
            )));
        }
        if position.turn() == mated {
            return Err(Error::InvalidArgument(format!(
                "{:?} is to move, but the mating side must move first",
                mated
            )));
        }

        let start = Instant::now();
        let shared = Shared {
            deadline: self.limits.deadline_from(start),
            cancel: self.cancel.as_ref(),
            nodes: AtomicU64::new(0),
            best: AtomicUsize::new(usize::MAX),
        };
        let moves = position.legal_moves();

        debug!(
            plies = self.plies,
            moves = moves.len(),
            parallel = self.limits.parallel,
            "forced-mate search started"
        );

        let results: Vec<std::result::Result<bool, Halt>> = if self.limits.parallel {
            moves
                .as_slice()
                .par_iter()
                .enumerate()
                .map(|(index, mv)| shared.root_branch(position, mv, self.plies, index))
                .collect()
        } else {
            let mut results = Vec::with_capacity(moves.len());
            for (index, mv) in moves.iter().enumerate() {
                let result = shared.root_branch(position, mv, self.plies, index);
                let settled = !matches!(result, Ok(false));
                results.push(result);
                if settled {
                    break;
                }
            }
            results
        };

        let nodes = shared.nodes.load(Ordering::Relaxed);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        // Settle in move order so parallel and sequential runs agree
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(false) => {}
                Ok(true) => {
                    let mv = moves[index].clone();
                    debug!(nodes, elapsed_ms, first_move = %move_to_uci(&mv), "forced mate found");
                    return Ok(MateOutcome {
                        mate: true,
                        first_move: Some(mv),
                        nodes,
                    });
                }
                Err(Halt::Illegal(reason)) => return Err(Error::IllegalMove(reason)),
                Err(Halt::Aborted | Halt::Superseded) => {
                    debug!(nodes, elapsed_ms, "forced-mate search aborted");
                    return Err(Error::SearchAborted { nodes });
                }
            }
        }

        debug!(nodes, elapsed_ms, "no forced mate");
        Ok(MateOutcome {
            mate: false,
            first_move: None,
            nodes,
        })
    }
}

/// Does every line from `position` end in checkmate of `color_to_be_mated`
/// within `plies` half-moves?
pub fn forced_mate_in(position: &Chess, color_to_be_mated: Color, plies: u32) -> Result<bool> {
    MateSearch::new(plies)
        .run(position, color_to_be_mated)
        .map(|outcome| outcome.mate)
}

/// Why a branch stopped before reaching an answer
#[derive(Debug)]
enum Halt {
    /// Deadline passed or the search was cancelled
    Aborted,
    /// A lower-indexed root move already mates
    Superseded,
    Illegal(String),
}

struct Shared<'a> {
    deadline: Option<Instant>,
    cancel: Option<&'a CancelToken>,
    nodes: AtomicU64,
    /// Lowest root index proven to mate so far
    best: AtomicUsize,
}

impl Shared<'_> {
    fn root_branch(
        &self,
        position: &Chess,
        mv: &Move,
        plies: u32,
        index: usize,
    ) -> std::result::Result<bool, Halt> {
        let branch = Branch {
            shared: self,
            index,
        };
        let result = branch.forces_mate_after(position, mv, plies);
        match result {
            Ok(true) => {
                self.best.fetch_min(index, Ordering::Relaxed);
            }
            Err(Halt::Superseded) => trace!(index, "root branch abandoned"),
            _ => {}
        }
        result
    }
}

struct Branch<'a> {
    shared: &'a Shared<'a>,
    index: usize,
}

impl Branch<'_> {
    fn tick(&self) -> std::result::Result<(), Halt> {
        let shared = self.shared;
        shared.nodes.fetch_add(1, Ordering::Relaxed);

        if shared.best.load(Ordering::Relaxed) < self.index {
            return Err(Halt::Superseded);
        }
        if shared.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(Halt::Aborted);
        }
        if shared.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Halt::Aborted);
        }
        Ok(())
    }

    /// Mating side to move: some move forces mate.
    fn can_force_mate(&self, position: &Chess, plies: u32) -> std::result::Result<bool, Halt> {
        for mv in position.legal_moves() {
            if self.forces_mate_after(position, &mv, plies)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Plays the mating side's `mv`; every defence must still lose.
    fn forces_mate_after(
        &self,
        position: &Chess,
        mv: &Move,
        plies: u32,
    ) -> std::result::Result<bool, Halt> {
        self.tick()?;

        let next = play(position, mv)?;
        if next.is_checkmate() {
            return Ok(true);
        }
        // A reply and another mating move need two more plies
        if plies < 3 {
            return Ok(false);
        }
        self.mated_after_every_reply(&next, plies - 1)
    }

    /// Defender to move: all replies lose.
    fn mated_after_every_reply(
        &self,
        position: &Chess,
        plies: u32,
    ) -> std::result::Result<bool, Halt> {
        self.tick()?;

        let replies = position.legal_moves();
        if replies.is_empty() {
            // Stalemate
            return Ok(position.is_checkmate());
        }
        for reply in &replies {
            let next = play(position, reply)?;
            if !self.can_force_mate(&next, plies - 1)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn play(position: &Chess, mv: &Move) -> std::result::Result<Chess, Halt> {
    position
        .clone()
        .play(mv.clone())
        .map_err(|e| Halt::Illegal(format!("{}: {}", move_to_uci(mv), e)))
}
