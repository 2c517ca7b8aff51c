use std::time::Duration;
use zugzwang_board::{Board, Move, PieceType::*};
use std::cmp::{min, max};

use super::move_ordering::{order_moves, RatedMove};
use super::pv_line::PVLine;
use super::history::HistoryTable;
use crate::evaluation::{evaluate_position, non_pawn_material, Evaluation, EvalScore, PawnCache};
use crate::trasposition::{TTable, NodeType};
use crate::time::TimeManager;

// The maximum depth that will be reached under any circumstances
const LIMIT_DEPTH: u8 = 100;

// Number of killer moves to store in each ply
const MAX_KILLERS: usize = 2;

// Depth to reduce a null move search
const NULL_MOVE_REDUCTION: u8 = 2;

// Width for the aspiration window, and how many times it may widen before
// falling back to the full window for this depth
const ASP_WINDOW: EvalScore = 50;
const ASP_MAX_ATTEMPTS: u8 = 5;

// Number of legal moves analyzed before late move reductions kick in
const LMR_MOVES: usize = 3;

// Margins for reverse futility and (single-depth) futility pruning
const REV_FUTILITY_MARGIN: EvalScore = 300;
const FUTILITY_MARGIN: EvalScore = 300;

// Non-pawn material (cp) a side needs before null-move pruning is attempted,
// to avoid zugzwang in bare-king-and-pawns endings
const NULL_MOVE_MATERIAL_THRESHOLD: EvalScore = 2000;

// A score past which a position is considered a forced mate; see
// `Evaluation::is_mate`.
const MATE_FOUND_THRESHOLD: EvalScore = 90_000;

// Typedef for the killer moves table
pub type Killers = [[Move; MAX_KILLERS]; LIMIT_DEPTH as usize + 2];

// Typedef for the pair (alpha, beta) of score bounds
pub type Bounds = (Evaluation, Evaluation);

// Difficulty level 1..4, mapped by the engine facade to a (depth, time) pair.
// `SearchOptions` also allows bypassing that table directly, for tests.
pub struct SearchOptions {
    pub target_depth: u8,
    pub time_budget: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { target_depth: 5, time_budget: Duration::from_secs(15) }
    }
}

// SearchResult is a pair of evaluation and best move, so we can return the
// current evaluation to the front-end in addition to the best move
pub struct SearchResult {
    pub score: Evaluation,
    pub best_move: Option<Move>,
}

// The Search struct contains all necessary parameters for one `find_best`
// call. The transposition table and pawn cache outlive the search (they are
// owned by the `Engine` and persist across calls); killers, history and the
// timer are scoped to this call only.
pub struct Search<'a> {
    timer: TimeManager,
    max_depth: u8,
    past_positions: Vec<u64>,
    killers: Killers,
    tt: &'a mut TTable,
    pawn_cache: &'a PawnCache,
    node_count: u32,
    history: HistoryTable,
}

impl<'a> Search<'a> {
    pub fn new(tt: &'a mut TTable, pawn_cache: &'a PawnCache, options: &SearchOptions, past_positions: &[u64]) -> Self {
        Self {
            timer: TimeManager::new(options.time_budget),
            max_depth: min(options.target_depth, LIMIT_DEPTH),
            tt,
            pawn_cache,
            killers: [[Move::empty(); MAX_KILLERS]; LIMIT_DEPTH as usize + 2],
            node_count: 0,
            past_positions: past_positions.to_vec(),
            history: HistoryTable::new(),
        }
    }

    pub fn nodes(&self) -> u32 {
        self.node_count
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    pub fn timed_out(&self) -> bool {
        self.timer.times_up()
    }

    // Wrapper function over the negamax algorithm, returning the best move
    // along with the associated score
    pub fn find_best(&mut self, board: &Board) -> SearchResult {
        // If there is only one legal move, return it immediately
        let legal_moves = board.legal_moves();
        if legal_moves.len() == 1 {
            return SearchResult { score: Evaluation::new(0), best_move: Some(legal_moves[0]) };
        }

        // Effective depth is clamped by position complexity: highly branchy
        // positions (e.g. the opening, or middlegames with many pieces loose)
        // would otherwise blow the time budget on the first couple of plies.
        let effective_depth = if legal_moves.len() > 40 {
            min(self.max_depth.saturating_sub(1), 4)
        } else if legal_moves.len() > 25 {
            min(self.max_depth, 5)
        } else {
            self.max_depth
        };

        let mut pv_line = PVLine::new();

        // The root is always searched once at depth 1 first, both to seed a
        // score for the depth-2 aspiration window and to guarantee at least
        // one complete iteration to fall back on.
        let mut score = self.negamax(board, 1, 0, (Evaluation::min_val(), Evaluation::max_val()), true, false, &mut pv_line);

        if self.timer.times_up() {
            return self.fallback_result(board, &legal_moves);
        }

        let mut best_move = pv_line.first();
        let mut previous_score = score;

        let mut depth = 2;
        while depth <= effective_depth {
            let (window_score, line) = self.search_with_aspiration(board, depth, previous_score);

            if self.timer.times_up() {
                break;
            }

            score = window_score;
            pv_line = line;
            best_move = pv_line.first();
            previous_score = score;

            // A forced mate has been found; searching deeper cannot improve
            // on "this side wins", so stop iterating.
            if score.score().abs() > MATE_FOUND_THRESHOLD {
                break;
            }

            depth += 1;
        }

        SearchResult { score, best_move }
    }

    // Runs one iterative-deepening iteration with an aspiration window
    // around `previous_score`, widening (and eventually falling back to the
    // full window) if the result falls outside it.
    fn search_with_aspiration(&mut self, board: &Board, depth: u8, previous_score: Evaluation) -> (Evaluation, PVLine) {
        if depth < 4 {
            let mut pv_line = PVLine::new();
            let score = self.negamax(board, depth, 0, (Evaluation::min_val(), Evaluation::max_val()), true, false, &mut pv_line);
            return (score, pv_line);
        }

        let mut window = ASP_WINDOW;
        for attempt in 0..ASP_MAX_ATTEMPTS {
            let (alpha, beta) = if attempt == ASP_MAX_ATTEMPTS - 1 {
                (Evaluation::min_val(), Evaluation::max_val())
            } else {
                (previous_score - window, previous_score + window)
            };

            let mut pv_line = PVLine::new();
            let score = self.negamax(board, depth, 0, (alpha, beta), true, false, &mut pv_line);

            if self.timer.times_up() {
                return (score, pv_line);
            }

            if score > alpha && score < beta {
                return (score, pv_line);
            }

            window += ASP_WINDOW;
        }

        // Unreachable: the last attempt always uses the full window, which
        // can never fail high or low.
        let mut pv_line = PVLine::new();
        let score = self.negamax(board, depth, 0, (Evaluation::min_val(), Evaluation::max_val()), true, false, &mut pv_line);
        (score, pv_line)
    }

    // Fallback when even the first (depth-1) iteration didn't complete in
    // time: statically evaluate the best few candidate moves one ply deep
    // and return the best of those, or any legal move if even that can't run.
    fn fallback_result(&mut self, board: &Board, legal_moves: &[Move]) -> SearchResult {
        let rated = order_moves(legal_moves.to_vec(), board, None, &self.killers[0], &self.history);

        let mut best_move = None;
        let mut best_score = Evaluation::min_val();

        for RatedMove { mv, .. } in rated.iter().take(5) {
            let next_board = board.make_move(mv);
            let score = -evaluate_position(&next_board, self.pawn_cache);
            if best_move.is_none() || score > best_score {
                best_move = Some(*mv);
                best_score = score;
            }
        }

        let best_move = best_move.or_else(|| legal_moves.first().copied());
        SearchResult { score: best_score, best_move }
    }

    fn negamax(
        &mut self,
        board: &Board,
        mut depth_remaining: u8,
        ply: u8,
        (mut alpha, mut beta): Bounds,
        can_null: bool,
        already_extended: bool,
        pv_line: &mut PVLine,
    ) -> Evaluation {
        self.node_count += 1;

        // If, for some reason, we go past the limit depth, return the static
        // evaluation value right away.
        if ply >= LIMIT_DEPTH {
            return evaluate_position(board, self.pawn_cache);
        }

        // Poll the timer every 1024 nodes. Using a power of 2 lets us check
        // with a bitmask instead of a modulo.
        if self.node_count & 1023 == 0 {
            self.timer.update();
        }

        // If we ran out of time, bail out with a sentinel. Every call site
        // that would persist state checks `times_up()` first and discards
        // this value instead.
        if self.timer.times_up() {
            return Evaluation::new(0);
        }

        let alpha_orig = alpha;
        let beta_orig = beta;

        let color_moving = board.turn_color();
        let is_check = board.is_check(color_moving);

        // Check extension: at most one per branch, and only close to the
        // horizon, to avoid runaway extension chains in positions with long
        // forcing sequences of checks.
        let mut extended = already_extended;
        if is_check && !already_extended && depth_remaining <= 2 {
            depth_remaining += 1;
            extended = true;
        }

        // Probe the transposition table. The stored move is a useful
        // move-ordering hint even if the stored depth is too shallow for the
        // score itself to be reusable.
        let mut tt_move = None;
        let zobrist = board.zobrist_key();
        if let Some(tt_data) = self.tt.get_entry(zobrist, depth_remaining, ply, &mut tt_move) {
            let tt_score = tt_data.eval_score();
            let window_collapsed = match tt_data.node_type() {
                NodeType::Exact => true,
                NodeType::Lowerbound => { alpha = max(alpha, tt_score); alpha >= beta }
                NodeType::Upperbound => { beta = min(beta, tt_score); alpha >= beta }
            };

            if window_collapsed {
                // This is a short-circuit return with no move loop run, so
                // the caller's PV line would otherwise come back empty. The
                // TT's own best move is the only move information available
                // here; thread it through so a root-level caller (whose
                // `pv_line.first()` becomes `find_best`'s best move) doesn't
                // silently lose it to a stale transposition hit.
                if let Some(mv) = tt_move {
                    let mut empty_child = PVLine::new();
                    pv_line.update_line(mv, &mut empty_child);
                }
                return tt_score;
            }
        }

        // Terminal and draw checks
        if board.is_checkmate() {
            return -(Evaluation::new(crate::evaluation::MATE) - ply as EvalScore);
        }
        if board.is_stalemate() || board.is_insufficient_material() || is_draw_by_repetition(board, ply, &self.past_positions) {
            return Evaluation::contempt();
        }

        if depth_remaining == 0 {
            return self.quiescence_search(board, ply, alpha, beta, pv_line);
        }

        let is_pv = beta - alpha != 1;

        // Reverse futility pruning
        if depth_remaining <= 3 && !is_pv && !is_check && !beta.is_mate() {
            let margin = depth_remaining as EvalScore * REV_FUTILITY_MARGIN;
            let static_eval = evaluate_position(board, self.pawn_cache);
            let reduced = static_eval - margin;

            if reduced >= beta {
                return reduced;
            }
        }

        let mut next_pv_line = PVLine::new();

        // Null-move pruning
        if can_null && !is_check && depth_remaining >= 3 && !is_pv
            && non_pawn_material(board, color_moving) >= NULL_MOVE_MATERIAL_THRESHOLD
        {
            let new_board = board.make_null_move();
            let reduced_depth = depth_remaining - 1 - NULL_MOVE_REDUCTION;
            let score = -self.negamax(&new_board, reduced_depth, ply + 1, (-beta, -beta + 1), false, extended, &mut next_pv_line);

            if self.timer.times_up() {
                return Evaluation::new(0);
            }

            if score >= beta && !score.is_positive_mate() {
                return beta;
            } else if score.is_negative_mate() {
                depth_remaining += 1;
            }
        }

        let static_eval_for_futility = if depth_remaining == 1 && !is_pv && !is_check && !alpha.is_mate() {
            Some(evaluate_position(board, self.pawn_cache))
        } else {
            None
        };

        let mut best_score = Evaluation::min_val();
        let mut best_move = None;
        let mut node_type = NodeType::Upperbound;

        let moves = board.pseudolegal_moves();
        let rated_moves = order_moves(moves, board, tt_move, &self.killers[ply as usize], &self.history);

        let mut analyzed_moves = 0;
        let mut analyzed_quiets = Vec::with_capacity(64);

        for RatedMove { mv, .. } in rated_moves {
            let next_board = board.make_move(&mv);

            // Pseudolegal move generation only guarantees legality for
            // castling (checked at generation time); anything else must be
            // rejected if it leaves the mover in check.
            if matches!(mv, Move::Normal { .. } | Move::PawnPromotion { .. }) && next_board.is_check(color_moving) {
                continue;
            }

            let is_capture = mv.is_capture(board);
            let is_promotion = matches!(mv, Move::PawnPromotion { .. });
            let gives_check = next_board.is_check(next_board.turn_color());
            let is_killer = self.is_killer(&mv, ply);
            let is_tactical = is_capture || is_promotion || gives_check || is_killer;

            // Futility pruning
            if let Some(static_eval) = static_eval_for_futility {
                if analyzed_moves != 0 && !is_tactical && static_eval + FUTILITY_MARGIN < alpha {
                    continue;
                }
            }

            self.past_positions.push(zobrist);

            // Late move reduction
            let mut reduction = 0;
            if !is_pv && !is_tactical && depth_remaining >= 3 && analyzed_moves > LMR_MOVES {
                reduction = min(
                    depth_remaining - 1,
                    1 + min(analyzed_moves / 6, depth_remaining as usize / 2) as u8,
                );
            }

            let mut score;
            if analyzed_moves == 0 {
                score = -self.negamax(&next_board, depth_remaining - 1, ply + 1, (-beta, -alpha), true, extended, &mut next_pv_line);
            } else {
                let reduced_depth = depth_remaining - 1 - reduction;
                score = -self.negamax(&next_board, reduced_depth, ply + 1, ((-alpha) - 1, -alpha), true, extended, &mut next_pv_line);

                if reduction != 0 && score > alpha {
                    // The reduced search beat alpha, so it can't be dismissed;
                    // re-search at full depth in the same null window first.
                    score = -self.negamax(&next_board, depth_remaining - 1, ply + 1, ((-alpha) - 1, -alpha), true, extended, &mut next_pv_line);
                }

                if score > alpha && score < beta {
                    score = -self.negamax(&next_board, depth_remaining - 1, ply + 1, (-beta, -alpha), true, extended, &mut next_pv_line);
                }
            }

            self.past_positions.pop();
            analyzed_moves += 1;

            if score > best_score {
                best_move = Some(mv);
                best_score = score;
                pv_line.update_line(mv, &mut next_pv_line);
            }

            if best_score > alpha {
                alpha = best_score;
                node_type = NodeType::Exact;
            }

            if best_score >= beta {
                node_type = NodeType::Lowerbound;
                if !is_capture {
                    self.update_histories(&mv, &analyzed_quiets, board, depth_remaining, ply);
                }
                break;
            }

            if Some(mv) != best_move && !is_capture {
                analyzed_quiets.push(mv);
            }

            next_pv_line.clear();
        }

        if self.timer.times_up() {
            return Evaluation::new(0);
        }

        if best_move.is_none() {
            // No legal moves were found; is_checkmate/is_stalemate above
            // would already have caught this unless the check-extension
            // changed depth_remaining after those tests, so fall back to
            // re-deriving the result from the position directly.
            best_score = if is_check {
                -(Evaluation::new(crate::evaluation::MATE) - ply as EvalScore)
            } else {
                Evaluation::contempt()
            };
        }

        let final_node_type = if best_score <= alpha_orig {
            NodeType::Upperbound
        } else if best_score >= beta_orig {
            NodeType::Lowerbound
        } else {
            node_type
        };

        self.tt.write_entry(zobrist, depth_remaining, best_score, final_node_type, best_move, ply);
        best_score
    }

    // The quiescence search is a simplified version of negamax that only
    // expands captures and promotions. It runs at the horizon of the main
    // search to avoid misjudging a position where a piece is hanging.
    fn quiescence_search(
        &mut self,
        board: &Board,
        ply: u8,
        mut alpha: Evaluation,
        beta: Evaluation,
        pv_line: &mut PVLine,
    ) -> Evaluation {
        self.node_count += 1;

        if ply >= LIMIT_DEPTH {
            return evaluate_position(board, self.pawn_cache);
        }

        if self.node_count & 1023 == 0 {
            self.timer.update();
        }

        if self.timer.times_up() {
            return Evaluation::new(0);
        }

        let stand_pat = evaluate_position(board, self.pawn_cache);

        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut next_pv_line = PVLine::new();

        let moves = board.pseudolegal_caps();
        let rated_moves = order_moves(moves, board, None, &[Move::empty(), Move::empty()], &self.history);

        for RatedMove { mv, .. } in rated_moves {
            // Delta pruning: skip captures that can't plausibly raise alpha
            // even accounting for the captured piece's value.
            let victim_value = mv.piece_captured(board)
                .map(crate::evaluation::piece_tables::value_of)
                .unwrap_or(100); // en-passant: the captured piece is always a pawn

            if stand_pat.score() + victim_value + 100 < alpha.score() {
                continue;
            }

            let next_board = board.make_move(&mv);
            if next_board.is_check(board.turn_color()) {
                continue;
            }

            let score = -self.quiescence_search(&next_board, ply + 1, -beta, -alpha, &mut next_pv_line);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
                pv_line.update_line(mv, &mut next_pv_line);
            }

            next_pv_line.clear();
        }

        alpha
    }

    fn is_killer(&self, mv: &Move, ply: u8) -> bool {
        self.killers[ply as usize][0] == *mv || self.killers[ply as usize][1] == *mv
    }

    fn update_histories(&mut self, best_move: &Move, quiet_moves: &[Move], board: &Board, depth: u8, ply: u8) {
        if best_move.is_capture(board) {
            return;
        }

        let color = board.turn_color();
        let bonus = (depth as crate::search::move_ordering::MoveScore).pow(2);

        self.history.add_bonus(best_move, color, bonus);

        let slot = ply as usize;
        if *best_move != self.killers[slot][0] {
            self.killers[slot][1] = self.killers[slot][0];
            self.killers[slot][0] = *best_move;
        }

        quiet_moves.iter().for_each(|mv| {
            self.history.add_bonus(mv, color, -bonus);
        });
    }
}

// Determines if a given position is a draw by repetition considering the
// previous history. Returns true if the current state is either:
// - The third repetition of a position, where the previous two happened
//   during moves already played in the actual game
// - The second repetition of a position that occurred entirely during the
//   search (a third repetition is assumed to be forthcoming, so we save time
//   by treating it as a draw early)
pub fn is_draw_by_repetition(board: &Board, cur_depth: u8, history: &[u64]) -> bool {
    let current_zobrist = board.zobrist_key();
    let mut rep_count = 1;

    // Moves that reset the fifty-move counter are irreversible, so no
    // repetition can reach back past the last one.
    let last_irr_move = board.current_ply().saturating_sub(board.fifty_move_rule_counter());
    let last_played_ply = board.current_ply().saturating_sub(cur_depth as u16);

    let prev_states = history.iter()
        .copied()
        .enumerate()
        .skip(last_irr_move as usize)
        .rev()
        .step_by(2)
        .skip(1);

    for (ply, zobrist) in prev_states {
        if zobrist == current_zobrist {
            rep_count += 1;
            if rep_count == 2 && ply as u16 > last_played_ply || rep_count == 3 {
                return true;
            }
        }
    }

    false
}
