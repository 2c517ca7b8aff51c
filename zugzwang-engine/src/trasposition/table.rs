use zugzwang_board::Move;

use crate::evaluation::Evaluation;
use super::{TTEntry, NodeType};

// A simple always-replace transposition table. Parallel search is not
// supported, so there is no need for the lockless/unsafe tricks that a
// concurrent table would require: a plain, safely-indexed slot array is
// both simpler and fast enough for a single search thread.
pub struct TTable {
    size: usize,
    content: Vec<Option<TTEntry>>,
}

impl TTable {
    pub fn new(size: usize) -> Self {
        Self { size, content: vec![None; size] }
    }

    // Returns the stored entry for this position, if any, after adjusting
    // mate scores for `ply` (the distance of the probing node from the
    // search root). A TT entry records a mate score as "mate in N plies
    // from the node that stored it"; probing the same position at a
    // different distance from the root requires shifting that N back into
    // an absolute, root-relative score before it can be compared against
    // alpha/beta or returned from the search.
    //
    // `tt_move` is populated whenever the zobrist matches, even if the
    // stored depth is too shallow to reuse the score, since the move
    // itself is still a good move-ordering hint.
    pub fn get_entry(&self, zobrist_key: u64, depth: u8, ply: u8, tt_move: &mut Option<Move>) -> Option<TTEntry> {
        let index = zobrist_key as usize % self.size;
        let entry = self.content[index]?;

        if entry.zobrist() != zobrist_key {
            return None;
        }

        *tt_move = entry.best_move();

        if entry.depth() < depth {
            return None;
        }

        let score = unfold_mate_score(entry.eval_score(), ply);
        Some(TTEntry::new(entry.zobrist(), entry.depth(), score, entry.node_type(), entry.best_move()))
    }

    pub fn write_entry(&mut self, zobrist_key: u64, depth: u8, score: Evaluation, node_type: NodeType, best_move: Option<Move>, ply: u8) {
        let index = zobrist_key as usize % self.size;
        let stored_score = fold_mate_score(score, ply);
        self.content[index] = Some(TTEntry::new(zobrist_key, depth, stored_score, node_type, best_move));
    }
}

// Converts a root-relative mate score into one relative to the storing node
// (i.e. "mate in N plies from here" instead of "mate in N plies from root").
fn fold_mate_score(score: Evaluation, ply: u8) -> Evaluation {
    if score.is_positive_mate() {
        score + ply as crate::evaluation::EvalScore
    } else if score.is_negative_mate() {
        score - ply as crate::evaluation::EvalScore
    } else {
        score
    }
}

// The inverse of `fold_mate_score`: turns a node-relative mate score back
// into a root-relative one for the node currently probing the table.
fn unfold_mate_score(score: Evaluation, ply: u8) -> Evaluation {
    if score.is_positive_mate() {
        score - ply as crate::evaluation::EvalScore
    } else if score.is_negative_mate() {
        score + ply as crate::evaluation::EvalScore
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::MATE;

    #[test]
    fn mate_score_round_trips_through_fold_unfold() {
        let root_relative = Evaluation::new(MATE - 7);
        let ply = 5;

        let stored = fold_mate_score(root_relative, ply);
        // A mate score closer to the storing node is a bigger number than
        // the same mate expressed relative to the root.
        assert!(stored.score() > root_relative.score());

        let recovered = unfold_mate_score(stored, ply);
        assert_eq!(recovered, root_relative);
    }

    #[test]
    fn negative_mate_score_round_trips_too() {
        let root_relative = Evaluation::new(-(MATE - 3));
        let ply = 2;

        let stored = fold_mate_score(root_relative, ply);
        assert!(stored.score() < root_relative.score());

        let recovered = unfold_mate_score(stored, ply);
        assert_eq!(recovered, root_relative);
    }

    #[test]
    fn non_mate_scores_are_untouched_by_folding() {
        let score = Evaluation::new(35);
        assert_eq!(fold_mate_score(score, 12), score);
        assert_eq!(unfold_mate_score(score, 12), score);
    }

    #[test]
    fn entry_usable_only_when_stored_depth_is_deep_enough() {
        let mut table = TTable::new(1024);
        let key = 0xABCDEFu64;
        table.write_entry(key, 6, Evaluation::new(120), NodeType::Exact, None, 3);

        let mut hint = None;
        assert!(table.get_entry(key, 6, 3, &mut hint).is_some());
        assert!(table.get_entry(key, 8, 3, &mut hint).is_none());
        // Even on the too-shallow miss, the best-move hint is still reported.
        assert!(hint.is_none());
    }

    #[test]
    fn probe_at_a_different_ply_returns_a_ply_adjusted_score() {
        let mut table = TTable::new(1024);
        let key = 42u64;
        // Checkmate detected right at the node that wrote this entry, which
        // was itself 4 plies from that search's root.
        table.write_entry(key, 10, Evaluation::new(MATE - 4), NodeType::Exact, None, 4);

        let mut hint = None;
        // A later search reaches the same position (zero plies from the
        // mate) at ply 1 from its own root instead: the reusable score must
        // be re-expressed relative to that root, i.e. mate in 1 ply.
        let entry = table.get_entry(key, 5, 1, &mut hint).unwrap();
        assert_eq!(entry.eval_score(), Evaluation::new(MATE - 1));
    }
}
