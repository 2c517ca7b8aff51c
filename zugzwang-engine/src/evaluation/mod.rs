mod eval_data;
mod evaluate;
mod masks;
mod pawn_cache;
pub(crate) mod piece_tables;

pub use evaluate::{evaluate_position, non_pawn_material, Evaluation, EvalScore, MATE};
pub use pawn_cache::PawnCache;
