use zugzwang_board::Move;

// The principal variation line found so far at a given node: the sequence of
// moves the search currently believes both sides will play.
pub struct PVLine {
    moves: Vec<Move>
}

impl PVLine {
    pub fn new() -> Self {
        Self { moves: vec![] }
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn first(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    // Prepends `mv` to the child node's line, making this the PV for the
    // current node: `mv` followed by whatever the recursive call already
    // found to be best from the resulting position.
    pub fn update_line(&mut self, mv: Move, child_line: &mut Self) {
        self.moves.clear();
        self.moves.push(mv);
        self.moves.append(&mut child_line.moves);
    }
}

impl Default for PVLine {
    fn default() -> Self {
        Self::new()
    }
}
