mod history;
mod move_ordering;
mod pv_line;
mod searching;

pub use searching::{is_draw_by_repetition, Search, SearchOptions, SearchResult};
