use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use satparity_engine::board::ParityBoard;

/// Latest refresh outcome shared between the poller and readers.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    /// Board from the most recent successful fetch
    pub board: Option<ParityBoard>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    /// Error from the most recent attempt, cleared on success
    pub last_error: Option<String>,
    pub refreshes: u64,
}

pub type SharedBoard = Arc<RwLock<BoardState>>;

pub fn shared_board() -> SharedBoard {
    Arc::new(RwLock::new(BoardState::default()))
}
