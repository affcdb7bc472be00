//! Append-only log of finished games.
//!
//! Every call to [`ScoreRecorder::submit`] makes sure `player_score` exists and
//! inserts one row. Rows are never updated or deleted, and the same player may
//! appear any number of times.

mod error;
mod record;
mod recorder;
mod store;

pub use error::{ScoreError, ScoreResult};
pub use record::ScoreRecord;
pub use recorder::ScoreRecorder;
pub use store::ScoreStore;
