//! fairdraw — inverse-frequency weighted draws for a fixed group.
//!
//! Picks one participant at a time, weighting each inversely to how often
//! they have been picked before, so a recurring draw compensates for past
//! imbalance. Keeps each participant's win history in a flat JSON file.

pub mod draw;
pub mod error;
pub mod ledger;
pub mod reveal;
pub mod selector;
pub mod storage;
pub mod time;

// Re-export primary types
pub use error::{DrawError, Result};
pub use ledger::{FrequencyView, ParticipantId, ParticipantRecord, WinUpdate};
pub use reveal::{NoopReveal, Reveal, SuspenseConfig, SuspenseReveal};
pub use selector::{FrequencyMap, Selection, SelectionDistribution};
pub use storage::FrequencyStore;

// Re-export the draw flow
pub use draw::{apply_win, draw_participants, draw_weights, DrawOutcome, WeightsOutcome};
