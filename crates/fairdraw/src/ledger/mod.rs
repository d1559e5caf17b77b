//! Frequency ledger — per-participant win history.
//!
//! The ledger module provides:
//! - The persisted participant record and its effective frequency
//! - Lookup by id (absence is a value, not an error)
//! - Idempotent per-day win recording
//! - The `id → frequency` view consumed by the selector

pub mod engine;
pub mod types;

pub use types::{ParticipantId, ParticipantRecord, WinUpdate};

pub use engine::{
    add_participant, insert_participant, lookup_by_id, lookup_by_id_mut, record_win,
    record_win_on, set_balancing_offset, to_frequency_mapping, validate_collection, FrequencyView,
};
