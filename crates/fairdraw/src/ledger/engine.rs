//! Ledger engine — lookups, win recording and the frequency view.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{DrawError, Result};
use crate::selector::FrequencyMap;

use super::types::*;

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find the first record with `id`. Absence is not an error.
pub fn lookup_by_id(id: ParticipantId, records: &[ParticipantRecord]) -> Option<&ParticipantRecord> {
    records.iter().find(|r| r.id == id)
}

/// Mutable variant of [`lookup_by_id`].
pub fn lookup_by_id_mut(
    id: ParticipantId,
    records: &mut [ParticipantRecord],
) -> Option<&mut ParticipantRecord> {
    records.iter_mut().find(|r| r.id == id)
}

// ---------------------------------------------------------------------------
// Record win
// ---------------------------------------------------------------------------

/// Record a win for today (local date).
///
/// Idempotent per calendar day: a second call on the same day leaves the
/// record untouched.
pub fn record_win(record: &mut ParticipantRecord) -> WinUpdate {
    record_win_on(record, crate::time::today())
}

/// Record a win on an explicit date.
pub fn record_win_on(record: &mut ParticipantRecord, date: NaiveDate) -> WinUpdate {
    let day = crate::time::format_date(date);

    if record.win_dates.contains(&day) {
        log::debug!("participant {} already has a win on {day}", record.id);
        return WinUpdate::AlreadyRecorded;
    }

    record.win_dates.push(day);
    log::debug!(
        "participant {} won; effective frequency now {}",
        record.id,
        record.effective_frequency()
    );
    WinUpdate::Added
}

// ---------------------------------------------------------------------------
// Frequency view
// ---------------------------------------------------------------------------

/// The `id → effective frequency` mapping handed to the selector, together
/// with an aligned index back to the records it came from.
#[derive(Debug, Clone)]
pub struct FrequencyView<'a> {
    weights: FrequencyMap<ParticipantId>,
    records: Vec<&'a ParticipantRecord>,
}

impl<'a> FrequencyView<'a> {
    pub fn weights(&self) -> &FrequencyMap<ParticipantId> {
        &self.weights
    }

    /// Record behind `id`, if it is part of the view.
    pub fn record(&self, id: &ParticipantId) -> Option<&'a ParticipantRecord> {
        self.records.iter().copied().find(|r| r.id == *id)
    }

    /// Records in the same order as [`FrequencyView::weights`].
    pub fn records(&self) -> &[&'a ParticipantRecord] {
        &self.records
    }
}

/// Build the selector input from a collection of records.
///
/// Collection order is kept. When ids repeat, the first record wins, which
/// matches [`lookup_by_id`].
pub fn to_frequency_mapping(records: &[ParticipantRecord]) -> FrequencyView<'_> {
    let mut weights = FrequencyMap::new();
    let mut aligned = Vec::with_capacity(records.len());

    for record in records {
        if weights.contains_key(&record.id) {
            log::warn!("duplicate participant id {}; keeping the first", record.id);
            continue;
        }
        weights.insert(record.id, record.effective_frequency() as f64);
        aligned.push(record);
    }

    FrequencyView {
        weights,
        records: aligned,
    }
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Append a new participant with the next free id (max + 1, or 1).
pub fn add_participant(
    records: &mut Vec<ParticipantRecord>,
    name: &str,
    alias: Option<&str>,
    balancing_offset: i64,
) -> Result<ParticipantId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DrawError::InvalidParticipant(
            "name must not be empty".to_string(),
        ));
    }

    let next = match records.iter().map(|r| r.id.0).max() {
        None => 1,
        Some(max) => max.checked_add(1).ok_or_else(|| {
            DrawError::InvalidParticipant(format!("no participant id left after {max}"))
        })?,
    };
    let record = ParticipantRecord::new(next, name)
        .with_alias(alias.unwrap_or_default().trim())
        .with_offset(balancing_offset);

    records.push(record);
    log::debug!("added participant {next} ({name})");
    Ok(ParticipantId(next))
}

/// Append a fully-formed record, refusing ids already in use.
pub fn insert_participant(
    records: &mut Vec<ParticipantRecord>,
    record: ParticipantRecord,
) -> Result<()> {
    if lookup_by_id(record.id, records).is_some() {
        return Err(DrawError::DuplicateId(record.id.0));
    }
    records.push(record);
    Ok(())
}

/// Replace a participant's balancing offset. Returns the previous offset,
/// or `None` when no record has `id`.
pub fn set_balancing_offset(
    records: &mut [ParticipantRecord],
    id: ParticipantId,
    offset: i64,
) -> Option<i64> {
    let record = lookup_by_id_mut(id, records)?;
    Some(std::mem::replace(&mut record.balancing_offset, offset))
}

/// Check collection-level invariants: unique ids, non-empty names, and win
/// dates that are distinct ISO `YYYY-MM-DD` days.
pub fn validate_collection(records: &[ParticipantRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(DrawError::DuplicateId(record.id.0));
        }
        if record.name.trim().is_empty() {
            return Err(DrawError::InvalidParticipant(format!(
                "participant {} has an empty name",
                record.id
            )));
        }

        let mut days = HashSet::with_capacity(record.win_dates.len());
        for date in &record.win_dates {
            if crate::time::parse_date(date).is_none() {
                return Err(DrawError::InvalidParticipant(format!(
                    "participant {} has a malformed win date '{date}'",
                    record.id
                )));
            }
            if !days.insert(date.as_str()) {
                return Err(DrawError::InvalidParticipant(format!(
                    "participant {} has the win date {date} recorded twice",
                    record.id
                )));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
