//! Draw orchestration — ledger in, winner out.
//!
//! A draw never mutates anything. Recording the win is a separate step
//! ([`apply_win`]), and persisting is another ([`crate::storage::FrequencyStore::save`]),
//! so a failed draw leaves both memory and disk as they were.

use chrono::NaiveDate;
use rand::Rng;

use crate::error::{DrawError, Result};
use crate::ledger::{self, ParticipantId, ParticipantRecord, WinUpdate};
use crate::reveal::Reveal;
use crate::selector::{self, FrequencyMap, SelectionDistribution};

// ---------------------------------------------------------------------------
// Ledger draws
// ---------------------------------------------------------------------------

/// Outcome of a draw over a participant collection.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub winner: ParticipantId,
    /// Display name of the winner at draw time.
    pub winner_name: String,
    /// Effective frequency of the winner before the win is recorded.
    pub frequency: i64,
    /// Selection probability per participant id, in collection order.
    pub distribution: SelectionDistribution<ParticipantId>,
}

impl DrawOutcome {
    /// Probability the winner had of being selected.
    pub fn winner_probability(&self) -> f64 {
        self.distribution.get(&self.winner).unwrap_or(0.0)
    }
}

/// Run a draw over `records` and report it through `reveal`.
pub fn draw_participants<R>(
    records: &[ParticipantRecord],
    rng: &mut R,
    reveal: &mut dyn Reveal,
) -> Result<DrawOutcome>
where
    R: Rng + ?Sized,
{
    let view = ledger::to_frequency_mapping(records);
    let selection = selector::select_with_rng(view.weights(), rng)?;

    let labelled: Vec<(String, f64)> = view
        .records()
        .iter()
        .zip(selection.distribution.probabilities())
        .map(|(record, p)| (record.display_name(), p))
        .collect();

    let winner = view
        .record(&selection.winner)
        .ok_or_else(|| DrawError::NotFound(selection.winner.to_string()))?;

    reveal.show_distribution(&labelled)?;
    reveal.show_winner(&winner.display_name())?;

    log::info!("draw winner: {} ({})", winner.display_name(), winner.id);

    Ok(DrawOutcome {
        winner: winner.id,
        winner_name: winner.display_name(),
        frequency: winner.effective_frequency(),
        distribution: selection.distribution,
    })
}

/// Record the win for `winner` on `date`.
pub fn apply_win(
    records: &mut [ParticipantRecord],
    winner: ParticipantId,
    date: NaiveDate,
) -> Result<WinUpdate> {
    let record = ledger::lookup_by_id_mut(winner, records)
        .ok_or_else(|| DrawError::NotFound(format!("participant {winner}")))?;
    Ok(ledger::record_win_on(record, date))
}

// ---------------------------------------------------------------------------
// Weight-document draws
// ---------------------------------------------------------------------------

/// Outcome of a draw over a plain `name → frequency` mapping.
#[derive(Debug, Clone)]
pub struct WeightsOutcome {
    pub winner: String,
    pub distribution: SelectionDistribution<String>,
    /// The input mapping with the winner's frequency incremented by one.
    pub updated: FrequencyMap<String>,
}

/// Run a draw over a plain mapping and report it through `reveal`.
pub fn draw_weights<R>(
    weights: &FrequencyMap<String>,
    rng: &mut R,
    reveal: &mut dyn Reveal,
) -> Result<WeightsOutcome>
where
    R: Rng + ?Sized,
{
    let selection = selector::select_with_rng(weights, rng)?;

    let labelled: Vec<(String, f64)> = selection
        .distribution
        .iter()
        .map(|(name, p)| (name.clone(), p))
        .collect();
    reveal.show_distribution(&labelled)?;
    reveal.show_winner(&selection.winner)?;

    let updated = increment_winner(weights, &selection.winner);

    Ok(WeightsOutcome {
        winner: selection.winner,
        distribution: selection.distribution,
        updated,
    })
}

/// Copy of `weights` with `winner` incremented by one.
pub fn increment_winner(weights: &FrequencyMap<String>, winner: &String) -> FrequencyMap<String> {
    let mut updated = weights.clone();
    let current = updated.get(winner).unwrap_or(0.0);
    updated.insert(winner.clone(), current + 1.0);
    updated
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
