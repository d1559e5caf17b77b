//! Presentation hooks for a draw.
//!
//! A draw reports its distribution and its winner through [`Reveal`].
//! Timing effects live entirely in the implementation, so the draw itself
//! stays deterministic; tests use [`NoopReveal`].

use std::io::{self, Write};
use std::time::Duration;

/// Receives the outcome of a draw for display.
pub trait Reveal {
    /// Show the selection probability of each participant, in draw order.
    fn show_distribution(&mut self, entries: &[(String, f64)]) -> io::Result<()>;

    /// Announce the winner.
    fn show_winner(&mut self, winner: &str) -> io::Result<()>;
}

/// Reveal that shows nothing and never sleeps.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReveal;

impl Reveal for NoopReveal {
    fn show_distribution(&mut self, _entries: &[(String, f64)]) -> io::Result<()> {
        Ok(())
    }

    fn show_winner(&mut self, _winner: &str) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Suspense
// ---------------------------------------------------------------------------

/// Pacing of the suspense effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspenseConfig {
    /// Pause between progress dots.
    pub step_delay: Duration,
    /// Number of progress dots.
    pub steps: u32,
    /// Pause before the winner is printed.
    pub final_pause: Duration,
}

impl Default for SuspenseConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(500),
            steps: 5,
            final_pause: Duration::from_secs(1),
        }
    }
}

impl SuspenseConfig {
    /// Same output, no waiting.
    pub fn instant() -> Self {
        Self {
            step_delay: Duration::ZERO,
            steps: 5,
            final_pause: Duration::ZERO,
        }
    }
}

/// Text reveal: a bar chart of probabilities, then a paced announcement.
pub struct SuspenseReveal<W: Write> {
    out: W,
    config: SuspenseConfig,
}

impl<W: Write> SuspenseReveal<W> {
    pub fn new(out: W, config: SuspenseConfig) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pause(duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<W: Write> Reveal for SuspenseReveal<W> {
    fn show_distribution(&mut self, entries: &[(String, f64)]) -> io::Result<()> {
        self.out.write_all(render_distribution(entries).as_bytes())?;
        self.out.flush()
    }

    fn show_winner(&mut self, winner: &str) -> io::Result<()> {
        writeln!(self.out, "Preparing the draw...")?;
        for _ in 0..self.config.steps {
            write!(self.out, ".")?;
            self.out.flush()?;
            Self::pause(self.config.step_delay);
        }
        writeln!(self.out)?;
        writeln!(self.out, "And the winner is...")?;
        self.out.flush()?;
        Self::pause(self.config.final_pause);
        writeln!(self.out, "!!! {winner} !!!")?;
        self.out.flush()
    }
}

/// Render probabilities as a text bar chart, one `|` per whole percent.
pub fn render_distribution(entries: &[(String, f64)]) -> String {
    let width = entries
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    let mut text = String::new();
    text.push_str("_______________________\n");
    text.push_str("--- Probabilities ---\n");
    text.push_str("----------------------\n");
    for (name, probability) in entries {
        let pad = width - name.chars().count();
        let bars = (probability * 100.0).floor().max(0.0) as usize;
        text.push_str(&format!("{name}{}:|{}\n", " ".repeat(pad), "|".repeat(bars)));
    }
    text.push_str("_______________________\n");
    text
}
