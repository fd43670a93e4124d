use crate::level::Level;
use std::collections::BTreeSet;

/// A flushed run of coalesced duplicates, ready to be rendered as a
/// synthetic "last message repeated N times" line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Contributing domain names, de-duplicated and sorted for a
    /// deterministic rendering (spec leaves the order unspecified).
    pub domains: Vec<String>,
    /// Number of repeats *after* the first occurrence (so `k` copies of a
    /// message yield `repeat_count == k - 1`).
    pub repeat_count: u64,
}

/// What a [`Coalescer`] wants the caller to do with an incoming record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Emit this record normally; nothing was pending.
    Emit,
    /// Swallowed into the running repeat count. Emit nothing.
    Coalesced,
    /// A run of duplicates just ended: emit `summary` first, then emit this
    /// record normally.
    FlushThenEmit(Summary),
}

/// Per-backend coalescing state machine (component C7).
///
/// Tracks "the last distinct message" seen on a backend, across every
/// domain that writes to it, and decides whether an incoming record should
/// be emitted, swallowed as a repeat, or should trigger a summary of the
/// run that just ended.
#[derive(Debug, Default)]
pub struct Coalescer {
    last: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    text: String,
    #[allow(dead_code)] // kept for parity with the C7 field list; not yet rendered
    level: Level,
    repeat_count: u64,
    domains: BTreeSet<String>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one incoming record through the state machine.
    pub fn record(&mut self, level: Level, text: &str, domain: &str) -> Outcome {
        match &mut self.last {
            None => {
                self.seed(level, text);
                Outcome::Emit
            }
            Some(pending) if pending.text == text => {
                pending.repeat_count += 1;
                pending.domains.insert(domain.to_string());
                Outcome::Coalesced
            }
            Some(pending) => {
                let summary = if pending.repeat_count > 0 {
                    Some(Summary {
                        domains: pending.domains.iter().cloned().collect(),
                        repeat_count: pending.repeat_count,
                    })
                } else {
                    None
                };
                self.seed(level, text);
                match summary {
                    Some(summary) => Outcome::FlushThenEmit(summary),
                    None => Outcome::Emit,
                }
            }
        }
    }

    /// Flush any pending run without seeding a new one. Used by
    /// `force_log_all` (which must not itself become the new `last_text`)
    /// and at registry teardown.
    pub fn flush(&mut self) -> Option<Summary> {
        let pending = self.last.take()?;
        if pending.repeat_count == 0 {
            return None;
        }
        Some(Summary {
            domains: pending.domains.into_iter().collect(),
            repeat_count: pending.repeat_count,
        })
    }

    /// Seed a new run. `domains` starts empty: the seeding occurrence was
    /// already emitted normally and is not itself a repeat, so it must not
    /// appear in the eventual summary's domain list (only domains that
    /// produced a *repeat* of this text do).
    fn seed(&mut self, level: Level, text: &str) {
        self.last = Some(Pending {
            text: text.to_string(),
            level,
            repeat_count: 0,
            domains: BTreeSet::new(),
        });
    }
}
