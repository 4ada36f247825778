//! Per-Run Spectral Budget — bound transform cost to the start of each run
//!
//! The spectral path dominates per-event cost, so rather than transforming
//! every event, the scheduler admits only the first K events of each run.
//! Total run time then scales roughly with run count instead of event
//! count, while spectral behavior is still sampled where it matters most
//! (run starts, where configuration changes show up first).
//!
//! Historically this option overloaded one integer: some variants read a
//! non-positive value as "never compute", others as "no limit". The budget
//! is an explicit tri-state here so the two configuration states cannot
//! collapse into the same sentinel.

/// How many events per run get the spectral treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralBudget {
    /// Every event is transformed (option absent from configuration).
    Unlimited,
    /// The first `n` events of each run are transformed.
    Limited(u32),
    /// No event is ever transformed (configured value <= 0).
    Disabled,
}

impl SpectralBudget {
    /// Map the raw configuration option onto the tri-state: absent means
    /// unlimited, a positive count limits, anything else disables.
    pub fn from_option(raw: Option<i64>) -> Self {
        match raw {
            None => SpectralBudget::Unlimited,
            Some(n) if n > 0 => SpectralBudget::Limited(n as u32),
            Some(_) => SpectralBudget::Disabled,
        }
    }

    /// Whether an event arriving as the `events_seen`-th of its run
    /// (zero-based) is within budget.
    pub fn allows(&self, events_seen: u32) -> bool {
        match *self {
            SpectralBudget::Unlimited => true,
            SpectralBudget::Limited(n) => events_seen < n,
            SpectralBudget::Disabled => false,
        }
    }
}

/// Run-boundary cursor deciding, per event, whether the spectral path runs.
///
/// Explicit state owned by the caller (one per logical processing thread),
/// never a process-wide global, so repeated or parallel passes cannot
/// cross-contaminate each other's counters.
#[derive(Debug, Clone)]
pub struct FftScheduler {
    budget: SpectralBudget,
    current_run: Option<u32>,
    events_seen: u32,
}

impl FftScheduler {
    pub fn new(budget: SpectralBudget) -> Self {
        Self {
            budget,
            current_run: None,
            events_seen: 0,
        }
    }

    /// The configured budget.
    pub fn budget(&self) -> SpectralBudget {
        self.budget
    }

    /// Register one event of run `run` and decide whether to compute its
    /// spectra.
    ///
    /// A run change resets the event counter. The counter advances exactly
    /// once per call: callers invoke this once per event, never per
    /// channel.
    pub fn begin_event(&mut self, run: u32) -> bool {
        if self.current_run != Some(run) {
            self.current_run = Some(run);
            self.events_seen = 0;
        }
        let compute = self.budget.allows(self.events_seen);
        self.events_seen += 1;
        compute
    }
}
