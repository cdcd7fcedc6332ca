//! Bookkeeping for the set of images the game cannot start without.

/// Load status of one named resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// Overall state of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// At least one resource is still loading and none has failed
    Pending,
    /// Every resource loaded
    Ready,
    /// These resources failed; the rest may still be loading
    Failed(Vec<String>),
}

/// Tracks a fixed set of named resources and fires "all ready" exactly once.
#[derive(Debug, Clone)]
pub struct AssetBundle {
    entries: Vec<(String, AssetStatus)>,
    ready_fired: bool,
}

impl AssetBundle {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| (name.into(), AssetStatus::Pending))
                .collect(),
            ready_fired: false,
        }
    }

    /// Record a successful load. Returns `true` if this changed anything.
    pub fn mark_loaded(&mut self, name: &str) -> bool {
        self.update(name, AssetStatus::Loaded)
    }

    /// Record a failure. Returns `true` only the first time, so callers can
    /// log once per asset.
    pub fn mark_failed(&mut self, name: &str, reason: impl Into<String>) -> bool {
        self.update(name, AssetStatus::Failed(reason.into()))
    }

    fn update(&mut self, name: &str, status: AssetStatus) -> bool {
        let Some((_, current)) = self.entries.iter_mut().find(|(entry, _)| entry == name) else {
            return false;
        };
        if *current != AssetStatus::Pending {
            return false;
        }
        *current = status;
        true
    }

    pub fn readiness(&self) -> Readiness {
        let failed: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, status)| matches!(status, AssetStatus::Failed(_)))
            .map(|(name, _)| name.clone())
            .collect();
        if !failed.is_empty() {
            return Readiness::Failed(failed);
        }

        if self
            .entries
            .iter()
            .all(|(_, status)| *status == AssetStatus::Loaded)
        {
            Readiness::Ready
        } else {
            Readiness::Pending
        }
    }

    /// The one-shot "all ready" signal: `true` on the first call after every
    /// resource has loaded, `false` forever after.
    pub fn take_ready(&mut self) -> bool {
        if self.ready_fired || self.readiness() != Readiness::Ready {
            return false;
        }
        self.ready_fired = true;
        true
    }

    /// Human-readable failure list, e.g. for an error screen.
    pub fn failure_report(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|(name, status)| match status {
                AssetStatus::Failed(reason) => Some(format!("{}: {}", name, reason)),
                _ => None,
            })
            .collect()
    }
}
