use crate::error::Result;
use crate::recent::RecentFormulas;
use crate::settings::{Settings, SettingsStore};
use crate::span::MathMode;

/// Process-wide state: the settings plus the store they are saved to.
///
/// Every mutation is applied in memory first and then saved. When the save
/// fails the error is logged and returned, but the in-memory state stays as it
/// is and remains authoritative for the rest of the session.
#[derive(Debug)]
pub struct Studio<S: SettingsStore> {
    settings: Settings,
    store: S,
}

impl<S: SettingsStore> Studio<S> {
    pub fn load(store: S) -> Result<Self> {
        let settings = store.load()?;
        Ok(Studio { settings, store })
    }

    pub fn with_settings(settings: Settings, store: S) -> Self {
        Studio { settings, store }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn recent(&self) -> &RecentFormulas {
        &self.settings.recent
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add `formula` to the recent history. Blank formulas are skipped
    /// without saving; returns whether the history changed.
    pub fn record_formula(&mut self, formula: &str) -> Result<bool> {
        if !self.settings.recent.record(formula) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear_recent(&mut self) -> Result<()> {
        self.settings.recent.clear();
        self.persist()
    }

    pub fn set_default_mode(&mut self, mode: MathMode) -> Result<()> {
        self.settings.default_mode = mode;
        self.persist()
    }

    pub fn set_show_quick_templates(&mut self, show: bool) -> Result<()> {
        self.settings.show_quick_templates = show;
        self.persist()
    }

    pub fn set_max_recent_formulas(&mut self, capacity: usize) -> Result<()> {
        self.settings.recent.set_capacity(capacity);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.settings).inspect_err(|err| {
            tracing::warn!("settings not saved, keeping changes for this session: {err}");
        })
    }
}
