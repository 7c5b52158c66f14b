use std::collections::HashSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    clock,
    error::Result,
    store::Store,
};

/// storage key the alarm list lives under
pub const ALARMS_KEY: &str = "alarms";

/// represents an alarm
/// `time` is already in [`clock::DISPLAY_FORMAT`] so matching is a string compare
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Alarm {
    pub id: u64,
    pub time: String,
    pub enabled: bool,
}

impl Alarm {
    #[must_use]
    pub fn matches(&self, now: &str) -> bool {
        self.enabled && self.time == now
    }
}

/// first enabled alarm set for `now`, in list order
#[must_use]
pub fn find_ringing<'a>(alarms: &'a [Alarm], now: &str) -> Option<&'a Alarm> {
    alarms.iter().find(|alarm| alarm.matches(now))
}

/// Owns the alarm list and writes it back to its [`Store`] after every change.
///
/// Mutations are applied in memory first. If the write fails the error is
/// returned but the in-memory list keeps the change.
///
/// Other processes (the command line) may write the same store, so every
/// mutation first picks up whatever was stored since the last read or write.
pub struct AlarmManager {
    alarms: Vec<Alarm>,
    store: Box<dyn Store>,
    // the stored document as last read or written
    synced: Option<String>,
}

impl std::fmt::Debug for AlarmManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmManager")
            .field("alarms", &self.alarms)
            .finish_non_exhaustive()
    }
}

/// Parses a stored list, normalizing times and dropping entries that break
/// the list invariants.
fn parse_stored(json: &str) -> Result<Vec<Alarm>> {
    let stored: Vec<Alarm> = serde_json::from_str(json)?;
    let mut ids = HashSet::new();
    Ok(stored
        .into_iter()
        .filter_map(|alarm| {
            if !ids.insert(alarm.id) {
                warn!("dropping stored alarm with duplicate id {}", alarm.id);
                return None;
            }
            match clock::normalize_time(&alarm.time) {
                Ok(time) => Some(Alarm { time, ..alarm }),
                Err(e) => {
                    warn!("dropping stored alarm {}: {e}", alarm.id);
                    None
                }
            }
        })
        .collect())
}

impl AlarmManager {
    /// Reads the persisted list. Missing or unreadable data gives an empty list.
    #[must_use]
    pub fn load(store: impl Store + 'static) -> Self {
        let mut manager = Self {
            alarms: Vec::new(),
            store: Box::new(store),
            synced: None,
        };
        manager.refresh();
        debug!("loaded {} alarms", manager.alarms.len());
        manager
    }

    /// Picks up changes another writer made to the store. Returns whether the
    /// list was replaced. Malformed or unreadable data leaves the list alone.
    pub fn refresh(&mut self) -> bool {
        let json = match self.store.read(ALARMS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                warn!("couldn't read stored alarms: {e}");
                return false;
            }
        };
        if self.synced.as_deref() == Some(json.as_str()) {
            return false;
        }
        let replaced = match parse_stored(&json) {
            Ok(alarms) => {
                self.alarms = alarms;
                true
            }
            Err(e) => {
                warn!("stored alarms are malformed, ignoring them: {e}");
                false
            }
        };
        // remembered either way so a bad file is only reported once
        self.synced = Some(json);
        replaced
    }

    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Alarm> {
        self.alarms.iter().find(|alarm| alarm.id == id)
    }

    /// Appends a new enabled alarm and returns its id.
    /// Blank input is ignored and gives `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidTime`] if `time` can't be parsed (nothing is
    /// added), or the store error if saving failed (the alarm is kept).
    pub fn add(&mut self, time: &str) -> Result<Option<u64>> {
        if time.trim().is_empty() {
            return Ok(None);
        }
        let time = clock::normalize_time(time)?;
        self.refresh();
        let id = self.fresh_id();
        self.alarms.push(Alarm {
            id,
            time,
            enabled: true,
        });
        self.persist()?;
        Ok(Some(id))
    }

    /// Flips `enabled`. Returns whether an alarm with `id` exists.
    ///
    /// # Errors
    ///
    /// The store error if saving failed.
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        self.refresh();
        let Some(alarm) = self.alarms.iter_mut().find(|alarm| alarm.id == id) else {
            return Ok(false);
        };
        alarm.enabled = !alarm.enabled;
        self.persist()?;
        Ok(true)
    }

    /// Removes the alarm. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// The store error if saving failed.
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        self.refresh();
        let before = self.alarms.len();
        self.alarms.retain(|alarm| alarm.id != id);
        if self.alarms.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Writes the whole list to the store.
    ///
    /// # Errors
    ///
    /// Serialization or store write failures.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.alarms)?;
        self.store.write(ALARMS_KEY, &json)?;
        self.synced = Some(json);
        Ok(())
    }

    // creation time in millis, bumped past the newest id so two alarms made
    // in the same millisecond (add then snooze) still differ
    fn fresh_id(&self) -> u64 {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        let next = self
            .alarms
            .iter()
            .map(|alarm| alarm.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        now.max(next)
    }
}
