//! Everything the clock window shows, owned in one place.
//!
//! The UI only ever goes through [`AppState`], which keeps matching,
//! ringing and persistence independent of egui.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};

use crate::{
    alarm::{Alarm, AlarmManager},
    alert::{AlertPresenter, Player},
    clock,
    error::Result,
    store::Store,
};

/// one minute short of a day
pub const MAX_SNOOZE_MINUTES: u32 = 24 * 60 - 1;

#[derive(Debug)]
pub struct AppState {
    alarms: AlarmManager,
    alert: AlertPresenter,
    current_time_display: String,
    snooze_minutes: u32,
    // day each alarm last rang, an alarm matches during one minute a day so
    // this stops it ringing again after being dismissed within that minute
    fired: HashMap<u64, NaiveDate>,
}

impl AppState {
    #[must_use]
    pub fn new(store: impl Store + 'static, player: impl Player + 'static) -> Self {
        Self {
            alarms: AlarmManager::load(store),
            alert: AlertPresenter::new(player),
            current_time_display: String::new(),
            snooze_minutes: 5,
            fired: HashMap::new(),
        }
    }

    /// Clamped to `1..=MAX_SNOOZE_MINUTES`, a snooze that lands back on the
    /// current minute would ring again straight away.
    #[must_use]
    pub fn with_snooze_minutes(mut self, minutes: u32) -> Self {
        self.snooze_minutes = minutes.clamp(1, MAX_SNOOZE_MINUTES);
        self
    }

    #[must_use]
    pub fn alarms(&self) -> &[Alarm] {
        self.alarms.alarms()
    }

    #[must_use]
    pub fn current_time_display(&self) -> &str {
        &self.current_time_display
    }

    #[must_use]
    pub const fn snooze_minutes(&self) -> u32 {
        self.snooze_minutes
    }

    #[must_use]
    pub const fn ringing_alarm_id(&self) -> Option<u64> {
        self.alert.ringing()
    }

    #[must_use]
    pub fn ringing_alarm(&self) -> Option<&Alarm> {
        self.ringing_alarm_id().and_then(|id| self.alarms.get(id))
    }

    /// One poll of the clock. Picks up alarms changed from outside, then
    /// returns the alarm that started ringing, if any.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<u64> {
        self.current_time_display = clock::format_time(now.time());
        if self.alarms.refresh() {
            debug!("alarm list changed on disk, reloaded");
            // deleted or disabled from outside while ringing
            if let Some(id) = self.alert.ringing() {
                if !self.alarms.get(id).is_some_and(|alarm| alarm.enabled) {
                    self.alert.dismiss();
                }
            }
        }
        if self.alert.ringing().is_some() {
            return None;
        }
        let today = now.date();
        let now_display = self.current_time_display.as_str();
        let fired = &self.fired;
        let found = self
            .alarms
            .alarms()
            .iter()
            .find(|alarm| alarm.matches(now_display) && fired.get(&alarm.id) != Some(&today))?
            .id;
        // alarms sharing the minute count as rung too, only one prompt per minute
        for alarm in self.alarms.alarms() {
            if alarm.matches(now_display) {
                self.fired.insert(alarm.id, today);
            }
        }
        self.alert.ring(found);
        Some(found)
    }

    /// # Errors
    ///
    /// See [`AlarmManager::add`].
    pub fn add(&mut self, time: &str) -> Result<Option<u64>> {
        let id = self.alarms.add(time)?;
        if let Some(id) = id {
            info!("added alarm {id}");
        }
        Ok(id)
    }

    /// Disabling the ringing alarm also stops it.
    ///
    /// # Errors
    ///
    /// See [`AlarmManager::toggle`].
    pub fn toggle(&mut self, id: u64) -> Result<bool> {
        let found = self.alarms.toggle(id);
        let disabled = self.alarms.get(id).is_some_and(|alarm| !alarm.enabled);
        if disabled && self.ringing_alarm_id() == Some(id) {
            self.alert.dismiss();
        }
        found
    }

    /// Deleting the ringing alarm also stops it.
    ///
    /// # Errors
    ///
    /// See [`AlarmManager::delete`].
    pub fn delete(&mut self, id: u64) -> Result<bool> {
        if self.ringing_alarm_id() == Some(id) {
            self.alert.dismiss();
        }
        self.fired.remove(&id);
        let removed = self.alarms.delete(id)?;
        if removed {
            info!("deleted alarm {id}");
        }
        Ok(removed)
    }

    pub fn dismiss(&mut self) -> Option<u64> {
        self.alert.dismiss()
    }

    /// Stops the ringing alarm and adds a new one `snooze_minutes` after
    /// `now`. The ringing alarm itself is left alone. Does nothing if no
    /// alarm is ringing.
    ///
    /// # Errors
    ///
    /// If the snoozed alarm couldn't be saved (it is still added).
    pub fn snooze(&mut self, now: NaiveDateTime) -> Result<Option<u64>> {
        let Some(ringing) = self.alert.dismiss() else {
            return Ok(None);
        };
        let time = clock::format_time(clock::snooze_time(now.time(), self.snooze_minutes));
        debug!("snoozing alarm {ringing} until {time}");
        self.alarms.add(&time)
    }
}
