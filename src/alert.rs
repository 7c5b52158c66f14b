use log::{info, warn};

use crate::error::Result;

/// Something that can sound the alarm.
pub trait Player {
    /// starts the alert from the beginning
    fn play(&mut self) -> Result<()>;
    /// stops the alert and rewinds it
    fn stop(&mut self);
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Used when no sound could be loaded, the prompt still shows.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Player for Silent {
    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertState {
    #[default]
    Idle,
    Ringing {
        alarm_id: u64,
    },
}

pub struct AlertPresenter {
    state: AlertState,
    player: Box<dyn Player>,
}

impl std::fmt::Debug for AlertPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertPresenter")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl AlertPresenter {
    #[must_use]
    pub fn new(player: impl Player + 'static) -> Self {
        Self {
            state: AlertState::Idle,
            player: Box::new(player),
        }
    }

    #[must_use]
    pub const fn state(&self) -> AlertState {
        self.state
    }

    #[must_use]
    pub const fn ringing(&self) -> Option<u64> {
        match self.state {
            AlertState::Ringing { alarm_id } => Some(alarm_id),
            AlertState::Idle => None,
        }
    }

    /// Starts ringing for `alarm_id`. Does nothing and returns `false` if an
    /// alarm is already ringing.
    pub fn ring(&mut self, alarm_id: u64) -> bool {
        if self.ringing().is_some() {
            return false;
        }
        info!("alarm {alarm_id} ringing");
        self.state = AlertState::Ringing { alarm_id };
        if let Err(e) = self.player.play() {
            warn!("couldn't play alarm sound for alarm {alarm_id}: {e}");
        }
        true
    }

    /// Stops ringing and returns the alarm that was ringing.
    pub fn dismiss(&mut self) -> Option<u64> {
        let alarm_id = self.ringing()?;
        self.player.stop();
        self.state = AlertState::Idle;
        info!("alarm {alarm_id} dismissed");
        Some(alarm_id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::error::Error;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Event {
        Play,
        Stop,
    }

    /// records calls, optionally failing every `play`
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Recorder {
        pub(crate) events: Rc<RefCell<Vec<Event>>>,
        pub(crate) fail: bool,
    }

    impl Player for Recorder {
        fn play(&mut self) -> Result<()> {
            self.events.borrow_mut().push(Event::Play);
            if self.fail {
                Err(Error::Audio("autoplay blocked".to_string()))
            } else {
                Ok(())
            }
        }

        fn stop(&mut self) {
            self.events.borrow_mut().push(Event::Stop);
        }
    }

    #[test]
    fn ring_then_dismiss() {
        let recorder = Recorder::default();
        let mut alert = AlertPresenter::new(recorder.clone());
        assert_eq!(alert.state(), AlertState::Idle);
        assert!(alert.ring(7));
        assert_eq!(alert.state(), AlertState::Ringing { alarm_id: 7 });
        assert_eq!(alert.dismiss(), Some(7));
        assert_eq!(alert.state(), AlertState::Idle);
        assert_eq!(*recorder.events.borrow(), [Event::Play, Event::Stop]);
    }

    #[test]
    fn second_ring_does_not_stack() {
        let recorder = Recorder::default();
        let mut alert = AlertPresenter::new(recorder.clone());
        assert!(alert.ring(1));
        assert!(!alert.ring(2));
        assert_eq!(alert.ringing(), Some(1));
        assert_eq!(*recorder.events.borrow(), [Event::Play]);
    }

    #[test]
    fn dismiss_when_idle_does_nothing() {
        let recorder = Recorder::default();
        let mut alert = AlertPresenter::new(recorder.clone());
        assert_eq!(alert.dismiss(), None);
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn playback_failure_still_rings() {
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut alert = AlertPresenter::new(recorder);
        assert!(alert.ring(3));
        assert_eq!(alert.ringing(), Some(3));
    }
}
