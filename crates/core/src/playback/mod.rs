use serde::{Deserialize, Serialize};

use crate::CatalogStore;

/// Intended playback state. At most one beat is ever playing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(String),
}

/// Media backend that turns playback transitions into actual audio.
///
/// The core never reads state back from the driver.
pub trait AudioDriver {
    fn play(&mut self, beat_id: &str, preview_uri: &str);
    fn pause(&mut self, beat_id: &str);
}

/// What changed on a toggle: the beat to pause and the beat to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackTransition {
    pub stopped: Option<String>,
    pub started: Option<String>,
    pub state: PlaybackState,
}

impl PlaybackTransition {
    /// Forwards the transition to `driver`, pausing before starting.
    pub fn dispatch(&self, catalog: &CatalogStore, driver: &mut dyn AudioDriver) {
        if let Some(id) = &self.stopped {
            driver.pause(id);
        }
        if let Some(id) = &self.started {
            match catalog.get(id) {
                Some(beat) => driver.play(id, &beat.preview_uri),
                None => tracing::warn!(beat_id = %id, "no preview for unknown beat"),
            }
        }
    }
}

/// Single-slot playback state machine.
#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops `beat_id` if it is playing, otherwise makes it the only playing beat.
    pub fn toggle(&mut self, beat_id: &str) -> PlaybackTransition {
        let previous = std::mem::take(&mut self.state);
        let (stopped, started) = match previous {
            PlaybackState::Playing(current) if current == beat_id => (Some(current), None),
            PlaybackState::Playing(current) => (Some(current), Some(beat_id.to_string())),
            PlaybackState::Idle => (None, Some(beat_id.to_string())),
        };

        if let Some(id) = &started {
            self.state = PlaybackState::Playing(id.clone());
        }
        tracing::debug!(?stopped, ?started, "playback toggled");

        PlaybackTransition {
            stopped,
            started,
            state: self.state.clone(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn current(&self) -> Option<&str> {
        match &self.state {
            PlaybackState::Playing(id) => Some(id.as_str()),
            PlaybackState::Idle => None,
        }
    }

    pub fn is_playing(&self, beat_id: &str) -> bool {
        self.current() == Some(beat_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct RecordingDriver {
        commands: Vec<String>,
    }

    impl AudioDriver for RecordingDriver {
        fn play(&mut self, beat_id: &str, preview_uri: &str) {
            self.commands.push(format!("play {beat_id} {preview_uri}"));
        }

        fn pause(&mut self, beat_id: &str) {
            self.commands.push(format!("pause {beat_id}"));
        }
    }

    #[test]
    fn starts_idle() {
        let playback = PlaybackController::new();
        assert_eq!(playback.state(), &PlaybackState::Idle);
        assert_eq!(playback.current(), None);
    }

    #[test]
    fn double_toggle_returns_to_idle() {
        let mut playback = PlaybackController::new();
        playback.toggle("b1");
        let transition = playback.toggle("b1");

        assert_eq!(transition.stopped.as_deref(), Some("b1"));
        assert_eq!(transition.started, None);
        assert_eq!(playback.state(), &PlaybackState::Idle);
    }

    #[test]
    fn new_id_supersedes_current() {
        let mut playback = PlaybackController::new();
        assert_eq!(
            playback.toggle("b1").state,
            PlaybackState::Playing("b1".into())
        );

        let transition = playback.toggle("b2");
        assert_eq!(transition.stopped.as_deref(), Some("b1"));
        assert_eq!(transition.started.as_deref(), Some("b2"));
        assert!(playback.is_playing("b2"));
        assert!(!playback.is_playing("b1"));

        playback.toggle("b2");
        assert_eq!(playback.state(), &PlaybackState::Idle);
    }

    #[test]
    fn dispatch_pauses_before_playing() {
        let catalog = CatalogStore::demo();
        let mut playback = PlaybackController::new();
        let mut driver = RecordingDriver::default();

        playback.toggle("b1").dispatch(&catalog, &mut driver);
        playback.toggle("b3").dispatch(&catalog, &mut driver);
        playback.toggle("b3").dispatch(&catalog, &mut driver);

        assert_eq!(
            driver.commands,
            [
                "play b1 /audio/midnight-drive.mp3",
                "pause b1",
                "play b3 /audio/cloud-city.mp3",
                "pause b3",
            ]
        );
    }

    #[test]
    fn dispatch_skips_unknown_beats() {
        let catalog = CatalogStore::demo();
        let mut playback = PlaybackController::new();
        let mut driver = RecordingDriver::default();

        playback.toggle("ghost").dispatch(&catalog, &mut driver);

        assert!(driver.commands.is_empty());
        assert!(playback.is_playing("ghost"));
    }
}
