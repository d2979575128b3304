//! Voice feedback surface contracts.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Speaking style requested for an announcement.
pub enum Personality {
    /// Warm, slightly raised pitch.
    Friendly,
    /// Neutral and measured.
    Professional,
    /// Fast and bright.
    Enthusiastic,
    /// Slow and quiet.
    Calm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Speech synthesis parameters for a [`Personality`].
pub struct VoiceProfile {
    /// Speaking rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Volume in `0.0..=1.0`.
    pub volume: f32,
}

impl Personality {
    /// Returns the synthesis parameters used for this personality.
    pub const fn voice_profile(self) -> VoiceProfile {
        match self {
            Self::Friendly => VoiceProfile {
                rate: 0.9,
                pitch: 1.1,
                volume: 0.9,
            },
            Self::Professional => VoiceProfile {
                rate: 0.85,
                pitch: 1.0,
                volume: 0.8,
            },
            Self::Enthusiastic => VoiceProfile {
                rate: 0.95,
                pitch: 1.2,
                volume: 1.0,
            },
            Self::Calm => VoiceProfile {
                rate: 0.8,
                pitch: 0.9,
                volume: 0.7,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A recorded announcement.
pub struct Announcement {
    /// Spoken text.
    pub message: String,
    /// Requested personality.
    pub personality: Personality,
}

/// Host service for spoken feedback. Fire-and-forget.
pub trait SpeechService {
    /// Speaks `message` using `personality`.
    fn announce(&self, message: &str, personality: Personality);
}

#[derive(Debug, Clone, Copy, Default)]
/// Speech service that stays silent.
pub struct NoopSpeechService;

impl SpeechService for NoopSpeechService {
    fn announce(&self, _message: &str, _personality: Personality) {}
}

#[derive(Debug, Clone, Default)]
/// Speech service that records announcements for inspection.
pub struct MemorySpeechService {
    spoken: Rc<RefCell<Vec<Announcement>>>,
}

impl MemorySpeechService {
    /// Returns every recorded announcement.
    pub fn announcements(&self) -> Vec<Announcement> {
        self.spoken.borrow().clone()
    }
}

impl SpeechService for MemorySpeechService {
    fn announce(&self, message: &str, personality: Personality) {
        self.spoken.borrow_mut().push(Announcement {
            message: message.to_string(),
            personality,
        });
    }
}
