//! `speechSynthesis`-backed voice feedback.

use platform_host::{Personality, SpeechService};

#[derive(Debug, Clone, Copy, Default)]
/// Speaks announcements through the Web Speech API when the browser offers it.
pub struct WebSpeechService;

impl SpeechService for WebSpeechService {
    fn announce(&self, message: &str, personality: Personality) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(synth) = window.speech_synthesis() else {
                return;
            };
            let Ok(utterance) = web_sys::SpeechSynthesisUtterance::new_with_text(message) else {
                return;
            };
            let profile = personality.voice_profile();
            utterance.set_rate(profile.rate);
            utterance.set_pitch(profile.pitch);
            utterance.set_volume(profile.volume);
            synth.cancel();
            synth.speak(&utterance);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = (message, personality);
    }
}
