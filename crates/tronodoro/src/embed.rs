//! Terminal stand-in for the embedded music player.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use tracing::{debug, info};
use tronodoro_playback::EmbedPlayer;

/// Player that logs the commands it receives instead of streaming audio.
#[derive(Debug)]
pub struct TerminalPlayer {
    stream_id: String,
    playing: bool,
    volume: u8,
}

impl TerminalPlayer {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            playing: false,
            volume: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl EmbedPlayer for TerminalPlayer {
    fn play(&mut self) {
        self.playing = true;
        info!(stream = %self.stream_id, volume = self.volume, "play");
    }

    fn pause(&mut self) {
        self.playing = false;
        info!(stream = %self.stream_id, "pause");
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
        debug!(volume, "player volume set");
    }
}

/// Bring the player up on a background thread. The returned receiver gets a
/// single message once the player is ready.
pub fn spawn_player_init(delay: Duration) -> io::Result<Receiver<()>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("player-init".to_string())
        .spawn(move || {
            thread::sleep(delay);
            // Nobody listening any more is fine.
            let _ = tx.send(());
        })?;
    Ok(rx)
}
