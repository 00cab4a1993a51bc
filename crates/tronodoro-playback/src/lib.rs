//! Background music toggle.
//!
//! The music comes from an embedded player that starts up asynchronously.
//! [`PlaybackController`] keeps the desired [`PlaybackState`], mirrors it into
//! the player once the player reports ready, and decides what happens to
//! commands issued before that according to a [`PendingPolicy`].

use std::sync::mpsc::{Receiver, TryRecvError};

use thiserror::Error;
use tracing::{debug, info, warn};
use tronodoro_core::{PendingPolicy, PlaybackState};

/// The embedded player the controller drives.
pub trait EmbedPlayer {
    fn play(&mut self);
    fn pause(&mut self);
    /// Set the volume in percent (0-100).
    fn set_volume(&mut self, volume: u8);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The player has not signalled readiness and the command was dropped.
    #[error("embedded player is not ready, command dropped")]
    NotReady,
}

/// Play/pause toggle and volume, mirrored into an [`EmbedPlayer`].
#[derive(Debug)]
pub struct PlaybackController<P> {
    player: P,
    state: PlaybackState,
    policy: PendingPolicy,
    ready: bool,
    /// The desired state changed before the player was ready.
    pending: bool,
    /// One-shot readiness signal from the player.
    ready_signal: Option<Receiver<()>>,
}

impl<P: EmbedPlayer> PlaybackController<P> {
    pub fn new(player: P, initial: PlaybackState, policy: PendingPolicy) -> Self {
        Self {
            player,
            state: initial,
            policy,
            ready: false,
            pending: false,
            ready_signal: None,
        }
    }

    /// Listen for the player's readiness signal. Only the first message
    /// counts; the subscription is dropped once it arrives.
    pub fn subscribe(&mut self, signal: Receiver<()>) {
        self.ready_signal = Some(signal);
    }

    /// Check the readiness signal without blocking. Returns whether the
    /// player is ready.
    pub fn poll_ready(&mut self) -> bool {
        if self.ready {
            return true;
        }

        if let Some(signal) = &self.ready_signal {
            match signal.try_recv() {
                Ok(()) => {
                    self.ready_signal = None;
                    self.mark_ready();
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    warn!("player went away before signalling readiness");
                    self.ready_signal = None;
                }
            }
        }

        self.ready
    }

    /// Record that the player is ready and mirror the current state into it,
    /// including anything queued before.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        info!("embedded player ready");

        debug!(
            playing = self.state.is_playing,
            volume = self.state.volume,
            queued = self.pending,
            "applying playback state"
        );
        self.pending = false;
        self.player.set_volume(self.state.volume);
        if self.state.is_playing {
            self.player.play();
        }
    }

    /// Drop the readiness subscription.
    pub fn teardown(&mut self) {
        if self.ready_signal.take().is_some() {
            debug!("readiness subscription dropped");
        }
    }

    /// Flip between playing and paused. Returns whether music is now playing.
    pub fn toggle(&mut self) -> Result<bool, PlaybackError> {
        let playing = !self.state.is_playing;
        self.dispatch(PlaybackState {
            is_playing: playing,
            ..self.state
        })?;
        if self.ready {
            if playing {
                self.player.play();
            } else {
                self.player.pause();
            }
        }
        info!("music {}", if playing { "playing" } else { "paused" });
        Ok(playing)
    }

    /// Set the volume, clamped to 0-100. Returns the applied volume.
    pub fn set_volume(&mut self, volume: u8) -> Result<u8, PlaybackError> {
        let volume = volume.min(PlaybackState::MAX_VOLUME);
        self.dispatch(PlaybackState {
            volume,
            ..self.state
        })?;
        if self.ready {
            self.player.set_volume(volume);
        }
        Ok(volume)
    }

    /// Change the volume by `delta` percentage points.
    pub fn adjust_volume(&mut self, delta: i16) -> Result<u8, PlaybackError> {
        let volume = (self.state.volume as i16 + delta).clamp(0, PlaybackState::MAX_VOLUME as i16);
        self.set_volume(volume as u8)
    }

    /// Accept `desired` as the new state, or refuse it if the player is not
    /// ready and the policy says to drop.
    fn dispatch(&mut self, desired: PlaybackState) -> Result<(), PlaybackError> {
        if !self.ready {
            match self.policy {
                PendingPolicy::QueueLatest => {
                    debug!("player not ready, queueing playback state");
                    self.pending = true;
                }
                PendingPolicy::DropBeforeReady => {
                    warn!("player not ready, dropping playback command");
                    return Err(PlaybackError::NotReady);
                }
            }
        }
        self.state = desired;
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether a state change is waiting for the player.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Command {
        Play,
        Pause,
        Volume(u8),
    }

    #[derive(Debug, Default)]
    struct RecordingPlayer {
        commands: Vec<Command>,
    }

    impl RecordingPlayer {
        fn is_playing(&self) -> bool {
            self.commands
                .iter()
                .rev()
                .find_map(|c| match c {
                    Command::Play => Some(true),
                    Command::Pause => Some(false),
                    Command::Volume(_) => None,
                })
                .unwrap_or(false)
        }
    }

    impl EmbedPlayer for RecordingPlayer {
        fn play(&mut self) {
            self.commands.push(Command::Play);
        }

        fn pause(&mut self) {
            self.commands.push(Command::Pause);
        }

        fn set_volume(&mut self, volume: u8) {
            self.commands.push(Command::Volume(volume));
        }
    }

    fn controller(policy: PendingPolicy) -> PlaybackController<RecordingPlayer> {
        PlaybackController::new(RecordingPlayer::default(), PlaybackState::default(), policy)
    }

    #[test]
    fn test_toggle_when_ready() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        playback.mark_ready();

        assert_eq!(playback.toggle(), Ok(true));
        assert_eq!(playback.toggle(), Ok(false));
        assert_eq!(
            playback.player().commands,
            vec![Command::Volume(50), Command::Play, Command::Pause]
        );
    }

    #[test]
    fn test_queued_play_applies_on_ready() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        let (tx, rx) = mpsc::channel();
        playback.subscribe(rx);

        assert_eq!(playback.toggle(), Ok(true));
        assert!(playback.has_pending());
        assert!(playback.player().commands.is_empty());
        assert!(!playback.poll_ready());

        tx.send(()).unwrap();
        assert!(playback.poll_ready());
        assert!(!playback.has_pending());
        assert!(playback.player().is_playing());
        assert_eq!(
            playback.player().commands,
            vec![Command::Volume(50), Command::Play]
        );
    }

    #[test]
    fn test_only_latest_state_is_applied() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        playback.toggle().unwrap();
        playback.set_volume(80).unwrap();
        playback.toggle().unwrap();

        playback.mark_ready();
        assert_eq!(playback.player().commands, vec![Command::Volume(80)]);
        assert!(!playback.player().is_playing());
        assert_eq!(playback.state(), PlaybackState::new(false, 80));
    }

    #[test]
    fn test_initial_state_reaches_player_on_ready() {
        let mut playback = PlaybackController::new(
            RecordingPlayer::default(),
            PlaybackState::new(false, 35),
            PendingPolicy::QueueLatest,
        );
        playback.mark_ready();
        assert!(!playback.has_pending());
        assert_eq!(playback.player().commands, vec![Command::Volume(35)]);

        playback.toggle().unwrap();
        assert_eq!(
            playback.player().commands,
            vec![Command::Volume(35), Command::Play]
        );
    }

    #[test]
    fn test_initially_playing_starts_on_ready() {
        let mut playback = PlaybackController::new(
            RecordingPlayer::default(),
            PlaybackState::new(true, 50),
            PendingPolicy::DropBeforeReady,
        );
        playback.mark_ready();
        assert!(playback.player().is_playing());
    }

    #[test]
    fn test_dropped_play_never_plays() {
        let mut playback = controller(PendingPolicy::DropBeforeReady);
        assert_eq!(playback.toggle(), Err(PlaybackError::NotReady));
        assert_eq!(playback.set_volume(10), Err(PlaybackError::NotReady));
        assert_eq!(playback.state(), PlaybackState::default());

        playback.mark_ready();
        assert!(!playback.player().is_playing());
        assert_eq!(playback.player().commands, vec![Command::Volume(50)]);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        playback.mark_ready();
        assert_eq!(playback.set_volume(150), Ok(100));
        assert_eq!(playback.adjust_volume(-130), Ok(0));
        assert_eq!(playback.adjust_volume(5), Ok(5));
        assert_eq!(
            playback.player().commands,
            vec![
                Command::Volume(50),
                Command::Volume(100),
                Command::Volume(0),
                Command::Volume(5)
            ]
        );
    }

    #[test]
    fn test_readiness_is_single_shot() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        let (tx, rx) = mpsc::channel();
        playback.subscribe(rx);
        tx.send(()).unwrap();
        tx.send(()).unwrap();

        assert!(playback.poll_ready());
        playback.toggle().unwrap();
        assert!(playback.poll_ready());
        assert_eq!(
            playback.player().commands,
            vec![Command::Volume(50), Command::Play]
        );
    }

    #[test]
    fn test_closed_signal_leaves_player_not_ready() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        let (tx, rx) = mpsc::channel::<()>();
        playback.subscribe(rx);
        drop(tx);

        assert!(!playback.poll_ready());
        assert!(!playback.is_ready());
    }

    #[test]
    fn test_teardown_unsubscribes() {
        let mut playback = controller(PendingPolicy::QueueLatest);
        let (tx, rx) = mpsc::channel();
        playback.subscribe(rx);
        playback.teardown();

        // The sender sees the receiver gone.
        assert!(tx.send(()).is_err());
        assert!(!playback.poll_ready());
    }
}
