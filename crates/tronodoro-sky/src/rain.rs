//! Rain particle emitter (stateful).

use tracing::info;
use tronodoro_config::RainEmitterConfig;
use tronodoro_core::RainState;

/// Most emissions performed in a single update, so a long stall does not
/// dump a burst of drops at the spawn line.
const MAX_EMISSIONS_PER_UPDATE: u64 = 8;

/// A single falling drop.
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    /// Horizontal position in scene coordinates.
    pub x: f32,
    /// Vertical position in scene coordinates.
    pub y: f32,
    /// Fall speed in scene units per second.
    pub speed_y: f32,
    /// Time since the drop was spawned.
    pub age_ms: u64,
}

/// Spawns drops while rain is on and moves them until their lifespan ends.
///
/// Switching rain off only stops new drops; those already falling finish
/// their lifespan.
#[derive(Debug, Clone)]
pub struct RainEmitter {
    config: RainEmitterConfig,
    state: RainState,
    drops: Vec<RainDrop>,
    /// Time accumulated towards the next emission.
    since_emit_ms: u64,
    /// Toggle rain automatically every this many milliseconds (0 = never).
    auto_toggle_ms: u64,
    /// Time accumulated towards the next automatic toggle.
    since_toggle_ms: u64,
    /// Seed captured at initialization for randomness.
    seed: u64,
    /// Random values drawn so far.
    draws: u64,
}

impl RainEmitter {
    pub fn new(config: RainEmitterConfig, seed: u64) -> Self {
        Self {
            config,
            state: RainState::default(),
            drops: Vec::new(),
            since_emit_ms: 0,
            auto_toggle_ms: 0,
            since_toggle_ms: 0,
            seed,
            draws: 0,
        }
    }

    /// Toggle rain on its own every `secs` seconds (0 disables).
    pub fn with_auto_toggle(mut self, secs: u64) -> Self {
        self.auto_toggle_ms = secs.saturating_mul(1000);
        self
    }

    pub fn state(&self) -> RainState {
        self.state
    }

    pub fn is_raining(&self) -> bool {
        self.state.is_raining
    }

    pub fn set_raining(&mut self, on: bool) {
        if self.state.is_raining != on {
            self.toggle();
        }
    }

    /// Flip rain on or off, returning the new state.
    pub fn toggle(&mut self) -> bool {
        let on = self.state.toggle();
        self.since_emit_ms = 0;
        info!("rain toggled: {}", if on { "on" } else { "off" });
        on
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Progress of `drop` through its life, 0.0 at birth and 1.0 at death.
    pub fn life_fraction(&self, drop: &RainDrop) -> f32 {
        drop.age_ms as f32 / self.config.lifespan_ms.max(1) as f32
    }

    /// Current scale of `drop`.
    pub fn scale_of(&self, drop: &RainDrop) -> f32 {
        self.config.scale.lerp(self.life_fraction(drop))
    }

    /// Current opacity of `drop`.
    pub fn alpha_of(&self, drop: &RainDrop) -> f32 {
        self.config.alpha.lerp(self.life_fraction(drop))
    }

    /// Advance the simulation by `delta_ms`.
    pub fn update(&mut self, delta_ms: u64) {
        if self.auto_toggle_ms > 0 {
            self.since_toggle_ms += delta_ms;
            if self.since_toggle_ms >= self.auto_toggle_ms {
                self.since_toggle_ms %= self.auto_toggle_ms;
                self.toggle();
            }
        }

        let lifespan = self.config.lifespan_ms;
        let dt = delta_ms as f32 / 1000.0;
        for drop in &mut self.drops {
            drop.age_ms += delta_ms;
            drop.y += drop.speed_y * dt;
        }
        self.drops.retain(|drop| drop.age_ms < lifespan);

        if !self.state.is_raining {
            return;
        }

        let interval = self.config.spawn_interval_ms.max(1);
        self.since_emit_ms += delta_ms;
        let emissions = self.since_emit_ms / interval;
        self.since_emit_ms %= interval;

        for _ in 0..emissions.min(MAX_EMISSIONS_PER_UPDATE) {
            self.emit();
        }
    }

    fn emit(&mut self) {
        for _ in 0..self.config.quantity {
            let along = self.next_random();
            let speed = self.next_random();
            let x = self.config.spawn_x.lerp(along);
            let speed_y = self.config.speed_y.lerp(speed);
            self.drops.push(RainDrop {
                x,
                y: self.config.spawn_y,
                speed_y,
                age_ms: 0,
            });
        }
    }

    /// Deterministic pseudo-random value in `[0, 1)`.
    fn next_random(&mut self) -> f32 {
        self.draws = self.draws.wrapping_add(1);
        let mut z = self
            .seed
            .wrapping_add(self.draws.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 40) as f32 / (1u64 << 24) as f32
    }
}
