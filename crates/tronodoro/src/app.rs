use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};
use tracing::{info, warn};
use tronodoro_config::{ClockMode, Config, ConfigError};
use tronodoro_core::{ClockReading, PlaybackState, Snapshot, TimeOfDay};
use tronodoro_playback::PlaybackController;
use tronodoro_sky::{ClockSource, DayNightModel, RainEmitter, SimulatedClock, WallClock};

use crate::embed::{TerminalPlayer, spawn_player_init};
use crate::scene;

/// Volume change per key press.
const VOLUME_STEP: i16 = 5;

const ACCENT: Color = Color::Rgb(255, 210, 80);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    model: DayNightModel,
    clock: Box<dyn ClockSource>,
    clock_mode: ClockMode,
    rain: RainEmitter,
    playback: PlaybackController<TerminalPlayer>,
    /// Reading and model output from the latest tick.
    reading: ClockReading,
    snapshot: Snapshot,
    /// Last key action feedback shown in the status line.
    status: Option<String>,
    last_tick: Instant,
}

impl App {
    /// Build the scene from a validated config and start the music player.
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let model = DayNightModel::new(config.scene()?);
        let clock_mode = config.clock_mode();
        let clock = build_clock(&config, clock_mode)?;

        let seed = Local::now().timestamp_millis() as u64;
        let mut rain = RainEmitter::new(model.scene().rain, seed)
            .with_auto_toggle(config.rain.auto_toggle_secs);
        rain.set_raining(config.rain.enabled);

        let settings = &config.playback;
        let mut playback = PlaybackController::new(
            TerminalPlayer::new(settings.stream_id.as_str()),
            PlaybackState::new(false, settings.volume),
            settings.policy,
        );
        playback.subscribe(spawn_player_init(Duration::from_millis(
            settings.ready_delay_ms,
        ))?);

        let reading = clock.now();
        let snapshot = model.on_tick(&reading);
        info!(preset = %config.preset, clock = ?clock_mode, "scene started");

        Ok(Self {
            running: false,
            config,
            model,
            clock,
            clock_mode,
            rain,
            playback,
            reading,
            snapshot,
            status: None,
            last_tick: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.playback.teardown();
        info!("scene stopped");
        Ok(())
    }

    /// Advance the clock, the rain and the player readiness.
    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.rain.update(delta.as_millis() as u64);
        self.playback.poll_ready();

        let previous = self.snapshot.sky.time_of_day;
        self.reading = self.clock.now();
        self.snapshot = self.model.on_tick(&self.reading);
        if self.snapshot.sky.time_of_day != previous {
            info!(at = %self.reading, "time of day is now {}", self.snapshot.sky.time_of_day);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Scene
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        let area = chunks[0];
        let canvas = scene::paint(
            &self.snapshot,
            self.model.scene(),
            &self.rain,
            self.config.preset.has_landscape(),
            area.width,
            area.height,
        );
        frame.render_widget(Paragraph::new(canvas.into_lines()), area);

        frame.render_widget(self.status_line().centered(), chunks[1]);

        let help = Line::from(vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "m".bold().fg(ACCENT),
            " music  ".dark_gray(),
            "+/-".bold().fg(ACCENT),
            " volume  ".dark_gray(),
            "r".bold().fg(ACCENT),
            " rain  ".dark_gray(),
            "s".bold().fg(ACCENT),
            " clock  ".dark_gray(),
            "c".bold().fg(ACCENT),
            " scene  ".dark_gray(),
            "t".bold().fg(ACCENT),
            " tasks  ".dark_gray(),
            "p".bold().fg(ACCENT),
            " pomodoro".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[2]);
    }

    fn status_line(&self) -> Line<'static> {
        let player = self.playback.player();
        let music = if !self.playback.is_ready() {
            "player loading".to_string()
        } else if player.is_playing() {
            format!("♪ {}%", player.volume())
        } else {
            format!("paused {}%", player.volume())
        };
        let clock = match self.clock_mode {
            ClockMode::Wall => "",
            ClockMode::Simulated => " (simulated)",
        };

        let mut spans = vec![
            format!("{}{clock}", self.reading).bold(),
            format!("  {}  ", self.snapshot.sky.time_of_day).fg(time_of_day_color(
                self.snapshot.sky.time_of_day,
            )),
            self.config.preset.to_string().dark_gray(),
            "  ".into(),
            if self.rain.is_raining() {
                "rain".fg(Color::LightBlue)
            } else {
                "dry".dark_gray()
            },
            "  ".into(),
            music.into(),
        ];
        if let Some(status) = &self.status {
            spans.push("  ".into());
            spans.push(status.clone().italic());
        }
        Line::from(spans)
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one tick so the scene keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.config.clock.tick_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('m') | KeyCode::Char(' ')) => self.toggle_music(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.change_volume(VOLUME_STEP),
            (_, KeyCode::Char('-')) => self.change_volume(-VOLUME_STEP),
            (_, KeyCode::Char('r')) => self.toggle_rain(),
            (_, KeyCode::Char('s')) => self.toggle_clock(),
            (_, KeyCode::Char('c')) => self.cycle_preset(),
            (_, KeyCode::Char('t')) => self.open_tasks(),
            (_, KeyCode::Char('p')) => self.start_pomodoro(),
            _ => {}
        }
    }

    fn toggle_music(&mut self) {
        self.status = match self.playback.toggle() {
            Ok(true) => Some("music on".to_string()),
            Ok(false) => Some("music off".to_string()),
            Err(err) => Some(err.to_string()),
        };
    }

    fn change_volume(&mut self, delta: i16) {
        self.status = match self.playback.adjust_volume(delta) {
            Ok(volume) => Some(format!("volume {volume}%")),
            Err(err) => Some(err.to_string()),
        };
    }

    fn toggle_rain(&mut self) {
        self.rain.toggle();
        self.status = None;
    }

    /// Switch between the wall clock and a simulated clock.
    fn toggle_clock(&mut self) {
        let mode = match self.clock_mode {
            ClockMode::Wall => ClockMode::Simulated,
            ClockMode::Simulated => ClockMode::Wall,
        };
        match build_clock(&self.config, mode) {
            Ok(clock) => {
                info!(clock = ?mode, "clock switched");
                self.clock = clock;
                self.clock_mode = mode;
                self.status = None;
            }
            Err(err) => {
                warn!("cannot switch clock: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Move to the next preset, picking up its default clock.
    fn cycle_preset(&mut self) {
        let mut config = self.config.clone();
        config.preset = config.preset.next();

        let mode = config.clock_mode();
        match config.scene().and_then(|scene| Ok((scene, build_clock(&config, mode)?))) {
            Ok((scene, clock)) => {
                info!(preset = %config.preset, "preset changed");
                self.model = DayNightModel::new(scene);
                self.clock = clock;
                self.clock_mode = mode;
                self.config = config;
                self.status = None;
            }
            Err(err) => {
                warn!(preset = %config.preset, "cannot switch preset: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    fn open_tasks(&mut self) {
        info!("task menu requested");
        self.status = Some("task menu".to_string());
    }

    fn start_pomodoro(&mut self) {
        info!("pomodoro started");
        self.status = Some("pomodoro started".to_string());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn build_clock(config: &Config, mode: ClockMode) -> Result<Box<dyn ClockSource>, ConfigError> {
    Ok(match mode {
        ClockMode::Wall => Box::new(WallClock),
        ClockMode::Simulated => {
            let multiplier = config.clock.multiplier;
            Box::new(match config.simulated_start()? {
                Some(start) => SimulatedClock::new(start, multiplier),
                None => SimulatedClock::starting_now(multiplier),
            })
        }
    })
}

fn time_of_day_color(time_of_day: TimeOfDay) -> Color {
    match time_of_day {
        TimeOfDay::Night => Color::LightBlue,
        TimeOfDay::Dawn => Color::LightMagenta,
        TimeOfDay::Day => Color::LightYellow,
        TimeOfDay::Dusk => Color::LightRed,
    }
}
