//! Scene painting.
//!
//! Turns a model [`Snapshot`] into a grid of terminal cells. Positions come in
//! scene coordinates (the configured viewport) and are scaled to the terminal
//! size, so the layout keeps its proportions in any window.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use tronodoro_config::{ClockFace, SceneConfig, Viewport};
use tronodoro_core::{Hands, Point, Rgb, Snapshot};
use tronodoro_sky::{RainEmitter, interpolate_color};

/// Characters used for the night sky.
const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

const STAR_COLOR: Rgb = Rgb::new(220, 220, 255);
const SUN_COLOR: Rgb = Rgb::new(255, 210, 80);
const MOON_COLOR: Rgb = Rgb::new(235, 235, 250);
const RAIN_COLOR: Rgb = Rgb::new(170, 195, 255);
const FACE_COLOR: Rgb = Rgb::new(245, 245, 240);
const HAND_COLOR: Rgb = Rgb::new(20, 20, 20);
const SECOND_HAND_COLOR: Rgb = Rgb::new(200, 40, 40);

const SUN_GLYPH: char = '☀';
const MOON_GLYPH: char = '☾';
const CLOCK_CENTER_GLYPH: char = '◉';
const RAIN_GLYPHS: [char; 2] = ['╎', '│'];

/// Untinted colors of the back, middle and front mountain layers.
const MOUNTAIN_COLORS: [Rgb; 3] = [
    Rgb::new(130, 150, 180),
    Rgb::new(90, 115, 125),
    Rgb::new(60, 85, 75),
];

/// Ridge line of one mountain layer. Heights are fractions of the viewport
/// height measured from the bottom edge.
#[derive(Debug, Clone, Copy)]
struct Ridge {
    base: f32,
    amplitude: f32,
    frequency: f32,
    phase: f32,
}

impl Ridge {
    fn height(&self, x: f32) -> f32 {
        let wave = (x * self.frequency * TAU + self.phase).sin() * 0.6
            + (x * self.frequency * 2.3 * TAU + self.phase * 1.7).sin() * 0.4;
        self.base + self.amplitude * wave
    }
}

const RIDGES: [Ridge; 3] = [
    Ridge {
        base: 0.42,
        amplitude: 0.08,
        frequency: 1.3,
        phase: 0.4,
    },
    Ridge {
        base: 0.30,
        amplitude: 0.07,
        frequency: 1.9,
        phase: 2.1,
    },
    Ridge {
        base: 0.17,
        amplitude: 0.05,
        frequency: 2.7,
        phase: 4.0,
    },
];

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

/// A grid of cells the size of the terminal area.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut(y as usize * self.width as usize + x as usize)
    }

    /// Draw a glyph, keeping the cell's background.
    fn put(&mut self, x: u16, y: u16, ch: char, fg: Rgb) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Fill a cell with a flat color.
    fn fill(&mut self, x: u16, y: u16, bg: Rgb) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = Cell { ch: ' ', fg: bg, bg };
        }
    }

    /// Scale every color by `factor`, as if seen through a black overlay of
    /// opacity `1 - factor`.
    fn dim(&mut self, factor: f32) {
        for cell in &mut self.cells {
            cell.fg = cell.fg.scale(factor);
            cell.bg = cell.bg.scale(factor);
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        Span::styled(
                            cell.ch.to_string(),
                            Style::new().fg(cell.fg.into()).bg(cell.bg.into()),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Maps scene coordinates to terminal cells and back.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    scale_x: f32,
    scale_y: f32,
    width: u16,
    height: u16,
}

impl Projection {
    pub fn new(viewport: Viewport, width: u16, height: u16) -> Self {
        Self {
            scale_x: width as f32 / viewport.width,
            scale_y: height as f32 / viewport.height,
            width,
            height,
        }
    }

    /// Cell containing `point`, if it is on screen.
    pub fn to_cell(&self, point: Point) -> Option<(u16, u16)> {
        let x = (point.x * self.scale_x).floor();
        let y = (point.y * self.scale_y).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as u16, y as u16))
    }

    /// Scene position of the center of a cell.
    pub fn to_scene(&self, x: u16, y: u16) -> Point {
        Point::new(
            (x as f32 + 0.5) / self.scale_x,
            (y as f32 + 0.5) / self.scale_y,
        )
    }
}

/// Paint one frame. `landscape` adds the mountains and the sun and moon.
pub fn paint(
    snapshot: &Snapshot,
    scene: &SceneConfig,
    rain: &RainEmitter,
    landscape: bool,
    width: u16,
    height: u16,
) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let projection = Projection::new(scene.viewport, width, height);
    let sky = &snapshot.sky;

    paint_sky(&mut canvas, sky.top, sky.bottom);
    paint_stars(&mut canvas, sky.blend);
    if landscape {
        paint_body(&mut canvas, &projection, sky.sun, SUN_GLYPH, SUN_COLOR);
        paint_body(&mut canvas, &projection, sky.moon, MOON_GLYPH, MOON_COLOR);
        paint_mountains(&mut canvas, &projection, scene.viewport, &sky.mountain_tints);
    }
    paint_clock(&mut canvas, &projection, &scene.clock_face, &snapshot.hands);
    paint_rain(&mut canvas, &projection, rain);
    canvas.dim(1.0 - sky.darkness);

    canvas
}

fn paint_sky(canvas: &mut Canvas, top: Rgb, bottom: Rgb) {
    let last_row = canvas.height.saturating_sub(1).max(1) as f32;
    for y in 0..canvas.height {
        let color = interpolate_color(top, bottom, y as f32 / last_row);
        for x in 0..canvas.width {
            canvas.fill(x, y, color);
        }
    }
}

/// Stars fade in as the sky turns to night.
fn paint_stars(canvas: &mut Canvas, blend: f32) {
    if blend <= 0.0 {
        return;
    }
    for y in 0..canvas.height - canvas.height / 3 {
        for x in 0..canvas.width {
            let seed = (x as u64).wrapping_mul(73_856_093) ^ (y as u64).wrapping_mul(19_349_663);
            if seed % 100 >= 3 {
                continue;
            }
            let ch = STAR_CHARS[(seed / 100) as usize % STAR_CHARS.len()];
            if let Some(bg) = canvas.cell(x, y).map(|cell| cell.bg) {
                canvas.put(x, y, ch, interpolate_color(bg, STAR_COLOR, blend));
            }
        }
    }
}

fn paint_body(canvas: &mut Canvas, projection: &Projection, at: Point, glyph: char, color: Rgb) {
    if let Some((x, y)) = projection.to_cell(at) {
        canvas.put(x, y, glyph, color);
    }
}

/// Back to front, so nearer layers cover farther ones.
fn paint_mountains(
    canvas: &mut Canvas,
    projection: &Projection,
    viewport: Viewport,
    tints: &[Rgb; 3],
) {
    for ((ridge, base), tint) in RIDGES.iter().zip(MOUNTAIN_COLORS).zip(tints) {
        let color = multiply(base, *tint);
        for x in 0..canvas.width {
            let along = projection.to_scene(x, 0).x / viewport.width;
            let ridge_y = viewport.height * (1.0 - ridge.height(along));
            for y in 0..canvas.height {
                if projection.to_scene(x, y).y >= ridge_y {
                    canvas.fill(x, y, color);
                }
            }
        }
    }
}

fn paint_clock(canvas: &mut Canvas, projection: &Projection, face: &ClockFace, hands: &Hands) {
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let at = projection.to_scene(x, y);
            if (at.x - face.center.x).hypot(at.y - face.center.y) <= face.radius {
                canvas.fill(x, y, FACE_COLOR);
            }
        }
    }

    for hour in 0..12 {
        let angle = hour as f32 * (PI / 6.0) - FRAC_PI_2;
        let mark = Point::new(
            angle.cos() * face.radius * 0.9,
            angle.sin() * face.radius * 0.9,
        );
        paint_body(canvas, projection, face.center.offset(mark), '·', HAND_COLOR);
    }

    let tips = &hands.tips;
    paint_hand(canvas, projection, face.center, tips.hour, '█', HAND_COLOR);
    paint_hand(canvas, projection, face.center, tips.minute, '▓', HAND_COLOR);
    paint_hand(canvas, projection, face.center, tips.second, '•', SECOND_HAND_COLOR);
    paint_body(canvas, projection, face.center, CLOCK_CENTER_GLYPH, HAND_COLOR);
}

fn paint_hand(
    canvas: &mut Canvas,
    projection: &Projection,
    center: Point,
    tip: Point,
    glyph: char,
    color: Rgb,
) {
    let span = (tip.x * projection.scale_x)
        .abs()
        .max((tip.y * projection.scale_y).abs());
    let samples = (span * 2.0).ceil().max(1.0) as u32;
    for i in 1..=samples {
        let t = i as f32 / samples as f32;
        let at = center.offset(Point::new(tip.x * t, tip.y * t));
        paint_body(canvas, projection, at, glyph, color);
    }
}

fn paint_rain(canvas: &mut Canvas, projection: &Projection, rain: &RainEmitter) {
    for drop in rain.drops() {
        let Some((x, y)) = projection.to_cell(Point::new(drop.x, drop.y)) else {
            continue;
        };
        let glyph = RAIN_GLYPHS[usize::from(rain.scale_of(drop) >= 0.3)];
        if let Some(bg) = canvas.cell(x, y).map(|cell| cell.bg) {
            canvas.put(x, y, glyph, interpolate_color(bg, RAIN_COLOR, rain.alpha_of(drop)));
        }
    }
}

/// Multiply two colors channel by channel.
fn multiply(base: Rgb, tint: Rgb) -> Rgb {
    let ch = |a: u8, b: u8| (a as u16 * b as u16 / 255) as u8;
    Rgb::new(ch(base.r, tint.r), ch(base.g, tint.g), ch(base.b, tint.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tronodoro_config::Preset;
    use tronodoro_core::ClockReading;
    use tronodoro_sky::DayNightModel;

    const WIDTH: u16 = 64;
    const HEIGHT: u16 = 24;

    fn frame(
        preset: Preset,
        reading: ClockReading,
        rain: &RainEmitter,
    ) -> (SceneConfig, Snapshot, Canvas) {
        let scene = preset.scene().unwrap();
        let snapshot = DayNightModel::new(scene.clone()).on_tick(&reading);
        let canvas = paint(&snapshot, &scene, rain, preset.has_landscape(), WIDTH, HEIGHT);
        (scene, snapshot, canvas)
    }

    fn dry() -> RainEmitter {
        RainEmitter::new(Default::default(), 7)
    }

    fn noon() -> ClockReading {
        ClockReading::new(12, 0, 0).unwrap()
    }

    #[test]
    fn test_projection_bounds() {
        let projection = Projection::new(Viewport::default(), 128, 72);
        assert_eq!(projection.to_cell(Point::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(projection.to_cell(Point::new(1279.9, 719.9)), Some((127, 71)));
        assert_eq!(projection.to_cell(Point::new(1280.0, 0.0)), None);
        assert_eq!(projection.to_cell(Point::new(-1.0, 5.0)), None);
        assert_eq!(projection.to_scene(0, 0), Point::new(5.0, 5.0));
    }

    #[test]
    fn test_noon_sky_is_undimmed() {
        let (scene, _, canvas) = frame(Preset::Classic, noon(), &dry());
        assert_eq!(canvas.cell(0, 0).unwrap().bg, scene.palette.day_top);
        assert_eq!(canvas.cell(0, HEIGHT - 1).unwrap().bg, scene.palette.day_bottom);
    }

    #[test]
    fn test_midnight_is_dimmed_by_darkness() {
        let (scene, snapshot, canvas) = frame(Preset::Parallax, ClockReading::MIDNIGHT, &dry());
        let expected = scene.palette.night_top.scale(1.0 - snapshot.sky.darkness);
        assert_eq!(canvas.cell(0, 0).unwrap().bg, expected);
    }

    #[test]
    fn test_mountains_only_in_landscape_presets() {
        let (scene, _, classic) = frame(Preset::Classic, noon(), &dry());
        assert_eq!(classic.cell(0, HEIGHT - 1).unwrap().bg, scene.palette.day_bottom);

        let (scene, _, parallax) = frame(Preset::Parallax, noon(), &dry());
        assert_ne!(parallax.cell(0, HEIGHT - 1).unwrap().bg, scene.palette.day_bottom);
    }

    #[test]
    fn test_clock_center_is_drawn() {
        for preset in Preset::ALL {
            let (scene, _, canvas) = frame(preset, noon(), &dry());
            let projection = Projection::new(scene.viewport, WIDTH, HEIGHT);
            let (x, y) = projection.to_cell(scene.clock_face.center).unwrap();
            let cell = canvas.cell(x, y).unwrap();
            assert_eq!(cell.ch, CLOCK_CENTER_GLYPH, "{preset}");
            assert_eq!(cell.bg, FACE_COLOR, "{preset}");
        }
    }

    #[test]
    fn test_rain_drops_are_drawn() {
        let mut rain = dry();
        rain.set_raining(true);
        rain.update(100);
        assert_eq!(rain.drops().len(), 1);

        let (_, _, canvas) = frame(Preset::Classic, noon(), &rain);
        let glyphs = (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| RAIN_GLYPHS.contains(&canvas.cell(x, y).unwrap().ch))
            .count();
        assert_eq!(glyphs, 1);
    }

    #[test]
    fn test_empty_area() {
        let scene = Preset::Parallax.scene().unwrap();
        let snapshot = DayNightModel::new(scene.clone()).on_tick(&noon());
        let canvas = paint(&snapshot, &scene, &dry(), true, 0, 0);
        assert!(canvas.cell(0, 0).is_none());
        assert!(canvas.into_lines().is_empty());
    }

    #[test]
    fn test_lines_match_canvas_size() {
        let (_, _, canvas) = frame(Preset::Parallax, noon(), &dry());
        let lines = canvas.into_lines();
        assert_eq!(lines.len(), HEIGHT as usize);
        assert!(lines.iter().all(|line| line.spans.len() == WIDTH as usize));
    }

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(Rgb::new(200, 100, 50), Rgb::WHITE), Rgb::new(200, 100, 50));
        assert_eq!(multiply(Rgb::new(200, 100, 50), Rgb::BLACK), Rgb::BLACK);
    }
}
