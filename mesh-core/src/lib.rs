use serde::{Deserialize, Serialize};

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Cursor position used when the pointer is not over the page.
///
/// Far enough out that no point can ever fall inside the influence
/// radius, so the repulsion term is zero everywhere while idle.
pub const OFFSCREEN: Vector2D = Vector2D {
    x: -10_000.0,
    y: -10_000.0,
};

/// Last-known pointer position, shared between the event handlers and
/// the frame loop. Starts idle until the first pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    position: Vector2D,
    tracking: bool,
}

impl Cursor {
    pub fn idle() -> Self {
        Self {
            position: OFFSCREEN,
            tracking: false,
        }
    }

    pub fn moved(&mut self, x: f32, y: f32) {
        self.position = Vector2D::new(x, y);
        self.tracking = true;
    }

    /// Pointer left the page; snap back to the off-screen sentinel.
    pub fn left(&mut self) {
        *self = Self::idle();
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::idle()
    }
}

/// Tuning constants for the mesh simulation.
///
/// Read-only once the animation is running. The defaults are tuned for
/// a ~60 Hz frame loop; the integrator is intentionally not
/// delta-time normalized, so these values assume one step per frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Lattice spacing in pixels.
    pub spacing: f32,
    /// Radius of each rendered point disc.
    pub point_radius: f32,
    /// Distance within which the cursor pushes points away.
    pub influence_radius: f32,
    /// Scale of the cursor repulsion force.
    pub repel_strength: f32,
    /// Per-frame velocity multiplier, must stay below 1.
    pub damping: f32,
    /// Spring constant pulling a point back to its drifting anchor.
    pub tension: f32,
    /// Amplitude of the ambient anchor oscillation, in pixels.
    pub drift_amplitude: f32,
    /// Phase offset per pixel of anchor coordinate, desynchronizing
    /// neighboring points.
    pub drift_phase: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            spacing: 40.0,
            point_radius: 1.8,
            influence_radius: 120.0,
            repel_strength: 2.4,
            damping: 0.9,
            tension: 0.08,
            drift_amplitude: 5.0,
            drift_phase: 0.05,
        }
    }
}

impl MeshConfig {
    /// How far outside the viewport a point may sit before its
    /// connecting lines are culled. One cell keeps the mesh visually
    /// continuous at the edges.
    pub fn cull_margin(&self) -> f32 {
        self.spacing
    }

    /// True when the constants describe a stable, visible animation.
    /// Page-supplied overrides that fail this check are discarded.
    pub fn is_sane(&self) -> bool {
        self.spacing.is_finite()
            && self.spacing >= 4.0
            && self.point_radius.is_finite()
            && self.point_radius > 0.0
            && self.influence_radius.is_finite()
            && self.influence_radius > 0.0
            && self.repel_strength.is_finite()
            && self.repel_strength >= 0.0
            && self.damping > 0.0
            && self.damping < 1.0
            && self.tension > 0.0
            && self.tension < 1.0
            && self.drift_amplitude.is_finite()
            && self.drift_amplitude >= 0.0
            && self.drift_phase.is_finite()
    }
}

/// A single lattice point
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    /// Anchor position, fixed at construction.
    pub origin: Vector2D,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl GridPoint {
    pub fn new(origin: Vector2D) -> Self {
        Self {
            origin,
            position: origin,
            velocity: Vector2D::zero(),
        }
    }
}

/// Helper functions for the per-frame point update
pub mod physics {
    use super::*;

    /// Velocity contribution pushing a point away from the cursor.
    ///
    /// Linear falloff: full strength at the cursor, zero at the
    /// influence boundary and beyond. A point exactly under the cursor
    /// gets a zero-direction push rather than a NaN.
    pub fn repulsion(position: Vector2D, cursor: Vector2D, config: &MeshConfig) -> Vector2D {
        let d = position.distance(&cursor);
        if d >= config.influence_radius {
            return Vector2D::zero();
        }
        let falloff = (config.influence_radius - d) / config.influence_radius;
        let away = (position - cursor).normalize();
        away * (config.repel_strength * falloff)
    }

    /// Where the anchor currently sits once the ambient drift is
    /// applied, with `t` in seconds. The phase is offset by the anchor
    /// coordinates so neighbors breathe out of step.
    pub fn drifted_anchor(origin: Vector2D, t: f32, config: &MeshConfig) -> Vector2D {
        let dx = config.drift_amplitude * (t + origin.y * config.drift_phase).sin();
        let dy = config.drift_amplitude * (t + origin.x * config.drift_phase).cos();
        Vector2D::new(origin.x + dx, origin.y + dy)
    }

    /// One simulation step for one point: repulsion, spring toward the
    /// drifting anchor, damping, then explicit Euler integration.
    pub fn step_point(point: &mut GridPoint, cursor: Vector2D, t: f32, config: &MeshConfig) {
        point.velocity += repulsion(point.position, cursor, config);
        let target = drifted_anchor(point.origin, t, config);
        point.velocity += (target - point.position) * config.tension;
        point.velocity = point.velocity * config.damping;
        point.position += point.velocity;
    }
}

/// The lattice of points, stored row-major with its dimensions so
/// adjacency is plain index arithmetic.
#[derive(Debug, Clone)]
pub struct PointGrid {
    points: Vec<GridPoint>,
    cols: usize,
    rows: usize,
}

impl PointGrid {
    /// Build a fresh lattice covering the viewport plus a one-cell
    /// margin on every side. Positions start at their anchors with
    /// zero velocity.
    pub fn build(width: f32, height: f32, spacing: f32) -> Self {
        let spacing = spacing.max(1.0);
        let cols = (width / spacing).ceil() as usize + 2;
        let rows = (height / spacing).ceil() as usize + 2;

        let mut points = Vec::with_capacity(cols * rows);
        for j in 0..rows {
            for i in 0..cols {
                let origin = Vector2D::new(
                    -spacing + i as f32 * spacing,
                    -spacing + j as f32 * spacing,
                );
                points.push(GridPoint::new(origin));
            }
        }

        Self { points, cols, rows }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&GridPoint> {
        if col < self.cols && row < self.rows {
            self.points.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GridPoint> {
        self.points.iter_mut()
    }
}

/// An RGBA color, formatted into a CSS string by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Two-tone color pair picked from the page's dark/light preference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub point: Rgba,
    pub line: Rgba,
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                point: Rgba { r: 148, g: 163, b: 184, a: 0.55 },
                line: Rgba { r: 148, g: 163, b: 184, a: 0.14 },
            }
        } else {
            Self {
                point: Rgba { r: 71, g: 85, b: 105, a: 0.45 },
                line: Rgba { r: 71, g: 85, b: 105, a: 0.12 },
            }
        }
    }
}

/// A filled disc to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vector2D,
    pub radius: f32,
}

/// A connecting line segment to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vector2D,
    pub to: Vector2D,
}

/// Everything the renderer needs for one frame, in draw order.
#[derive(Debug, Clone)]
pub struct FrameScene {
    pub discs: Vec<Disc>,
    pub segments: Vec<Segment>,
    pub theme: Theme,
}

/// The render context: owns the point collection, the cursor state and
/// the viewport size. The wasm driver feeds it events and a clock and
/// draws the scenes it produces.
#[derive(Debug, Clone)]
pub struct Mesh {
    config: MeshConfig,
    grid: PointGrid,
    cursor: Cursor,
    width: f32,
    height: f32,
}

impl Mesh {
    pub fn new(width: f32, height: f32, config: MeshConfig) -> Self {
        let grid = PointGrid::build(width, height, config.spacing);
        Self {
            config,
            grid,
            cursor: Cursor::idle(),
            width,
            height,
        }
    }

    /// Rebuild the lattice for a new viewport size, discarding all
    /// prior positions and velocities.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.grid = PointGrid::build(width, height, self.config.spacing);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.cursor.moved(x, y);
    }

    pub fn pointer_left(&mut self) {
        self.cursor.left();
    }

    /// Advance every point by one frame, `t` in seconds.
    pub fn step(&mut self, t: f32) {
        let cursor = self.cursor.position();
        let config = self.config;
        for point in self.grid.iter_mut() {
            physics::step_point(point, cursor, t, &config);
        }
    }

    /// Collect this frame's discs and connecting segments.
    ///
    /// Every point gets a disc; a segment to the right/bottom lattice
    /// neighbor is emitted only when both endpoints currently sit
    /// within the viewport plus the cull margin.
    pub fn scene(&self, dark: bool) -> FrameScene {
        let margin = self.config.cull_margin();
        let in_view = |p: Vector2D| {
            p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
        };

        let mut discs = Vec::with_capacity(self.grid.len());
        for point in self.grid.iter() {
            discs.push(Disc {
                center: point.position,
                radius: self.config.point_radius,
            });
        }

        let mut segments = Vec::new();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let point = match self.grid.get(col, row) {
                    Some(p) => p,
                    None => continue,
                };
                if !in_view(point.position) {
                    continue;
                }
                for (ncol, nrow) in [(col + 1, row), (col, row + 1)] {
                    if let Some(neighbor) = self.grid.get(ncol, nrow) {
                        if in_view(neighbor.position) {
                            segments.push(Segment {
                                from: point.position,
                                to: neighbor.position,
                            });
                        }
                    }
                }
            }
        }

        FrameScene {
            discs,
            segments,
            theme: Theme::for_mode(dark),
        }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn grid(&self) -> &PointGrid {
        &self.grid
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
