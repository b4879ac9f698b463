//! Render surface: a pure projection of a [`Snapshot`] onto the layout
//!
//! `Scene::build` never touches engine state; the shell rebuilds the scene
//! every frame and hands [`Scene::vertices`] to the GPU pipeline.

use glam::Vec2;

use super::layout::{Layout, Rect};
use super::shapes;
use super::vertex::{Vertex, colors, lighten, with_alpha};
use crate::consts::{GLOW_DURATION_MS, LANE_KEYS};
use crate::lane_color;
use crate::platform::PressFeedback;
use crate::sim::Snapshot;

/// Pressed zones shrink to this scale
const PRESSED_SCALE: f32 = 0.95;
/// Steady glow used when pulsing is disabled
const STEADY_GLOW: f32 = 0.8;
const CIRCLE_SEGMENTS: u32 = 32;

/// Presentation switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// Touch layout: key labels hidden
    pub is_mobile: bool,
    /// No glow pulse, no pressed scale
    pub reduced_motion: bool,
    /// Full glow length, for fading the zone (ms)
    pub glow_duration_ms: f32,
}

impl SceneStyle {
    pub fn new(is_mobile: bool) -> Self {
        Self {
            is_mobile,
            reduced_motion: false,
            glow_duration_ms: GLOW_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneView {
    pub lane: usize,
    pub rect: Rect,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneView {
    pub lane: usize,
    pub rect: Rect,
    pub color: [f32; 4],
    /// 0 when idle, up to 1 right after a press
    pub glow: f32,
    pub pressed: bool,
    /// Key hint shown in the zone (desktop only)
    pub label: Option<char>,
}

impl ZoneView {
    pub fn label_position(&self) -> Vec2 {
        self.rect.center()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectView {
    pub id: u32,
    pub lane: usize,
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub lanes: Vec<LaneView>,
    pub zones: Vec<ZoneView>,
    pub objects: Vec<ObjectView>,
}

impl Scene {
    pub fn build(
        snap: &Snapshot,
        layout: &Layout,
        press: &PressFeedback,
        style: &SceneStyle,
    ) -> Self {
        let lanes = (0..LANE_KEYS.len())
            .map(|lane| LaneView {
                lane,
                rect: layout.lane_rect(lane),
                color: lane_color(lane),
            })
            .collect();

        let zones = snap
            .hit_zones
            .iter()
            .map(|zone| {
                let pressed = press.pressed.get(zone.lane).copied().unwrap_or(false);
                let mut rect = layout.zone_rect(zone.lane);
                if pressed && !style.reduced_motion {
                    rect = rect.scaled(PRESSED_SCALE);
                }
                ZoneView {
                    lane: zone.lane,
                    rect,
                    color: lane_color(zone.lane),
                    glow: glow_intensity(zone.active, zone.timer, style),
                    pressed,
                    label: (!style.is_mobile)
                        .then(|| LANE_KEYS.get(zone.lane).map(|k| k.to_ascii_uppercase()))
                        .flatten(),
                }
            })
            .collect();

        let objects = snap
            .objects
            .iter()
            .map(|obj| ObjectView {
                id: obj.id,
                lane: obj.lane,
                center: layout.object_center(obj.lane, obj.y),
                radius: obj.size * 0.5,
                color: obj.color,
            })
            .collect();

        Self {
            lanes,
            zones,
            objects,
        }
    }

    /// Key labels and where the shell should place them
    pub fn labels(&self) -> impl Iterator<Item = (usize, char, Vec2)> + '_ {
        self.zones
            .iter()
            .filter_map(|z| z.label.map(|c| (z.lane, c, z.label_position())))
    }

    /// Colored triangles in layout pixels, back to front
    pub fn vertices(&self) -> Vec<Vertex> {
        let object_vertices = self.objects.len() * CIRCLE_SEGMENTS as usize * 9;
        let mut vertices =
            Vec::with_capacity(self.lanes.len() * 12 + self.zones.len() * 60 + object_vertices);

        for lane in &self.lanes {
            vertices.extend(shapes::rect(&lane.rect, with_alpha(lane.color, 0.06)));
            let divider = Rect::new(lane.rect.x + lane.rect.w - 0.5, 0.0, 1.0, lane.rect.h);
            vertices.extend(shapes::rect(&divider, colors::LANE_DIVIDER));
        }

        for zone in &self.zones {
            if zone.glow > 0.0 {
                vertices.extend(shapes::rect(
                    &zone.rect.inflate(6.0 * zone.glow),
                    with_alpha(zone.color, 0.35 * zone.glow),
                ));
            }
            let fill = with_alpha(lighten(zone.color, 0.5 * zone.glow), 0.18 + 0.55 * zone.glow);
            vertices.extend(shapes::rect(&zone.rect, fill));
            vertices.extend(shapes::frame(&zone.rect, 2.0, colors::ZONE_BORDER));
        }

        for obj in &self.objects {
            vertices.extend(shapes::circle(
                obj.center,
                obj.radius * 1.3,
                with_alpha(obj.color, 0.2),
                CIRCLE_SEGMENTS,
            ));
            vertices.extend(shapes::radial(
                obj.center,
                obj.radius,
                lighten(obj.color, 0.35),
                obj.color,
                CIRCLE_SEGMENTS,
            ));
            vertices.extend(shapes::ring(
                obj.center + Vec2::new(-0.25, -0.25) * obj.radius,
                obj.radius * 0.15,
                obj.radius * 0.3,
                colors::PLANET_HIGHLIGHT,
                CIRCLE_SEGMENTS / 2,
            ));
        }

        vertices
    }
}

fn glow_intensity(active: bool, timer: f32, style: &SceneStyle) -> f32 {
    if !active {
        return 0.0;
    }
    if style.reduced_motion || style.glow_duration_ms <= 0.0 {
        return STEADY_GLOW;
    }
    (timer / style.glow_duration_ms).clamp(0.0, 1.0)
}
