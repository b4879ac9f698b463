//! Play-field geometry in CSS pixels (origin top-left, y down)

use glam::Vec2;

use crate::consts::{HIT_ZONE_Y, LANES};

/// Hit zone height on desktop (px)
const ZONE_HEIGHT: f32 = 60.0;
/// Hit zone height on mobile, where fingers need a larger target (px)
const ZONE_HEIGHT_MOBILE: f32 = 80.0;
/// Share of the lane width covered by the drawn zone
const ZONE_WIDTH_FRACTION: f32 = 0.8;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Grow by `by` on every side, keeping the center
    pub fn inflate(&self, by: f32) -> Self {
        Self::new(self.x - by, self.y - by, self.w + by * 2.0, self.h + by * 2.0)
    }

    /// Scale about the center
    pub fn scaled(&self, factor: f32) -> Self {
        let c = self.center();
        let (w, h) = (self.w * factor, self.h * factor);
        Self::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub is_mobile: bool,
    /// Hit zone center (percent of height)
    pub hit_zone_y: f32,
}

impl Layout {
    pub fn new(width: f32, height: f32, is_mobile: bool) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            is_mobile,
            hit_zone_y: HIT_ZONE_Y,
        }
    }

    pub fn with_hit_zone_y(mut self, y: f32) -> Self {
        self.hit_zone_y = y;
        self
    }

    pub fn lane_width(&self) -> f32 {
        self.width / LANES as f32
    }

    /// Lane center, i.e. `10% + lane * 20%` of the width for five lanes
    pub fn lane_center_x(&self, lane: usize) -> f32 {
        (lane as f32 + 0.5) * self.lane_width()
    }

    /// Full-height lane column
    pub fn lane_rect(&self, lane: usize) -> Rect {
        let lw = self.lane_width();
        Rect::new(lane as f32 * lw, 0.0, lw, self.height)
    }

    fn zone_height(&self) -> f32 {
        if self.is_mobile {
            ZONE_HEIGHT_MOBILE
        } else {
            ZONE_HEIGHT
        }
    }

    /// Vertical band shared by all hit zones (full width)
    pub fn zone_band(&self) -> Rect {
        let h = self.zone_height();
        let cy = self.y_to_px(self.hit_zone_y);
        Rect::new(0.0, cy - h * 0.5, self.width, h)
    }

    /// Drawn hit zone of a lane
    pub fn zone_rect(&self, lane: usize) -> Rect {
        let band = self.zone_band();
        let w = self.lane_width() * ZONE_WIDTH_FRACTION;
        Rect::new(self.lane_center_x(lane) - w * 0.5, band.y, w, band.h)
    }

    /// Percent of the play-field height to pixels
    pub fn y_to_px(&self, y_percent: f32) -> f32 {
        y_percent / 100.0 * self.height
    }

    pub fn object_center(&self, lane: usize, y_percent: f32) -> Vec2 {
        Vec2::new(self.lane_center_x(lane), self.y_to_px(y_percent))
    }

    /// Lane whose hit zone is under `(x, y)`
    ///
    /// The whole lane width inside the zone band counts, so a press in the
    /// gap between two drawn zones still lands.
    pub fn lane_at(&self, x: f32, y: f32) -> Option<usize> {
        let p = Vec2::new(x, y);
        if !p.is_finite() || !self.zone_band().contains(p) {
            return None;
        }
        let lane = (x / self.lane_width()) as usize;
        (lane < LANES).then_some(lane)
    }
}
