#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use widget_tween_core::{
    LinearColor, Margin, TweenTarget, Vec2, Visibility, WidgetHandle, WidgetTransform,
};

/// Widget double that supports every capability and counts setter calls.
#[derive(Debug, Default)]
pub struct RecordingWidget {
    pub alive: bool,
    pub transform: WidgetTransform,
    pub opacity: f32,
    pub color: LinearColor,
    pub visibility: Visibility,
    pub padding: Margin,
    pub canvas_position: Vec2,
    pub width: f32,
    pub max_height: f32,

    pub transform_writes: u32,
    pub opacity_writes: u32,
    pub color_writes: u32,
    pub visibility_writes: u32,
    pub slot_writes: u32,
}

impl RecordingWidget {
    pub fn new() -> Self {
        Self {
            alive: true,
            opacity: 1.0,
            ..Default::default()
        }
    }

    pub fn total_writes(&self) -> u32 {
        self.transform_writes
            + self.opacity_writes
            + self.color_writes
            + self.visibility_writes
            + self.slot_writes
    }
}

impl TweenTarget for RecordingWidget {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn render_transform(&self) -> WidgetTransform {
        self.transform
    }
    fn set_render_transform(&mut self, transform: WidgetTransform) {
        self.transform = transform;
        self.transform_writes += 1;
    }

    fn render_opacity(&self) -> f32 {
        self.opacity
    }
    fn set_render_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.opacity_writes += 1;
    }

    fn color_and_opacity(&self) -> Option<LinearColor> {
        Some(self.color)
    }
    fn set_color_and_opacity(&mut self, color: LinearColor) {
        self.color = color;
        self.color_writes += 1;
    }

    fn visibility(&self) -> Option<Visibility> {
        Some(self.visibility)
    }
    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
        self.visibility_writes += 1;
    }

    fn slot_padding(&self) -> Option<Margin> {
        Some(self.padding)
    }
    fn set_slot_padding(&mut self, padding: Margin) {
        self.padding = padding;
        self.slot_writes += 1;
    }

    fn canvas_position(&self) -> Option<Vec2> {
        Some(self.canvas_position)
    }
    fn set_canvas_position(&mut self, position: Vec2) {
        self.canvas_position = position;
        self.slot_writes += 1;
    }

    fn width_override(&self) -> Option<f32> {
        Some(self.width)
    }
    fn set_width_override(&mut self, width: f32) {
        self.width = width;
        self.slot_writes += 1;
    }

    fn max_desired_height(&self) -> Option<f32> {
        Some(self.max_height)
    }
    fn set_max_desired_height(&mut self, height: f32) {
        self.max_height = height;
        self.slot_writes += 1;
    }
}

/// A widget plus the erased handle the tweener sees.
pub fn widget() -> (Rc<RefCell<RecordingWidget>>, WidgetHandle) {
    let concrete = Rc::new(RefCell::new(RecordingWidget::new()));
    let handle: WidgetHandle = concrete.clone();
    (concrete, handle)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}
