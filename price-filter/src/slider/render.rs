use smallvec::SmallVec;

use crate::theme::{Color, Theme};

use super::layout::SliderMetrics;

/// Axis-aligned rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Stroke drawn inside a shape's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Stroke width.
    pub width: f32,
    /// Stroke colour.
    pub color: Color,
}

/// A primitive the host draws, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled rounded rectangle; circles use a radius of half the size.
    RoundedRect {
        /// Bounds.
        rect: Rect,
        /// Corner radius.
        corner_radius: f32,
        /// Fill colour.
        fill: Color,
        /// Optional stroke.
        border: Option<Border>,
    },
}

/// Draw commands for one slider frame.
pub type DrawList = SmallVec<[DrawCommand; 8]>;

const HIGH_THUMB_BORDER_WIDTH: f32 = 1.0;

/// Everything needed to draw one frame, sampled from the animated channels.
pub(super) struct SliderFrame {
    pub metrics: SliderMetrics,
    pub height: f32,
    pub low_x: f32,
    pub high_x: f32,
    pub low_diameter: f32,
    pub high_diameter: f32,
    pub rail_left: f32,
    pub rail_right: f32,
    pub border_visible: bool,
}

impl SliderFrame {
    fn center_y(&self) -> f32 {
        self.height / 2.0
    }

    /// The rail runs between the centres of the thumbs at their extremes.
    fn rail_bounds(&self, thickness: f32) -> Rect {
        let start = self.metrics.low_thumb_width / 2.0;
        let end = self.metrics.container_width - self.metrics.high_thumb_width / 2.0;
        Rect {
            x: start,
            y: self.center_y() - thickness / 2.0,
            width: (end - start).max(0.0),
            height: thickness,
        }
    }
}

pub(super) fn render_slider(frame: &SliderFrame, theme: &Theme) -> DrawList {
    let mut commands = DrawList::new();
    if !frame.metrics.is_measurable() {
        return commands;
    }
    render_rail(&mut commands, frame, theme);
    render_selected_rail(&mut commands, frame, theme);
    render_thumb(
        &mut commands,
        frame,
        theme,
        frame.low_x,
        frame.metrics.low_thumb_width,
        frame.low_diameter,
        None,
    );
    let border_color = if frame.border_visible {
        theme.colours.shadow
    } else {
        theme.colours.primary
    };
    render_thumb(
        &mut commands,
        frame,
        theme,
        frame.high_x,
        frame.metrics.high_thumb_width,
        frame.high_diameter,
        Some(Border {
            width: HIGH_THUMB_BORDER_WIDTH,
            color: border_color,
        }),
    );
    commands
}

fn render_rail(commands: &mut DrawList, frame: &SliderFrame, theme: &Theme) {
    let thickness = theme.price_slider.line.height;
    commands.push(DrawCommand::RoundedRect {
        rect: frame.rail_bounds(thickness),
        corner_radius: thickness / 2.0,
        fill: theme.colours.shadow,
        border: None,
    });
}

fn render_selected_rail(commands: &mut DrawList, frame: &SliderFrame, theme: &Theme) {
    let thickness = theme.price_slider.line.height;
    let rail = frame.rail_bounds(thickness);
    commands.push(DrawCommand::RoundedRect {
        rect: Rect {
            x: rail.x + frame.rail_left,
            width: (rail.width - frame.rail_left - frame.rail_right).max(0.0),
            ..rail
        },
        corner_radius: thickness / 2.0,
        fill: theme.colours.primary,
        border: None,
    });
}

/// A pressed thumb grows around its resting centre.
fn render_thumb(
    commands: &mut DrawList,
    frame: &SliderFrame,
    theme: &Theme,
    x: f32,
    resting_diameter: f32,
    diameter: f32,
    border: Option<Border>,
) {
    let center_x = x + resting_diameter / 2.0;
    let center_y = frame.center_y();
    commands.push(DrawCommand::RoundedRect {
        rect: Rect {
            x: center_x - diameter / 2.0,
            y: center_y - diameter / 2.0,
            width: diameter,
            height: diameter,
        },
        corner_radius: diameter / 2.0,
        fill: theme.colours.primary,
        border,
    });

    let lines = theme.price_slider.vertical_lines;
    let top = center_y - lines.height / 2.0;
    let left = center_x - lines.container_width / 2.0;
    for x in [left, left + lines.container_width - lines.width] {
        commands.push(DrawCommand::RoundedRect {
            rect: Rect {
                x,
                y: top,
                width: lines.width,
                height: lines.height,
            },
            corner_radius: 0.0,
            fill: theme.colours.secondary,
            border: None,
        });
    }
}
