// SPDX-License-Identifier: MPL-2.0
//! Canvas spinner shown in the loading dialog.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Radians turned per tick of the expiry timer.
pub const STEP: f32 = PI / 8.0;

const STROKE_WIDTH: f32 = 3.0;
const ARC_SEGMENTS: u16 = 24;

/// Half-circle arc turning around a faint track.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation: rotation.rem_euclid(TAU),
            color,
            size: sizing::ICON_XL,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Next rotation angle, kept within one turn.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + STEP).rem_euclid(TAU)
}

fn point_on(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH - 1.0;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default().with_width(STROKE_WIDTH).with_color(Color {
                        a: 0.25,
                        ..self.color
                    }),
                );

                // Starts at twelve o'clock.
                let start = self.rotation - PI / 2.0;
                let mut arc = canvas::path::Builder::new();
                arc.move_to(point_on(center, radius, start));
                for i in 1..=ARC_SEGMENTS {
                    let t = f32::from(i) / f32::from(ARC_SEGMENTS);
                    arc.line_to(point_on(center, radius, start + PI * t));
                }

                frame.stroke(
                    &arc.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
