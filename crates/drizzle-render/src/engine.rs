//! Piston engine rendering.

use drizzle_config::MarkerStyle;
use drizzle_core::{
    EngineControl, EngineParams,
    engine::{self, CylinderGeometry},
};
use ratatui::{
    Frame,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Context},
    },
};

use crate::color;
use crate::panel::{ButtonKind, EnginePanelLayout, render_slider};
use crate::shapes::{FilledRect, VerticalBar};
use crate::viewport::{Viewport, marker_for};

/// Width of rods and crank teeth in world units.
const LINE_WIDTH: f64 = 5.0;

/// Draw the cylinders, pistons and crank at `time` seconds.
pub fn render_engine(
    frame: &mut Frame,
    viewport: &Viewport,
    params: &EngineParams,
    time: f64,
    marker: MarkerStyle,
) {
    let step = viewport.fill_step(marker);
    let cylinders = engine::layout(params, time);
    let canvas = Canvas::default()
        .background_color(color::ENGINE_BACKGROUND)
        .marker(marker_for(marker))
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            for cylinder in &cylinders {
                paint_cylinder(ctx, viewport, cylinder, step);
            }
        });
    frame.render_widget(canvas, viewport.area());
}

fn paint_cylinder(ctx: &mut Context, viewport: &Viewport, geometry: &CylinderGeometry, step: f64) {
    for (bounds, fill) in [
        (geometry.cylinder, color::CYLINDER),
        (geometry.piston, color::PISTON),
    ] {
        ctx.draw(&FilledRect {
            x: bounds.left(),
            y: viewport.flip_y(bounds.bottom()),
            width: bounds.width,
            height: bounds.height,
            step,
            color: fill,
        });
    }

    for (from, to) in geometry.rod.iter().chain(geometry.zigzag.iter()) {
        ctx.draw(&VerticalBar {
            x: from.x,
            y1: viewport.flip_y(from.y),
            y2: viewport.flip_y(to.y),
            width: LINE_WIDTH,
            step,
            color: color::CRANK,
        });
    }
}

/// Label for a control with its current value.
fn describe(control: EngineControl, params: &EngineParams) -> String {
    let value = params.get(control);
    match control {
        EngineControl::AngularSpeed => {
            format!("{}: {:.1} rad/s", control.label(), params.omega())
        }
        _ => format!("{}: {value}", control.label()),
    }
}

/// Draw the control panel: sliders, buttons and the clock.
pub fn render_engine_panel(
    frame: &mut Frame,
    layout: &EnginePanelLayout,
    params: &EngineParams,
    focus: EngineControl,
    running: bool,
    time: f64,
) {
    let status = if running {
        format!(" running  t = {time:.2} s ")
    } else {
        " stopped ".to_string()
    };
    let block = Block::bordered()
        .title(" Engine ")
        .title_bottom(Line::from(status).right_aligned())
        .style(Style::new().bg(color::PANEL).fg(color::LABEL));
    frame.render_widget(block, layout.area);

    for (control, slot) in layout.slots() {
        render_slider(
            frame,
            slot,
            describe(*control, params),
            control.fraction_of(params.get(*control)),
            *control == focus,
        );
    }

    for (kind, rect) in layout.buttons() {
        let active = matches!(kind, ButtonKind::Start) && running;
        let label = Span::raw(kind.label()).bold();
        let label = if active {
            label.fg(color::KNOB)
        } else {
            label.fg(color::LABEL)
        };
        frame.render_widget(
            Paragraph::new(Line::from(label)),
            rect.intersection(layout.area),
        );
    }
}

#[cfg(test)]
mod tests {
    use drizzle_core::engine::{WORLD_HEIGHT, WORLD_WIDTH};
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    use super::*;

    #[test]
    fn test_describe_values() {
        let params = EngineParams::default();
        assert_eq!(
            describe(EngineControl::AngularSpeed, &params),
            "Angular speed: 5.0 rad/s"
        );
        assert_eq!(describe(EngineControl::Cylinders, &params), "Cylinders: 4");
        assert_eq!(describe(EngineControl::CrankRadius, &params), "Crank radius: 50");
    }

    #[test]
    fn test_panel_lists_controls_and_buttons() {
        let area = Rect::new(0, 0, 60, 12);
        let layout = EnginePanelLayout::new(area);
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
        terminal
            .draw(|frame| {
                render_engine_panel(
                    frame,
                    &layout,
                    &EngineParams::default(),
                    EngineControl::Cylinders,
                    false,
                    0.0,
                )
            })
            .expect("draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Angular speed: 5.0 rad/s"));
        assert!(text.contains("Piston size: 50"));
        assert!(text.contains("[ Start ]"));
        assert!(text.contains("stopped"));
    }

    #[test]
    fn test_engine_paints_piston() {
        let area = Rect::new(0, 0, 120, 30);
        let viewport = Viewport::new(area, WORLD_WIDTH, WORLD_HEIGHT);
        let params = EngineParams::default();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).expect("terminal");
        terminal
            .draw(|frame| render_engine(frame, &viewport, &params, 0.0, MarkerStyle::HalfBlock))
            .expect("draw");

        let piston = engine::layout(&params, 0.0)[0].piston;
        let (col, row) = viewport.to_cell(drizzle_core::Point::new(
            piston.center_x(),
            piston.center_y(),
        ));
        let cell = &terminal.backend().buffer()[(col, row)];
        assert!(cell.fg == color::PISTON || cell.bg == color::PISTON);
    }
}
