//! Rain scene rendering: clouds, drops and the slider panel.

use drizzle_config::MarkerStyle;
use drizzle_core::{CloudShape, Sky, SliderKind};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Style, Stylize},
    widgets::{
        Block, Paragraph, Wrap,
        canvas::{Canvas, Context, Rectangle},
    },
};

use crate::color;
use crate::panel::{SliderPanelLayout, render_slider};
use crate::shapes::{FilledEllipse, FilledRect, FilledTriangle, VerticalBar};
use crate::viewport::{Viewport, marker_for};

/// Draw every cloud and its drops.
pub fn render_sky(frame: &mut Frame, viewport: &Viewport, sky: &Sky, marker: MarkerStyle) {
    let step = viewport.fill_step(marker);
    let canvas = Canvas::default()
        .background_color(color::SKY)
        .marker(marker_for(marker))
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            paint_clouds(ctx, viewport, sky, step);
            ctx.layer();
            paint_drops(ctx, viewport, sky, step);
        });
    frame.render_widget(canvas, viewport.area());
}

fn paint_clouds(ctx: &mut Context, viewport: &Viewport, sky: &Sky, step: f64) {
    for cloud in sky.clouds() {
        let b = cloud.bounds;
        let x = b.left();
        let y = viewport.flip_y(b.bottom());
        match cloud.shape {
            CloudShape::Rectangle => ctx.draw(&FilledRect {
                x,
                y,
                width: b.width,
                height: b.height,
                step,
                color: color::CLOUD,
            }),
            CloudShape::Oval => ctx.draw(&FilledEllipse {
                x,
                y,
                width: b.width,
                height: b.height,
                step,
                color: color::CLOUD,
            }),
            CloudShape::Triangle => ctx.draw(&FilledTriangle {
                x,
                y,
                width: b.width,
                height: b.height,
                step,
                color: color::CLOUD,
            }),
        }
    }

    if let Some(cloud) = sky.selected() {
        let b = cloud.bounds;
        ctx.draw(&Rectangle {
            x: b.left(),
            y: viewport.flip_y(b.bottom()),
            width: b.width,
            height: b.height,
            color: color::SELECTION,
        });
    }
}

fn paint_drops(ctx: &mut Context, viewport: &Viewport, sky: &Sky, step: f64) {
    for drop in sky.clouds().iter().flat_map(|c| c.drops.iter()) {
        ctx.draw(&VerticalBar {
            x: drop.x,
            y1: viewport.flip_y(drop.y),
            y2: viewport.flip_y(drop.y + drop.length),
            width: drop.width,
            step,
            color: color::drop_color(drop.speed),
        });
    }
}

/// Draw the slider panel for the selected cloud.
pub fn render_rain_panel(frame: &mut Frame, layout: &SliderPanelLayout, sky: &Sky) {
    let block = Block::bordered()
        .title(" Rain ")
        .style(Style::new().bg(color::PANEL).fg(color::LABEL));
    frame.render_widget(block, layout.area);

    let Some(cloud) = sky.selected() else {
        let hint = Paragraph::new("Click the sky to place a cloud, or click a cloud to edit it.")
            .style(Style::new().fg(color::LABEL).bg(color::PANEL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let inner = layout.area.inner(ratatui::layout::Margin::new(2, 1));
        frame.render_widget(hint, inner);
        return;
    };

    for (kind, slot) in layout.slots() {
        let focused = sky.active_slider() == Some(*kind);
        render_slider(
            frame,
            slot,
            kind.describe(&cloud.config),
            cloud.sliders.get(*kind),
            focused,
        );
    }

    let footer = format!("cloud #{}  {} drops", cloud.id, cloud.drops.len());
    if let Some(last) = layout
        .slot(SliderKind::DropWidth)
        .map(|slot| slot.track)
        .filter(|track| track.bottom() + 1 < layout.area.bottom())
    {
        let area = ratatui::layout::Rect::new(last.x, last.bottom() + 1, last.width, 1);
        frame.render_widget(Paragraph::new(footer).dark_gray(), area);
    }
}
