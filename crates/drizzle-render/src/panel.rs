//! Slider panels: layout, hit-testing and drawing.

use drizzle_core::{EngineControl, SliderKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::chars::{FOCUS_CHAR, KNOB_CHAR, TRACK_CHAR};
use crate::color;

/// Label row and track row of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSlot {
    pub label: Rect,
    pub track: Rect,
}

impl SliderSlot {
    /// Check whether a cell is on the track.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.track.y && column >= self.track.x && column < self.track.right()
    }

    /// Knob position for a column, clamped to the track.
    pub fn position_at(&self, column: u16) -> f64 {
        let span = self.track.width.saturating_sub(1);
        if span == 0 {
            return 0.0;
        }
        let offset = column.saturating_sub(self.track.x).min(span);
        f64::from(offset) / f64::from(span)
    }

    /// Column offset of the knob within the track.
    fn knob_offset(&self, position: f64) -> u16 {
        let span = self.track.width.saturating_sub(1);
        (position.clamp(0.0, 1.0) * f64::from(span)).round() as u16
    }
}

/// Slots stacked top to bottom, `pitch` rows apart, as many as fit.
fn stack(inner: Rect, count: usize, pitch: u16) -> Vec<SliderSlot> {
    (0..count)
        .map_while(|i| {
            let y = inner.y + i as u16 * pitch;
            (y + 1 < inner.bottom()).then(|| SliderSlot {
                label: Rect::new(inner.x, y, inner.width, 1),
                track: Rect::new(inner.x, y + 1, inner.width, 1),
            })
        })
        .collect()
}

/// Area inside a bordered panel, with one column of padding on each side.
fn panel_inner(panel: Rect) -> Rect {
    Rect::new(
        panel.x.saturating_add(2),
        panel.y.saturating_add(1),
        panel.width.saturating_sub(4),
        panel.height.saturating_sub(2),
    )
}

/// Draw one slider: the label and a red track with a green knob.
pub(crate) fn render_slider(
    frame: &mut Frame,
    slot: &SliderSlot,
    label: String,
    position: f64,
    focused: bool,
) {
    let label = if focused {
        Line::from(vec![
            Span::raw(format!("{FOCUS_CHAR} ")).fg(color::KNOB),
            Span::raw(label).bold().fg(color::LABEL),
        ])
    } else {
        Line::from(Span::raw(label).fg(color::LABEL))
    };
    frame.render_widget(Paragraph::new(label), slot.label);

    let knob = usize::from(slot.knob_offset(position));
    let width = usize::from(slot.track.width);
    let track = Line::from(vec![
        Span::styled(
            TRACK_CHAR.to_string().repeat(knob),
            Style::new().fg(color::TRACK),
        ),
        Span::styled(KNOB_CHAR.to_string(), Style::new().fg(color::KNOB)),
        Span::styled(
            TRACK_CHAR.to_string().repeat(width.saturating_sub(knob + 1)),
            Style::new().fg(color::TRACK),
        ),
    ]);
    frame.render_widget(Paragraph::new(track), slot.track);
}

/// Positions of the rain sliders inside the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderPanelLayout {
    pub area: Rect,
    slots: Vec<(SliderKind, SliderSlot)>,
}

impl SliderPanelLayout {
    pub fn new(area: Rect) -> Self {
        let inner = panel_inner(area);
        let slots = SliderKind::ALL
            .into_iter()
            .zip(stack(inner, SliderKind::ALL.len(), 3))
            .collect();
        Self { area, slots }
    }

    pub fn slot(&self, kind: SliderKind) -> Option<&SliderSlot> {
        self.slots.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn slots(&self) -> impl Iterator<Item = &(SliderKind, SliderSlot)> {
        self.slots.iter()
    }

    /// Slider whose track is under the cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<SliderKind> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.contains(column, row))
            .map(|(kind, _)| *kind)
    }
}

/// Clickable buttons of the engine panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Start,
    Reset,
}

impl ButtonKind {
    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Start => "[ Start ]",
            ButtonKind::Reset => "[ Reset & stop ]",
        }
    }
}

/// Positions of the engine sliders and buttons inside the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePanelLayout {
    pub area: Rect,
    slots: Vec<(EngineControl, SliderSlot)>,
    buttons: Vec<(ButtonKind, Rect)>,
}

impl EnginePanelLayout {
    pub fn new(area: Rect) -> Self {
        let inner = panel_inner(area);
        let slots: Vec<(EngineControl, SliderSlot)> = EngineControl::ALL
            .into_iter()
            .zip(stack(inner, EngineControl::ALL.len(), 2))
            .collect();

        let mut buttons = Vec::new();
        let button_row = inner.bottom().saturating_sub(1);
        let below_sliders = slots.last().is_none_or(|(_, slot)| slot.track.y < button_row);
        if inner.height > 0 && below_sliders {
            let mut x = inner.x;
            for kind in [ButtonKind::Start, ButtonKind::Reset] {
                let width = (kind.label().chars().count() as u16).min(inner.right().saturating_sub(x));
                buttons.push((kind, Rect::new(x, button_row, width, 1)));
                x = x.saturating_add(width + 2);
            }
        }

        Self {
            area,
            slots,
            buttons,
        }
    }

    pub fn slot(&self, control: EngineControl) -> Option<&SliderSlot> {
        self.slots.iter().find(|(c, _)| *c == control).map(|(_, s)| s)
    }

    pub fn slots(&self) -> impl Iterator<Item = &(EngineControl, SliderSlot)> {
        self.slots.iter()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &(ButtonKind, Rect)> {
        self.buttons.iter()
    }

    /// Slider whose track is under the cell.
    pub fn hit_slider(&self, column: u16, row: u16) -> Option<EngineControl> {
        self.slots
            .iter()
            .find(|(_, slot)| slot.contains(column, row))
            .map(|(control, _)| *control)
    }

    /// Button under the cell.
    pub fn hit_button(&self, column: u16, row: u16) -> Option<ButtonKind> {
        self.buttons
            .iter()
            .find(|(_, rect)| {
                row == rect.y && column >= rect.x && column < rect.right()
            })
            .map(|(kind, _)| *kind)
    }
}
