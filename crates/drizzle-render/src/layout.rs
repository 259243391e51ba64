//! Screen layouts shared by rendering and mouse handling.

use ratatui::layout::{Constraint, Layout, Rect};

/// Rain screen: the sky on the left, the slider panel on the right, help
/// text along the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainLayout {
    pub sky: Rect,
    pub panel: Rect,
    pub help: Rect,
}

impl RainLayout {
    pub fn new(area: Rect, panel_width: u16) -> Self {
        let [main, help] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [sky, panel] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(panel_width)]).areas(main);
        Self { sky, panel, help }
    }
}

/// Engine screen: the animation on top, the control panel below it, help
/// text along the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLayout {
    pub canvas: Rect,
    pub panel: Rect,
    pub help: Rect,
}

impl EngineLayout {
    pub fn new(area: Rect, panel_height: u16) -> Self {
        let [canvas, panel, help] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(panel_height),
            Constraint::Length(1),
        ])
        .areas(area);
        Self {
            canvas,
            panel,
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_layout_splits_area() {
        let layout = RainLayout::new(Rect::new(0, 0, 120, 40), 34);
        assert_eq!(layout.sky, Rect::new(0, 0, 86, 39));
        assert_eq!(layout.panel, Rect::new(86, 0, 34, 39));
        assert_eq!(layout.help, Rect::new(0, 39, 120, 1));
    }

    #[test]
    fn test_engine_layout_splits_area() {
        let layout = EngineLayout::new(Rect::new(0, 0, 100, 40), 12);
        assert_eq!(layout.canvas, Rect::new(0, 0, 100, 27));
        assert_eq!(layout.panel, Rect::new(0, 27, 100, 12));
        assert_eq!(layout.help, Rect::new(0, 39, 100, 1));
    }
}
