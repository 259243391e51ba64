//! The piston engine animation.

use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use drizzle_config::EngineSettings;
use drizzle_core::{
    EngineClock, EngineControl, EngineParams,
    engine::{WORLD_HEIGHT, WORLD_WIDTH},
};
use drizzle_render::{
    ButtonKind, EngineLayout, EnginePanelLayout, Viewport, render_engine, render_engine_panel,
};
use ratatui::{DefaultTerminal, Frame, style::Stylize, text::Line};
use tracing::{debug, info};

/// State of the engine screen.
#[derive(Debug)]
pub struct EngineApp {
    /// Is the application running?
    running: bool,
    settings: EngineSettings,
    params: EngineParams,
    clock: EngineClock,
    /// Control changed by the arrow keys.
    focus: EngineControl,
    /// Slider being dragged with the mouse.
    dragging: Option<EngineControl>,
    /// Areas of the last frame, used to route mouse events.
    layout: EngineLayout,
}

impl EngineApp {
    pub fn new(settings: EngineSettings) -> Self {
        let params = settings.defaults.clamped();
        Self {
            running: false,
            settings,
            params,
            clock: EngineClock::default(),
            focus: EngineControl::AngularSpeed,
            dragging: None,
            layout: EngineLayout::new(Default::default(), 0),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!(params = ?self.params, "engine opened");
        let frame = self.settings.frame_duration();
        while self.running {
            let deadline = Instant::now() + frame;
            terminal.draw(|f| self.render(f))?;
            self.handle_crossterm_events(deadline)?;
            self.clock.advance(frame.as_secs_f64());
        }
        Ok(())
    }

    fn panel(&self) -> EnginePanelLayout {
        EnginePanelLayout::new(self.layout.panel)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.layout = EngineLayout::new(frame.area(), self.settings.panel_height);

        let viewport = Viewport::new(self.layout.canvas, WORLD_WIDTH, WORLD_HEIGHT);
        render_engine(
            frame,
            &viewport,
            &self.params,
            self.clock.time(),
            self.settings.marker,
        );
        render_engine_panel(
            frame,
            &self.panel(),
            &self.params,
            self.focus,
            self.clock.is_running(),
            self.clock.time(),
        );

        let help = Line::from(vec![
            "↑↓".bold().white(),
            " select  ".dark_gray(),
            "←→".bold().white(),
            " adjust (shift x10)  ".dark_gray(),
            "s".bold().white(),
            " start  ".dark_gray(),
            "r".bold().white(),
            " reset  ".dark_gray(),
            "q".bold().white(),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, self.layout.help);
    }

    /// Handle every event that arrives before `deadline`.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            10
        } else {
            1
        };
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab) => {
                self.focus = self.focus.prev();
            }
            (_, KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab) => {
                self.focus = self.focus.next();
            }
            (_, KeyCode::Left | KeyCode::Char('h')) => self.adjust(-step),
            (_, KeyCode::Right | KeyCode::Char('l')) => self.adjust(step),
            (_, KeyCode::Char('s') | KeyCode::Enter | KeyCode::Char(' ')) => self.start(),
            (_, KeyCode::Char('r')) => self.reset(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let panel = self.panel();
                if let Some(control) = panel.hit_slider(column, row) {
                    self.focus = control;
                    self.dragging = Some(control);
                    self.slide(control, column);
                } else if let Some(button) = panel.hit_button(column, row) {
                    match button {
                        ButtonKind::Start => self.start(),
                        ButtonKind::Reset => self.reset(),
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(control) = self.dragging {
                    self.slide(control, column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.dragging = None,
            _ => {}
        }
    }

    /// Set a control from the knob position under `column`.
    fn slide(&mut self, control: EngineControl, column: u16) {
        let panel = self.panel();
        if let Some(slot) = panel.slot(control) {
            let value = control.value_at(slot.position_at(column));
            self.set(control, value);
        }
    }

    fn adjust(&mut self, delta: i32) {
        self.params.adjust(self.focus, delta);
        self.log_change(self.focus);
    }

    fn set(&mut self, control: EngineControl, value: u32) {
        self.params.set(control, value);
        self.log_change(control);
    }

    fn log_change(&self, control: EngineControl) {
        debug!(control = control.label(), value = self.params.get(control), "engine parameter set");
    }

    fn start(&mut self) {
        if !self.clock.is_running() {
            info!(params = ?self.params, "engine started");
        }
        self.clock.start();
    }

    /// Stop, rewind and restore the configured parameters.
    fn reset(&mut self) {
        self.clock.reset();
        self.params = self.settings.defaults.clamped();
        self.dragging = None;
        info!("engine reset");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;

    /// An app laid out on a 100x40 screen; the panel covers rows 27..39.
    fn app() -> EngineApp {
        let mut app = EngineApp::new(EngineSettings::default());
        app.layout = EngineLayout::new(Rect::new(0, 0, 100, 40), 12);
        app
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn press(app: &mut EngineApp, column: u16, row: u16) {
        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_keys_move_focus_and_adjust() {
        let mut app = app();
        app.on_key_event(key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(app.params.angular_speed, 51);
        app.on_key_event(key(KeyCode::Left, KeyModifiers::SHIFT));
        assert_eq!(app.params.angular_speed, 41);

        app.on_key_event(key(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(app.focus, EngineControl::Cylinders);
        for _ in 0..20 {
            app.on_key_event(key(KeyCode::Right, KeyModifiers::NONE));
        }
        assert_eq!(app.params.cylinders, 10);

        app.on_key_event(key(KeyCode::Up, KeyModifiers::NONE));
        app.on_key_event(key(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(app.focus, EngineControl::CrankRadius);
    }

    #[test]
    fn test_start_and_reset() {
        let mut app = app();
        app.on_key_event(key(KeyCode::Char('s'), KeyModifiers::NONE));
        assert!(app.clock.is_running());
        app.clock.advance(1.5);

        app.on_key_event(key(KeyCode::Right, KeyModifiers::SHIFT));
        app.on_key_event(key(KeyCode::Char('r'), KeyModifiers::NONE));
        assert!(!app.clock.is_running());
        assert_eq!(app.clock.time(), 0.0);
        assert_eq!(app.params, EngineParams::default());
    }

    #[test]
    fn test_mouse_sets_slider_and_presses_buttons() {
        let mut app = app();
        // Cylinders track: row 31, columns 2..98.
        press(&mut app, 97, 31);
        assert_eq!(app.focus, EngineControl::Cylinders);
        assert_eq!(app.params.cylinders, 10);

        app.on_mouse_event(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 2,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(app.params.cylinders, 1);

        press(&mut app, 3, 37);
        assert!(app.clock.is_running());
        press(&mut app, 14, 37);
        assert!(!app.clock.is_running());
        assert_eq!(app.params.cylinders, 4);
    }

    #[test]
    fn test_quit_keys() {
        for event in [
            key(KeyCode::Char('q'), KeyModifiers::NONE),
            key(KeyCode::Esc, KeyModifiers::NONE),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.running = true;
            app.on_key_event(event);
            assert!(!app.running);
        }
    }
}
