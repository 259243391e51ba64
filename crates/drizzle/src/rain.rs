//! The rain toy: place clouds with the mouse and tune their rain.

use std::time::Instant;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as TermButton,
    MouseEvent, MouseEventKind,
};
use drizzle_config::{CloudStore, RainSettings};
use drizzle_core::{
    MouseButton, RAIN_WORLD_HEIGHT, RAIN_WORLD_WIDTH, Sky, SkyChange, SliderKind,
};
use drizzle_render::{RainLayout, SliderPanelLayout, Viewport, render_rain_panel, render_sky};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::Position,
    style::Stylize,
    text::Line,
};
use tracing::{debug, info, warn};

/// State of the rain screen.
#[derive(Debug)]
pub struct RainApp {
    /// Is the application running?
    running: bool,
    settings: RainSettings,
    sky: Sky,
    store: CloudStore,
    rng: StdRng,
    /// Areas of the last frame, used to route mouse events.
    layout: RainLayout,
}

impl RainApp {
    pub fn new(settings: RainSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    fn with_rng(settings: RainSettings, rng: StdRng) -> Self {
        let sky = Sky::new(RAIN_WORLD_WIDTH, RAIN_WORLD_HEIGHT, settings.defaults);
        let store = CloudStore::new(settings.store_dir());
        Self {
            running: false,
            settings,
            sky,
            store,
            rng,
            layout: RainLayout::new(Default::default(), 0),
        }
    }

    /// Run the main loop, then remove the files of every remaining cloud.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        info!(store = %self.store.dir().display(), "rain started");
        let result = self.run_loop(&mut terminal);
        let cleared = self.clear_clouds();
        info!("rain stopped");
        result.and(cleared)
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let frame = self.settings.frame_duration();
        while self.running {
            let deadline = Instant::now() + frame;
            terminal.draw(|f| self.render(f))?;
            self.handle_crossterm_events(deadline)?;
            self.sky.tick(&mut self.rng);
        }
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.layout.sky, RAIN_WORLD_WIDTH, RAIN_WORLD_HEIGHT)
    }

    fn panel(&self) -> SliderPanelLayout {
        SliderPanelLayout::new(self.layout.panel)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.layout = RainLayout::new(frame.area(), self.settings.panel_width);

        render_sky(frame, &self.viewport(), &self.sky, self.settings.marker);
        render_rain_panel(frame, &self.panel(), &self.sky);

        let help = Line::from(vec![
            "click".bold().white(),
            " place/select  ".dark_gray(),
            "drag".bold().white(),
            " move  ".dark_gray(),
            "right-click".bold().white(),
            " remove  ".dark_gray(),
            "tab".bold().white(),
            " next  ".dark_gray(),
            "c".bold().white(),
            " clear  ".dark_gray(),
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
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                Event::Mouse(mouse) => self.on_mouse_event(mouse)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.sky.select_next(),
            (_, KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d')) => {
                let change = self.sky.remove_selected();
                self.persist(change)?;
            }
            (_, KeyCode::Char('c')) => self.clear_clouds()?,
            _ => {}
        }
        Ok(())
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) -> color_eyre::Result<()> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => {
                let button = sky_button(button);
                if self.layout.panel.contains(Position::new(column, row)) {
                    self.press_panel(button, column, row)?;
                } else if let Some(point) = self.viewport().to_world(column, row) {
                    let change = self.sky.press(button, point, &mut self.rng);
                    self.persist(change)?;
                }
            }
            MouseEventKind::Drag(TermButton::Left) => {
                if let Some(kind) = self.sky.active_slider() {
                    self.move_slider(kind, column)?;
                } else if self.sky.is_dragging() {
                    let point = self.viewport().to_world_clamped(column, row);
                    self.sky.drag_to(point);
                }
            }
            MouseEventKind::Up(TermButton::Left) if self.sky.active_slider().is_some() => {
                self.sky.release_slider();
            }
            MouseEventKind::Up(button) => {
                let button = sky_button(button);
                match self.viewport().to_world(column, row) {
                    Some(point) => self.sky.release(button, point),
                    None if button == MouseButton::Left => {
                        self.sky.release(button, self.viewport().to_world_clamped(column, row));
                    }
                    None if self.layout.panel.contains(Position::new(column, row)) => {}
                    None => self.sky.deselect(),
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// A press inside the slider panel never creates a cloud.
    fn press_panel(&mut self, button: MouseButton, column: u16, row: u16) -> color_eyre::Result<()> {
        match button {
            MouseButton::Left => {
                if let Some(kind) = self.panel().hit(column, row) {
                    self.sky.grab_slider(kind);
                    self.move_slider(kind, column)?;
                }
            }
            MouseButton::Right => {
                let change = self.sky.remove_selected();
                self.persist(change)?;
            }
            MouseButton::Middle => {}
        }
        Ok(())
    }

    fn move_slider(&mut self, kind: SliderKind, column: u16) -> color_eyre::Result<()> {
        let Some(position) = self.panel().slot(kind).map(|slot| slot.position_at(column)) else {
            return Ok(());
        };
        let change = self.sky.set_slider(kind, position);
        self.persist(change)
    }

    /// Mirror a sky change in the cloud files.
    fn persist(&mut self, change: Option<SkyChange>) -> color_eyre::Result<()> {
        match change {
            Some(SkyChange::Created(id)) => {
                let config = self.store.load_or_create(id, self.sky.defaults())?;
                self.sky.set_config(id, config);
                info!(id, path = %self.store.path_for(id).display(), "cloud created");
            }
            Some(SkyChange::ConfigChanged(id)) => {
                if let Some(cloud) = self.sky.cloud(id) {
                    self.store.save(id, &cloud.config)?;
                    debug!(id, config = ?cloud.config, "cloud settings saved");
                }
            }
            Some(SkyChange::Removed(id)) => {
                self.store.delete(id)?;
                info!(id, "cloud removed");
            }
            None => {}
        }
        Ok(())
    }

    /// Remove every cloud and its file.
    fn clear_clouds(&mut self) -> color_eyre::Result<()> {
        let ids = self.sky.drain();
        if !ids.is_empty() {
            info!(count = ids.len(), "clearing clouds");
        }
        let mut result = Ok(());
        for id in ids {
            if let Err(err) = self.store.delete(id) {
                warn!(id, %err, "failed to remove cloud file");
                result = Err(err.into());
            }
        }
        result
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn sky_button(button: TermButton) -> MouseButton {
    match button {
        TermButton::Left => MouseButton::Left,
        TermButton::Right => MouseButton::Right,
        TermButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;
    use tempfile::TempDir;

    use super::*;

    /// An app laid out on a 120x40 screen: sky is columns 0..86, the panel
    /// columns 86..120, rows 0..39.
    fn app() -> (RainApp, TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = RainSettings {
            store_dir: Some(dir.path().to_path_buf()),
            ..RainSettings::default()
        };
        let mut app = RainApp::with_rng(settings, StdRng::seed_from_u64(7));
        app.layout = RainLayout::new(Rect::new(0, 0, 120, 40), 34);
        (app, dir)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(app: &mut RainApp, button: TermButton, column: u16, row: u16) {
        app.on_mouse_event(mouse(MouseEventKind::Down(button), column, row))
            .expect("press");
        app.on_mouse_event(mouse(MouseEventKind::Up(button), column, row))
            .expect("release");
    }

    #[test]
    fn test_click_creates_cloud_file() {
        let (mut app, dir) = app();
        click(&mut app, TermButton::Left, 10, 5);

        assert_eq!(app.sky.clouds().len(), 1);
        assert!(dir.path().join("cloud_1.json").exists());
    }

    #[test]
    fn test_panel_click_moves_slider_and_saves() {
        let (mut app, dir) = app();
        click(&mut app, TermButton::Left, 10, 5);

        // Density track is on row 2, columns 88..118.
        click(&mut app, TermButton::Left, 117, 2);
        assert_eq!(app.sky.clouds().len(), 1);
        let density = app.sky.selected().map(|c| c.config.density);
        assert_eq!(density, Some(6.25));

        let saved = std::fs::read_to_string(dir.path().join("cloud_1.json")).expect("read");
        assert!(saved.contains("6.25"));
    }

    #[test]
    fn test_panel_click_never_creates_cloud() {
        let (mut app, _dir) = app();
        click(&mut app, TermButton::Left, 100, 20);
        assert!(app.sky.clouds().is_empty());
    }

    #[test]
    fn test_slider_drag_follows_mouse() {
        let (mut app, _dir) = app();
        click(&mut app, TermButton::Left, 10, 5);

        app.on_mouse_event(mouse(MouseEventKind::Down(TermButton::Left), 103, 2))
            .expect("press");
        app.on_mouse_event(mouse(MouseEventKind::Drag(TermButton::Left), 88, 30))
            .expect("drag");
        let density = app.sky.selected().map(|c| c.config.density);
        assert_eq!(density, Some(3.75));

        app.on_mouse_event(mouse(MouseEventKind::Up(TermButton::Left), 88, 30))
            .expect("release");
        assert_eq!(app.sky.active_slider(), None);
    }

    #[test]
    fn test_right_click_removes_file() {
        let (mut app, dir) = app();
        click(&mut app, TermButton::Left, 10, 5);
        click(&mut app, TermButton::Right, 60, 30);

        assert!(app.sky.clouds().is_empty());
        assert!(!dir.path().join("cloud_1.json").exists());
    }

    #[test]
    fn test_keys_cycle_and_clear() {
        let (mut app, dir) = app();
        click(&mut app, TermButton::Left, 10, 5);
        click(&mut app, TermButton::Left, 60, 30);

        app.on_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))
            .expect("tab");
        assert_eq!(app.sky.selected().map(|c| c.id), Some(1));

        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE))
            .expect("clear");
        assert!(app.sky.clouds().is_empty());
        assert!(!dir.path().join("cloud_1.json").exists());
        assert!(!dir.path().join("cloud_2.json").exists());

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .expect("quit");
        assert!(!app.running);
    }
}
