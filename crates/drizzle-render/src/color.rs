//! Colors for the sky, the engine and the panels.

use ratatui::style::Color;

pub const SKY: Color = Color::Rgb(192, 192, 192);
pub const CLOUD: Color = Color::Rgb(255, 255, 255);
pub const SELECTION: Color = Color::Rgb(90, 90, 90);

pub const PANEL: Color = Color::Rgb(0, 0, 0);
pub const TRACK: Color = Color::Rgb(255, 0, 0);
pub const KNOB: Color = Color::Rgb(0, 255, 0);
pub const LABEL: Color = Color::Rgb(255, 255, 255);

pub const ENGINE_BACKGROUND: Color = Color::Rgb(255, 255, 255);
pub const CYLINDER: Color = Color::Rgb(0, 0, 0);
pub const PISTON: Color = Color::Rgb(255, 0, 0);
pub const CRANK: Color = Color::Rgb(169, 169, 169);

pub const SLOW_DROP: (u8, u8, u8) = (0, 0, 255);
pub const FAST_DROP: (u8, u8, u8) = (76, 76, 255);

/// Drop color: pure blue for slow drops, lighter as they get faster.
pub fn drop_color(speed: f64) -> Color {
    let fast = ((speed - 4.0) / 8.0).clamp(0.0, 1.0);
    let mix = |slow: u8, quick: u8| {
        let (slow, quick) = (f64::from(slow), f64::from(quick));
        (slow + (quick - slow) * fast).round() as u8
    };
    Color::Rgb(
        mix(SLOW_DROP.0, FAST_DROP.0),
        mix(SLOW_DROP.1, FAST_DROP.1),
        mix(SLOW_DROP.2, FAST_DROP.2),
    )
}
