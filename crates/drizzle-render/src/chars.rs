//! Characters used by the panels.

/// Slider track.
pub const TRACK_CHAR: char = '━';

/// Slider knob.
pub const KNOB_CHAR: char = '█';

/// Marker in front of the focused control.
pub const FOCUS_CHAR: char = '▶';
