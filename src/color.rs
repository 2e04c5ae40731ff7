//! Round-robin color assignment

use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use colored::Color;

use crate::config::ConfigError;

/// Color names accepted in `colorcycle`.
///
/// `colored::Color::from(&str)` silently maps unknown names to white, so
/// lookup goes through this table to reject typos at construction time.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("bright black", Color::BrightBlack),
    ("bright red", Color::BrightRed),
    ("bright green", Color::BrightGreen),
    ("bright yellow", Color::BrightYellow),
    ("bright blue", Color::BrightBlue),
    ("bright magenta", Color::BrightMagenta),
    ("bright cyan", Color::BrightCyan),
    ("bright white", Color::BrightWhite),
];

pub(crate) fn parse_color(name: &str) -> Result<Color, ConfigError> {
    let lower = name.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, color)| *color)
        .ok_or_else(|| ConfigError::UnknownColor(name.to_string()))
}

/// Infinite wrap-around sequence over a fixed ordered color list.
///
/// The cursor is an index incremented modulo the list length on every
/// pull. It is atomic, so a formatter shared across threads races only
/// on assignment order, never on the cursor itself.
#[derive(Debug)]
pub struct ColorCycle {
    colors: Vec<Color>,
    cursor: AtomicUsize,
}

impl ColorCycle {
    /// `None` if `colors` is empty (colorization disabled).
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        (!colors.is_empty()).then(|| Self {
            colors,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Parse config names into a cycle, validating each one.
    pub fn from_names(names: &[String]) -> Result<Option<Self>, ConfigError> {
        let colors = names
            .iter()
            .map(|name| parse_color(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(colors))
    }

    /// Next color in round-robin order, wrapping after the last.
    pub fn next_color(&self) -> Color {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.colors[idx % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cycles_round_robin_and_wraps() {
        let cycle =
            ColorCycle::new(vec![Color::Red, Color::Green]).unwrap();

        assert_eq!(cycle.next_color(), Color::Red);
        assert_eq!(cycle.next_color(), Color::Green);
        assert_eq!(cycle.next_color(), Color::Red);
    }

    #[test]
    fn cursor_is_per_instance() {
        let names = vec!["red".to_string(), "green".to_string()];
        let a = ColorCycle::from_names(&names).unwrap().unwrap();
        let b = ColorCycle::from_names(&names).unwrap().unwrap();

        a.next_color();

        // advancing `a` must not move `b`
        assert_eq!(b.next_color(), Color::Red);
    }

    #[test]
    fn empty_cycle_disables_colorization() {
        assert!(ColorCycle::new(Vec::new()).is_none());
        assert!(ColorCycle::from_names(&[]).unwrap().is_none());
    }

    #[test]
    fn unknown_color_name_is_rejected() {
        let names = vec!["chartreuse".to_string()];

        assert!(matches!(
            ColorCycle::from_names(&names),
            Err(ConfigError::UnknownColor(name)) if name == "chartreuse"
        ));
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(parse_color("RED").unwrap(), Color::Red);
        assert_eq!(parse_color("Bright Cyan").unwrap(), Color::BrightCyan);
    }
}
