use std::fmt;
use std::sync::{OnceLock, RwLock};

use colored::{Color, Colorize};

/// How a shell message is decorated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

impl MessageKind {
    fn badge(self) -> Option<&'static str> {
        match self {
            MessageKind::Success => Some("✓"),
            MessageKind::Warning => Some("!"),
            MessageKind::Error => Some("x"),
            MessageKind::Hint => Some("?"),
            MessageKind::Info | MessageKind::Section => None,
        }
    }

    fn tint(self) -> Option<Color> {
        match self {
            MessageKind::Success => Some(Color::BrightGreen),
            MessageKind::Warning => Some(Color::BrightYellow),
            MessageKind::Error => Some(Color::BrightRed),
            MessageKind::Hint => Some(Color::BrightCyan),
            MessageKind::Info | MessageKind::Section => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

fn preferences_lock() -> &'static RwLock<OutputPreferences> {
    PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()))
}

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut current) = preferences_lock().write() {
        *current = prefs;
    }
}

fn preferences() -> OutputPreferences {
    preferences_lock()
        .read()
        .map(|current| *current)
        .unwrap_or_default()
}

fn render(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    if kind == MessageKind::Section {
        let heading = format!("-- {} --", text.trim());
        return if prefs.color_enabled {
            heading.bold().to_string()
        } else {
            heading
        };
    }

    let text = match kind.badge() {
        Some(badge) => format!("[{badge}] {text}"),
        None => text,
    };
    match kind.tint() {
        Some(color) if prefs.color_enabled => text.color(color).to_string(),
        _ => text,
    }
}

fn emit(kind: MessageKind, message: impl fmt::Display) {
    let rendered = render(kind, message, &preferences());
    if kind == MessageKind::Section {
        println!();
    }
    println!("{rendered}");
}

pub fn info(message: impl fmt::Display) {
    emit(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    emit(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    emit(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    emit(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    emit(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    emit(MessageKind::Section, title);
}

/// Writes a line as-is, optionally tinted when colors are enabled.
pub fn line(message: impl fmt::Display, tint: Option<Color>) {
    let text = message.to_string();
    match tint {
        Some(color) if preferences().color_enabled => println!("{}", text.color(color)),
        _ => println!("{text}"),
    }
}
