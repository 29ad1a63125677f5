use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// A key event reduced to what the widget cares about: the positional
/// identifier of the physical key (`KeyA`, `ControlLeft`, `Space`), the value it
/// produced (`a`, `A`, `Control`, `" "`), and whether Ctrl was down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyInput {
    pub code: String,
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            key: key.into(),
            ctrl: false,
        }
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    /// Translate a terminal key event. Returns `None` for events that have no
    /// physical key to mirror (media keys, keypad begin, null).
    pub fn from_crossterm(event: &KeyEvent) -> Option<Self> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let (code, key) = match event.code {
            KeyCode::Char(ch) => (char_code(ch), ch.to_string()),
            KeyCode::Enter => named("Enter"),
            KeyCode::Tab | KeyCode::BackTab => named("Tab"),
            KeyCode::Backspace => named("Backspace"),
            KeyCode::Esc => named("Escape"),
            KeyCode::Delete => named("Delete"),
            KeyCode::Insert => named("Insert"),
            KeyCode::Home => named("Home"),
            KeyCode::End => named("End"),
            KeyCode::PageUp => named("PageUp"),
            KeyCode::PageDown => named("PageDown"),
            KeyCode::Up => named("ArrowUp"),
            KeyCode::Down => named("ArrowDown"),
            KeyCode::Left => named("ArrowLeft"),
            KeyCode::Right => named("ArrowRight"),
            KeyCode::F(n) => {
                let name = format!("F{n}");
                (name.clone(), name)
            }
            KeyCode::CapsLock => named("CapsLock"),
            KeyCode::ScrollLock => named("ScrollLock"),
            KeyCode::NumLock => named("NumLock"),
            KeyCode::PrintScreen => named("PrintScreen"),
            KeyCode::Pause => named("Pause"),
            KeyCode::Menu => named("ContextMenu"),
            KeyCode::Modifier(modifier) => modifier_code(modifier)?,
            KeyCode::Null | KeyCode::KeypadBegin | KeyCode::Media(_) => return None,
        };
        Some(Self { code, key, ctrl })
    }
}

fn named(name: &str) -> (String, String) {
    (name.to_string(), name.to_string())
}

fn modifier_code(modifier: ModifierKeyCode) -> Option<(String, String)> {
    let (code, key) = match modifier {
        ModifierKeyCode::LeftShift => ("ShiftLeft", "Shift"),
        ModifierKeyCode::RightShift => ("ShiftRight", "Shift"),
        ModifierKeyCode::LeftControl => ("ControlLeft", "Control"),
        ModifierKeyCode::RightControl => ("ControlRight", "Control"),
        ModifierKeyCode::LeftAlt => ("AltLeft", "Alt"),
        ModifierKeyCode::RightAlt => ("AltRight", "Alt"),
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => ("MetaLeft", "Meta"),
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => ("MetaRight", "Meta"),
        ModifierKeyCode::IsoLevel3Shift => ("AltRight", "AltGraph"),
        ModifierKeyCode::LeftHyper
        | ModifierKeyCode::RightHyper
        | ModifierKeyCode::IsoLevel5Shift => return None,
    };
    Some((code.to_string(), key.to_string()))
}

/// Positional code for a typed character, US ANSI layout. Shifted symbols map
/// to the key that produces them.
fn char_code(ch: char) -> String {
    if ch.is_ascii_alphabetic() {
        return format!("Key{}", ch.to_ascii_uppercase());
    }
    if ch.is_ascii_digit() {
        return format!("Digit{ch}");
    }
    let code = match ch {
        ' ' => "Space",
        '!' => "Digit1",
        '@' => "Digit2",
        '#' => "Digit3",
        '$' => "Digit4",
        '%' => "Digit5",
        '^' => "Digit6",
        '&' => "Digit7",
        '*' => "Digit8",
        '(' => "Digit9",
        ')' => "Digit0",
        '`' | '~' => "Backquote",
        '-' | '_' => "Minus",
        '=' | '+' => "Equal",
        '[' | '{' => "BracketLeft",
        ']' | '}' => "BracketRight",
        '\\' | '|' => "Backslash",
        ';' | ':' => "Semicolon",
        '\'' | '"' => "Quote",
        ',' | '<' => "Comma",
        '.' | '>' => "Period",
        '/' | '?' => "Slash",
        _ => return ch.to_string(),
    };
    code.to_string()
}

const STAT_PREFIXES: &[&str] = &["Key", "Digit", "Arrow"];
const COMBO_PREFIXES: &[&str] = &["Key", "Digit", "Arrow", "Left", "Right"];

fn strip_prefix<'a>(code: &'a str, prefixes: &[&str]) -> &'a str {
    prefixes
        .iter()
        .find_map(|prefix| code.strip_prefix(prefix))
        .unwrap_or(code)
}

/// Insert a space at every lowercase→uppercase boundary: `ControlLeft` →
/// `Control Left`.
pub fn split_camel(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if prev.is_some_and(|p| p.is_ascii_lowercase()) && ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Name a key is counted under in the statistics panel.
pub fn stat_name(code: &str) -> String {
    split_camel(strip_prefix(code, STAT_PREFIXES))
}

/// Name a held key shows under in the combination field. Unlike
/// [`stat_name`] this also strips a leading `Left`/`Right`.
pub fn combo_name(code: &str) -> String {
    split_camel(strip_prefix(code, COMBO_PREFIXES))
}

/// Text for the last-key field.
pub fn last_key_label(input: &KeyInput) -> String {
    if input.key == " " {
        "Space".to_string()
    } else if input.key.chars().count() > 1 {
        strip_prefix(&input.code, STAT_PREFIXES).to_string()
    } else {
        input.key.clone()
    }
}
