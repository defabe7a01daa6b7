#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    /// Hands Escape through to the page so the in-game menu can close.
    CancelOverlay,
    Reload,
    ToggleFullscreen,
    Relaunch,
    OpenDevTools,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub chords: &'static [&'static str],
    pub action: ShortcutAction,
}

pub const SHORTCUT_BINDINGS: &[ShortcutBinding] = &[
    ShortcutBinding {
        chords: &["Escape"],
        action: ShortcutAction::CancelOverlay,
    },
    ShortcutBinding {
        chords: &["F5"],
        action: ShortcutAction::Reload,
    },
    ShortcutBinding {
        chords: &["F11"],
        action: ShortcutAction::ToggleFullscreen,
    },
    ShortcutBinding {
        chords: &["Ctrl+Shift+F1"],
        action: ShortcutAction::Relaunch,
    },
    ShortcutBinding {
        chords: &["Ctrl+F1", "F12"],
        action: ShortcutAction::OpenDevTools,
    },
];

/// Fixed, ordered chord-to-action table for the main window.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutTable {
    bindings: &'static [ShortcutBinding],
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ShortcutTable {
    pub fn standard() -> Self {
        Self {
            bindings: SHORTCUT_BINDINGS,
        }
    }

    /// Every bound chord in canonical form, in table order.
    pub fn chords(&self) -> Vec<String> {
        self.bindings
            .iter()
            .flat_map(|binding| binding.chords.iter())
            .filter_map(|chord| normalize_chord(chord))
            .collect()
    }

    pub fn resolve(&self, raw_chord: &str) -> Option<ShortcutAction> {
        let chord = normalize_chord(raw_chord)?;
        self.bindings
            .iter()
            .find(|binding| {
                binding
                    .chords
                    .iter()
                    .any(|bound| normalize_chord(bound).as_deref() == Some(chord.as_str()))
            })
            .map(|binding| binding.action)
    }
}

const MODIFIER_ORDER: [&str; 4] = ["Ctrl", "Alt", "Shift", "Meta"];

/// Canonical `Ctrl+Alt+Shift+Meta+Key` spelling of a chord, or `None` when
/// the chord has no key or more than one.
pub fn normalize_chord(raw: &str) -> Option<String> {
    let mut modifiers = [false; 4];
    let mut key: Option<String> = None;

    for token in raw.split('+').map(str::trim) {
        if token.is_empty() {
            return None;
        }
        match modifier_index(token) {
            Some(index) => modifiers[index] = true,
            None => {
                if key.is_some() {
                    return None;
                }
                key = Some(normalize_key(token));
            }
        }
    }

    let key = key?;
    let mut parts: Vec<&str> = MODIFIER_ORDER
        .iter()
        .zip(modifiers)
        .filter_map(|(name, held)| held.then_some(*name))
        .collect();
    parts.push(&key);
    Some(parts.join("+"))
}

fn modifier_index(token: &str) -> Option<usize> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" | "cmdorctrl" | "commandorcontrol" => Some(0),
        "alt" | "option" => Some(1),
        "shift" => Some(2),
        "meta" | "cmd" | "command" | "super" => Some(3),
        _ => None,
    }
}

fn normalize_key(token: &str) -> String {
    let lowered = token.to_ascii_lowercase();
    if lowered == "esc" || lowered == "escape" {
        return "Escape".to_string();
    }
    if lowered.len() > 1
        && lowered.starts_with('f')
        && lowered[1..].chars().all(|ch| ch.is_ascii_digit())
    {
        return lowered.to_ascii_uppercase();
    }

    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
