use crate::MAIN_ESCAPE_EVENT;

/// Keydown listener injected into every page the main window loads.
///
/// It asks the shell which chords are bound (the list is empty until the
/// table is bound) and forwards only those, spelled the way
/// `normalize_chord` spells them.
pub(crate) fn shortcut_listener_script() -> String {
    r#"(() => {
  if (window.__katatsumuriShortcuts) return;
  const state = { bound: new Set() };
  window.__katatsumuriShortcuts = state;
  const invoke = (cmd, args) => window.__TAURI_INTERNALS__.invoke(cmd, args);
  state.refresh = () =>
    invoke('bound_shortcuts').then((chords) => {
      state.bound = new Set(chords);
    });
  const modifierKeys = ['Control', 'Alt', 'Shift', 'Meta'];
  window.addEventListener(
    'keydown',
    (event) => {
      if (modifierKeys.includes(event.key)) return;
      const parts = [];
      if (event.ctrlKey) parts.push('Ctrl');
      if (event.altKey) parts.push('Alt');
      if (event.shiftKey) parts.push('Shift');
      if (event.metaKey) parts.push('Meta');
      let key = event.key === 'Esc' ? 'Escape' : event.key;
      if (key.length === 1) key = key.toUpperCase();
      parts.push(key);
      const chord = parts.join('+');
      if (!state.bound.has(chord)) return;
      event.preventDefault();
      event.stopPropagation();
      invoke('shortcut_triggered', { chord });
    },
    true,
  );
  state.refresh();
})();"#
        .to_string()
}

pub(crate) fn refresh_shortcuts_script() -> &'static str {
    "window.__katatsumuriShortcuts && window.__katatsumuriShortcuts.refresh();"
}

/// Lets the page close its in-game overlay the way a native Escape would.
pub(crate) fn escape_signal_script() -> String {
    format!(
        "document.exitPointerLock && document.exitPointerLock();\
         window.dispatchEvent(new CustomEvent({}));",
        serde_json::Value::String(MAIN_ESCAPE_EVENT.to_string())
    )
}
