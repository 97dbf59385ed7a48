//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for copy/submit shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Continue shortcut display for wizard help text
/// Ctrl+S works on all platforms (Cmd+S also works on macOS)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Copy order id shortcut display
/// - macOS: "Cmd+C"
/// - Linux/Windows: "y"
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+C";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "y";
