//! Outgoing console command vocabulary

/// Query that makes the console list connected players with their index
pub const ROSTER_QUERY: &str = "voice_show_mute";

/// Turns off the default behaviour where number keys pick observer targets
pub const DISABLE_NUMBER_KEY_BINDS: &str = "spec_usenumberkeys_nobinds false";

/// `bind "<key>" "spec_player <slot>"`
pub fn bind_command(key: &str, slot: u32) -> String {
    format!("bind \"{}\" \"spec_player {}\"", sanitize(key), slot)
}

/// `echo "<message>"`
pub fn echo_command(message: &str) -> String {
    format!("echo \"{}\"", sanitize(message))
}

/// The console has no escape syntax, so quotes and line breaks are dropped.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '"' | '\r' | '\n'))
        .collect()
}
