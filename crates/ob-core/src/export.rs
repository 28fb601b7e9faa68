//! Binds file export
//!
//! Renders the same batch as a `.cfg` file the game can `exec`, with the
//! player name beside each bind for whoever reads it later.

use std::path::Path;

use chrono::NaiveDateTime;
use ob_protocol::{bind_command, echo_command, PlayerRecord, DISABLE_NUMBER_KEY_BINDS};

use crate::commands::planned_binds;
use crate::error::ConfigError;
use crate::types::BindingMap;

/// Render the binds file contents
pub fn render_binds_file(
    roster: &[PlayerRecord],
    bindings: &BindingMap,
    completion_message: &str,
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        format!(
            "// --- Observer Binds ({}) ---",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        DISABLE_NUMBER_KEY_BINDS.to_string(),
        echo_command(completion_message),
    ];

    for bind in planned_binds(roster, bindings) {
        lines.push(format!(
            "{} // {}",
            bind_command(bind.key, bind.player.slot),
            bind.player.name
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write a binds file, replacing any existing one atomically
pub fn write_binds_file(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_path = path.with_extension("cfg.tmp");
    std::fs::write(&tmp_path, contents).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        write_err(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_render_binds_file() {
        let roster = vec![PlayerRecord::new(1, "Alice"), PlayerRecord::new(2, "Bob")];
        let bindings: BindingMap = [("Bob".to_string(), "f2".to_string())].into_iter().collect();

        let text = render_binds_file(&roster, &bindings, "loaded", at());
        assert_eq!(
            text,
            "// --- Observer Binds (2024-05-01 18:30:00) ---\n\
             spec_usenumberkeys_nobinds false\n\
             echo \"loaded\"\n\
             bind \"f2\" \"spec_player 2\" // Bob\n"
        );
    }

    #[test]
    fn test_write_binds_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("binds.cfg");

        write_binds_file(&path, "echo \"hi\"\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo \"hi\"\n");
        assert!(!path.with_extension("cfg.tmp").exists());
    }
}
