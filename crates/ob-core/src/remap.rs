//! Halftime key swap
//!
//! Teams change sides at halftime, so observer keys mirror across the
//! number row: 1<->6, 2<->7, 3<->8, 4<->9, 5<->0. Coaches, casters and other
//! non-playing roles keep their keys.

use ob_protocol::PlayerRecord;

use crate::types::BindingMap;

/// The fixed rotation; every key maps to its partner and back
pub const ROTATION: [(&str, &str); 5] = [("1", "6"), ("2", "7"), ("3", "8"), ("4", "9"), ("5", "0")];

/// Name fragments marking a non-playing role, matched case-insensitively
pub const EXCLUDED_ROLES: [&str; 5] = ["coach", "spectator", "spec", "caster", "admin"];

/// The partner of `key` in the rotation, if it has one
pub fn rotated_key(key: &str) -> Option<&'static str> {
    ROTATION.iter().find_map(|&(a, b)| {
        if key == a {
            Some(b)
        } else if key == b {
            Some(a)
        } else {
            None
        }
    })
}

/// Whether a display name marks a non-playing role
pub fn is_excluded_role(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXCLUDED_ROLES.iter().any(|role| lower.contains(role))
}

/// Apply the halftime swap to the current bindings of the roster
///
/// Only roster members appear in the result. Excluded roles and keys outside
/// the rotation (including blanks) pass through unchanged.
pub fn rotate(roster: &[PlayerRecord], current: &BindingMap) -> BindingMap {
    roster
        .iter()
        .filter_map(|player| {
            let key = current.get(&player.name)?;
            let next = if is_excluded_role(&player.name) {
                key.clone()
            } else {
                rotated_key(key.trim())
                    .map(str::to_string)
                    .unwrap_or_else(|| key.clone())
            };
            Some((player.name.clone(), next))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> BindingMap {
        pairs
            .iter()
            .map(|(n, k)| (n.to_string(), k.to_string()))
            .collect()
    }

    #[test]
    fn test_caster_keeps_key() {
        let roster = vec![PlayerRecord::new(1, "Caster Joe"), PlayerRecord::new(2, "Bob")];
        let current = bindings(&[("Caster Joe", "3"), ("Bob", "3")]);
        assert_eq!(
            rotate(&roster, &current),
            bindings(&[("Caster Joe", "3"), ("Bob", "8")])
        );
    }

    #[test]
    fn test_rotation_is_an_involution() {
        let roster: Vec<PlayerRecord> = (0..10)
            .map(|i| PlayerRecord::new(i + 1, format!("player{}", i)))
            .collect();
        let current: BindingMap = roster
            .iter()
            .zip(["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"])
            .map(|(p, k)| (p.name.clone(), k.to_string()))
            .collect();

        let once = rotate(&roster, &current);
        assert_ne!(once, current);
        assert_eq!(once.get("player0").map(String::as_str), Some("6"));
        assert_eq!(once.get("player9").map(String::as_str), Some("5"));
        assert_eq!(rotate(&roster, &once), current);
    }

    #[test]
    fn test_excluded_roles_any_case() {
        for name in ["COACH kim", "TheSpectator", "spec1", "MainCaster", "Admin"] {
            assert!(is_excluded_role(name), "{} should be excluded", name);
        }
        assert!(!is_excluded_role("Bob"));

        let roster = vec![PlayerRecord::new(1, "coach")];
        let current = bindings(&[("coach", "1")]);
        let twice = rotate(&roster, &rotate(&roster, &current));
        assert_eq!(rotate(&roster, &current), current);
        assert_eq!(twice, current);
    }

    #[test]
    fn test_keys_outside_table_unchanged() {
        let roster = vec![PlayerRecord::new(1, "Alice"), PlayerRecord::new(2, "Bob")];
        let current = bindings(&[("Alice", "f1"), ("Bob", "")]);
        assert_eq!(rotate(&roster, &current), current);
    }

    #[test]
    fn test_only_roster_members_kept() {
        let roster = vec![PlayerRecord::new(1, "Alice")];
        let current = bindings(&[("Alice", "1"), ("Gone", "2")]);
        assert_eq!(rotate(&roster, &current), bindings(&[("Alice", "6")]));
    }
}
