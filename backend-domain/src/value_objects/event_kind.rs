// Event kind value object

use serde::{Deserialize, Serialize};

/// Catalog event category. Codes match the upstream wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Week,
    Special,
    SpecialWeek,
    Guerrilla,
    GuerrillaNew,
    Etc,
}

impl EventKind {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(EventKind::Week),
            1 => Some(EventKind::Special),
            2 => Some(EventKind::SpecialWeek),
            3 => Some(EventKind::Guerrilla),
            4 => Some(EventKind::GuerrillaNew),
            -100 => Some(EventKind::Etc),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            EventKind::Week => 0,
            EventKind::Special => 1,
            EventKind::SpecialWeek => 2,
            EventKind::Guerrilla => 3,
            EventKind::GuerrillaNew => 4,
            EventKind::Etc => -100,
        }
    }

    /// Kinds that cycle through rotation groups and trigger start alerts.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            EventKind::Guerrilla | EventKind::GuerrillaNew | EventKind::SpecialWeek
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [
            EventKind::Week,
            EventKind::Special,
            EventKind::SpecialWeek,
            EventKind::Guerrilla,
            EventKind::GuerrillaNew,
            EventKind::Etc,
        ] {
            assert_eq!(EventKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(EventKind::from_code(5), None);
        assert_eq!(EventKind::from_code(-1), None);
    }

    #[test]
    fn rotation_kinds() {
        assert!(EventKind::Guerrilla.is_rotation());
        assert!(EventKind::GuerrillaNew.is_rotation());
        assert!(EventKind::SpecialWeek.is_rotation());
        assert!(!EventKind::Week.is_rotation());
        assert!(!EventKind::Special.is_rotation());
        assert!(!EventKind::Etc.is_rotation());
    }
}
