// 🏛️ Party - the eight Riksdag parties in left-to-right order
//
// Declaration order IS the political spectrum: the derived Ord sorts
// V < S < Mp < C < L < M < Kd < Sd.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::LeaderError;

// ============================================================================
// PARTY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Party {
    /// Vänsterpartiet
    V,
    /// Socialdemokraterna
    S,
    /// Miljöpartiet
    Mp,
    /// Centerpartiet
    C,
    /// Liberalerna
    L,
    /// Moderaterna
    M,
    /// Kristdemokraterna
    Kd,
    /// Sverigedemokraterna
    Sd,
}

impl Party {
    /// All parties in spectrum order
    pub const ALL: [Party; 8] = [
        Party::V,
        Party::S,
        Party::Mp,
        Party::C,
        Party::L,
        Party::M,
        Party::Kd,
        Party::Sd,
    ];

    /// Abbreviation as written in the source data
    pub fn code(&self) -> &'static str {
        match self {
            Party::V => "V",
            Party::S => "S",
            Party::Mp => "Mp",
            Party::C => "C",
            Party::L => "L",
            Party::M => "M",
            Party::Kd => "Kd",
            Party::Sd => "Sd",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Party::V => "Vänsterpartiet",
            Party::S => "Socialdemokraterna",
            Party::Mp => "Miljöpartiet",
            Party::C => "Centerpartiet",
            Party::L => "Liberalerna",
            Party::M => "Moderaterna",
            Party::Kd => "Kristdemokraterna",
            Party::Sd => "Sverigedemokraterna",
        }
    }

    /// Position on the spectrum, 0 = leftmost
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Chart colour as hex
    pub fn color_hex(&self) -> &'static str {
        match self {
            Party::V => "#990000",
            Party::S => "#ff3300",
            Party::Mp => "#408000",
            Party::C => "#8cff66",
            Party::L => "#99ccff",
            Party::M => "#0066ff",
            Party::Kd => "#000099",
            Party::Sd => "#ffff00",
        }
    }

    /// Chart colour as RGB triple
    pub fn color_rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color_hex()[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn next(&self) -> Party {
        Party::ALL[(self.rank() + 1) % Party::ALL.len()]
    }
}

impl FromStr for Party {
    type Err = LeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Party::ALL
            .iter()
            .copied()
            .find(|p| p.code() == code)
            .ok_or_else(|| LeaderError::UnknownParty {
                row: 0,
                code: code.to_string(),
            })
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_order() {
        let mut parties = vec![Party::M, Party::V, Party::S];
        parties.sort();
        assert_eq!(parties, vec![Party::V, Party::S, Party::M]);

        for pair in Party::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_parse_codes() {
        for party in Party::ALL {
            assert_eq!(party.code().parse::<Party>().unwrap(), party);
        }
        assert_eq!(" Kd ".parse::<Party>().unwrap(), Party::Kd);
    }

    #[test]
    fn test_unknown_code_is_reported() {
        let err = "Fi".parse::<Party>().unwrap_err();
        match err {
            LeaderError::UnknownParty { code, .. } => assert_eq!(code, "Fi"),
            other => panic!("unexpected error: {other:?}"),
        }
        // Codes are case sensitive: "MP" is not "Mp"
        assert!("MP".parse::<Party>().is_err());
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_value(Party::Kd).unwrap(), serde_json::json!("Kd"));
        assert_eq!(
            serde_json::to_string(&[Party::V, Party::Mp]).unwrap(),
            r#"["V","Mp"]"#
        );
    }

    #[test]
    fn test_colors() {
        assert_eq!(Party::S.color_hex(), "#ff3300");
        assert_eq!(Party::M.color_rgb(), (0x00, 0x66, 0xff));
        assert_eq!(Party::Sd.color_rgb(), (0xff, 0xff, 0x00));
    }

    #[test]
    fn test_next_wraps() {
        assert_eq!(Party::V.next(), Party::S);
        assert_eq!(Party::Sd.next(), Party::V);
    }
}
