//! Gems, token colors and gate tokens

use serde::{Deserialize, Serialize};

/// Gem color, in ascending value order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GemColor {
    Amber,
    Emerald,
    Sapphire,
}

impl GemColor {
    /// Zero-based rank: Amber 0, Emerald 1, Sapphire 2
    pub fn rank(self) -> u32 {
        self as u32
    }

    /// Points awarded when a gem of this color reaches a gate
    pub fn points(self) -> u32 {
        self.rank() + 1
    }
}

/// Unique gem identity, assigned once at game setup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemId(pub u32);

/// A gem. Two gems of the same color are told apart by `id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub color: GemColor,
}

impl Gem {
    pub const fn new(id: u32, color: GemColor) -> Self {
        Self { id: GemId(id), color }
    }
}

/// Player / gate token color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenColor {
    White,
    Purple,
    Blue,
    Red,
}

pub const TOKEN_COLORS: [TokenColor; 4] = [
    TokenColor::White,
    TokenColor::Purple,
    TokenColor::Blue,
    TokenColor::Red,
];

/// A color marker sitting in one of the twelve gate slots (two per gate)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateToken {
    pub color: TokenColor,
}

/// How the six gates are split between players
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Every gate belongs to a single player
    #[default]
    Separate,
    /// Some gates carry tokens of two different players (3 or 4 players only)
    Shared,
}

/// Lay out the twelve gate tokens for the given player colors.
///
/// Slot `2 * gate` is aligned with the gate's first outward edge, slot `2 * gate + 1`
/// with the second. Returns `None` for shared gates with fewer than three players.
pub fn gate_tokens(colors: &[TokenColor], mode: GateMode) -> Option<Vec<GateToken>> {
    let n = colors.len();
    if n == 0 {
        return None;
    }
    let slots: Vec<usize> = match (mode, n) {
        (GateMode::Separate, _) => (0..6).flat_map(|gate| [gate % n, gate % n]).collect(),
        (GateMode::Shared, 3) => (0..3)
            .flat_map(|i| {
                let owner = i * 2 % 3;
                [owner, owner, owner, (i * 2 + 1) % 3]
            })
            .collect(),
        (GateMode::Shared, 4) => vec![0, 1, 1, 2, 0, 3, 3, 1, 2, 0, 2, 3],
        (GateMode::Shared, _) => return None,
    };
    Some(
        slots
            .into_iter()
            .map(|player| GateToken { color: colors[player] })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gem_points() {
        assert_eq!(GemColor::Amber.points(), 1);
        assert_eq!(GemColor::Emerald.points(), 2);
        assert_eq!(GemColor::Sapphire.points(), 3);
    }

    #[test]
    fn test_separate_gates() {
        let tokens = gate_tokens(&[TokenColor::Red, TokenColor::Blue], GateMode::Separate).unwrap();
        assert_eq!(tokens.len(), 12);
        for gate in 0..6 {
            assert_eq!(tokens[gate * 2], tokens[gate * 2 + 1]);
        }
        assert_eq!(tokens[0].color, TokenColor::Red);
        assert_eq!(tokens[2].color, TokenColor::Blue);
    }

    #[test]
    fn test_shared_gates() {
        let three = [TokenColor::White, TokenColor::Purple, TokenColor::Blue];
        let tokens = gate_tokens(&three, GateMode::Shared).unwrap();
        let colors: Vec<_> = tokens.iter().map(|t| t.color).collect();
        assert_eq!(
            colors,
            vec![
                TokenColor::White, TokenColor::White, TokenColor::White, TokenColor::Purple,
                TokenColor::Blue, TokenColor::Blue, TokenColor::Blue, TokenColor::White,
                TokenColor::Purple, TokenColor::Purple, TokenColor::Purple, TokenColor::Blue,
            ]
        );

        // Every player owns three slots with four players
        let tokens = gate_tokens(&TOKEN_COLORS, GateMode::Shared).unwrap();
        for color in TOKEN_COLORS {
            assert_eq!(tokens.iter().filter(|t| t.color == color).count(), 3);
        }

        assert!(gate_tokens(&three[..2], GateMode::Shared).is_none());
    }
}
