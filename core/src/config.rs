use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Validated board shape and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig", into = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Requires `rows > 0`, `cols > 0` and `0 < mines < rows * cols`.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= area((rows, cols)) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.rows(), self.cols(), self.mines)
    }
}

#[derive(Serialize, Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl From<GameConfig> for RawGameConfig {
    fn from(config: GameConfig) -> Self {
        Self {
            rows: config.rows(),
            cols: config.cols(),
            mines: config.mines(),
        }
    }
}

/// Built-in difficulty presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Insane];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((8, 8), 10),
            Medium => GameConfig::new_unchecked((15, 15), 40),
            Hard => GameConfig::new_unchecked((15, 30), 99),
            Insane => GameConfig::new_unchecked((35, 35), 300),
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
            Insane => "insane",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty;

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown difficulty, expected one of: easy, medium, hard, insane")
    }
}

impl core::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownDifficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_board() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidDimensions));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn rejects_mine_count_out_of_range() {
        assert_eq!(GameConfig::new(3, 3, 0), Err(GameError::NoMines));
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(3, 3, 8).unwrap().mines(), 8);
    }

    #[test]
    fn presets_are_valid_configs() {
        for difficulty in Difficulty::ALL {
            let preset = difficulty.config();
            let checked = GameConfig::new(preset.rows(), preset.cols(), preset.mines());
            assert_eq!(checked, Ok(preset), "{difficulty}");
        }
        assert_eq!(Difficulty::Hard.config().size(), (15, 30));
    }

    #[test]
    fn difficulty_parses_by_name() {
        assert_eq!("Insane".parse::<Difficulty>(), Ok(Difficulty::Insane));
        assert_eq!("extreme".parse::<Difficulty>(), Err(UnknownDifficulty));
    }

    #[test]
    fn deserialize_validates_config() {
        let config: GameConfig = serde_json::from_str(r#"{"rows":8,"cols":8,"mines":10}"#).unwrap();
        assert_eq!(config, Difficulty::Easy.config());

        let invalid = serde_json::from_str::<GameConfig>(r#"{"rows":2,"cols":2,"mines":4}"#);
        assert!(invalid.is_err());
    }
}
