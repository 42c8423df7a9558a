use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine positions for one board, kept both as a mask and in placement order.
///
/// Deserialising goes through [`MineLayout::from_mine_coords`], so a decoded layout obeys
/// the same rules as one built in code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMineLayout", into = "RawMineLayout")]
pub struct MineLayout {
    config: GameConfig,
    mine_mask: Array2<bool>,
    mines: Vec<Coord2>,
}

impl MineLayout {
    /// Caller guarantees that `mines` is duplicate-free, in bounds and agrees with both
    /// `mine_mask` and `config`.
    pub(crate) fn from_parts(
        config: GameConfig,
        mine_mask: Array2<bool>,
        mines: Vec<Coord2>,
    ) -> Self {
        Self {
            config,
            mine_mask,
            mines,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.grid_index());
        let mut mines = Vec::with_capacity(mine_coords.len());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            if mine_mask[coords.grid_index()] {
                log::warn!("Duplicate mine at {:?} ignored", coords);
                continue;
            }
            mine_mask[coords.grid_index()] = true;
            mines.push(coords);
        }

        let mine_count = mines.len().try_into().map_err(|_| GameError::TooManyMines)?;
        let config = GameConfig::new(size.0, size.1, mine_count)?;

        Ok(Self::from_parts(config, mine_mask, mines))
    }

    pub fn game_config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self.mine_mask[coords.grid_index()]
    }

    /// Adjacency of every cell, built by bumping the safe neighbours of each mine.
    pub fn adjacency_grid(&self) -> Array2<Adjacency> {
        let size = self.size();
        let mut grid: Array2<Adjacency> = Array2::default(size.grid_index());

        for &mine in &self.mines {
            grid[mine.grid_index()] = Adjacency::Mine;
        }

        for &mine in &self.mines {
            for neighbor in NeighborIter::new(mine, size) {
                if let Adjacency::Count(count) = &mut grid[neighbor.grid_index()] {
                    *count += 1;
                }
            }
        }

        grid
    }
}

#[derive(Serialize, Deserialize)]
struct RawMineLayout {
    size: Coord2,
    mines: Vec<Coord2>,
}

impl TryFrom<RawMineLayout> for MineLayout {
    type Error = GameError;

    fn try_from(raw: RawMineLayout) -> Result<Self> {
        Self::from_mine_coords(raw.size, &raw.mines)
    }
}

impl From<MineLayout> for RawMineLayout {
    fn from(layout: MineLayout) -> Self {
        Self {
            size: layout.size(),
            mines: layout.mines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_mine_surrounded_by_ones() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        let grid = layout.adjacency_grid();

        for (coords, adjacency) in iter_coords((3, 3)).map(|c| (c, grid[c.grid_index()])) {
            if coords == (1, 1) {
                assert_eq!(adjacency, Adjacency::Mine);
            } else {
                assert_eq!(adjacency, Adjacency::Count(1), "{coords:?}");
            }
        }
    }

    #[test]
    fn mines_do_not_count_each_other() {
        let layout = MineLayout::from_mine_coords((1, 3), &[(0, 0), (0, 1)]).unwrap();
        let grid = layout.adjacency_grid();

        assert_eq!(grid[[0, 0]], Adjacency::Mine);
        assert_eq!(grid[[0, 1]], Adjacency::Mine);
        assert_eq!(grid[[0, 2]], Adjacency::Count(1));
    }

    #[test]
    fn keeps_placement_order() {
        let layout = MineLayout::from_mine_coords((4, 4), &[(3, 3), (0, 2), (1, 0)]).unwrap();
        assert_eq!(layout.mines(), &[(3, 3), (0, 2), (1, 0)]);
        assert_eq!(layout.game_config(), GameConfig::new(4, 4, 3).unwrap());
    }

    #[test]
    fn duplicate_coordinates_collapse() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (0, 0)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[]),
            Err(GameError::NoMines)
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            MineLayout::from_mine_coords((0, 2), &[]),
            Err(GameError::InvalidDimensions)
        );
    }

    #[test]
    fn serde_keeps_size_and_placement_order() {
        let layout = MineLayout::from_mine_coords((3, 4), &[(2, 3), (0, 1)]).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json, serde_json::json!({ "size": [3, 4], "mines": [[2, 3], [0, 1]] }));

        let decoded: MineLayout = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, layout);
    }

    #[test]
    fn deserialising_rejects_bad_layouts() {
        let outside = serde_json::from_str::<MineLayout>(r#"{"size":[2,2],"mines":[[5,5]]}"#);
        assert!(outside.is_err());

        let empty = serde_json::from_str::<MineLayout>(r#"{"size":[2,2],"mines":[]}"#);
        assert!(empty.is_err());

        let full = serde_json::from_str::<MineLayout>(r#"{"size":[1,1],"mines":[[0,0]]}"#);
        assert!(full.is_err());
    }
}
