use {
    crate::*,
    glam::IVec2,
    rayon::iter::{IntoParallelIterator, ParallelIterator},
    strum::IntoEnumIterator,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct HeightCell(u8);

impl HeightCell {
    const START: u8 = 'S' as u8;
    const END: u8 = 'E' as u8;
    const LOWEST: u8 = b'a';
    const HIGHEST: u8 = b'z';
}

#[derive(Debug, PartialEq)]
pub struct InvalidHeightCellChar(char);

impl TryFrom<char> for HeightCell {
    type Error = InvalidHeightCellChar;

    fn try_from(height_cell_char: char) -> Result<Self, Self::Error> {
        if height_cell_char.is_ascii_lowercase()
            || height_cell_char == Self::START as char
            || height_cell_char == Self::END as char
        {
            Ok(Self(height_cell_char as u8))
        } else {
            Err(InvalidHeightCellChar(height_cell_char))
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct HeightGrid {
    heights: Grid2D<HeightCell>,
    start: IVec2,
    end: IVec2,
}

#[derive(Debug, PartialEq)]
pub enum HeightGridParseError<'s> {
    FailedToParseGrid(GridParseError<'s, InvalidHeightCellChar>),
    GridContainsNoStartPosition,
    GridContainsNoEndPosition,
}

impl<'s> TryFrom<&'s str> for HeightGrid {
    type Error = HeightGridParseError<'s>;

    fn try_from(height_grid_str: &'s str) -> Result<Self, Self::Error> {
        use HeightGridParseError::*;

        let mut heights: Grid2D<HeightCell> =
            height_grid_str.try_into().map_err(FailedToParseGrid)?;

        let start: IVec2 = heights.pos_from_index(
            heights
                .cells()
                .iter()
                .position(|height_cell| height_cell.0 == HeightCell::START)
                .ok_or(GridContainsNoStartPosition)?,
        );
        let end: IVec2 = heights.pos_from_index(
            heights
                .cells()
                .iter()
                .position(|height_cell| height_cell.0 == HeightCell::END)
                .ok_or(GridContainsNoEndPosition)?,
        );

        heights.get_mut(start).unwrap().0 = HeightCell::LOWEST;
        heights.get_mut(end).unwrap().0 = HeightCell::HIGHEST;

        Ok(HeightGrid {
            heights,
            start,
            end,
        })
    }
}

/// A step is legal when the destination is at most one unit above the source. Any descent is
/// legal.
fn ascent_neighbors(heights: &Grid2D<HeightCell>, vertex: &IVec2, neighbors: &mut Vec<IVec2>) {
    let from_height: u8 = heights.get(*vertex).unwrap().0;

    neighbors.extend(Direction::iter().filter_map(|dir| {
        let pos: IVec2 = *vertex + dir.vec();

        heights
            .get(pos)
            .and_then(|height_cell| (height_cell.0 <= from_height + 1_u8).then_some(pos))
    }));
}

/// Multi-source ascent from every lowest-height cell at once. One search visits each cell at most
/// once, so this costs the same as a single-source run.
struct LowPointAscent<'h> {
    height_grid: &'h HeightGrid,
}

impl<'h> FrontierSearch for LowPointAscent<'h> {
    type Vertex = IVec2;

    fn starts(&self, starts: &mut Vec<(Self::Vertex, usize)>) {
        starts.extend(
            self.height_grid
                .heights
                .iter_filtered_positions(|height_cell| height_cell.0 == HeightCell::LOWEST)
                .map(|pos| (pos, 0_usize)),
        );
    }

    fn is_goal(&self, vertex: &Self::Vertex) -> bool {
        *vertex == self.height_grid.end
    }

    fn neighbors(&self, vertex: &Self::Vertex, _step: usize, neighbors: &mut Vec<Self::Vertex>) {
        ascent_neighbors(&self.height_grid.heights, vertex, neighbors);
    }

    fn reset(&mut self) {}
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(HeightGrid);

impl Solution {
    fn fewest_steps_from_start(&self) -> Result<usize, NotReachable> {
        shortest_path(
            &self.0.heights,
            self.0.start,
            |_, pos| *pos == self.0.end,
            ascent_neighbors,
        )
    }

    fn fewest_steps_from_any_low_point(&self) -> Result<usize, NotReachable> {
        LowPointAscent {
            height_grid: &self.0,
        }
        .run()
    }

    /// One independent search per low point, fanned out across threads. Slower than the
    /// multi-source search in total work, but a useful cross-check.
    fn fewest_steps_from_any_low_point_per_start(&self) -> Option<usize> {
        self.0
            .heights
            .iter_filtered_positions(|height_cell| height_cell.0 == HeightCell::LOWEST)
            .collect::<Vec<IVec2>>()
            .into_par_iter()
            .filter_map(|low_point| {
                shortest_path(
                    &self.0.heights,
                    low_point,
                    |_, pos| *pos == self.0.end,
                    ascent_neighbors,
                )
                .ok()
            })
            .min()
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.fewest_steps_from_start().ok());
    }

    fn q2_internal(&mut self, args: &QuestionArgs) {
        dbg!(self.fewest_steps_from_any_low_point().ok());

        if args.verbose {
            dbg!(self.fewest_steps_from_any_low_point_per_start());
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = HeightGridParseError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self(input.try_into()?))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const HEIGHT_GRID_STR: &str = concat!(
        "Sabqponm\n",
        "abcryxxl\n",
        "accszExk\n",
        "acctuvwj\n",
        "abdefghi",
    );
    const DIMENSIONS: IVec2 = IVec2::new(8_i32, 5_i32);
    const START: IVec2 = IVec2::ZERO;
    const END: IVec2 = IVec2::new(5_i32, 2_i32);

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| Solution::try_from(HEIGHT_GRID_STR).unwrap())
    }

    #[test]
    fn test_solution_try_from_str() {
        let solution: &Solution = solution();

        assert_eq!(solution.0.heights.dimensions(), DIMENSIONS);
        assert_eq!(solution.0.start, START);
        assert_eq!(solution.0.end, END);
        assert_eq!(
            solution.0.heights.get(START).copied(),
            Some(HeightCell(HeightCell::LOWEST))
        );
        assert_eq!(
            solution.0.heights.get(END).copied(),
            Some(HeightCell(HeightCell::HIGHEST))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Solution::try_from("abc\ndef").unwrap_err(),
            HeightGridParseError::GridContainsNoStartPosition
        );
        assert_eq!(
            Solution::try_from("Sbc\ndef").unwrap_err(),
            HeightGridParseError::GridContainsNoEndPosition
        );
        assert!(matches!(
            Solution::try_from("S1c\ndEf").unwrap_err(),
            HeightGridParseError::FailedToParseGrid(GridParseError::CellParseError(
                InvalidHeightCellChar('1')
            ))
        ));
    }

    #[test]
    fn test_fewest_steps_from_start() {
        assert_eq!(solution().fewest_steps_from_start(), Ok(31_usize));
    }

    #[test]
    fn test_fewest_steps_from_any_low_point() {
        assert_eq!(solution().fewest_steps_from_any_low_point(), Ok(29_usize));
    }

    #[test]
    fn test_per_start_fan_out_agrees() {
        assert_eq!(
            solution().fewest_steps_from_any_low_point_per_start(),
            solution().fewest_steps_from_any_low_point().ok()
        );
    }

    #[test]
    fn test_unreachable_summit() {
        // The summit is ringed by cliffs more than one unit tall.
        let solution: Solution = Solution::try_from(concat!(
            "Saa\n", //
            "aza\n", //
            "azE",
        ))
        .unwrap();

        assert_eq!(solution.fewest_steps_from_start(), Err(NotReachable));
        assert_eq!(solution.fewest_steps_from_any_low_point(), Err(NotReachable));
    }
}
