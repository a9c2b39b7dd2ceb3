use {
    crate::*,
    glam::IVec2,
    strum::IntoEnumIterator,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum ValleyCell {
    Wall,
    ClearGround,
    Blizzard(Direction),
}

#[derive(Debug, PartialEq)]
pub struct InvalidValleyCellChar(char);

impl TryFrom<char> for ValleyCell {
    type Error = InvalidValleyCellChar;

    fn try_from(valley_cell_char: char) -> Result<Self, Self::Error> {
        match valley_cell_char {
            '#' => Ok(Self::Wall),
            '.' => Ok(Self::ClearGround),
            '^' => Ok(Self::Blizzard(Direction::North)),
            '>' => Ok(Self::Blizzard(Direction::East)),
            'v' => Ok(Self::Blizzard(Direction::South)),
            '<' => Ok(Self::Blizzard(Direction::West)),
            _ => Err(InvalidValleyCellChar(valley_cell_char)),
        }
    }
}

impl ValleyCell {
    fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::ClearGround => '.',
            Self::Blizzard(Direction::North) => '^',
            Self::Blizzard(Direction::East) => '>',
            Self::Blizzard(Direction::South) => 'v',
            Self::Blizzard(Direction::West) => '<',
        }
    }
}

/// One blizzard on its travel axis. Its position at step `t` is
/// `(initial + velocity * t).rem_euclid(extent)`, where `extent` is the interior width for
/// east-west blizzards and the interior height for north-south ones. Occupancy is always derived
/// from this, never materialized per step.
#[cfg_attr(test, derive(Debug, PartialEq))]
struct Blizzard {
    initial: i32,
    velocity: i32,
}

impl Blizzard {
    fn position_at(&self, t: i32, extent: i32) -> i32 {
        (self.initial + self.velocity * t).rem_euclid(extent)
    }
}

/// The valley interior, in coordinates where the north-west interior cell is the origin. The
/// start door sits just outside at `(0, -1)` and the end door at `(width - 1, height)`.
#[cfg_attr(test, derive(Debug, PartialEq))]
struct Valley {
    dimensions: IVec2,
    start: IVec2,
    end: IVec2,

    /// East-west blizzards, grouped by interior row.
    row_blizzards: Vec<Vec<Blizzard>>,

    /// North-south blizzards, grouped by interior column.
    col_blizzards: Vec<Vec<Blizzard>>,
}

#[derive(Debug, PartialEq)]
pub enum InvalidValleyState {
    GapInWall(IVec2),
    InvalidDoor(IVec2),
    BlizzardHeadedForDoor(IVec2),
    WallInValley(IVec2),
}

#[derive(Debug, PartialEq)]
pub enum ParseValleyError<'s> {
    FailedToParseGrid(GridParseError<'s, InvalidValleyCellChar>),
    InvalidDimensions(IVec2),
    InvalidState(InvalidValleyState),
}

fn iter_walls(grid: &Grid2D<ValleyCell>) -> impl Iterator<Item = IVec2> + '_ {
    let door_gap: IVec2 = 2_i32 * IVec2::X;
    let max_dimensions: IVec2 = grid.max_dimensions();

    [
        (door_gap, Direction::East),
        (max_dimensions * IVec2::X, Direction::South),
        (max_dimensions - door_gap, Direction::West),
        (max_dimensions * IVec2::Y, Direction::North),
    ]
    .into_iter()
    .map(|(start, dir)| CellIter2D::until_boundary(grid, start, dir))
    .flatten()
}

fn validate_grid(grid: &Grid2D<ValleyCell>) -> Result<(), InvalidValleyState> {
    use InvalidValleyState::*;

    if let Some(gap_in_wall) =
        iter_walls(grid).find(|wall_pos| *grid.get(*wall_pos).unwrap() != ValleyCell::Wall)
    {
        return Err(GapInWall(gap_in_wall));
    }

    let doors: [IVec2; 2_usize] = [IVec2::X, grid.max_dimensions() - IVec2::X];

    for door in doors {
        if *grid.get(door).unwrap() != ValleyCell::ClearGround {
            return Err(InvalidDoor(door));
        }
    }

    for (door, dir) in [(doors[0_usize], Direction::South), (doors[1_usize], Direction::North)] {
        if let Some(blizzard_headed_for_door) =
            CellIter2D::until_boundary(grid, door + dir.vec(), dir).find(|column_pos| {
                matches!(
                    grid.get(*column_pos).unwrap(),
                    ValleyCell::Blizzard(blizzard_dir) if blizzard_dir.is_north_or_south()
                )
            })
        {
            return Err(BlizzardHeadedForDoor(blizzard_headed_for_door));
        }
    }

    if let Some(wall_in_valley) = grid
        .iter_positions_with_cell(&ValleyCell::Wall)
        .find(|wall_pos| !grid.is_border(*wall_pos))
    {
        return Err(WallInValley(wall_in_valley));
    }

    Ok(())
}

impl Valley {
    fn period(&self) -> usize {
        compute_lcm(self.dimensions.x as u32, self.dimensions.y as u32) as usize
    }

    /// Whether `pos` can be stood on at step `step`. The doors are never touched by a blizzard,
    /// everything else outside the interior is wall.
    fn is_clear(&self, pos: IVec2, step: usize) -> bool {
        if pos == self.start || pos == self.end {
            true
        } else if !(pos.cmpge(IVec2::ZERO) & pos.cmplt(self.dimensions)).all() {
            false
        } else {
            let t: i32 = (step % self.period()) as i32;

            self.row_blizzards[pos.y as usize]
                .iter()
                .all(|blizzard| blizzard.position_at(t, self.dimensions.x) != pos.x)
                && self.col_blizzards[pos.x as usize]
                    .iter()
                    .all(|blizzard| blizzard.position_at(t, self.dimensions.y) != pos.y)
        }
    }

    fn trip(&self, from: IVec2, to: IVec2, initial_step: usize) -> Result<usize, NotReachable> {
        TripSearch {
            valley: self,
            from,
            to,
            initial_step,
        }
        .run()
    }

    fn fewest_steps_to_end(&self) -> Result<usize, NotReachable> {
        self.trip(self.start, self.end, 0_usize)
    }

    fn fewest_steps_there_back_there(&self) -> Result<usize, NotReachable> {
        let there: usize = self.trip(self.start, self.end, 0_usize)?;
        let back: usize = self.trip(self.end, self.start, there)?;

        self.trip(self.start, self.end, back)
    }

    fn render_at_step(&self, step: usize) -> String {
        let t: i32 = (step % self.period()) as i32;
        let mut string: String =
            String::with_capacity((self.dimensions.x as usize + 3_usize) * (self.dimensions.y as usize + 2_usize));

        for y in -1_i32..=self.dimensions.y {
            for x in -1_i32..=self.dimensions.x {
                let pos: IVec2 = IVec2::new(x, y);

                string.push(if pos == self.start || pos == self.end {
                    '.'
                } else if (pos.cmpge(IVec2::ZERO) & pos.cmplt(self.dimensions)).all() {
                    let mut count: usize = 0_usize;
                    let mut cell: ValleyCell = ValleyCell::ClearGround;

                    for blizzard in &self.row_blizzards[y as usize] {
                        if blizzard.position_at(t, self.dimensions.x) == x {
                            count += 1_usize;
                            cell = ValleyCell::Blizzard(if blizzard.velocity > 0_i32 {
                                Direction::East
                            } else {
                                Direction::West
                            });
                        }
                    }

                    for blizzard in &self.col_blizzards[x as usize] {
                        if blizzard.position_at(t, self.dimensions.y) == y {
                            count += 1_usize;
                            cell = ValleyCell::Blizzard(if blizzard.velocity > 0_i32 {
                                Direction::South
                            } else {
                                Direction::North
                            });
                        }
                    }

                    if count > 1_usize {
                        (b'0' + count as u8) as char
                    } else {
                        cell.glyph()
                    }
                } else {
                    '#'
                });
            }

            string.push('\n');
        }

        string
    }
}

impl<'s> TryFrom<&'s str> for Valley {
    type Error = ParseValleyError<'s>;

    fn try_from(valley_str: &'s str) -> Result<Self, Self::Error> {
        use ParseValleyError::*;

        let grid: Grid2D<ValleyCell> = valley_str.try_into().map_err(FailedToParseGrid)?;

        if grid.dimensions().cmplt(IVec2::new(3_i32, 3_i32)).any() {
            return Err(InvalidDimensions(grid.dimensions()));
        }

        validate_grid(&grid).map_err(InvalidState)?;

        let dimensions: IVec2 = grid.dimensions() - 2_i32 * IVec2::ONE;
        let mut row_blizzards: Vec<Vec<Blizzard>> =
            (0_i32..dimensions.y).map(|_| Vec::new()).collect();
        let mut col_blizzards: Vec<Vec<Blizzard>> =
            (0_i32..dimensions.x).map(|_| Vec::new()).collect();

        for grid_pos in grid.iter_filtered_positions(|cell| matches!(cell, ValleyCell::Blizzard(_))) {
            let pos: IVec2 = grid_pos - IVec2::ONE;

            if let ValleyCell::Blizzard(dir) = grid.get(grid_pos).unwrap() {
                let velocity: i32 = dir.vec().x + dir.vec().y;

                if dir.is_north_or_south() {
                    col_blizzards[pos.x as usize].push(Blizzard {
                        initial: pos.y,
                        velocity,
                    });
                } else {
                    row_blizzards[pos.y as usize].push(Blizzard {
                        initial: pos.x,
                        velocity,
                    });
                }
            }
        }

        Ok(Self {
            dimensions,
            start: IVec2::new(0_i32, -1_i32),
            end: IVec2::new(dimensions.x - 1_i32, dimensions.y),
            row_blizzards,
            col_blizzards,
        })
    }
}

/// One leg of the journey. Arrival at a cell happens at `step + 1`, so the wait edge is only
/// offered when the current cell stays clear.
struct TripSearch<'v> {
    valley: &'v Valley,
    from: IVec2,
    to: IVec2,
    initial_step: usize,
}

impl<'v> FrontierSearch for TripSearch<'v> {
    type Vertex = IVec2;

    fn starts(&self, starts: &mut Vec<(Self::Vertex, usize)>) {
        starts.push((self.from, self.initial_step));
    }

    fn is_goal(&self, vertex: &Self::Vertex) -> bool {
        *vertex == self.to
    }

    fn neighbors(&self, vertex: &Self::Vertex, step: usize, neighbors: &mut Vec<Self::Vertex>) {
        let arrival_step: usize = step + 1_usize;

        if self.valley.is_clear(*vertex, arrival_step) {
            neighbors.push(*vertex);
        }

        neighbors.extend(Direction::iter().filter_map(|dir| {
            let pos: IVec2 = *vertex + dir.vec();

            self.valley.is_clear(pos, arrival_step).then_some(pos)
        }));
    }

    fn period(&self) -> Option<usize> {
        Some(self.valley.period())
    }

    fn reset(&mut self) {}
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Valley);

impl RunQuestions for Solution {
    fn q1_internal(&mut self, args: &QuestionArgs) {
        dbg!(self.0.fewest_steps_to_end().ok());

        if args.verbose {
            println!("{}", self.0.render_at_step(0_usize));
        }
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.0.fewest_steps_there_back_there().ok());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = ParseValleyError<'i>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self(input.try_into()?))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const VALLEY_SIMPLE_TIME_0: &str = concat!(
        "#.#####\n",
        "#.....#\n",
        "#>....#\n",
        "#.....#\n",
        "#...v.#\n",
        "#.....#\n",
        "#####.#\n",
    );
    const VALLEY_SIMPLE_TIME_1: &str = concat!(
        "#.#####\n",
        "#.....#\n",
        "#.>...#\n",
        "#.....#\n",
        "#.....#\n",
        "#...v.#\n",
        "#####.#\n",
    );
    const VALLEY_SIMPLE_TIME_2: &str = concat!(
        "#.#####\n",
        "#...v.#\n",
        "#..>..#\n",
        "#.....#\n",
        "#.....#\n",
        "#.....#\n",
        "#####.#\n",
    );
    const VALLEY_SIMPLE_TIME_3: &str = concat!(
        "#.#####\n",
        "#.....#\n",
        "#...2.#\n",
        "#.....#\n",
        "#.....#\n",
        "#.....#\n",
        "#####.#\n",
    );
    const VALLEY_SIMPLE_TIME_4: &str = concat!(
        "#.#####\n",
        "#.....#\n",
        "#....>#\n",
        "#...v.#\n",
        "#.....#\n",
        "#.....#\n",
        "#####.#\n",
    );
    const VALLEY_STR: &str = concat!(
        "#.######\n",
        "#>>.<^<#\n",
        "#.<..<<#\n",
        "#>v.><>#\n",
        "#<^v^^>#\n",
        "######.#",
    );

    fn valley_simple() -> &'static Valley {
        static ONCE_LOCK: OnceLock<Valley> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| VALLEY_SIMPLE_TIME_0.try_into().unwrap())
    }

    fn valley() -> &'static Valley {
        static ONCE_LOCK: OnceLock<Valley> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| VALLEY_STR.try_into().unwrap())
    }

    #[test]
    fn test_valley_try_from_str() {
        let valley: &Valley = valley();

        assert_eq!(valley.dimensions, IVec2::new(6_i32, 4_i32));
        assert_eq!(valley.start, IVec2::new(0_i32, -1_i32));
        assert_eq!(valley.end, IVec2::new(5_i32, 4_i32));
        assert_eq!(valley.period(), 12_usize);
        assert_eq!(
            valley
                .row_blizzards
                .iter()
                .map(Vec::len)
                .sum::<usize>()
                + valley
                    .col_blizzards
                    .iter()
                    .map(Vec::len)
                    .sum::<usize>(),
            19_usize
        );
    }

    #[test]
    fn test_parse_errors() {
        use {InvalidValleyState::*, ParseValleyError::*};

        assert_eq!(
            Valley::try_from(concat!(
                "#.###\n", //
                "#...#\n", //
                "#####",
            ))
            .unwrap_err(),
            InvalidState(InvalidDoor(IVec2::new(3_i32, 2_i32)))
        );
        assert_eq!(
            Valley::try_from(concat!(
                "#.#.#\n", //
                "#...#\n", //
                "###.#",
            ))
            .unwrap_err(),
            InvalidState(GapInWall(IVec2::new(3_i32, 0_i32)))
        );
        assert_eq!(
            Valley::try_from(concat!(
                "#.###\n", //
                "#.#.#\n", //
                "###.#",
            ))
            .unwrap_err(),
            InvalidState(WallInValley(IVec2::new(2_i32, 1_i32)))
        );
        assert_eq!(
            Valley::try_from(concat!(
                "#.###\n", //
                "#^..#\n", //
                "###.#",
            ))
            .unwrap_err(),
            InvalidState(BlizzardHeadedForDoor(IVec2::new(1_i32, 1_i32)))
        );
        assert_eq!(
            Valley::try_from("#.\n#.").unwrap_err(),
            InvalidDimensions(IVec2::new(2_i32, 2_i32))
        );
    }

    #[test]
    fn test_derived_occupancy_matches_rendered_field() {
        assert_eq!(valley_simple().render_at_step(0_usize), VALLEY_SIMPLE_TIME_0);
        assert_eq!(valley_simple().render_at_step(1_usize), VALLEY_SIMPLE_TIME_1);
        assert_eq!(valley_simple().render_at_step(2_usize), VALLEY_SIMPLE_TIME_2);
        assert_eq!(valley_simple().render_at_step(3_usize), VALLEY_SIMPLE_TIME_3);
        assert_eq!(valley_simple().render_at_step(4_usize), VALLEY_SIMPLE_TIME_4);

        // lcm(5, 5) steps later the field repeats.
        assert_eq!(valley_simple().render_at_step(5_usize), VALLEY_SIMPLE_TIME_0);
    }

    #[test]
    fn test_doors_are_always_clear() {
        let valley: &Valley = valley();

        for step in 0_usize..valley.period() {
            assert!(valley.is_clear(valley.start, step));
            assert!(valley.is_clear(valley.end, step));
        }
    }

    #[test]
    fn test_at_most_one_blizzard_per_direction_per_cell() {
        // Same-velocity blizzards in a row or column start at distinct offsets, so they never
        // coincide. Rendered overlap counts are therefore at most 4, one per direction.
        let valley: &Valley = valley();

        for step in 0_usize..valley.period() {
            let t: i32 = step as i32;

            for y in 0_i32..valley.dimensions.y {
                for x in 0_i32..valley.dimensions.x {
                    for velocity in [-1_i32, 1_i32] {
                        assert!(
                            valley.row_blizzards[y as usize]
                                .iter()
                                .filter(|blizzard| blizzard.velocity == velocity
                                    && blizzard.position_at(t, valley.dimensions.x) == x)
                                .count()
                                <= 1_usize
                        );
                        assert!(
                            valley.col_blizzards[x as usize]
                                .iter()
                                .filter(|blizzard| blizzard.velocity == velocity
                                    && blizzard.position_at(t, valley.dimensions.y) == y)
                                .count()
                                <= 1_usize
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_fewest_steps_to_end() {
        assert_eq!(valley().fewest_steps_to_end(), Ok(18_usize));
    }

    #[test]
    fn test_fewest_steps_there_back_there() {
        assert_eq!(valley().fewest_steps_there_back_there(), Ok(54_usize));
    }
}
