use {
    glam::{IVec2, IVec3},
    std::{
        fmt::{Debug, DebugList, Formatter, Result as FmtResult},
        iter::Peekable,
        str::Lines,
    },
};

macro_rules! define_direction {
    {
        $( #[$meta:meta] )*
        $vis:vis enum $direction:ident {
            $(
                $( #[$variant_meta:meta] )?
                $variant:ident,
            )*
        }
    } => {
        $(#[$meta])*
        $vis enum $direction {
            $(
                $( #[$variant_meta] )?
                $variant,
            )*
        }

        const VECS: [IVec2; $direction::COUNT] = [
            $( $direction::$variant.vec_internal(), )*
        ];
    };
}

mod direction {
    use {
        super::*,
        static_assertions::const_assert,
        std::mem::transmute,
        strum::EnumCount as EnumCountTrait,
        strum_macros::{EnumCount, EnumIter},
    };

    define_direction! {
        #[derive(Copy, Clone, Debug, Default, EnumCount, EnumIter, Eq, Hash, PartialEq)]
        #[repr(u8)]
        pub enum Direction {
            #[default]
            North,
            East,
            South,
            West,
        }
    }

    // This guarantees we can safely convert from `u8` to `Direction` by masking the smallest 2
    // bits, which is the same as masking by `U8_MASK`
    const_assert!(Direction::COUNT == 4_usize);

    impl Direction {
        pub const COUNT_U8: u8 = Self::COUNT as u8;
        pub const MASK: u8 = Self::COUNT_U8 - 1_u8;

        #[inline]
        pub const fn vec(self) -> IVec2 {
            VECS[self as usize]
        }

        #[inline]
        pub const fn from_u8(value: u8) -> Self {
            // SAFETY: See `const_assert` above
            unsafe { transmute(value & Self::MASK) }
        }

        pub const fn is_north_or_south(self) -> bool {
            (self as u8 & 1_u8) == 0_u8
        }

        const fn vec_internal(self) -> IVec2 {
            match self {
                Self::North => IVec2::NEG_Y,
                Self::East => IVec2::X,
                Self::South => IVec2::Y,
                Self::West => IVec2::NEG_X,
            }
        }
    }

    impl From<Direction> for IVec2 {
        fn from(value: Direction) -> Self {
            value.vec()
        }
    }

    impl From<u8> for Direction {
        fn from(value: u8) -> Self {
            Self::from_u8(value)
        }
    }

}

pub use direction::Direction;

pub struct SideLen(pub usize);

impl From<SideLen> for IVec2 {
    fn from(side_len: SideLen) -> Self {
        IVec2::new(side_len.0 as i32, side_len.0 as i32)
    }
}

pub struct Grid2D<T> {
    cells: Vec<T>,

    /// Should only contain unsigned values, but is signed for ease of use for iterating
    dimensions: IVec2,
}

impl<T> Grid2D<T> {
    pub fn empty(dimensions: IVec2) -> Self {
        Self {
            cells: Vec::new(),
            dimensions,
        }
    }

    pub fn allocate(dimensions: IVec2) -> Self {
        Self {
            cells: Vec::with_capacity((dimensions.x * dimensions.y) as usize),
            dimensions,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    #[inline]
    pub fn contains(&self, pos: IVec2) -> bool {
        (pos.cmpge(IVec2::ZERO) & pos.cmplt(self.dimensions)).all()
    }

    pub fn is_border(&self, pos: IVec2) -> bool {
        self.contains(pos)
            && (pos.cmpeq(IVec2::ZERO).any() || pos.cmpeq(self.max_dimensions()).any())
    }

    #[inline]
    pub fn index_from_pos(&self, pos: IVec2) -> usize {
        pos.y as usize * self.dimensions.x as usize + pos.x as usize
    }

    pub fn try_index_from_pos(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos).then(|| self.index_from_pos(pos))
    }

    pub fn pos_from_index(&self, index: usize) -> IVec2 {
        let x: usize = self.dimensions.x as usize;

        IVec2::new((index % x) as i32, (index / x) as i32)
    }

    #[inline(always)]
    pub fn max_dimensions(&self) -> IVec2 {
        self.dimensions - IVec2::ONE
    }

    pub fn get(&self, pos: IVec2) -> Option<&T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &self.cells[index])
    }

    pub fn get_mut(&mut self, pos: IVec2) -> Option<&mut T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &mut self.cells[index])
    }

    pub fn iter_filtered_positions<'a, P: Fn(&T) -> bool + 'a>(
        &'a self,
        predicate: P,
    ) -> impl Iterator<Item = IVec2> + 'a {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| predicate(cell).then(|| self.pos_from_index(index)))
    }

    pub fn iter_positions_with_cell<'a>(&'a self, target: &'a T) -> impl Iterator<Item = IVec2> + 'a
    where
        T: PartialEq,
    {
        self.iter_filtered_positions(|cell| *cell == *target)
    }

    pub fn try_find_single_position_with_cell(&self, target: &T) -> Option<IVec2>
    where
        T: PartialEq,
    {
        self.iter_positions_with_cell(target)
            .try_fold(None, |prev_pos, curr_pos| {
                prev_pos.is_none().then_some(Some(curr_pos))
            })
            .flatten()
    }
}

impl<T: Clone> Clone for Grid2D<T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            dimensions: self.dimensions,
        }
    }
}

impl<T: Debug> Debug for Grid2D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Grid2D")?;
        let mut y_list: DebugList = f.debug_list();

        for y in 0_i32..self.dimensions.y {
            let start: usize = (y * self.dimensions.x) as usize;

            y_list.entry(&&self.cells[start..(start + self.dimensions.x as usize)]);
        }

        y_list.finish()
    }
}

impl<T: Default> Grid2D<T> {
    pub fn default(dimensions: IVec2) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize_with(capacity, T::default);

        Self { cells, dimensions }
    }
}

impl<T: PartialEq> PartialEq for Grid2D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cells == other.cells
    }
}

#[derive(Debug, PartialEq)]
pub enum GridParseError<'s, E> {
    NoInitialToken,
    IsNotAscii(&'s str),
    InvalidLength { line: &'s str, expected_len: usize },
    CellParseError(E),
}

impl<'s, E, T: TryFrom<char, Error = E>> TryFrom<&'s str> for Grid2D<T> {
    type Error = GridParseError<'s, E>;

    fn try_from(grid_str: &'s str) -> Result<Self, Self::Error> {
        use GridParseError as Error;

        let mut grid_line_iter: Peekable<Lines> = grid_str.lines().peekable();

        let side_len: usize = grid_line_iter.peek().ok_or(Error::NoInitialToken)?.len();

        let mut grid: Grid2D<T> = Grid2D::allocate(SideLen(side_len).into());
        let mut lines: usize = 0_usize;

        for grid_line_str in grid_line_iter {
            if !grid_line_str.is_ascii() {
                return Err(Error::IsNotAscii(grid_line_str));
            }

            if grid_line_str.len() != side_len {
                return Err(Error::InvalidLength {
                    line: grid_line_str,
                    expected_len: side_len,
                });
            }

            for cell_char in grid_line_str.chars() {
                grid.cells
                    .push(cell_char.try_into().map_err(Error::CellParseError)?);
            }

            lines += 1_usize;
        }

        if lines != side_len {
            grid.dimensions.y = lines as i32;
        }

        Ok(grid)
    }
}

pub struct CellIter2D {
    curr: IVec2,
    end: IVec2,
    dir: Direction,
}

impl CellIter2D {
    pub fn corner_for_dimensions(dimensions: IVec2, dir: Direction) -> Self {
        let dir_vec: IVec2 = dir.vec();
        let curr: IVec2 =
            (-dimensions * (dir_vec + dir_vec.perp())).clamp(IVec2::ZERO, dimensions - IVec2::ONE);

        Self::until_boundary_for_dimensions(dimensions, curr, dir)
    }

    pub fn corner<T>(grid: &Grid2D<T>, dir: Direction) -> Self {
        Self::corner_for_dimensions(grid.dimensions(), dir)
    }

    pub fn until_boundary_for_dimensions(dimensions: IVec2, curr: IVec2, dir: Direction) -> Self {
        let dir_vec: IVec2 = dir.vec();
        let end: IVec2 =
            (curr + dir_vec * dimensions).clamp(IVec2::ZERO, dimensions - IVec2::ONE) + dir_vec;

        Self { curr, end, dir }
    }

    pub fn until_boundary<T>(grid: &Grid2D<T>, curr: IVec2, dir: Direction) -> Self {
        Self::until_boundary_for_dimensions(grid.dimensions(), curr, dir)
    }
}

impl Iterator for CellIter2D {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.curr != self.end {
            let prev: IVec2 = self.curr;

            self.curr += self.dir.vec();

            Some(prev)
        } else {
            None
        }
    }
}

/// Unit steps along the positive and negative 3D axes, the face neighbors of a unit cube.
pub const AXIS_DELTAS_3D: [IVec3; 6_usize] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

pub struct Grid3D<T> {
    cells: Vec<T>,

    /// Should only contain unsigned values, but is signed for ease of use for iterating
    dimensions: IVec3,
}

impl<T> Grid3D<T> {
    #[inline(always)]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    pub fn dimensions(&self) -> &IVec3 {
        &self.dimensions
    }

    #[inline(always)]
    pub fn contains(&self, pos: &IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all() && pos.cmplt(self.dimensions).all()
    }

    pub fn index_from_pos(&self, pos: &IVec3) -> usize {
        let [width, height, _] = self.width_height_depth();

        pos.z as usize * width * height + pos.y as usize * width + pos.x as usize
    }

    pub fn try_index_from_pos(&self, pos: &IVec3) -> Option<usize> {
        if self.contains(pos) {
            Some(self.index_from_pos(pos))
        } else {
            None
        }
    }

    pub fn pos_from_index(&self, mut index: usize) -> IVec3 {
        let [width, height, _] = self.width_height_depth();
        let width_height_product: usize = width * height;
        let z: i32 = (index / width_height_product) as i32;

        index %= width_height_product;

        let y: i32 = (index / width) as i32;

        index %= width;

        let x: i32 = index as i32;

        IVec3 { x, y, z }
    }

    pub fn get_mut(&mut self, pos: &IVec3) -> Option<&mut T> {
        self.try_index_from_pos(pos)
            .map(|index: usize| &mut self.cells[index])
    }

    #[inline(always)]
    fn width_height_depth(&self) -> [usize; 3_usize] {
        [
            self.dimensions.x as usize,
            self.dimensions.y as usize,
            self.dimensions.z as usize,
        ]
    }
}

impl<T: Clone> Clone for Grid3D<T> {
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
            dimensions: self.dimensions,
        }
    }
}

impl<T: Debug> Debug for Grid3D<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let y_layers: Vec<&[T]> = self
            .cells
            .chunks_exact(self.dimensions.x as usize)
            .collect();
        let z_layers: Vec<&[&[T]]> = y_layers.chunks_exact(self.dimensions.y as usize).collect();

        f.write_str("Grid3D")?;
        f.debug_list().entries(z_layers.iter()).finish()
    }
}

impl<T: Default> Grid3D<T> {
    pub fn default(dimensions: IVec3) -> Self {
        let capacity: usize = (dimensions.x * dimensions.y * dimensions.z) as usize;
        let mut cells: Vec<T> = Vec::with_capacity(capacity);

        cells.resize_with(capacity, T::default);

        Self { cells, dimensions }
    }
}

impl<T: PartialEq> PartialEq for Grid3D<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions == other.dimensions && self.cells == other.cells
    }
}

#[cfg(test)]
mod tests {
    use {super::*, strum::IntoEnumIterator};

    #[test]
    fn test_direction_u8_round_trip() {
        for dir in Direction::iter() {
            assert_eq!(Direction::from_u8(dir as u8), dir);

            // Masking wraps values past the variant count back around.
            assert_eq!(Direction::from(dir as u8 + Direction::COUNT_U8), dir);

            assert_eq!(IVec2::from(dir), dir.vec());
        }
    }

    #[test]
    fn test_corner() {
        let grid: Grid2D<()> = Grid2D::empty(SideLen(5_usize).into());

        assert_eq!(
            Direction::iter()
                .map(|dir: Direction| -> CellIter2D { CellIter2D::corner(&grid, dir) })
                .flatten()
                .map(|pos: IVec2| -> usize { grid.index_from_pos(pos) })
                .collect::<Vec<usize>>(),
            vec![
                20, 15, 10, 5, 0, // North
                0, 1, 2, 3, 4, // East
                4, 9, 14, 19, 24, // South
                24, 23, 22, 21, 20 // West
            ]
        );
    }

    #[test]
    fn test_grid_3d_index_round_trip() {
        let grid: Grid3D<u8> = Grid3D::default(IVec3::new(3_i32, 4_i32, 5_i32));

        for index in 0_usize..grid.cells().len() {
            let pos: IVec3 = grid.pos_from_index(index);

            assert!(grid.contains(&pos));
            assert_eq!(grid.index_from_pos(&pos), index);
        }

        assert_eq!(grid.try_index_from_pos(&IVec3::new(3_i32, 0_i32, 0_i32)), None);
        assert_eq!(grid.try_index_from_pos(&IVec3::NEG_ONE), None);
    }
}
