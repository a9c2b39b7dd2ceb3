use {
    crate::*,
    derive_deref::Deref,
    glam::IVec3,
    nom::{
        bytes::complete::tag,
        character::complete::line_ending,
        combinator::{all_consuming, map, opt},
        error::Error,
        multi::many1,
        sequence::{terminated, tuple},
        Err, IResult,
    },
    std::collections::HashSet,
};

/// The occupied cells of the droplet lattice, one unit cube per line of input.
#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Deref)]
pub struct Cubes(HashSet<IVec3>);

impl Cubes {
    /// Unit faces not shared with another cube, enclosed pockets included.
    fn total_surface_area(&self) -> usize {
        self.iter()
            .map(|cube| {
                AXIS_DELTAS_3D
                    .iter()
                    .filter(|delta| !self.contains(&(*cube + **delta)))
                    .count()
            })
            .sum()
    }

    /// Unit faces touching a cell that steam flowing from outside can reach.
    fn exterior_surface_area(&self) -> usize {
        let exterior: HashSet<IVec3> = flood_fill_exterior(self);

        self.iter()
            .map(|cube| {
                AXIS_DELTAS_3D
                    .iter()
                    .filter(|delta| exterior.contains(&(*cube + **delta)))
                    .count()
            })
            .sum()
    }
}

impl Parse for Cubes {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            many1(terminated(
                map(
                    tuple((
                        terminated(parse_integer::<i32>, tag(",")),
                        terminated(parse_integer::<i32>, tag(",")),
                        parse_integer::<i32>,
                    )),
                    |(x, y, z)| IVec3::new(x, y, z),
                ),
                opt(line_ending),
            )),
            |cubes| Self(cubes.into_iter().collect()),
        )(input)
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Cubes);

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(Cubes::parse, Self)(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.0.total_surface_area());
    }

    fn q2_internal(&mut self, args: &QuestionArgs) {
        dbg!(self.0.exterior_surface_area());

        if args.verbose {
            let pocket_surface_area: usize =
                self.0.total_surface_area() - self.0.exterior_surface_area();

            dbg!(pocket_surface_area);
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(all_consuming(Self::parse)(input)?.1)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock};

    const CUBES_STR: &str = concat!(
        "2,2,2\n", "1,2,2\n", "3,2,2\n", "2,1,2\n", "2,3,2\n", "2,2,1\n", "2,2,3\n", "2,2,4\n",
        "2,2,6\n", "1,2,5\n", "3,2,5\n", "2,1,5\n", "2,3,5\n",
    );

    fn solution() -> &'static Solution {
        static ONCE_LOCK: OnceLock<Solution> = OnceLock::new();

        ONCE_LOCK.get_or_init(|| CUBES_STR.try_into().unwrap())
    }

    #[test]
    fn test_solution_try_from_str() {
        assert_eq!(solution().0.len(), 13_usize);
        assert!(solution().0.contains(&IVec3::new(2_i32, 2_i32, 6_i32)));
        assert!(Solution::try_from("1,2\n").is_err());
        assert!(Solution::try_from("1,2,three\n").is_err());
    }

    #[test]
    fn test_two_cube_surface_area() {
        let solution: Solution = Solution::try_from("1,1,1\n2,1,1").unwrap();

        assert_eq!(solution.0.total_surface_area(), 10_usize);
        assert_eq!(solution.0.exterior_surface_area(), 10_usize);
    }

    #[test]
    fn test_total_surface_area() {
        assert_eq!(solution().0.total_surface_area(), 64_usize);
    }

    #[test]
    fn test_exterior_surface_area() {
        assert_eq!(solution().0.exterior_surface_area(), 58_usize);
    }
}
