pub use {crate::search::*, clap::Parser};

use {
    clap::ValueEnum,
    memmap::Mmap,
    nom::{
        bytes::complete::tag,
        character::complete::digit1,
        combinator::{map, map_res, opt},
        sequence::tuple,
        IResult,
    },
    num::Integer,
    std::{
        any::type_name,
        fmt::Debug,
        fs::File,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        str::{from_utf8, FromStr, Utf8Error},
    },
};

pub mod blizzard;
pub mod droplet;
pub mod hill_climb;
pub mod search;

#[derive(Debug, Parser)]
pub struct QuestionArgs {
    /// Print extra information, if there is any
    #[arg(short, long, default_value_t)]
    pub verbose: bool,
}

/// The statically known set of solvers. There is intentionally no registry
/// behind this: each variant maps to one solver module, and `main` dispatches
/// with a `match`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Puzzle {
    HillClimb,
    Blizzard,
    Droplet,
}

impl Puzzle {
    pub fn input_stem(self) -> &'static str {
        match self {
            Self::HillClimb => "hill_climb",
            Self::Blizzard => "blizzard",
            Self::Droplet => "droplet",
        }
    }
}

/// Arguments for program execution
#[derive(Debug, Parser)]
pub struct Args {
    /// The puzzle to run
    #[arg(short, long, value_enum)]
    pub puzzle: Puzzle,

    /// Input file path
    #[arg(short, long, default_value_t)]
    input_file_path: String,

    /// The question to run, both if omitted
    #[arg(short, long, default_value_t, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub question: u8,

    #[command(flatten)]
    pub question_args: QuestionArgs,
}

impl Args {
    fn try_to_intermediate<I>(&self) -> Option<I>
    where
        I: for<'a> TryFrom<&'a str>,
        for<'a> <I as TryFrom<&'a str>>::Error: Debug,
    {
        let default_file_path: String;
        let file_path: &str = if self.input_file_path.is_empty() {
            default_file_path = format!("input/{}.txt", self.puzzle.input_stem());

            &default_file_path
        } else {
            &self.input_file_path
        };

        // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're
        // done parsing it
        unsafe {
            open_utf8_file(file_path, |s| {
                s.try_into().map_or_else(
                    |error| {
                        eprintln!(
                            "Failed to convert file \"{file_path}\" to type {}:\n{error:#?}",
                            type_name::<I>()
                        );

                        None
                    },
                    Some,
                )
            })
        }
        .unwrap_or_else(|error| {
            eprintln!("Failed to open UTF-8 file \"{file_path}\":\n{error}");

            None
        })
    }
}

pub trait RunQuestions
where
    Self: Sized + for<'a> TryFrom<&'a str>,
    for<'a> <Self as TryFrom<&'a str>>::Error: Debug,
{
    fn q2_internal(&mut self, args: &QuestionArgs);
    fn q1_internal(&mut self, args: &QuestionArgs);

    fn q1(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.q1_internal(&args.question_args);
        }
    }

    fn q2(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.q2_internal(&args.question_args);
        }
    }

    fn both(args: &Args) {
        if let Some(mut intermediate) = args.try_to_intermediate::<Self>() {
            intermediate.q1_internal(&args.question_args);
            intermediate.q2_internal(&args.question_args);
        }
    }

    fn run(args: &Args) {
        match args.question {
            0 => Self::both(args),
            1 => Self::q1(args),
            2 => Self::q2(args),
            question => unreachable!(
                "A valid Args will have a question value in the range 0..=2, but {question} was \
                encountered.\n\
                Args:\n\
                {args:#?}"
            ),
        }
    }
}

/// Opens a memory-mapped UTF-8 file at a specified path, and passes in a `&str` over the file to a
/// provided callback function
///
/// # Arguments
///
/// * `file_path` - A string slice file path to open as a read-only file
/// * `f` - A callback function to invoke on the contents of the file as a string slice
///
/// # Errors
///
/// This function returns a `Result::Err`-wrapped `std::io::Error` if an error has occurred.
/// Possible causes are:
///
/// * `std::fs::File::open` was unable to open a read-only file at `file_path`
/// * `memmap::Mmap::map` fails to create an `Mmap` instance for the opened file
/// * `std::str::from_utf8` determines the file is not in valid UTF-8 format
///
/// `f` is only executed *iff* an error is not encountered.
///
/// # Safety
///
/// This function uses `Mmap::map`, which is an unsafe function. There is no guarantee that an
/// external process won't modify the file after it is opened as read-only.
///
/// # Undefined Behavior
///
/// Related to the **Safety** section above, it is UB if the opened file is modified by an external
/// process while this function is referring to it as an immutable string slice. For more info on
/// this, see:
///
/// * https://www.reddit.com/r/rust/comments/wyq3ih/why_are_memorymapped_files_unsafe/
/// * https://users.rust-lang.org/t/how-unsafe-is-mmap/19635
/// * https://users.rust-lang.org/t/is-there-no-safe-way-to-use-mmap-in-rust/70338
pub unsafe fn open_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> IoError {
        IoError::new(ErrorKind::InvalidData, utf8_error)
    })?;

    Ok(f(utf8_str))
}

pub fn parse_integer<'i, I: FromStr + Integer>(input: &'i str) -> IResult<&'i str, I> {
    map(
        tuple((
            map(opt(tag("-")), |minus| {
                if minus.is_some() {
                    I::zero() - I::one()
                } else {
                    I::one()
                }
            }),
            map_res(digit1, I::from_str),
        )),
        |(sign, bound)| sign * bound,
    )(input)
}

pub trait Parse: Sized {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self>;
}

// This is an implementation of https://en.wikipedia.org/wiki/Greatest_common_divisor#Binary_GCD_algorithm
pub fn compute_gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    let mut d: u32 = 0_u32;

    match (a.is_even(), b.is_even()) {
        (true, true) => {
            d = a.trailing_zeros().min(b.trailing_zeros());
            a >>= d;
            b >>= d;
        }
        (true, false) => {
            a >>= a.trailing_zeros();
        }
        (false, true) => {
            b >>= b.trailing_zeros();
        }
        (false, false) => {}
    }

    while a != b {
        if a > b {
            let diff: u32 = a - b;

            a = diff >> diff.trailing_zeros();
        } else {
            let diff: u32 = b - a;

            b = diff >> diff.trailing_zeros();
        }
    }

    a << d
}

/// The least common multiple of two non-zero values. The obstacle field of a `w x h` valley
/// repeats with period `lcm(w, h)`, which is what bounds the time-varying search state space.
pub fn compute_lcm(a: u32, b: u32) -> u32 {
    a / compute_gcd(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_gcd() {
        assert_eq!(compute_gcd(2_u32, 3_u32), 1_u32);
        assert_eq!(compute_gcd(12_u32, 3_u32), 3_u32);
        assert_eq!(compute_gcd(25_u32, 3_u32), 1_u32);
        assert_eq!(compute_gcd(25_u32, 10_u32), 5_u32);
    }

    #[test]
    fn test_compute_lcm() {
        assert_eq!(compute_lcm(6_u32, 4_u32), 12_u32);
        assert_eq!(compute_lcm(8_u32, 4_u32), 8_u32);
        assert_eq!(compute_lcm(7_u32, 5_u32), 35_u32);
        assert_eq!(compute_lcm(1_u32, 9_u32), 9_u32);
    }
}
