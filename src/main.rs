use frontier::*;

fn main() {
    let args: Args = Args::parse();

    match args.puzzle {
        Puzzle::HillClimb => hill_climb::Solution::run(&args),
        Puzzle::Blizzard => blizzard::Solution::run(&args),
        Puzzle::Droplet => droplet::Solution::run(&args),
    }
}
