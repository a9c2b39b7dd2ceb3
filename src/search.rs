pub use {flood::*, frontier::*, grid::*};

mod flood;
mod frontier;
mod grid;
