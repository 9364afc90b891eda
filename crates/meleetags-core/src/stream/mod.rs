//! Nametag output for OBS integration.
//!
//! Each player's nametag is written to its own text file
//! (`player1.txt` .. `player4.txt`) so OBS text sources can display them.

mod output;

pub use output::*;
