//! The Santa Fe trail.
//!
//! `X` marks food. `.` marks a gap in the trail and is an empty cell.

pub const WIDTH: i32 = 32;
pub const HEIGHT: i32 = 32;

pub const TRAIL: [&str; 32] = [
    " XXX                            ",
    "   X                            ",
    "   X                    .XXX..  ",
    "   X                    X    X  ",
    "   X                    X    X  ",
    "   XXXX.XXXXX       .XX..    .  ",
    "            X       .        X  ",
    "            X       X        .  ",
    "            X       X        .  ",
    "            X       X        X  ",
    "            .       X        .  ",
    "            X       .        .  ",
    "            X       .        X  ",
    "            X       X        .  ",
    "            X       X  ...XXX.  ",
    "            .   .X...  X        ",
    "            .   .      .        ",
    "            X   .      .        ",
    "            X   X      .X...    ",
    "            X   X          X    ",
    "            X   X          .    ",
    "            X   X          .    ",
    "            X   .      ...X.    ",
    "            X   .      X        ",
    " ..XX..XXXXX.   X               ",
    " X              X               ",
    " X              X               ",
    " X     .XXXXXXX..               ",
    " X     X                        ",
    " .     X                        ",
    " .XXXX..                        ",
    "                                ",
];
