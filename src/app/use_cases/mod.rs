//! Use-Cases: fachliche Abläufe, die Handler aufrufen.

pub mod editing;
pub mod file_io;
pub mod topology;
