//! External resources consumed by the tool
//!
//! - `export`: the `svn log --xml --verbose` file handed in on the command line

pub mod export;
