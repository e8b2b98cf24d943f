//! Turns the XML export of `svn log --xml --verbose` into a GraphML file
//! depicting how trunk, branches and tags were copied from one another.

pub mod areas;
pub mod artifacts;
pub mod commands;
