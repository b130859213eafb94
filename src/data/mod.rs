//! Input handling: graph files, candidate assignments, preprocessing

pub mod assignment;
pub mod preprocessing;
pub mod reader;

pub use assignment::AssignmentFile;
pub use reader::read_graph_file;
