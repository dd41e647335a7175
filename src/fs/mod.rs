pub mod exec_file;
pub mod locking;

pub use exec_file::{read_execution_id, write_execution_id};
