//! MySQL bulk loader for the listen80 data generator.
//!
//! [`MySQLLoader`] implements [`listen80_populate::BulkLoader`] with
//! `LOAD DATA LOCAL INFILE ... IGNORE`, one transaction per import. The
//! server must have `local_infile` enabled; on the client side, local file
//! access is limited to the transient table files in the temporary directory.

pub mod args;
mod error;
pub mod load;
pub mod populator;

pub use args::MySQLPopulateArgs;
pub use error::MySQLPopulatorError;
pub use populator::MySQLLoader;
