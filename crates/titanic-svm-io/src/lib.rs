pub mod csv_io;
pub mod profile;

pub use csv_io::*;
pub use profile::*;
