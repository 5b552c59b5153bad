pub mod blacklist;
pub mod emblems;
pub mod query;
pub mod status;

pub use blacklist::*;
pub use emblems::*;
pub use query::*;
pub use status::*;
