mod apps;

pub use apps::*;
