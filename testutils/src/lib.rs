mod apps;
mod catalog;
mod constants;
mod discovery;
mod fake;
mod kubeconfig;

pub use apps::*;
pub use catalog::*;
pub use constants::*;
pub use discovery::*;
pub use fake::*;
pub use kubeconfig::*;
