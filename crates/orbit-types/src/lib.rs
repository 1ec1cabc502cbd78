pub mod api;
pub mod chains;
pub mod intent;
pub mod route;

pub use alloy::primitives::{Address, U256};
pub use api::*;
pub use chains::*;
pub use intent::*;
pub use route::*;
