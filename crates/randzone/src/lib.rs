mod audit;
mod digits;
mod error;
mod fairness;
mod password;
mod rand;
mod snowflake;
mod time;

pub use crate::audit::*;
pub use crate::digits::*;
pub use crate::error::*;
pub use crate::fairness::*;
pub use crate::password::*;
pub use crate::rand::*;
pub use crate::snowflake::*;
pub use crate::time::*;
