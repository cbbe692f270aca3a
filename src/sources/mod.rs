//! Settings source implementations.
//!
//! This module contains implementations of the `Source` trait for the
//! places Django settings come from.

mod defaults;
mod dotenv_source;
mod env_source;

pub use defaults::Defaults;
pub use dotenv_source::DotEnv;
pub use env_source::Env;
