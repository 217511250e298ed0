mod error;
mod manifest;
mod port_value;
mod role;

pub use self::error::*;
pub use self::manifest::*;
pub use self::port_value::*;
pub use self::role::*;
