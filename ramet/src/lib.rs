#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]

mod connection;
pub use connection::{Connection, ConnectionSet, ScopedConnection};

mod registry;
pub use registry::Registry;

mod weak;
pub use weak::WeakRegistry;
