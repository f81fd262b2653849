#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]

pub use ramet::{Connection, ConnectionSet, ScopedConnection};

mod error;
pub use error::Uninitialised;

mod signal;
pub use signal::{
	bi_signal, bi_signal_of, signal, signal_of, unit_signal, unit_signal_of, BiEmitter, Emitter,
	UnitEmitter,
};

mod stream;
pub use stream::{BiStream, Stream, UnitStream};

mod subscribable;
pub use subscribable::{BiSubscribable, Subscribable, UnitSubscribable};

mod value;
pub use value::ValueCell;
