use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use ramet::{Connection, Registry};

use crate::stream::{BiCallback, BiStream, Callback, Stream, UnitCallback, UnitStream};

/// Returns a connectable [`UnitStream`] paired with the [`UnitEmitter`]
/// which will invoke its connected callbacks.
#[must_use]
pub fn unit_signal() -> (UnitStream, UnitEmitter) {
	let registry = Registry::<UnitCallback>::new();
	let stream = UnitStream::from_attach({
		let registry = registry.clone();
		move |callback| registry.add(callback)
	});
	(stream, UnitEmitter { registry })
}

/// Returns a connectable [`Stream`] paired with the [`Emitter`] which
/// will invoke its connected callbacks.
#[must_use]
pub fn signal<T: 'static>() -> (Stream<T>, Emitter<T>) {
	let registry = Registry::<Callback<T>>::new();
	let stream = Stream::from_attach({
		let registry = registry.clone();
		move |callback| registry.add(callback)
	});
	(stream, Emitter { registry })
}

/// Returns a connectable [`BiStream`] paired with the [`BiEmitter`]
/// which will invoke its connected callbacks.
#[must_use]
pub fn bi_signal<A: 'static, B: 'static>() -> (BiStream<A, B>, BiEmitter<A, B>) {
	let registry = Registry::<BiCallback<A, B>>::new();
	let stream = BiStream::from_attach({
		let registry = registry.clone();
		move |callback| registry.add(callback)
	});
	(stream, BiEmitter { registry })
}

/// Returns a [`UnitStream`] which, when connected to, invokes the
/// callback `count` times and hands back an inert connection.
///
/// Nothing is stored; the stream never emits again after the replay.
#[must_use]
pub fn unit_signal_of(count: usize) -> UnitStream {
	UnitStream::from_attach(move |callback| {
		for _ in 0..count {
			(*callback)();
		}
		Connection::blank()
	})
}

/// Returns a [`Stream`] which, when connected to, invokes the callback
/// once per item of `items` and hands back an inert connection.
///
/// Nothing is stored; the stream never emits again after the replay.
#[must_use]
pub fn signal_of<T>(items: impl IntoIterator<Item = T>) -> Stream<T>
where
	T: Clone + Send + Sync + 'static,
{
	let items: Arc<[T]> = items.into_iter().collect();
	Stream::from_attach(move |callback| {
		for item in items.iter() {
			(*callback)(item.clone());
		}
		Connection::blank()
	})
}

/// Returns a [`BiStream`] which, when connected to, invokes the
/// callback once per pair of `items` and hands back an inert
/// connection.
///
/// Nothing is stored; the stream never emits again after the replay.
#[must_use]
pub fn bi_signal_of<A, B>(items: impl IntoIterator<Item = (A, B)>) -> BiStream<A, B>
where
	A: Clone + Send + Sync + 'static,
	B: Clone + Send + Sync + 'static,
{
	let items: Arc<[(A, B)]> = items.into_iter().collect();
	BiStream::from_attach(move |callback| {
		for (a, b) in items.iter() {
			(*callback)(a.clone(), b.clone());
		}
		Connection::blank()
	})
}

/// Emitting half of a [`unit_signal`].
pub struct UnitEmitter {
	registry: Registry<UnitCallback>,
}

impl UnitEmitter {
	/// Invokes every callback connected to the paired stream.
	pub fn emit(&self) {
		self.registry.for_each(|callback| callback());
	}
}

/// Emitting half of a [`signal`].
pub struct Emitter<T: 'static> {
	registry: Registry<Callback<T>>,
}

impl<T: Clone + 'static> Emitter<T> {
	/// Invokes every callback connected to the paired stream with a
	/// clone of `value`.
	pub fn emit(&self, value: T) {
		self.registry.for_each(|callback| callback(value.clone()));
	}
}

/// Emitting half of a [`bi_signal`].
pub struct BiEmitter<A: 'static, B: 'static> {
	registry: Registry<BiCallback<A, B>>,
}

impl<A: Clone + 'static, B: Clone + 'static> BiEmitter<A, B> {
	/// Invokes every callback connected to the paired stream with
	/// clones of `a` and `b`.
	pub fn emit(&self, a: A, b: B) {
		self.registry.for_each(|callback| callback(a.clone(), b.clone()));
	}
}

/// Clones emit to the same callbacks.
impl Clone for UnitEmitter {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}

/// Clones emit to the same callbacks.
impl<T: 'static> Clone for Emitter<T> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}

/// Clones emit to the same callbacks.
impl<A: 'static, B: 'static> Clone for BiEmitter<A, B> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}

impl Debug for UnitEmitter {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("UnitEmitter").field("registry", &self.registry).finish()
	}
}

impl<T: 'static> Debug for Emitter<T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Emitter").field("registry", &self.registry).finish()
	}
}

impl<A: 'static, B: 'static> Debug for BiEmitter<A, B> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("BiEmitter").field("registry", &self.registry).finish()
	}
}
