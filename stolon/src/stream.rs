use std::sync::Arc;

use parking_lot::Mutex;
use ramet::Connection;

/// Callback shape of a [`Stream<T>`].
pub(crate) type Callback<T> = dyn Fn(T) + Send + Sync;
/// Callback shape of a [`UnitStream`].
pub(crate) type UnitCallback = dyn Fn() + Send + Sync;
/// Callback shape of a [`BiStream<A, B>`].
pub(crate) type BiCallback<A, B> = dyn Fn(A, B) + Send + Sync;

type Attach<T> = dyn Fn(Arc<Callback<T>>) -> Connection + Send + Sync;

/// A stream of values which can be connected to.
///
/// A [`Stream`] is nothing but an attach function: connecting hands a
/// callback to whatever produces the values and yields a
/// [`Connection`] to sever it again. Live streams come from
/// [`signal`](`crate::signal`) or [`ValueCell::changes`](`crate::ValueCell::changes`); pre-recorded ones from
/// [`signal_of`](`crate::signal_of`).
pub struct Stream<T: 'static> {
	attach: Arc<Attach<T>>,
}

impl<T: 'static> Stream<T> {
	pub(crate) fn from_attach(
		attach: impl Fn(Arc<Callback<T>>) -> Connection + Send + Sync + 'static,
	) -> Self {
		Self {
			attach: Arc::new(attach),
		}
	}

	/// Connects a callback to this stream.
	pub fn connect(&self, callback: impl Fn(T) + Send + Sync + 'static) -> Connection {
		(*self.attach)(Arc::new(callback))
	}

	fn connect_raw(&self, callback: Arc<Callback<T>>) -> Connection {
		(*self.attach)(callback)
	}

	/// Maps the values of this stream using `map`.
	#[must_use = "streams do nothing until connected to"]
	pub fn map<R: 'static>(&self, map: impl Fn(T) -> R + Send + Sync + 'static) -> Stream<R> {
		let upstream = self.clone();
		let map = Arc::new(map);
		Stream::from_attach(move |callback| {
			let map = Arc::clone(&map);
			upstream.connect_raw(Arc::new(move |value: T| (*callback)(map(value))))
		})
	}

	/// Filters the values of this stream using `predicate`.
	#[must_use = "streams do nothing until connected to"]
	pub fn filter(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Stream<T> {
		let upstream = self.clone();
		let predicate = Arc::new(predicate);
		Stream::from_attach(move |callback| {
			let predicate = Arc::clone(&predicate);
			upstream.connect_raw(Arc::new(move |value: T| {
				if predicate(&value) {
					(*callback)(value);
				}
			}))
		})
	}

	/// Maps the values of this stream to [`Option`]s, dropping the
	/// [`None`]s, like a fused [`map`](`Stream::map`) and [`filter`](`Stream::filter`).
	#[must_use = "streams do nothing until connected to"]
	pub fn filter_map<R: 'static>(
		&self,
		filter_map: impl Fn(T) -> Option<R> + Send + Sync + 'static,
	) -> Stream<R> {
		let upstream = self.clone();
		let filter_map = Arc::new(filter_map);
		Stream::from_attach(move |callback| {
			let filter_map = Arc::clone(&filter_map);
			upstream.connect_raw(Arc::new(move |value: T| {
				if let Some(mapped) = filter_map(value) {
					(*callback)(mapped);
				}
			}))
		})
	}

	/// Maps each value of this stream to a sequence, flattening the
	/// results in iteration order into the resulting stream.
	///
	/// `map` may return an empty sequence (filtering) or several items
	/// (fan-out).
	#[must_use = "streams do nothing until connected to"]
	pub fn flat_map<R: 'static, I>(
		&self,
		map: impl Fn(T) -> I + Send + Sync + 'static,
	) -> Stream<R>
	where
		I: IntoIterator<Item = R>,
	{
		let upstream = self.clone();
		let map = Arc::new(map);
		Stream::from_attach(move |callback| {
			let map = Arc::clone(&map);
			upstream.connect_raw(Arc::new(move |value: T| {
				for item in map(value) {
					(*callback)(item);
				}
			}))
		})
	}

	/// Folds values of this stream over `initial` using `fold`; the
	/// resulting stream emits successive accumulator values.
	///
	/// One accumulator is created per `fold` call and shared by every
	/// connection to the resulting stream, guarded by its own lock.
	/// Each connection advances the accumulator once per upstream
	/// emission, atomically and in emission order; the downstream
	/// callback is invoked outside that lock.
	///
	/// With `include_initial`, a newly connected callback is first
	/// invoked once with the accumulator's current value, which equals
	/// `initial` while nothing has been emitted yet.
	#[must_use = "streams do nothing until connected to"]
	pub fn fold<A>(
		&self,
		initial: A,
		include_initial: bool,
		fold: impl Fn(A, T) -> A + Send + Sync + 'static,
	) -> Stream<A>
	where
		A: Clone + Send + 'static,
	{
		let upstream = self.clone();
		let fold = Arc::new(fold);
		let accumulator = Arc::new(Mutex::new(initial));
		Stream::from_attach(move |callback| {
			let fold = Arc::clone(&fold);
			let accumulator = Arc::clone(&accumulator);
			if include_initial {
				(*callback)(accumulator.lock().clone());
			}
			upstream.connect_raw(Arc::new(move |value: T| {
				let next = {
					let mut accumulator = accumulator.lock();
					let next = fold(accumulator.clone(), value);
					*accumulator = next.clone();
					next
				};
				(*callback)(next);
			}))
		})
	}
}

/// Clones connect to the same source.
impl<T: 'static> Clone for Stream<T> {
	fn clone(&self) -> Self {
		Self {
			attach: Arc::clone(&self.attach),
		}
	}
}

/// A stream which carries no payload, only the fact that something
/// happened.
pub struct UnitStream {
	attach: Arc<dyn Fn(Arc<UnitCallback>) -> Connection + Send + Sync>,
}

impl UnitStream {
	pub(crate) fn from_attach(
		attach: impl Fn(Arc<UnitCallback>) -> Connection + Send + Sync + 'static,
	) -> Self {
		Self {
			attach: Arc::new(attach),
		}
	}

	/// Connects a callback to this stream.
	pub fn connect(&self, callback: impl Fn() + Send + Sync + 'static) -> Connection {
		(*self.attach)(Arc::new(callback))
	}
}

/// Clones connect to the same source.
impl Clone for UnitStream {
	fn clone(&self) -> Self {
		Self {
			attach: Arc::clone(&self.attach),
		}
	}
}

/// A stream which carries two payload values per emission.
pub struct BiStream<A: 'static, B: 'static> {
	attach: Arc<dyn Fn(Arc<BiCallback<A, B>>) -> Connection + Send + Sync>,
}

impl<A: 'static, B: 'static> BiStream<A, B> {
	pub(crate) fn from_attach(
		attach: impl Fn(Arc<BiCallback<A, B>>) -> Connection + Send + Sync + 'static,
	) -> Self {
		Self {
			attach: Arc::new(attach),
		}
	}

	/// Connects a callback to this stream.
	pub fn connect(&self, callback: impl Fn(A, B) + Send + Sync + 'static) -> Connection {
		(*self.attach)(Arc::new(callback))
	}
}

/// Clones connect to the same source.
impl<A: 'static, B: 'static> Clone for BiStream<A, B> {
	fn clone(&self) -> Self {
		Self {
			attach: Arc::clone(&self.attach),
		}
	}
}
