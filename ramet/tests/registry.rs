use std::sync::{
	atomic::{AtomicBool, AtomicUsize, Ordering::Relaxed},
	Arc, OnceLock,
};

use ramet::{Connection, Registry};

type Shape = dyn Fn(usize) + Send + Sync;

fn accumulating(count: &Arc<AtomicUsize>) -> Arc<Shape> {
	let count = Arc::clone(count);
	Arc::new(move |value| {
		count.fetch_add(value, Relaxed);
	})
}

#[test]
fn for_each_invokes_every_registered_callback() {
	let registry = Registry::<Shape>::new();
	let count = Arc::new(AtomicUsize::new(0));
	let _first = registry.add(accumulating(&count));
	let _second = registry.add(accumulating(&count));

	registry.for_each(|callback| callback(3));

	assert_eq!(count.load(Relaxed), 6);
}

#[test]
fn disconnect_removes_exactly_its_own_entry() {
	let registry = Registry::<Shape>::new();
	let count = Arc::new(AtomicUsize::new(0));
	let callback = accumulating(&count);
	let first = registry.add(Arc::clone(&callback));
	let _second = registry.add(callback);

	first.disconnect();
	registry.for_each(|callback| callback(1));

	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn callbacks_added_during_iteration_are_not_invoked_by_it() {
	let registry = Registry::<dyn Fn() + Send + Sync>::new();
	let count = Arc::new(AtomicUsize::new(0));
	let added = Arc::new(AtomicBool::new(false));
	let _connection = registry.add({
		let registry = registry.clone();
		let count = Arc::clone(&count);
		let added = Arc::clone(&added);
		Arc::new(move || {
			if !added.swap(true, Relaxed) {
				let count = Arc::clone(&count);
				let _ = registry.add(Arc::new(move || {
					count.fetch_add(1, Relaxed);
				}));
			}
		})
	});

	registry.for_each(|callback| callback());
	assert_eq!(count.load(Relaxed), 0);

	registry.for_each(|callback| callback());
	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn callback_may_disconnect_itself_while_running() {
	let registry = Registry::<dyn Fn() + Send + Sync>::new();
	let count = Arc::new(AtomicUsize::new(0));
	let slot: Arc<OnceLock<Connection>> = Arc::new(OnceLock::new());

	let connection = registry.add({
		let count = Arc::clone(&count);
		let slot = Arc::clone(&slot);
		Arc::new(move || {
			count.fetch_add(1, Relaxed);
			if let Some(connection) = slot.get() {
				connection.disconnect();
			}
		})
	});
	slot.set(connection).expect("slot already filled");

	registry.for_each(|callback| callback());
	registry.for_each(|callback| callback());

	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn disconnect_after_the_registry_is_gone_is_a_noop() {
	let registry = Registry::<Shape>::new();
	let count = Arc::new(AtomicUsize::new(0));
	let connection = registry.add(accumulating(&count));

	drop(registry);
	connection.disconnect();
	connection.disconnect();
}
