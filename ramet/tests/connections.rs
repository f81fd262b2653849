use std::sync::{
	atomic::{AtomicUsize, Ordering::Relaxed},
	Arc,
};

use parking_lot::Mutex;
use ramet::{Connection, ConnectionSet};

fn counting(count: &Arc<AtomicUsize>) -> Connection {
	let count = Arc::clone(count);
	Connection::new(move || {
		count.fetch_add(1, Relaxed);
	})
}

#[test]
fn disconnect_runs_teardown_once() {
	let count = Arc::new(AtomicUsize::new(0));
	let connection = counting(&count);
	assert!(!connection.is_disconnected());

	connection.disconnect();
	connection.disconnect();

	assert!(connection.is_disconnected());
	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn join_disconnects_in_supplied_order() {
	let order = Arc::new(Mutex::new(Vec::new()));
	let first = Connection::new({
		let order = Arc::clone(&order);
		move || order.lock().push("first")
	});
	let second = Connection::new({
		let order = Arc::clone(&order);
		move || order.lock().push("second")
	});

	let joined = Connection::join([first, second]);
	joined.disconnect();
	assert_eq!(*order.lock(), ["first", "second"]);

	joined.disconnect();
	assert_eq!(*order.lock(), ["first", "second"]);
}

#[test]
fn join_tolerates_already_disconnected_members() {
	let count = Arc::new(AtomicUsize::new(0));
	let first = counting(&count);
	first.disconnect();
	let second = counting(&count);

	let joined = Connection::join([first, second]);
	joined.disconnect();

	assert_eq!(count.load(Relaxed), 2);
}

#[test]
fn blank_is_inert() {
	let connection = Connection::blank();
	assert!(connection.is_disconnected());
	connection.disconnect();
	connection.disconnect();
}

#[test]
fn scoped_connection_disconnects_on_drop() {
	let count = Arc::new(AtomicUsize::new(0));
	{
		let _scoped = counting(&count).scoped();
		assert_eq!(count.load(Relaxed), 0);
	}
	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn scoped_connection_can_be_released() {
	let count = Arc::new(AtomicUsize::new(0));
	let connection = {
		let scoped = counting(&count).scoped();
		scoped.into_connection()
	};
	assert_eq!(count.load(Relaxed), 0);

	connection.disconnect();
	assert_eq!(count.load(Relaxed), 1);
}

#[test]
fn connection_set_disconnects_all() {
	let count = Arc::new(AtomicUsize::new(0));
	let set = ConnectionSet::new();
	set.insert(counting(&count));
	set.insert(counting(&count));

	set.disconnect_all();
	assert_eq!(count.load(Relaxed), 2);

	set.disconnect_all();
	assert_eq!(count.load(Relaxed), 2);
}
