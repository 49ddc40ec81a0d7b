use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::dispatch::domain::{DriverId, ShipmentId, TripId, VehicleId};
use crate::dispatch::locks::{ResourceKey, ResourceLocks};
use crate::dispatch::reject::RejectReason;

fn vehicle(id: &str) -> ResourceKey {
    ResourceKey::Vehicle(VehicleId(id.to_string()))
}

fn driver(id: &str) -> ResourceKey {
    ResourceKey::Driver(DriverId(id.to_string()))
}

fn trip(id: &str) -> ResourceKey {
    ResourceKey::Trip(TripId(id.to_string()))
}

#[test]
fn keys_are_acquired_in_global_order_without_duplicates() {
    let locks = ResourceLocks::new(Duration::from_millis(50));
    let guard = locks
        .acquire([
            ResourceKey::Shipment(ShipmentId("s1".to_string())),
            trip("t1"),
            driver("d1"),
            vehicle("v2"),
            vehicle("v1"),
            driver("d1"),
        ])
        .expect("uncontended");

    assert_eq!(
        guard.keys(),
        &[
            vehicle("v1"),
            vehicle("v2"),
            driver("d1"),
            trip("t1"),
            ResourceKey::Shipment(ShipmentId("s1".to_string())),
        ]
    );
}

#[test]
fn held_key_times_out_as_busy() {
    let locks = ResourceLocks::new(Duration::from_millis(30));
    let _held = locks.acquire([driver("d1")]).expect("first holder");

    let started = Instant::now();
    let contention = locks
        .acquire([driver("d1"), vehicle("v1")])
        .expect_err("driver is held");
    assert_eq!(contention.key, driver("d1"));
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert_eq!(RejectReason::from(contention), RejectReason::Busy);

    // the vehicle taken before the failure was released again
    locks.acquire([vehicle("v1")]).expect("vehicle free");
}

#[test]
fn dropping_the_guard_releases_every_key() {
    let locks = ResourceLocks::new(Duration::from_millis(20));
    let guard = locks
        .acquire([vehicle("v1"), driver("d1")])
        .expect("uncontended");
    drop(guard);

    locks
        .acquire([vehicle("v1"), driver("d1")])
        .expect("keys released on drop");
}

#[test]
fn disjoint_keys_do_not_contend() {
    let locks = ResourceLocks::new(Duration::from_millis(20));
    let _first = locks.acquire([vehicle("v1"), driver("d1")]).expect("first");
    let _second = locks
        .acquire([vehicle("v2"), driver("d2")])
        .expect("disjoint set");
}

#[test]
fn waiter_gets_the_lock_once_holder_finishes_within_timeout() {
    let locks = Arc::new(ResourceLocks::new(Duration::from_secs(2)));
    let (acquired_tx, acquired_rx) = mpsc::channel();

    let holder = {
        let locks = locks.clone();
        thread::spawn(move || {
            let _guard = locks.acquire([vehicle("v1")]).expect("holder acquires");
            acquired_tx.send(()).expect("signal");
            thread::sleep(Duration::from_millis(40));
        })
    };

    acquired_rx.recv().expect("holder signalled");
    let guard = locks.acquire([vehicle("v1")]).expect("waits for holder");
    assert_eq!(guard.keys(), &[vehicle("v1")]);
    holder.join().expect("holder thread");
}

#[test]
fn released_keys_leave_the_registry() {
    let locks = ResourceLocks::new(Duration::from_millis(50));
    for n in 0..100 {
        let guard = locks
            .acquire([vehicle(&format!("v{n}")), driver(&format!("d{n}"))])
            .expect("uncontended");
        assert_eq!(locks.tracked(), 2);
        drop(guard);
    }
    assert_eq!(locks.tracked(), 0);
}

#[test]
fn held_keys_stay_tracked_after_a_contended_attempt() {
    let locks = ResourceLocks::new(Duration::from_millis(20));
    let held = locks.acquire([driver("d1")]).expect("first holder");

    locks
        .acquire([vehicle("v1"), driver("d1")])
        .expect_err("driver is held");
    assert_eq!(locks.tracked(), 1);

    drop(held);
    assert_eq!(locks.tracked(), 0);
    locks.acquire([driver("d1")]).expect("free again");
}
