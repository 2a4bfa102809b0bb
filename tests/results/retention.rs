//! Per-user retention as seen through the endpoint.

use std::sync::atomic::Ordering;

use quiz_results::service::Request;
use quiz_results::RecordStore;
use serde_json::json;

use crate::support::{faulty_service, in_memory_service, result_body, timestamp};

#[test]
fn hundred_and_first_write_drops_the_oldest() {
    let service = in_memory_service();
    for n in 1..=101 {
        let response =
            service.dispatch(&Request::post(&result_body("u1", &timestamp(n), "g", json!(n))));
        assert_eq!(response.status(), 200);
    }

    let history = service.dispatch(&Request::get().with_query("userId", "u1"));
    let records = history.body().as_array().unwrap();
    assert_eq!(records.len(), 100);
    assert_eq!(records[0]["timestamp"], json!(timestamp(2)));
    assert_eq!(records[99]["timestamp"], json!(timestamp(101)));
}

#[test]
fn other_users_are_untouched() {
    let service = in_memory_service();
    service.dispatch(&Request::post(&result_body("u2", &timestamp(0), "g", json!(1))));
    for n in 1..=105 {
        service.dispatch(&Request::post(&result_body("u1", &timestamp(n), "g", json!(n))));
    }

    assert_eq!(service.store().query_by_owner("u1").unwrap().len(), 100);
    assert_eq!(service.store().query_by_owner("u2").unwrap().len(), 1);
}

#[test]
fn failed_cleanup_does_not_fail_the_write() {
    let (service, store) = faulty_service();
    for n in 1..=100 {
        service.dispatch(&Request::post(&result_body("u1", &timestamp(n), "g", json!(n))));
    }
    store.faults.batch_delete.store(true, Ordering::SeqCst);

    let response =
        service.dispatch(&Request::post(&result_body("u1", &timestamp(101), "g", json!(0))));
    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), &json!({ "message": "Success" }));
    assert_eq!(store.inner.query_by_owner("u1").unwrap().len(), 101);

    // The next write retries and catches up.
    store.faults.batch_delete.store(false, Ordering::SeqCst);
    service.dispatch(&Request::post(&result_body("u1", &timestamp(102), "g", json!(0))));
    let remaining = store.inner.query_by_owner("u1").unwrap();
    assert_eq!(remaining.len(), 100);
}

#[test]
fn failed_timestamp_query_does_not_fail_the_write() {
    let (service, store) = faulty_service();
    store.faults.projection.store(true, Ordering::SeqCst);

    let response =
        service.dispatch(&Request::post(&result_body("u1", &timestamp(1), "g", json!(3))));
    assert_eq!(response.status(), 200);
    assert_eq!(store.inner.query_by_owner("u1").unwrap().len(), 1);
}
