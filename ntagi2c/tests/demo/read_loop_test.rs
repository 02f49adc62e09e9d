#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use ntagi2c::prelude::*;
use ntagi2c::test_support::{demo_board_tag, fast_demo_config};
use serial_test::serial;

#[test]
#[serial]
fn loop_reports_until_stopped_and_hands_back_the_demo() {
    common::helpers::init_logger();
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let read_loop = demo.start_read_loop(move |r| {
        sink.lock().unwrap().push(r.map(|report| report.data.len()));
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    while seen.lock().unwrap().len() < 3 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    let stopped_at = Instant::now();
    let mut demo = read_loop.stop().unwrap();
    assert!(stopped_at.elapsed() < Duration::from_secs(1));

    let seen = seen.lock().unwrap();
    assert!(seen.len() >= 3);
    assert!(seen.iter().all(|r| *r == Ok(227 * 4)));
    assert!(demo.read_once().is_ok());
}

#[test]
#[serial]
fn dropping_the_loop_stops_the_thread() {
    let tag = demo_board_tag(TagProduct::Ntag1k);
    let demo = Demo::discover(&tag, fast_demo_config()).unwrap();
    let read_loop = demo.start_read_loop(|_| {});
    let flag = read_loop.stop_flag();
    drop(read_loop);
    assert!(flag.load(std::sync::atomic::Ordering::Relaxed));
    // the reader's connection was released with the demo
    assert!(tag.state().open_connection.is_none());
}
