//! Records carry no locking of their own; shared mutation goes through a
//! mutex owned by the caller.

use std::{
    sync::{Arc, Mutex},
    thread,
};

use dotwiz::Record;

#[test]
fn test_mutex_guarded_record_across_threads() {
    let shared = Arc::new(Mutex::new(Record::new()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let mut rec = shared.lock().unwrap();
                rec.set_attr(format!("worker_{i}"), i);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let rec = shared.lock().unwrap();
    assert_eq!(rec.len(), 4);
    assert_eq!(*rec.attr("worker_3").unwrap(), 3);
}
