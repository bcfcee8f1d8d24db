#![cfg(loom)]

use inlay::Inlay;
use loom::sync::atomic::{AtomicUsize, Ordering};
use loom::sync::Arc;
use loom::thread;

// loom's atomics carry model state, so the declaration is deliberately roomy.
type Counter = Inlay<AtomicUsize, 64, 8>;

#[test]
fn test_concurrent_increments_through_holder() {
    loom::model(|| {
        let counter = Arc::new(Counter::new(AtomicUsize::new(0)));

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    counter.fetch_add(1, Ordering::AcqRel);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::Acquire), 2);
    });
}

#[test]
fn test_publish_through_holder() {
    loom::model(|| {
        let flag = Arc::new(Counter::new(AtomicUsize::new(0)));
        let writer = Arc::clone(&flag);

        let handle = thread::spawn(move || {
            writer.store(1, Ordering::Release);
        });

        let seen = flag.load(Ordering::Acquire);
        assert!(seen == 0 || seen == 1);

        handle.join().unwrap();
        assert_eq!(flag.load(Ordering::Acquire), 1);
    });
}
