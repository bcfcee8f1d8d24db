//! Opaque public types declared outside the crate, the way downstream code uses them.

mod connection {
    use std::collections::VecDeque;

    struct ConnectionImpl {
        peer: String,
        outbox: VecDeque<Vec<u8>>,
        sent: u64,
    }

    inlay::opaque! {
        /// A buffered connection whose state is private to this module.
        pub struct Connection(ConnectionImpl; size = 96, align = 8);
    }

    inlay::assert_layout!(ConnectionImpl, size = 96, align = 8);

    impl Connection {
        pub fn open(peer: &str) -> Self {
            Self::from_impl(ConnectionImpl {
                peer: peer.to_owned(),
                outbox: VecDeque::new(),
                sent: 0,
            })
        }

        pub fn queue(&mut self, frame: &[u8]) {
            self.inner_mut().outbox.push_back(frame.to_vec());
        }

        pub fn flush(&mut self) -> usize {
            let state = self.inner_mut();
            let flushed = state.outbox.len();
            state.sent += flushed as u64;
            state.outbox.clear();
            flushed
        }

        pub fn peer(&self) -> &str {
            &self.inner().peer
        }

        pub fn sent(&self) -> u64 {
            self.inner().sent
        }

        pub fn close(self) -> u64 {
            self.into_impl().sent
        }
    }
}

mod point {
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct PointImpl {
        x: f64,
        y: f64,
    }

    inlay::opaque! {
        #[derive(Debug, Clone, PartialEq)]
        pub struct Point(PointImpl; size = 16, align = 8, strict);
    }

    impl Point {
        pub fn new(x: f64, y: f64) -> Self {
            Self::from_impl(PointImpl { x, y })
        }

        pub fn norm(&self) -> f64 {
            let p = self.inner();
            (p.x * p.x + p.y * p.y).sqrt()
        }
    }
}

use connection::Connection;
use point::Point;

#[test]
fn test_opaque_connection_behaves() {
    let mut conn = Connection::open("10.0.0.1:9000");
    conn.queue(b"hello");
    conn.queue(b"world");
    assert_eq!(conn.flush(), 2);
    assert_eq!(conn.flush(), 0);
    assert_eq!(conn.peer(), "10.0.0.1:9000");
    assert_eq!(conn.sent(), 2);
    assert_eq!(conn.close(), 2);
}

#[test]
fn test_opaque_size_is_the_declaration() {
    assert_eq!(std::mem::size_of::<Connection>(), 96);
    assert_eq!(std::mem::size_of::<Point>(), 16);
    assert_eq!(std::mem::align_of::<Point>(), 8);
}

#[test]
fn test_opaque_derives() {
    let a = Point::new(3.0, 4.0);
    let b = a.clone();
    assert_eq!(a, b);
    assert!((b.norm() - 5.0).abs() < f64::EPSILON);
    assert!(format!("{a:?}").starts_with("Point(Inlay(PointImpl"));
}
