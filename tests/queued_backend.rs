mod common;

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use common::SharedBuffer;
use rotolog::{Flags, Level, Logger, QUEUE_CAPACITY, Sink};

fn queued_logger(buffer: &SharedBuffer) -> Logger {
    Logger::builder()
        .level(Level::Debug)
        .flags(Flags::SEQUENCE)
        .queued(Box::new(buffer.clone()))
        .build()
}

fn sequence_of(line: &str) -> u64 {
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.split(']').next())
        .unwrap_or_else(|| panic!("no sequence in line: {line}"));
    inner.parse().unwrap()
}

#[test]
fn flush_delivers_every_accepted_record() {
    let buffer = SharedBuffer::new();
    let logger = queued_logger(&buffer);
    for i in 0..100 {
        logger.infof("record {}", &[&i]);
    }
    logger.flush();
    assert_eq!(buffer.lines().len(), 100);
}

#[test]
fn records_from_one_producer_stay_in_order() {
    let buffer = SharedBuffer::new();
    let logger = queued_logger(&buffer);
    for i in 0..50 {
        logger.infof("{}", &[&i]);
    }
    logger.flush();
    let sequences: Vec<u64> = buffer.lines().iter().map(|l| sequence_of(l)).collect();
    assert_eq!(sequences, (0..50).collect::<Vec<u64>>());
}

#[test]
fn concurrent_producers_get_unique_contiguous_sequences() {
    let buffer = SharedBuffer::new();
    let logger = Arc::new(queued_logger(&buffer));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..50 {
                    logger.infof("thread {} record {}", &[&t, &i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush();

    let lines = buffer.lines();
    assert_eq!(lines.len(), 200);
    let sequences: HashSet<u64> = lines.iter().map(|l| sequence_of(l)).collect();
    assert_eq!(sequences.len(), 200);
    assert_eq!(sequences.iter().max(), Some(&199));
}

/// A sink whose writes stay parked until the gate opens, so the drain thread
/// stalls and the queue behind it fills up.
struct GatedSink {
    inner: SharedBuffer,
    gate: Arc<(Mutex<bool>, Condvar)>,
}

impl Write for GatedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (open, released) = &*self.gate;
        let mut open = open.lock().unwrap();
        while !*open {
            open = released.wait(open).unwrap();
        }
        drop(open);
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Sink for GatedSink {}

#[test]
fn full_queue_blocks_producers_without_losing_records() {
    let buffer = SharedBuffer::new();
    let gate = Arc::new((Mutex::new(false), Condvar::new()));
    let logger = Arc::new(
        Logger::builder()
            .level(Level::Debug)
            .flags(Flags::SEQUENCE)
            .queued(Box::new(GatedSink {
                inner: buffer.clone(),
                gate: Arc::clone(&gate),
            }))
            .build(),
    );

    // More records than the queue holds; with the sink gated shut, the
    // producer must block on the full queue partway through.
    let total = QUEUE_CAPACITY + 64;
    let producer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..total {
                logger.infof("backlogged {}", &[&i]);
            }
        })
    };

    // Let the producer run into the full queue before opening the gate.
    thread::sleep(Duration::from_millis(100));
    assert!(buffer.lines().is_empty());
    {
        let (open, released) = &*gate;
        *open.lock().unwrap() = true;
        released.notify_all();
    }

    producer.join().unwrap();
    logger.flush();

    let sequences: HashSet<u64> = buffer.lines().iter().map(|l| sequence_of(l)).collect();
    assert_eq!(sequences.len(), total);
    assert_eq!(sequences.iter().max().copied(), Some(total as u64 - 1));
}

#[test]
fn flush_is_idempotent() {
    let buffer = SharedBuffer::new();
    let logger = queued_logger(&buffer);
    logger.info("one");
    logger.flush();
    logger.flush();
    assert_eq!(buffer.lines().len(), 1);
}

#[test]
fn records_after_flush_are_discarded() {
    let buffer = SharedBuffer::new();
    let logger = queued_logger(&buffer);
    logger.info("before");
    logger.flush();
    logger.info("after");
    assert_eq!(buffer.lines(), vec!["[0] [INFO] before"]);
}

#[test]
fn filter_applies_before_the_queue() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .level(Level::Error)
        .flags(Flags::SEQUENCE)
        .queued(Box::new(buffer.clone()))
        .build();
    logger.debug("dropped");
    logger.info("dropped");
    logger.error("kept");
    logger.flush();
    assert_eq!(buffer.lines(), vec!["[0] [ERROR] kept"]);
}
