use super::*;
use std::sync::Arc;

#[test]
fn test_new_buffer_is_empty() {
    let buffer: RingBuffer<u32> = RingBuffer::new(4);
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.capacity(), 4);
    assert!(buffer.is_empty());
    assert!(!buffer.is_full());
}

#[test]
#[should_panic(expected = "capacity must be > 0")]
fn test_zero_capacity_panics() {
    let _: RingBuffer<u32> = RingBuffer::new(0);
}

#[test]
fn test_fifo_order() {
    let buffer = RingBuffer::new(8);
    for i in 0..5 {
        buffer.try_push(i).unwrap();
    }
    for i in 0..5 {
        assert_eq!(buffer.try_pop(), Some(i));
    }
    assert_eq!(buffer.try_pop(), None);
}

#[test]
fn test_pop_empty_has_no_side_effect() {
    let buffer: RingBuffer<u32> = RingBuffer::new(2);
    assert_eq!(buffer.try_pop(), None);
    assert_eq!(buffer.try_pop(), None);
    buffer.try_push(1).unwrap();
    assert_eq!(buffer.try_pop(), Some(1));
}

#[test]
fn test_full_buffer_rejects_without_overwrite() {
    let buffer = RingBuffer::new(2);
    buffer.try_push(1).unwrap();
    buffer.try_push(2).unwrap();
    assert!(buffer.is_full());

    // Rejected pushes return the item and leave the state unchanged.
    assert_eq!(buffer.try_push(3), Err(3));
    assert_eq!(buffer.try_push(4), Err(4));
    assert_eq!(buffer.len(), 2);

    assert_eq!(buffer.try_pop(), Some(1));
    assert_eq!(buffer.try_pop(), Some(2));
    assert_eq!(buffer.try_pop(), None);
}

#[test]
fn test_overflow_accounting() {
    // Capacity 2, five pushes: exactly two succeed, three are rejected.
    let buffer = RingBuffer::new(2);
    let mut accepted = 0;
    let mut rejected = 0;
    for i in 0..5 {
        match buffer.try_push(i) {
            Ok(()) => accepted += 1,
            Err(_) => rejected += 1,
        }
    }
    assert_eq!(accepted, 2);
    assert_eq!(rejected, 3);
    assert_eq!(buffer.len(), 2);
}

#[test]
fn test_capacity_one() {
    let buffer = RingBuffer::new(1);
    buffer.try_push(10).unwrap();
    assert!(buffer.is_full());
    assert_eq!(buffer.try_push(11), Err(11));
    assert_eq!(buffer.try_pop(), Some(10));
    buffer.try_push(12).unwrap();
    assert_eq!(buffer.try_pop(), Some(12));
}

#[test]
fn test_wraparound_preserves_order() {
    let buffer = RingBuffer::new(3);
    // Drive the indices around the ring several times.
    for round in 0..10 {
        let base = round * 3;
        for i in 0..3 {
            buffer.try_push(base + i).unwrap();
        }
        for i in 0..3 {
            assert_eq!(buffer.try_pop(), Some(base + i));
        }
    }
}

#[test]
fn test_interleaved_push_pop() {
    let buffer = RingBuffer::new(2);
    buffer.try_push(1).unwrap();
    buffer.try_push(2).unwrap();
    assert_eq!(buffer.try_pop(), Some(1));
    buffer.try_push(3).unwrap();
    assert_eq!(buffer.try_pop(), Some(2));
    assert_eq!(buffer.try_pop(), Some(3));
}

#[test]
fn test_concurrent_producers_and_consumers() {
    // Conservation and per-producer ordering under contention:
    // pushed == popped + remaining + rejected, and each producer's
    // accepted items come out in push order.
    const PRODUCERS: u64 = 4;
    const PER_PRODUCER: u64 = 1000;

    let buffer: Arc<RingBuffer<(u64, u64)>> = Arc::new(RingBuffer::new(64));
    let popped: Arc<parking_lot::Mutex<Vec<(u64, u64)>>> =
        Arc::new(parking_lot::Mutex::new(Vec::new()));
    let rejected = Arc::new(std::sync::atomic::AtomicU64::new(0));
    let done = Arc::new(std::sync::atomic::AtomicU64::new(0));

    let mut handles = Vec::new();

    for producer in 0..PRODUCERS {
        let buffer = Arc::clone(&buffer);
        let rejected = Arc::clone(&rejected);
        let done = Arc::clone(&done);
        handles.push(std::thread::spawn(move || {
            for seq in 0..PER_PRODUCER {
                if buffer.try_push((producer, seq)).is_err() {
                    rejected.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                }
            }
            done.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }));
    }

    // Two consumers drain while producers run.
    for _ in 0..2 {
        let buffer = Arc::clone(&buffer);
        let popped = Arc::clone(&popped);
        let done = Arc::clone(&done);
        handles.push(std::thread::spawn(move || loop {
            match buffer.try_pop() {
                Some(item) => popped.lock().push(item),
                None => {
                    if done.load(std::sync::atomic::Ordering::SeqCst) == PRODUCERS {
                        break;
                    }
                    std::thread::yield_now();
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Drain whatever is left after all threads stopped.
    while let Some(item) = buffer.try_pop() {
        popped.lock().push(item);
    }

    let popped = popped.lock();
    let rejected = rejected.load(std::sync::atomic::Ordering::SeqCst);
    assert_eq!(
        popped.len() as u64 + rejected,
        PRODUCERS * PER_PRODUCER,
        "conservation violated"
    );

    // Per-producer sequences must be strictly increasing.
    let mut last_seq = vec![None::<u64>; PRODUCERS as usize];
    for &(producer, seq) in popped.iter() {
        if let Some(prev) = last_seq[producer as usize] {
            assert!(seq > prev, "producer {producer} out of order: {prev} then {seq}");
        }
        last_seq[producer as usize] = Some(seq);
    }
}
