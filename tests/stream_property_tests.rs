use logstream::stream::{from_generator, from_iter, Merge, RewindableStream, Stream, StreamExt};
use quickcheck::{quickcheck, TestResult};
use std::cell::Cell;
use std::rc::Rc;

quickcheck! {
    // Once a stream reports its end it stays ended and its generator is
    // never touched again.
    fn prop_exhaustion_is_stable(items: Vec<u8>, extra_reads: u8) -> bool {
        let calls = Rc::new(Cell::new(0usize));
        let seen = calls.clone();
        let mut iter = items.clone().into_iter();
        let mut stream = from_generator(move || {
            seen.set(seen.get() + 1);
            Ok(iter.next())
        });

        let collected = stream.collect_vec().unwrap();
        let calls_at_end = calls.get();
        let still_ended = (0..extra_reads).all(|_| {
            stream.head().unwrap().is_none() && stream.get().unwrap().is_none()
        });
        collected == items && still_ended && calls_at_end == items.len() + 1 && calls.get() == calls_at_end
    }

    fn prop_head_is_stable(items: Vec<i32>) -> bool {
        let mut stream = from_iter(items);
        loop {
            let first = stream.head().unwrap().copied();
            let second = stream.head().unwrap().copied();
            let taken = stream.get().unwrap();
            if first != second || first != taken {
                return false;
            }
            if taken.is_none() {
                return true;
            }
        }
    }

    fn prop_filter_keeps_matching_elements_in_order(items: Vec<i32>, modulus: u8) -> TestResult {
        if modulus == 0 {
            return TestResult::discard();
        }
        let m = i32::from(modulus);
        let expected: Vec<i32> = items.iter().copied().filter(|x| x % m == 0).collect();
        let mut filtered = from_iter(items).filter(move |x| x % m == 0);
        TestResult::from_bool(filtered.collect_vec().unwrap() == expected)
    }

    fn prop_transform_ends_with_source(items: Vec<String>) -> bool {
        let expected: Vec<usize> = items.iter().map(String::len).collect();
        let mut lengths = from_iter(items).map(|s| s.len());
        lengths.collect_vec().unwrap() == expected
    }

    fn prop_round_robin_loses_nothing(a: Vec<u16>, b: Vec<u16>, c: Vec<u16>) -> TestResult {
        if a.is_empty() && b.is_empty() && c.is_empty() {
            return TestResult::discard();
        }
        let mut expected: Vec<u16> = a.iter().chain(&b).chain(&c).copied().collect();
        let mut merged =
            Merge::round_robin(vec![from_iter(a), from_iter(b), from_iter(c)]).unwrap();
        let mut got = merged.collect_vec().unwrap();
        expected.sort_unstable();
        got.sort_unstable();
        TestResult::from_bool(got == expected)
    }

    // Rewinding reproduces exactly what an unbookmarked run would have seen.
    fn prop_rewind_replays_from_bookmark(items: Vec<u32>, skip: usize, scan: usize) -> TestResult {
        if skip > items.len() {
            return TestResult::discard();
        }
        let mut stream = from_iter(items.clone()).rewindable();
        for _ in 0..skip {
            stream.get().unwrap();
        }
        stream.bookmark();
        for _ in 0..scan {
            stream.get().unwrap();
        }
        stream.rewind().unwrap();
        TestResult::from_bool(stream.collect_vec().unwrap() == items[skip..])
    }

    fn prop_prepend_precedes_pending(items: Vec<u32>, front: Vec<u32>, consumed: usize) -> TestResult {
        if consumed > items.len() {
            return TestResult::discard();
        }
        let mut stream = from_iter(items.clone()).rewindable();
        for _ in 0..consumed {
            stream.get().unwrap();
        }
        stream.prepend(front.clone());
        let mut expected = front;
        expected.extend_from_slice(&items[consumed..]);
        TestResult::from_bool(stream.collect_vec().unwrap() == expected)
    }
}
