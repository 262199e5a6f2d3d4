#![cfg(test)]

use std::cell::Cell;
use std::hash::{BuildHasher, RandomState};
use std::iter;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use super::*;
use crate::util::alloc::{CountedDrop, LimitedClone, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_sized_construction() {
    for n in [0, 1, 7, 64] {
        let vec = Vector::<u32>::repeat_default(n);
        assert_eq!(vec.len(), n);
        assert!(vec.cap() >= n);
        assert!(vec.iter().all(|v| *v == 0), "All values should be default constructed.");
    }

    let vec = Vector::<u8>::repeat_default(0);
    assert!(vec.as_ptr().is_null(), "An empty construction shouldn't allocate.");
}

#[test]
fn test_sized_construction_unwinds() {
    let counter = CountedDrop::new(0);
    let made = Cell::new(0);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        Vector::repeat_with(10, || {
            if made.get() == 4 {
                panic!("construction failed");
            }
            made.set(made.get() + 1);
            counter.clone()
        })
    }));

    assert!(result.is_err());
    assert_eq!(
        *counter.borrow(),
        4,
        "Every value constructed before the failure should have been dropped."
    );
}

#[test]
fn test_push_growth() {
    let mut vec = Vector::new();
    let mut caps = Vector::new();

    for i in 0..9_u32 {
        vec.push(i);
        caps.push(vec.cap());
    }

    assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(
        &*caps,
        &[1, 2, 4, 4, 8, 8, 8, 8, 16],
        "Capacity should double every time it runs out."
    );
}

#[test]
fn test_push_at_capacity() {
    let mut vec = Vector::with_cap(2);
    vec.push(1);
    vec.push(2);
    assert_eq!((vec.len(), vec.cap()), (2, 2));

    vec.push(3);
    assert_eq!(vec.len(), 3);
    assert_eq!(vec.cap(), 4);
    assert_eq!(&*vec, &[1, 2, 3]);
}

#[test]
fn test_emplace_back_unwinds() {
    let mut vec: Vector<String> = ["a", "b"].into_iter().map(String::from).collect();
    assert_eq!(vec.cap(), 2);
    let old_ptr = vec.as_ptr();

    assert_panics!({
        let mut vec = Vector::<String>::with_cap(1);
        vec.push("x".to_owned());
        vec.emplace_back(|| panic!("construction failed"));
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        vec.emplace_back(|| panic!("construction failed"));
    }));
    assert!(result.is_err());
    assert_eq!(&*vec, &["a", "b"], "A failed emplace shouldn't touch the Vector.");
    assert_eq!(vec.cap(), 2);
    assert_eq!(vec.as_ptr(), old_ptr, "A failed emplace shouldn't swap in the new storage.");
}

#[test]
fn test_pop() {
    let mut vec: Vector<u8> = Vector::new();
    assert_eq!(vec.pop(), None, "Popping an empty Vector should do nothing.");
    assert_eq!(vec.len(), 0);

    vec.extend([1, 2]);
    assert_eq!(vec.pop(), Some(2));
    assert_eq!(vec.pop(), Some(1));
    assert_eq!(vec.pop(), None);
    assert_eq!(vec.cap(), 2, "Popping shouldn't release capacity.");
}

#[test]
fn test_insert() {
    let mut vec: Vector<char> = ['a', 'b', 'c'].into_iter().collect();
    assert_eq!(vec.insert(0, 'x'), 0);
    assert_eq!(&*vec, &['x', 'a', 'b', 'c']);

    let mut vec: Vector<char> = ['a', 'b', 'c'].into_iter().collect();
    assert_eq!(vec.insert(3, 'x'), 3);
    assert_eq!(&*vec, &['a', 'b', 'c', 'x']);

    // Middle insertion with spare capacity shifts in place.
    let mut vec: Vector<char> = Vector::with_cap(8);
    vec.extend(['a', 'b', 'c']);
    let old_ptr = vec.as_ptr();
    assert_eq!(vec.insert(1, 'x'), 1);
    assert_eq!(&*vec, &['a', 'x', 'b', 'c']);
    assert_eq!(vec.as_ptr(), old_ptr, "No reallocation should happen with spare capacity.");

    // Middle insertion without spare capacity reallocates around the new value.
    let mut vec: Vector<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    assert_eq!(vec.cap(), 3);
    assert_eq!(vec.insert(1, "x".to_owned()), 1);
    assert_eq!(&*vec, &["a", "x", "b", "c"]);
    assert_eq!(vec.cap(), 6);

    assert_panics!({
        let mut vec: Vector<u8> = Vector::new();
        vec.insert(1, 0);
    });
}

#[test]
fn test_emplace_into_empty() {
    let mut vec: Vector<Box<u32>> = Vector::new();
    assert_eq!(vec.emplace(0, || Box::new(5)), 0);
    assert_eq!(vec.emplace(0, || Box::new(4)), 0);
    assert_eq!(vec.emplace(1, || Box::new(6)), 1);
    assert_eq!(&*vec.iter().map(|b| **b).collect::<Vector<_>>(), &[4, 6, 5]);
}

#[test]
fn test_erase_and_remove() {
    let mut vec: Vector<char> = ['a', 'b', 'c'].into_iter().collect();
    assert_eq!(vec.erase(1), 1);
    assert_eq!(&*vec, &['a', 'c']);
    assert_eq!(vec.len(), 2);
    assert_eq!(vec.erase(1), vec.len(), "Erasing the last element should return the end.");

    let counter = CountedDrop::new(0);
    let mut vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(4));
    vec.erase(0);
    vec.erase(1);
    assert_eq!(*counter.borrow(), 2, "Each erase should drop exactly one value.");
    drop(vec);
    assert_eq!(*counter.borrow(), 4);

    let mut vec: Vector<_> = (0..5).collect();
    assert_eq!(vec.remove(0), 0);
    assert_eq!(vec.remove(3), 4);
    assert_eq!(&*vec, &[1, 2, 3]);

    assert_panics!({
        let mut vec: Vector<u8> = Vector::new();
        vec.remove(0);
    });
}

#[test]
fn test_reserve() {
    let mut vec: Vector<_> = (0..4).collect();
    let old_ptr = vec.as_ptr();

    vec.reserve(2);
    assert_eq!(vec.cap(), 4, "Reserving less than the capacity should do nothing.");
    assert_eq!(vec.as_ptr(), old_ptr);
    assert_eq!(&*vec, &[0, 1, 2, 3]);

    vec.reserve(10);
    assert_eq!(vec.cap(), 10, "Reserving should allocate exactly the requested capacity.");
    assert_eq!(&*vec, &[0, 1, 2, 3]);

    let err = vec.try_reserve(usize::MAX).expect_err("reservation should fail");
    assert!(err.is_capacity_overflow());
    assert_eq!(vec.cap(), 10, "A failed reservation should leave the Vector untouched.");
    assert_eq!(&*vec, &[0, 1, 2, 3]);

    assert_panics!({
        let mut vec: Vector<u64> = Vector::new();
        vec.reserve(isize::MAX as usize);
    });
}

#[test]
fn test_try_push_and_try_with_cap() {
    let mut vec = Vector::try_with_cap(1).expect("small allocation");
    assert_eq!(vec.try_push(1_u16), Ok(()));
    assert_eq!(vec.try_push(2), Ok(()));
    assert_eq!(&*vec, &[1, 2]);
    assert_eq!(vec.cap(), 2);

    assert!(Vector::<u32>::try_with_cap(usize::MAX).is_err());
}

#[test]
fn test_resize() {
    let mut vec: Vector<_> = (1..=3).collect();

    vec.resize(5);
    assert_eq!(&*vec, &[1, 2, 3, 0, 0]);
    assert_eq!(vec.cap(), 5);

    vec.resize(2);
    assert_eq!(&*vec, &[1, 2]);
    assert_eq!(vec.cap(), 5, "Shrinking shouldn't release capacity.");

    vec.resize(3);
    assert_eq!(&*vec, &[1, 2, 0], "A regrown tail should be default constructed.");

    vec.resize(0);
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.cap(), 0, "Resizing to zero should release the storage.");

    let counter = CountedDrop::new(0);
    let mut vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(6));
    vec.resize_with(2, || unreachable!());
    assert_eq!(*counter.borrow(), 4, "4 elements should have been dropped during shrinking.");
}

#[test]
fn test_clear_and_reset() {
    let mut vec: Vector<_> = (0..5).collect();
    vec.clear();
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.cap(), 5);

    vec.push(1);
    vec.reset();
    assert_eq!(vec.len(), 0);
    assert_eq!(vec.cap(), 0);
    assert!(vec.as_ptr().is_null());
}

#[test]
fn test_shrink_to_fit() {
    let mut vec: Vector<u8> = Vector::with_cap(10);
    vec.extend([1, 2, 3]);
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3);
    assert_eq!(&*vec, &[1, 2, 3]);

    vec.clear();
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 0);
}

#[test]
fn test_clone_is_minimal_and_independent() {
    let mut original: Vector<String> = Vector::with_cap(10);
    original.extend(["a", "b", "c"].map(String::from));

    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.cap(), 3, "A copy should only allocate room for the live elements.");

    copy[0].push('!');
    copy.push("d".to_owned());
    assert_eq!(&*original, &["a", "b", "c"], "Mutating the copy shouldn't affect the original.");
}

#[test]
fn test_clone_unwinds() {
    let counter = CountedDrop::new(0);
    let budget = Rc::new(Cell::new(usize::MAX));
    let original = Vector::repeat_with(5, || LimitedClone::new(&counter, &budget));

    budget.set(3);
    let result = panic::catch_unwind(AssertUnwindSafe(|| original.clone()));
    assert!(result.is_err());
    assert_eq!(*counter.borrow(), 3, "The partial copy should have been dropped.");
    assert_eq!(original.len(), 5);
}

#[test]
fn test_clone_from() {
    // Grow path: the source doesn't fit.
    let source: Vector<_> = (0..6).collect();
    let mut dest: Vector<_> = (10..12).collect();
    dest.clone_from(&source);
    assert_eq!(dest, source);
    assert_eq!(dest.cap(), 6);

    // In place, smaller source.
    let mut dest: Vector<_> = (10..15).collect();
    let old_ptr = dest.as_ptr();
    dest.clone_from(&(0..2).collect());
    assert_eq!(&*dest, &[0, 1]);
    assert_eq!(dest.cap(), 5);
    assert_eq!(dest.as_ptr(), old_ptr, "Storage should be reused when the source fits.");

    // In place, larger source.
    let mut dest: Vector<i32> = Vector::with_cap(8);
    dest.extend([10, 11]);
    let old_ptr = dest.as_ptr();
    dest.clone_from(&(0..7).collect());
    assert_eq!(&*dest, &[0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(dest.as_ptr(), old_ptr, "Storage should be reused when the source fits.");

    // Dropping the destination's extra tail.
    let counter = CountedDrop::new(0);
    let mut dest = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(5));
    let source = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(2));
    dest.clone_from(&source);
    assert_eq!(dest.len(), 2);
    assert_eq!(*counter.borrow(), 3 + 2, "The tail and the overwritten values should be dropped.");
}

#[test]
fn test_clone_from_grow_unwinds() {
    let counter = CountedDrop::new(0);
    let budget = Rc::new(Cell::new(usize::MAX));
    let source = Vector::repeat_with(4, || LimitedClone::new(&counter, &budget));
    let mut dest = Vector::repeat_with(1, || LimitedClone::new(&counter, &budget));

    budget.set(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| dest.clone_from(&source)));
    assert!(result.is_err());
    assert_eq!(dest.len(), 1, "A failed copy-and-grow should leave the destination untouched.");
    assert_eq!(dest.cap(), 1);
}

#[test]
fn test_take_and_move_from() {
    let mut source: Vector<_> = (0..3).collect();
    let old_ptr = source.as_ptr();

    let moved = source.take();
    assert_eq!(&*moved, &[0, 1, 2]);
    assert_eq!(moved.as_ptr(), old_ptr, "Moving should steal the storage without copying.");
    assert_eq!(source.len(), 0);
    assert_eq!(source.cap(), 0);

    let counter = CountedDrop::new(0);
    let mut dest = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(3));
    let mut source = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(2));
    dest.move_from(&mut source);
    assert_eq!(*counter.borrow(), 3, "The destination's old elements should be dropped.");
    assert_eq!(dest.len(), 2);
    assert_eq!(source.len(), 0);
}

#[test]
fn test_swap() {
    let mut a: Vector<_> = (0..2).collect();
    let mut b: Vector<_> = (5..10).collect();
    a.swap(&mut b);
    assert_eq!(&*a, &[5, 6, 7, 8, 9]);
    assert_eq!(&*b, &[0, 1]);
    assert_eq!((a.cap(), b.cap()), (5, 2));
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut vec: Vector<CountedDrop> = Vector::with_cap(10);
    vec.extend(iter::repeat_with(|| counter.clone()).take(4));

    drop(vec);

    assert_eq!(
        counter.take(),
        4,
        "Only the live elements should have been dropped."
    );
}

#[test]
fn test_iterators() {
    let mut vec: Vector<usize> = (0..5).collect();

    for i in vec.iter_mut() {
        *i *= 2;
    }
    assert_eq!(*vec, [0, 2, 4, 6, 8]);

    let mut sum = 0;
    for i in &vec {
        sum += i;
    }
    assert_eq!(sum, 20);

    let mut iter = vec.clone().into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.as_slice(), &[2, 4, 6]);
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    let counter = CountedDrop::new(0);
    let vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(10));
    let mut iter = vec.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(*counter.borrow(), 2);

    drop(iter);
    assert_eq!(
        counter.take(),
        10,
        "Dropping an owned iterator should drop all remaining elements."
    );
}

#[test]
fn test_equality_and_hash() {
    let vec: Vector<usize> = (0..5).collect();

    assert_eq!(vec, [0, 1, 2, 3, 4].into_iter().collect());
    assert_ne!(vec, [0, 1, 2, 5, 4].into_iter().collect());

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&vec),
        state.hash_one([0_usize, 1, 2, 3, 4]),
        "Hash should match the equivalent slice."
    );
}

#[test]
fn test_formatting() {
    let vec: Vector<u8> = Vector::new();
    assert_eq!(format!("{vec}"), "[]");

    let mut vec: Vector<u8> = Vector::with_cap(4);
    vec.extend([1, 2]);
    assert_eq!(format!("{vec}"), "[1, 2]");
    assert_eq!(format!("{vec:?}"), "Vector { contents: [1, 2], len: 2, cap: 4 }");
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::<ZeroSizedType>::new();
    for _ in 0..10 {
        vec.push(ZeroSizedType);
    }
    assert_eq!(vec.len(), 10);
    assert_eq!(vec.cap(), 16);

    vec.insert(3, ZeroSizedType);
    assert_eq!(vec.remove(0), ZeroSizedType);
    assert_eq!(vec.len(), 10);
    assert_eq!(vec.iter().count(), 10);
    assert_eq!(vec.into_iter().count(), 10);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn repeated_push_doubles_capacity(count in 0_usize..300) {
            let mut vec = Vector::new();
            for i in 0..count {
                vec.push(i);
            }
            prop_assert_eq!(vec.len(), count);
            prop_assert_eq!(vec.cap(), if count == 0 { 0 } else { count.next_power_of_two() });
            prop_assert!(vec.iter().copied().eq(0..count));
        }

        #[test]
        fn insert_matches_slice_model(
            initial in proptest::collection::vec(any::<i32>(), 0..20),
            ops in proptest::collection::vec((any::<usize>(), any::<i32>()), 0..20),
        ) {
            let mut vec: Vector<i32> = initial.iter().copied().collect();
            let mut model = initial.clone();
            for (pos, value) in ops {
                let index = pos % (model.len() + 1);
                prop_assert_eq!(vec.insert(index, value), index);
                model.insert(index, value);
            }
            prop_assert_eq!(&*vec, model.as_slice());
            prop_assert!(vec.len() <= vec.cap());
        }

        #[test]
        fn erase_matches_slice_model(
            initial in proptest::collection::vec(any::<i32>(), 1..30),
            picks in proptest::collection::vec(any::<usize>(), 0..30),
        ) {
            let mut vec: Vector<i32> = initial.iter().copied().collect();
            let mut model = initial.clone();
            for pick in picks {
                if model.is_empty() {
                    break;
                }
                let index = pick % model.len();
                prop_assert_eq!(vec.erase(index), index);
                model.remove(index);
            }
            prop_assert_eq!(&*vec, model.as_slice());
        }

        #[test]
        fn resize_round_trip(initial in proptest::collection::vec(any::<u16>(), 0..30), n in 0_usize..60) {
            let mut vec: Vector<u16> = initial.iter().copied().collect();
            let original_len = vec.len();
            vec.resize(n);
            prop_assert_eq!(vec.len(), n);
            vec.resize(original_len);
            prop_assert_eq!(vec.len(), original_len);

            let kept = original_len.min(n);
            prop_assert_eq!(&vec[..kept], &initial[..kept]);
            prop_assert!(vec[kept..].iter().all(|v| *v == 0));
        }

        #[test]
        fn clone_from_matches_source(
            dest in proptest::collection::vec(any::<u8>(), 0..20),
            source in proptest::collection::vec(any::<u8>(), 0..20),
        ) {
            let mut dest: Vector<u8> = dest.into_iter().collect();
            let source: Vector<u8> = source.into_iter().collect();
            let old_cap = dest.cap();
            dest.clone_from(&source);
            prop_assert_eq!(&dest, &source);
            if source.len() <= old_cap {
                prop_assert_eq!(dest.cap(), old_cap);
            }
        }
    }
}
