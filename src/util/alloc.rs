#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A value that counts its drops like [`CountedDrop`] and panics once a shared budget of clones
/// has been used up.
#[derive(Debug)]
pub struct LimitedClone {
    pub drops: CountedDrop,
    pub budget: Rc<Cell<usize>>,
}

impl LimitedClone {
    pub fn new(drops: &CountedDrop, budget: &Rc<Cell<usize>>) -> LimitedClone {
        LimitedClone {
            drops: drops.clone(),
            budget: budget.clone(),
        }
    }
}

impl Clone for LimitedClone {
    fn clone(&self) -> Self {
        let remaining = self.budget.get();
        if remaining == 0 {
            panic!("clone budget exhausted");
        }
        self.budget.set(remaining - 1);
        LimitedClone::new(&self.drops, &self.budget)
    }
}
