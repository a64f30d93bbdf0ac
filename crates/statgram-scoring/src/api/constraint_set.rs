// Constraint batteries.
//
// A battery applies every constraint to one element. Tuples of constraints
// are dispatched statically; `Vec<C>` (including `Vec<Box<dyn Constraint<E>>>`)
// covers batteries assembled at runtime.

use statgram_core::{Constraint, Mark};

/// A battery of constraints over elements of type `E`.
pub trait ConstraintSet<E: ?Sized>: Send + Sync {
    /// Applies every constraint to `element`, passing each mark to `sink`.
    ///
    /// Zero marks are passed through; the evaluator drops them.
    fn for_each_mark<F: FnMut(Mark)>(&self, element: &E, sink: F);

    /// Returns the number of constraints in the battery.
    fn constraint_count(&self) -> usize;

    /// Returns the constraint names in battery order.
    fn names(&self) -> Vec<&str>;
}

impl<E: ?Sized, C: Constraint<E>> ConstraintSet<E> for Vec<C> {
    fn for_each_mark<F: FnMut(Mark)>(&self, element: &E, mut sink: F) {
        for c in self {
            sink(c.mark(element));
        }
    }

    fn constraint_count(&self) -> usize {
        self.len()
    }

    fn names(&self) -> Vec<&str> {
        self.iter().map(|c| c.name()).collect()
    }
}

impl<E: ?Sized, S: ConstraintSet<E> + ?Sized> ConstraintSet<E> for &S {
    #[inline]
    fn for_each_mark<F: FnMut(Mark)>(&self, element: &E, sink: F) {
        (**self).for_each_mark(element, sink)
    }

    fn constraint_count(&self) -> usize {
        (**self).constraint_count()
    }

    fn names(&self) -> Vec<&str> {
        (**self).names()
    }
}

// Empty battery: marks nothing.
impl<E: ?Sized> ConstraintSet<E> for () {
    #[inline]
    fn for_each_mark<F: FnMut(Mark)>(&self, _element: &E, _sink: F) {}

    fn constraint_count(&self) -> usize {
        0
    }

    fn names(&self) -> Vec<&str> {
        Vec::new()
    }
}

// Implements ConstraintSet for tuples of constraints.
macro_rules! impl_constraint_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<E, $($T),+> ConstraintSet<E> for ($($T,)+)
        where
            E: ?Sized,
            $($T: Constraint<E>,)+
        {
            #[inline]
            fn for_each_mark<F: FnMut(Mark)>(&self, element: &E, mut sink: F) {
                $(sink(self.$idx.mark(element));)+
            }

            #[inline]
            fn constraint_count(&self) -> usize {
                let mut count = 0;
                $(let _ = &self.$idx; count += 1;)+
                count
            }

            fn names(&self) -> Vec<&str> {
                vec![$(self.$idx.name()),+]
            }
        }
    };
}

impl_constraint_set_for_tuple!(0: C0);
impl_constraint_set_for_tuple!(0: C0, 1: C1);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10);
impl_constraint_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7, 8: C8, 9: C9, 10: C10, 11: C11);
