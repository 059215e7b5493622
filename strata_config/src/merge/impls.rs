//! [`MergeLeft`] for standard library types.
//!
//! Scalars compare against their zero value. Pointer, collection and
//! optional kinds are reference-like: only their presence is inspected and
//! the chosen operand is moved into the result without looking inside.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use super::MergeLeft;

macro_rules! zero_by_eq {
    ($zero:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl MergeLeft for $ty {
                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

zero_by_eq!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
zero_by_eq!(false => bool);
zero_by_eq!('\0' => char);
zero_by_eq!(Duration::ZERO => Duration);

// Only positive zero is zero; `-0.0` and NaN are set values.
impl MergeLeft for f32 {
    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }
}

impl MergeLeft for f64 {
    fn is_zero(&self) -> bool {
        self.to_bits() == 0
    }
}

impl MergeLeft for () {
    fn is_zero(&self) -> bool {
        true
    }
}

impl MergeLeft for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl MergeLeft for &str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl MergeLeft for PathBuf {
    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl<T: MergeLeft, const N: usize> MergeLeft for [T; N] {
    fn is_zero(&self) -> bool {
        self.iter().all(MergeLeft::is_zero)
    }
}

impl<T> MergeLeft for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T> MergeLeft for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> MergeLeft for VecDeque<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S: BuildHasher> MergeLeft for HashMap<K, V, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> MergeLeft for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S: BuildHasher> MergeLeft for HashSet<T, S> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> MergeLeft for BTreeSet<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

// Smart pointers are never null, so their zero value is a pointer to a zero
// pointee. The pointer itself is handed over; the pointee is never merged.
impl<T: MergeLeft> MergeLeft for Box<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: MergeLeft> MergeLeft for Rc<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: MergeLeft> MergeLeft for Arc<T> {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}
