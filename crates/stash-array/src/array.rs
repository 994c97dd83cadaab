//! The reference table and its operations.
//!
//! The table is a boxed slice of [`ValueRef`]s: length always equals live
//! entry count, and there is never spare capacity. Mutations that change
//! the length build the replacement table first and swap it in only on
//! success — a failed allocation leaves the array exactly as it was.

use std::fmt;

use crate::error::ArrayError;
use crate::value::{TypeTag, ValueRef};

/// Ordered table of shared opaque references with a runtime type tag.
///
/// The tag is fixed at creation and changes only through
/// [`clear`](Array::clear) or [`copy_from`](Array::copy_from). The array
/// owns the table, never the payloads; see the crate docs for the
/// ownership contract.
#[derive(Debug)]
pub struct Array {
    table: Box<[ValueRef]>,
    tag: TypeTag,
}

impl Array {
    /// Create an empty array with the given interpretation tag.
    pub fn new(tag: TypeTag) -> Self {
        Self {
            table: Vec::new().into_boxed_slice(),
            tag,
        }
    }

    /// The current interpretation tag.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Append a reference, regrowing the table by exactly one slot.
    ///
    /// O(n): the whole table is rebuilt at the exact new size. Fails with
    /// [`ArrayError::AllocationFailed`] if the new table cannot be
    /// reserved, leaving the array untouched.
    pub fn push(&mut self, value: ValueRef) -> Result<(), ArrayError> {
        let mut table = Self::table_of(self.table.len() + 1)?;
        table.extend(self.table.iter().cloned());
        table.push(value);
        self.table = table.into_boxed_slice();
        Ok(())
    }

    /// The reference at `index`.
    ///
    /// An empty array has no valid index: `get(0)` on a zero-length array
    /// fails with [`ArrayError::IndexOutOfRange`] like any other
    /// out-of-bounds access.
    pub fn get(&self, index: usize) -> Result<ValueRef, ArrayError> {
        self.check(index)?;
        Ok(self.table[index].clone())
    }

    /// Overwrite the slot at `index` in place. Same bounds contract as
    /// [`Array::get`].
    pub fn set(&mut self, index: usize, value: ValueRef) -> Result<(), ArrayError> {
        self.check(index)?;
        self.table[index] = value;
        Ok(())
    }

    /// Remove and return the last reference, shrinking the table by
    /// exactly one slot. Fails with [`ArrayError::Empty`] on a zero-length
    /// array.
    pub fn pop(&mut self) -> Result<ValueRef, ArrayError> {
        let last = self.table.len().checked_sub(1).ok_or(ArrayError::Empty)?;
        let value = self.table[last].clone();
        let mut table = Self::table_of(last)?;
        table.extend(self.table[..last].iter().cloned());
        self.table = table.into_boxed_slice();
        Ok(value)
    }

    /// Exchange two slots. Fails with [`ArrayError::IndexOutOfRange`] if
    /// either index is invalid.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), ArrayError> {
        self.check(a)?;
        self.check(b)?;
        self.table.swap(a, b);
        Ok(())
    }

    /// Drop the reference table and re-tag the array.
    ///
    /// Referenced payloads are untouched; releasing them stays the
    /// caller's responsibility.
    pub fn clear(&mut self, tag: TypeTag) {
        self.table = Vec::new().into_boxed_slice();
        self.tag = tag;
    }

    /// Mirror the element order via an O(n) temporary buffer.
    ///
    /// Reversing twice restores the original order exactly. Fails with
    /// [`ArrayError::AllocationFailed`] if the buffer cannot be reserved,
    /// leaving the order untouched.
    pub fn reverse(&mut self) -> Result<(), ArrayError> {
        let mut buffer = Self::table_of(self.table.len())?;
        buffer.extend(self.table.iter().rev().cloned());
        for (slot, value) in self.table.iter_mut().zip(buffer) {
            *slot = value;
        }
        Ok(())
    }

    /// Index of the first element equal to `value` under the array's tag,
    /// or `None`.
    ///
    /// Integer tags compare numeric value, character tags the single
    /// character, text tags full content. Opaque equality is undefined, so
    /// an opaque-tagged array always reports `None`.
    pub fn find(&self, value: &ValueRef) -> Option<usize> {
        self.table.iter().position(|v| self.tag.matches(v, value))
    }

    /// Quicksort the whole table. Integer tag only; a no-op for every
    /// other tag.
    pub fn sort(&mut self) {
        if self.tag != TypeTag::Integer || self.table.len() < 2 {
            return;
        }
        self.quicksort(0, (self.table.len() - 1) as isize);
    }

    /// Quicksort the inclusive slot range `low..=high`.
    ///
    /// Same tag restriction as [`Array::sort`]: only an integer-tagged
    /// array is ever reordered — text and opaque tables keep their order,
    /// a deliberate scope limit. Fails with
    /// [`ArrayError::IndexOutOfRange`] if either bound is invalid.
    pub fn sort_range(&mut self, low: usize, high: usize) -> Result<(), ArrayError> {
        self.check(low)?;
        self.check(high)?;
        if self.tag == TypeTag::Integer && high > low {
            self.quicksort(low as isize, high as isize);
        }
        Ok(())
    }

    /// Sum of all values under the Integer tag; 0 for every other tag.
    ///
    /// A zero result is not an error signal — a text-tagged array sums to
    /// 0 by definition, so callers must not read 0 as "no failure" for
    /// non-integer arrays. Accumulation wraps on two's-complement
    /// overflow.
    pub fn sum(&self) -> i64 {
        if self.tag != TypeTag::Integer {
            return 0;
        }
        self.table
            .iter()
            .fold(0i64, |acc, v| acc.wrapping_add(v.as_int().unwrap_or(0)))
    }

    /// Insert a reference at `index`, shifting later elements right.
    ///
    /// `index == len` appends; `index > len` fails with
    /// [`ArrayError::IndexOutOfRange`]. O(n): the table is rebuilt at the
    /// exact new size.
    pub fn insert(&mut self, index: usize, value: ValueRef) -> Result<(), ArrayError> {
        if index == self.table.len() {
            return self.push(value);
        }
        self.check(index)?;
        let mut table = Self::table_of(self.table.len() + 1)?;
        table.extend(self.table[..index].iter().cloned());
        table.push(value);
        table.extend(self.table[index..].iter().cloned());
        self.table = table.into_boxed_slice();
        Ok(())
    }

    /// Structural copy: replace this array's table with a fresh exact-size
    /// duplicate of `src`'s, adopting `src`'s tag. A no-op when `src` is
    /// empty.
    ///
    /// The two tables are independent afterward — a [`set`](Array::set) on
    /// one never shows through the other — but they hold the *same*
    /// references, so mutating a referenced payload is visible through
    /// both.
    pub fn copy_from(&mut self, src: &Array) -> Result<(), ArrayError> {
        if src.is_empty() {
            return Ok(());
        }
        let mut table = Self::table_of(src.len())?;
        table.extend(src.table.iter().cloned());
        self.table = table.into_boxed_slice();
        self.tag = src.tag;
        Ok(())
    }

    /// Last-element-pivot partition: values ≤ pivot move left, the pivot
    /// lands at the partition point.
    fn partition(&mut self, low: usize, high: usize) -> usize {
        let pivot = self.key(high);
        let mut next = low;
        for j in low..high {
            if self.key(j) <= pivot {
                self.table.swap(next, j);
                next += 1;
            }
        }
        self.table.swap(next, high);
        next
    }

    /// Recurse only into the smaller partition and loop on the larger, so
    /// stack depth stays O(log n) even for already-sorted input, where the
    /// last-element pivot degenerates to one-off partitions.
    fn quicksort(&mut self, mut low: isize, mut high: isize) {
        while low < high {
            let p = self.partition(low as usize, high as usize) as isize;
            if p - low < high - p {
                self.quicksort(low, p - 1);
                low = p + 1;
            } else {
                self.quicksort(p + 1, high);
                high = p - 1;
            }
        }
    }

    /// Integer sort key; a mismatched payload sorts as 0.
    fn key(&self, index: usize) -> i64 {
        self.table[index].as_int().unwrap_or(0)
    }

    fn check(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.table.len() {
            Ok(())
        } else {
            Err(ArrayError::IndexOutOfRange {
                index,
                len: self.table.len(),
            })
        }
    }

    /// Exact-size table builder; the only allocation point for tables.
    fn table_of(len: usize) -> Result<Vec<ValueRef>, ArrayError> {
        let mut table = Vec::new();
        table
            .try_reserve_exact(len)
            .map_err(|_| ArrayError::AllocationFailed)?;
        Ok(table)
    }
}

impl fmt::Display for Array {
    /// Render as `{ e1, e2, ..., en }` with per-element form chosen by the
    /// tag: decimal integer, literal character, quoted text, or reference
    /// identity for opaque. Human inspection only, not machine-parseable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            return write!(f, "{{ }}");
        }
        write!(f, "{{ ")?;
        for (i, v) in self.table.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.tag.render(v, f)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn ints(values: &[i64]) -> Array {
        let mut arr = Array::new(TypeTag::Integer);
        for &v in values {
            arr.push(ValueRef::int(v)).unwrap();
        }
        arr
    }

    fn as_ints(arr: &Array) -> Vec<i64> {
        (0..arr.len())
            .map(|i| arr.get(i).unwrap().as_int().unwrap())
            .collect()
    }

    #[test]
    fn new_array_is_empty_with_tag() {
        let arr = Array::new(TypeTag::Text);
        assert!(arr.is_empty());
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.tag(), TypeTag::Text);
    }

    #[test]
    fn push_get_pop_sequence() {
        let mut arr = ints(&[1, 2, 3]);
        assert_eq!(as_ints(&arr), vec![1, 2, 3]);
        assert_eq!(arr.pop().unwrap().as_int(), Some(3));
        assert_eq!(arr.len(), 2);
        assert_eq!(as_ints(&arr), vec![1, 2]);
    }

    #[test]
    fn pop_on_empty_signals_empty() {
        let mut arr = Array::new(TypeTag::Integer);
        assert_eq!(arr.pop().unwrap_err(), ArrayError::Empty);
    }

    #[test]
    fn empty_array_has_no_valid_index() {
        let mut arr = Array::new(TypeTag::Integer);
        let oob = ArrayError::IndexOutOfRange { index: 0, len: 0 };
        assert_eq!(arr.get(0).unwrap_err(), oob);
        assert_eq!(arr.set(0, ValueRef::int(1)).unwrap_err(), oob);
        assert_eq!(arr.swap(0, 0).unwrap_err(), oob);
    }

    #[test]
    fn get_and_set_bounds() {
        let mut arr = ints(&[7]);
        assert_eq!(
            arr.get(1).unwrap_err(),
            ArrayError::IndexOutOfRange { index: 1, len: 1 }
        );
        arr.set(0, ValueRef::int(9)).unwrap();
        assert_eq!(as_ints(&arr), vec![9]);
    }

    #[test]
    fn swap_exchanges_slots() {
        let mut arr = ints(&[1, 2, 3]);
        arr.swap(0, 2).unwrap();
        assert_eq!(as_ints(&arr), vec![3, 2, 1]);
        assert!(arr.swap(0, 3).is_err());
    }

    #[test]
    fn clear_retags_and_empties() {
        let mut arr = ints(&[1, 2]);
        arr.clear(TypeTag::Character);
        assert!(arr.is_empty());
        assert_eq!(arr.tag(), TypeTag::Character);
    }

    #[test]
    fn reverse_twice_is_identity() {
        let mut arr = ints(&[1, 2, 3]);
        arr.reverse().unwrap();
        assert_eq!(as_ints(&arr), vec![3, 2, 1]);
        arr.reverse().unwrap();
        assert_eq!(as_ints(&arr), vec![1, 2, 3]);
    }

    #[test]
    fn find_per_tag() {
        let arr = ints(&[4, 8, 8]);
        assert_eq!(arr.find(&ValueRef::int(8)), Some(1));
        assert_eq!(arr.find(&ValueRef::int(5)), None);

        let mut chars = Array::new(TypeTag::Character);
        chars.push(ValueRef::character('a')).unwrap();
        chars.push(ValueRef::character('b')).unwrap();
        assert_eq!(chars.find(&ValueRef::character('b')), Some(1));

        let mut texts = Array::new(TypeTag::Text);
        texts.push(ValueRef::text("hi")).unwrap();
        assert_eq!(texts.find(&ValueRef::text("hi")), Some(0));
        assert_eq!(texts.find(&ValueRef::text("hi!")), None);
    }

    #[test]
    fn find_on_opaque_tag_is_undefined_hence_none() {
        let mut arr = Array::new(TypeTag::Opaque);
        let v = ValueRef::opaque(Box::new(1u8));
        arr.push(v.clone()).unwrap();
        assert_eq!(arr.find(&v), None);
    }

    #[test]
    fn sort_orders_integers() {
        let mut arr = ints(&[5, 3, 8, 1]);
        arr.sort();
        assert_eq!(as_ints(&arr), vec![1, 3, 5, 8]);
        // Idempotent on sorted input.
        arr.sort();
        assert_eq!(as_ints(&arr), vec![1, 3, 5, 8]);
    }

    #[test]
    fn sort_already_sorted_large_input_stays_within_stack() {
        // The last-element pivot degenerates to one-off partitions on
        // sorted input; depth must stay logarithmic, not linear.
        let mut arr = Array::new(TypeTag::Integer);
        for v in 0..30_000i64 {
            arr.push(ValueRef::int(v)).unwrap();
        }
        arr.sort();
        let vals = as_ints(&arr);
        assert_eq!(vals.len(), 30_000);
        assert!(vals.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(vals[0], 0);
        assert_eq!(vals[29_999], 29_999);
    }

    #[test]
    fn sort_range_orders_only_the_range() {
        let mut arr = ints(&[9, 4, 2, 7, 0]);
        arr.sort_range(1, 3).unwrap();
        assert_eq!(as_ints(&arr), vec![9, 2, 4, 7, 0]);
        assert!(arr.sort_range(0, 5).is_err());
    }

    #[test]
    fn sort_is_noop_for_non_integer_tags() {
        let mut arr = Array::new(TypeTag::Text);
        for s in ["b", "a", "c"] {
            arr.push(ValueRef::text(s)).unwrap();
        }
        arr.sort();
        arr.sort_range(0, 2).unwrap();
        let first = arr.get(0).unwrap();
        assert_eq!(first.as_text().as_deref(), Some("b"));
    }

    #[test]
    fn sum_integer_and_zero_elsewhere() {
        assert_eq!(ints(&[5, 10, -3]).sum(), 12);
        let mut texts = Array::new(TypeTag::Text);
        texts.push(ValueRef::text("one")).unwrap();
        // Documented behavior: zero, not an error.
        assert_eq!(texts.sum(), 0);
        assert_eq!(Array::new(TypeTag::Opaque).sum(), 0);
    }

    #[test]
    fn sum_wraps_on_overflow() {
        let mut arr = ints(&[i64::MAX, 1]);
        assert_eq!(arr.sum(), i64::MIN);
        arr.push(ValueRef::int(-1)).unwrap();
        assert_eq!(arr.sum(), i64::MAX);
    }

    #[test]
    fn insert_shifts_right() {
        let mut arr = ints(&[1, 2, 3]);
        arr.insert(1, ValueRef::int(99)).unwrap();
        assert_eq!(as_ints(&arr), vec![1, 99, 2, 3]);
    }

    #[test]
    fn insert_at_len_appends_and_past_len_fails() {
        let mut arr = ints(&[1]);
        arr.insert(1, ValueRef::int(2)).unwrap();
        assert_eq!(as_ints(&arr), vec![1, 2]);
        assert_eq!(
            arr.insert(3, ValueRef::int(9)).unwrap_err(),
            ArrayError::IndexOutOfRange { index: 3, len: 2 }
        );
    }

    #[test]
    fn copy_from_shares_references_not_tables() {
        let src = ints(&[1, 2]);
        let mut dest = Array::new(TypeTag::Text);
        dest.push(ValueRef::text("stale")).unwrap();
        dest.copy_from(&src).unwrap();

        assert_eq!(dest.tag(), TypeTag::Integer);
        assert!(ValueRef::same(
            &dest.get(0).unwrap(),
            &src.get(0).unwrap()
        ));

        // Independent tables: a set on dest leaves src alone.
        dest.set(0, ValueRef::int(50)).unwrap();
        assert_eq!(src.get(0).unwrap().as_int(), Some(1));

        // Shared payloads: mutating through one handle shows through both.
        src.get(1).unwrap().set(Value::Int(77));
        assert_eq!(dest.get(1).unwrap().as_int(), Some(77));
    }

    #[test]
    fn copy_from_empty_src_is_noop() {
        let src = Array::new(TypeTag::Integer);
        let mut dest = Array::new(TypeTag::Text);
        dest.push(ValueRef::text("kept")).unwrap();
        dest.copy_from(&src).unwrap();
        assert_eq!(dest.len(), 1);
        assert_eq!(dest.tag(), TypeTag::Text);
    }

    #[test]
    fn display_per_tag() {
        assert_eq!(ints(&[1, 2, 3]).to_string(), "{ 1, 2, 3 }");
        assert_eq!(Array::new(TypeTag::Integer).to_string(), "{ }");

        let mut chars = Array::new(TypeTag::Character);
        chars.push(ValueRef::character('h')).unwrap();
        chars.push(ValueRef::character('i')).unwrap();
        assert_eq!(chars.to_string(), "{ h, i }");

        let mut texts = Array::new(TypeTag::Text);
        texts.push(ValueRef::text("a")).unwrap();
        texts.push(ValueRef::text("b")).unwrap();
        assert_eq!(texts.to_string(), "{ \"a\", \"b\" }");

        let mut opaques = Array::new(TypeTag::Opaque);
        opaques.push(ValueRef::opaque(Box::new(0u8))).unwrap();
        let rendered = opaques.to_string();
        assert!(rendered.starts_with("{ 0x"), "got {rendered}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sort_matches_std_sort(values in proptest::collection::vec(any::<i64>(), 0..64)) {
                let mut arr = ints(&values);
                arr.sort();
                let mut expected = values;
                expected.sort_unstable();
                prop_assert_eq!(as_ints(&arr), expected);
            }

            #[test]
            fn double_reverse_is_identity(values in proptest::collection::vec(any::<i64>(), 0..64)) {
                let mut arr = ints(&values);
                arr.reverse().unwrap();
                arr.reverse().unwrap();
                prop_assert_eq!(as_ints(&arr), values);
            }

            #[test]
            fn insert_matches_vec_insert(
                values in proptest::collection::vec(any::<i64>(), 0..32),
                index in 0usize..40,
                value in any::<i64>(),
            ) {
                let mut arr = ints(&values);
                let mut model = values;
                if index <= model.len() {
                    arr.insert(index, ValueRef::int(value)).unwrap();
                    model.insert(index, value);
                } else {
                    prop_assert!(arr.insert(index, ValueRef::int(value)).is_err());
                }
                prop_assert_eq!(as_ints(&arr), model);
            }

            #[test]
            fn pop_returns_last_pushed(values in proptest::collection::vec(any::<i64>(), 1..32)) {
                let mut arr = ints(&values);
                for &expected in values.iter().rev() {
                    prop_assert_eq!(arr.pop().unwrap().as_int(), Some(expected));
                }
                prop_assert_eq!(arr.pop().unwrap_err(), ArrayError::Empty);
            }
        }
    }
}
