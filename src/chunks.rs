//! Chunked array walking.
//!
//! Wire arrays expose only a length and a bulk-copy primitive that may hand
//! back fewer elements than requested. [`walk_indexed`] turns that paged API
//! into a single per-element callback stream in ascending index order, with
//! no duplicated or skipped indices, for any element kind. This is the one
//! iteration algorithm shared by every array decode path.

use crate::models::PvArray;

/// A bulk, paged source of array elements.
///
/// Implementors provide the two primitives the walker needs: the total
/// length, and a copy that fills a caller-allocated buffer starting at an
/// offset and reports how many elements it actually delivered.
pub trait ChunkSource {
    /// Element type delivered by this source.
    type Elem: Clone + Default;

    /// Total number of elements.
    fn len(&self) -> usize;

    /// True if the source holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy elements starting at `offset` into `dest`, returning the count
    /// actually copied. May return fewer than `dest.len()` even when more
    /// data remains past the copied range.
    fn copy_chunk(&self, offset: usize, dest: &mut [Self::Elem]) -> usize;
}

impl<T: Clone + Default> ChunkSource for PvArray<T> {
    type Elem = T;

    fn len(&self) -> usize {
        PvArray::len(self)
    }

    fn copy_chunk(&self, offset: usize, dest: &mut [T]) -> usize {
        PvArray::copy_chunk(self, offset, dest)
    }
}

/// Walk every element of `source` in index order, passing each element and
/// its index to `consumer`.
///
/// Partial chunks resume at the next offset until the full length is
/// covered. A source that stops making progress is treated as exhausted.
pub fn walk_indexed<S, F>(source: &S, mut consumer: F)
where
    S: ChunkSource + ?Sized,
    F: FnMut(S::Elem, usize),
{
    let len = source.len();
    let mut offset = 0;
    while offset < len {
        let mut buffer = vec![S::Elem::default(); len - offset];
        let copied = source.copy_chunk(offset, &mut buffer);
        if copied == 0 {
            break;
        }
        buffer.truncate(copied);
        for (i, element) in buffer.into_iter().enumerate() {
            consumer(element, offset + i);
        }
        offset += copied;
    }
}

/// Walk every element of `source` in index order without the index.
pub fn walk<S, F>(source: &S, mut consumer: F)
where
    S: ChunkSource + ?Sized,
    F: FnMut(S::Elem),
{
    walk_indexed(source, |element, _| consumer(element));
}

/// Materialize every element of `source` into an ordered `Vec`.
pub fn collect_all<S>(source: &S) -> Vec<S::Elem>
where
    S: ChunkSource + ?Sized,
{
    let mut values = Vec::with_capacity(source.len());
    walk(source, |element| values.push(element));
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that serves at most `max_chunk` elements per copy, to exercise
    /// partial-chunk resumption independently of segment layout.
    struct Throttled {
        data: Vec<i32>,
        max_chunk: usize,
    }

    impl ChunkSource for Throttled {
        type Elem = i32;

        fn len(&self) -> usize {
            self.data.len()
        }

        fn copy_chunk(&self, offset: usize, dest: &mut [i32]) -> usize {
            let count = dest.len().min(self.max_chunk).min(self.data.len() - offset);
            dest[..count].copy_from_slice(&self.data[offset..offset + count]);
            count
        }
    }

    #[test]
    fn walk_covers_all_indices_in_order() {
        let source = Throttled { data: (0..10).collect(), max_chunk: 3 };
        let mut seen = Vec::new();
        walk_indexed(&source, |element, index| seen.push((element, index)));

        assert_eq!(seen.len(), 10, "every element visited exactly once");
        for (i, (element, index)) in seen.iter().enumerate() {
            assert_eq!(*index, i, "indices ascend without gaps");
            assert_eq!(*element, i as i32);
        }
    }

    #[test]
    fn walk_handles_chunk_larger_than_data() {
        let source = Throttled { data: vec![7, 8], max_chunk: 100 };
        assert_eq!(collect_all(&source), vec![7, 8]);
    }

    #[test]
    fn walk_empty_source_never_calls_consumer() {
        let source = Throttled { data: Vec::new(), max_chunk: 4 };
        let mut calls = 0;
        walk(&source, |_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn walk_segmented_pv_array_resumes_across_segments() {
        let array = PvArray::segmented((0..25).collect::<Vec<i64>>(), 4);
        let collected = collect_all(&array);
        assert_eq!(collected, (0..25).collect::<Vec<i64>>());
    }

    #[test]
    fn walk_string_elements() {
        let array = PvArray::segmented(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            2,
        );
        let collected = collect_all(&array);
        assert_eq!(collected, vec!["a", "b", "c"]);
    }
}
