//! Reinterpretation of views as views of another element type.
//!
//! The byte range is kept, only the element type and count change. Element
//! types are bounded by bytemuck traits, so any bit pattern read through
//! the new type is a valid value.
use crate::error::Result;
use crate::sink::report;
use crate::view::ArrayView;
use crate::view_mut::ArrayViewMut;
use bytemuck::{AnyBitPattern, NoUninit, Pod};
use std::marker::PhantomData;
use std::mem::{align_of, size_of};

/// Marks `Self` as storable in place of `T`.
///
/// Used by `from_compatible` constructors to view e.g. a slice of a
/// newtype as a slice of its inner type. Size equality and alignment are
/// still asserted at compile time.
///
/// # Safety
///
/// Every value of `Self` must be a valid value of `T` and vice versa, and
/// `Self` must have the same size as `T`.
pub unsafe trait LayoutCompatible<T> {}

unsafe impl<T> LayoutCompatible<T> for T {}

struct SameLayout<U, T>(PhantomData<(U, T)>);

impl<U, T> SameLayout<U, T> {
    const OK: () = {
        assert!(
            size_of::<U>() == size_of::<T>(),
            "layout-compatible types differ in size"
        );
        assert!(
            align_of::<U>() % align_of::<T>() == 0,
            "layout-compatible type is less aligned"
        );
    };
}

/// Fails to compile when `U` cannot stand in for `T`.
#[inline]
pub(crate) fn assert_same_layout<U, T>() {
    let () = SameLayout::<U, T>::OK;
}

/// Reinterpret a read-only view as elements of `U`.
///
/// The total byte count must be divisible by `size_of::<U>()` and a
/// non-null base must be aligned for `U`. Otherwise the error is reported
/// and an empty view returned.
///
/// ```
/// use xview::{array_cast, ArrayView};
///
/// let data = [1u64, 2, 3];
/// let words: ArrayView<u32> = array_cast(ArrayView::from(&data));
/// assert_eq!(6, words.len());
/// ```
#[inline]
pub fn array_cast<'a, T: NoUninit, U: AnyBitPattern>(view: ArrayView<'a, T>) -> ArrayView<'a, U> {
    match try_array_cast(view) {
        Ok(v) => v,
        Err(e) => {
            report("array_cast", &e);
            ArrayView::new()
        }
    }
}

#[inline]
pub fn try_array_cast<'a, T: NoUninit, U: AnyBitPattern>(
    view: ArrayView<'a, T>,
) -> Result<ArrayView<'a, U>> {
    view.raw().cast::<U>().map(ArrayView::from_raw)
}

/// Mutable counterpart of [`array_cast`]. Both sides must be [`Pod`] since
/// writes go through the new type.
#[inline]
pub fn array_cast_mut<'a, T: Pod, U: Pod>(view: ArrayViewMut<'a, T>) -> ArrayViewMut<'a, U> {
    match try_array_cast_mut(view) {
        Ok(v) => v,
        Err(e) => {
            report("array_cast", &e);
            ArrayViewMut::new()
        }
    }
}

#[inline]
pub fn try_array_cast_mut<'a, T: Pod, U: Pod>(
    view: ArrayViewMut<'a, T>,
) -> Result<ArrayViewMut<'a, U>> {
    view.raw().cast::<U>().map(ArrayViewMut::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sink::Redirect;
    use rand::Rng;

    #[repr(C, align(8))]
    struct Aligned<T>(T);

    #[test]
    fn test_cast_widen_and_narrow() {
        let data = Aligned([1u32, 0, 2, 0, 3, 0]);
        let a = ArrayView::from(&data.0);
        let b: ArrayView<u64> = array_cast(a);
        let c: ArrayView<u16> = array_cast(a);
        assert!(b.as_ptr() as *const u8 == a.as_ptr() as *const u8);
        assert!(c.as_ptr() as *const u8 == a.as_ptr() as *const u8);
        assert_eq!(3, b.len());
        assert_eq!(12, c.len());
        if cfg!(target_endian = "little") {
            assert_eq!(&[1, 2, 3], b.as_slice());
        }
    }

    #[test]
    fn test_cast_invalid() {
        let data = Aligned(*b"abcdefghij");
        let a = ArrayView::from(&data.0);
        let (_guard, sink) = Redirect::collect();
        let b: ArrayView<u16> = array_cast(a);
        assert_eq!(5, b.len());
        let c: ArrayView<u32> = array_cast(a);
        assert!(c.is_null());
        assert!(c.is_empty());
        assert_eq!(
            "array_cast(): can't reinterpret 10 1-byte items into a 4-byte type\n",
            sink.output()
        );
    }

    #[test]
    fn test_cast_misaligned() {
        let data = Aligned([0u8; 16]);
        let a = ArrayView::from(&data.0).slice(1, 9);
        assert!(matches!(
            try_array_cast::<u8, u64>(a),
            Err(Error::Misaligned { align: 8, .. })
        ));
        let (_guard, sink) = Redirect::collect();
        let b: ArrayView<u32> = a.cast();
        assert!(b.is_empty());
        assert_eq!(1, sink.take().len());
    }

    #[test]
    fn test_cast_mut_writes_through() {
        let mut data = [0u64; 2];
        {
            let a = ArrayViewMut::from(&mut data);
            let mut b: ArrayViewMut<u32> = array_cast_mut(a);
            assert_eq!(4, b.len());
            for v in b.iter_mut() {
                *v = u32::MAX;
            }
        }
        assert_eq!([u64::MAX; 2], data);
    }

    #[test]
    fn test_cast_null_sized() {
        let a = ArrayView::<u32>::null_sized(4);
        let b: ArrayView<u8> = array_cast(a);
        assert!(b.is_null());
        assert_eq!(16, b.len());
    }

    #[test]
    fn test_cast_random_lengths() -> anyhow::Result<()> {
        let data = [0x0102_0304_0506_0708u64; 8];
        let bytes: &[u8] = bytemuck::cast_slice(&data);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let n = rng.gen_range(0..=bytes.len());
            let v = ArrayView::from(&bytes[..n]);
            match try_array_cast::<u8, u32>(v) {
                Ok(w) => {
                    assert_eq!(0, n % 4);
                    assert_eq!(n / 4, w.len());
                    let back: ArrayView<u8> = try_array_cast(w)?;
                    assert_eq!(v.as_slice(), back.as_slice());
                }
                Err(e) => {
                    assert_ne!(0, n % 4);
                    assert_eq!(
                        Error::InvalidCast {
                            count: n,
                            src_size: 1,
                            dst_size: 4
                        },
                        e
                    );
                }
            }
        }
        Ok(())
    }
}
