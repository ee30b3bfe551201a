use crate::error::Result;
use crate::external::{ErasedExternalView, ExternalView, FromArrayView};
use crate::fixed::{StaticArrayView, StaticArrayViewMut};
use crate::raw::RawView;
use crate::view::ArrayView;
use crate::view_mut::ArrayViewMut;
use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;

/// ErasedView is a non-owning view of bytes whose element type was dropped.
///
/// Only the address and the size in bytes are kept. Erasing a null-sized
/// view whose byte size does not fit in `usize` gives `usize::MAX` bytes.
/// There is no element
/// access; the view exists to pass typed data through untyped interfaces
/// and, if the caller knows the type, get it back with
/// [`ErasedView::to_typed`].
pub struct ErasedView<'a> {
    ptr: *const (),
    len: usize,
    _marker: PhantomData<&'a [u8]>,
}

// SAFETY: the memory is never accessed through ErasedView.
unsafe impl<'a> Send for ErasedView<'a> {}
unsafe impl<'a> Sync for ErasedView<'a> {}

impl<'a> ErasedView<'a> {
    #[inline]
    pub const fn new() -> Self {
        ErasedView {
            ptr: std::ptr::null(),
            len: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn null() -> Self {
        Self::new()
    }

    /// # Safety
    ///
    /// A non-null `ptr` must address `bytes` bytes valid for `'a`.
    #[inline]
    pub const unsafe fn from_raw_parts(ptr: *const (), bytes: usize) -> Self {
        ErasedView {
            ptr,
            len: bytes,
            _marker: PhantomData,
        }
    }

    /// The byte size saturates at `usize::MAX`, which only a null-sized
    /// placeholder can reach.
    #[inline]
    fn from_typed<T>(ptr: *const T, count: usize) -> Self {
        ErasedView {
            ptr: ptr as *const (),
            len: count.saturating_mul(size_of::<T>()),
            _marker: PhantomData,
        }
    }

    /// Erase a foreign view registered with [`ErasedExternalView`].
    #[inline]
    pub fn from_external<F>(external: F) -> Self
    where
        F: ErasedExternalView<'a> + ExternalView<'a, <F as ErasedExternalView<'a>>::Element>,
    {
        ErasedView::from(external.to_array_view())
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const () {
        self.ptr
    }

    #[inline]
    pub const fn data(&self) -> *const () {
        self.ptr
    }

    /// Size in bytes.
    #[doc(alias = "size")]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Recover a typed view.
    ///
    /// Fails if the byte size is not a multiple of `size_of::<U>()` or the
    /// pointer is not aligned for `U`.
    ///
    /// # Safety
    ///
    /// Every `size_of::<U>()` bytes must be a valid `U`.
    #[inline]
    pub unsafe fn to_typed<U>(&self) -> Result<ArrayView<'a, U>> {
        RawView::new(self.ptr as *mut u8, self.len)
            .cast::<U>()
            .map(ArrayView::from_raw)
    }

    /// Recover a foreign view, see [`ErasedView::to_typed`].
    ///
    /// # Safety
    ///
    /// Same as [`ErasedView::to_typed`] for `F::Element`.
    #[inline]
    pub unsafe fn into_external<F>(self) -> Result<F>
    where
        F: ErasedExternalView<'a> + FromArrayView<'a, <F as ErasedExternalView<'a>>::Element>,
    {
        self.to_typed::<F::Element>().map(F::from_array_view)
    }
}

impl<'a> Clone for ErasedView<'a> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a> Copy for ErasedView<'a> {}

impl<'a> Default for ErasedView<'a> {
    #[inline]
    fn default() -> Self {
        ErasedView::new()
    }
}

impl<'a> fmt::Debug for ErasedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedView")
            .field("ptr", &self.ptr)
            .field("bytes", &self.len)
            .finish()
    }
}

impl<'a, T> From<&'a [T]> for ErasedView<'a> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        ErasedView::from_typed(slice.as_ptr(), slice.len())
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ErasedView<'a> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        ErasedView::from_typed(array.as_ptr(), N)
    }
}

impl<'a, T> From<ArrayView<'a, T>> for ErasedView<'a> {
    #[inline]
    fn from(view: ArrayView<'a, T>) -> Self {
        ErasedView::from_typed(view.as_ptr(), view.len())
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for ErasedView<'a> {
    #[inline]
    fn from(view: ArrayViewMut<'a, T>) -> Self {
        ErasedView::from_typed(view.as_ptr(), view.len())
    }
}

impl<'a, T, const N: usize> From<StaticArrayView<'a, T, N>> for ErasedView<'a> {
    #[inline]
    fn from(view: StaticArrayView<'a, T, N>) -> Self {
        ErasedView::from_typed(view.as_ptr(), N)
    }
}

impl<'a, T, const N: usize> From<StaticArrayViewMut<'a, T, N>> for ErasedView<'a> {
    #[inline]
    fn from(view: StaticArrayViewMut<'a, T, N>) -> Self {
        ErasedView::from_typed(view.as_ptr(), N)
    }
}

impl<'a> From<ErasedView<'a>> for *const () {
    #[inline]
    fn from(view: ErasedView<'a>) -> Self {
        view.ptr
    }
}

impl<'a, 'b> PartialEq<ErasedView<'b>> for ErasedView<'a> {
    #[inline]
    fn eq(&self, other: &ErasedView<'b>) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a> Eq for ErasedView<'a> {}

impl<'a, T> PartialEq<*const T> for ErasedView<'a> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.ptr == *other as *const ()
    }
}

impl<'a, T> PartialEq<*mut T> for ErasedView<'a> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.ptr == *other as *const ()
    }
}

impl<'a, 'b, T> PartialEq<ArrayView<'b, T>> for ErasedView<'a> {
    #[inline]
    fn eq(&self, other: &ArrayView<'b, T>) -> bool {
        self.ptr == other.as_ptr() as *const ()
    }
}

impl<'a, 'b, T> PartialEq<ErasedView<'b>> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &ErasedView<'b>) -> bool {
        other == self
    }
}

impl<'a, 'b, T> PartialEq<ArrayViewMut<'b, T>> for ErasedView<'a> {
    #[inline]
    fn eq(&self, other: &ArrayViewMut<'b, T>) -> bool {
        self.ptr == other.as_ptr() as *const ()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_construct_empty() {
        let a = ErasedView::new();
        assert!(a.is_null());
        assert!(a.is_empty());
        assert_eq!(0, a.len());
        let b = ErasedView::default();
        assert!(a == b);
        assert!(ErasedView::null().is_null());
    }

    #[test]
    fn test_construct() {
        let a = [0i32; 6];
        let b = ErasedView::from(&a);
        assert_eq!(24, b.len());
        assert!(b == a.as_ptr());

        let p = 0xdead_beef_usize as *const i32;
        let c = ErasedView::from(unsafe { ArrayView::from_raw_parts(p, 25) });
        assert!(c == p);
        assert_eq!(100, c.len());

        let d = unsafe { ErasedView::from_raw_parts(p as *const (), 7) };
        assert_eq!(7, d.len());
        assert!(c == d);
        let raw: *const () = d.into();
        assert_eq!(p as *const (), raw);
    }

    #[test]
    fn test_from_views() {
        let mut a = [0u16; 5];
        let p = a.as_ptr();
        {
            let m = ArrayViewMut::from(&mut a);
            let e = ErasedView::from(m);
            assert_eq!(10, e.len());
            assert!(e == p);
        }
        let v = ArrayView::from(&a);
        let e = ErasedView::from(v);
        assert!(e == v);
        assert!(v == e);
        assert_eq!(10, e.len());
        let s = ErasedView::from(v.slice_static::<3>(1).unwrap());
        assert_eq!(6, s.len());
        assert!(s == v.as_ptr().wrapping_add(1));
        let slice: &[u16] = &a[2..];
        assert_eq!(6, ErasedView::from(slice).len());
        assert_eq!(6, ErasedView::from(StaticArrayViewMut::from(&mut [0u16; 3])).len());
    }

    #[test]
    fn test_null_sized() {
        let e = ErasedView::from(ArrayView::<u64>::null_sized(3));
        assert!(e.is_null());
        assert!(!e.is_empty());
        assert_eq!(24, e.len());
    }

    #[test]
    fn test_null_sized_saturates() {
        let e = ErasedView::from(ArrayView::<u32>::null_sized(usize::MAX / 2));
        assert!(e.is_null());
        assert_eq!(usize::MAX, e.len());
        let e = ErasedView::from(ArrayView::<u32>::null_sized(usize::MAX / 4));
        assert_eq!(usize::MAX / 4 * 4, e.len());
    }

    #[test]
    fn test_to_typed() -> anyhow::Result<()> {
        let a = [1u32, 2, 3, 4];
        let e = ErasedView::from(&a);
        let back = unsafe { e.to_typed::<u32>() }?;
        assert_eq!(&a, back.as_slice());
        let halves = unsafe { e.to_typed::<u16>() }?;
        assert_eq!(8, halves.len());
        let partial = ErasedView::from(&a[..3]);
        assert_eq!(
            Err(Error::InvalidCast {
                count: 12,
                src_size: 1,
                dst_size: 8
            }),
            unsafe { partial.to_typed::<u64>() }.map(|v| v.len())
        );
        Ok(())
    }
}
