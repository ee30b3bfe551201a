use crate::cast::{self, LayoutCompatible};
use crate::error::{Error, Result};
use crate::external::{ExternalView, FromArrayView};
use crate::fixed::{StaticArrayView, StaticArrayViewMut};
use crate::raw::RawView;
use crate::sink::report;
use crate::view_mut::ArrayViewMut;
use bytemuck::{AnyBitPattern, NoUninit};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, Range};

/// ArrayView is a read-only, non-owning view of contiguous elements.
///
/// It is a pointer and an element count. Copying it never copies the
/// elements, and nothing is freed when it goes away. Views compare equal
/// when their base pointers are equal; the length does not participate.
///
/// A view with a null pointer and a positive length is a legal placeholder
/// that reserves a size without any data. Its length can be queried and it
/// can be sliced, but reading its elements panics.
pub struct ArrayView<'a, T> {
    raw: RawView<T>,
    _marker: PhantomData<&'a [T]>,
}

// SAFETY: ArrayView behaves like &[T].
unsafe impl<'a, T: Sync> Send for ArrayView<'a, T> {}
unsafe impl<'a, T: Sync> Sync for ArrayView<'a, T> {}

impl<'a, T> ArrayView<'a, T> {
    /// Creates an empty view with a null pointer.
    #[inline]
    pub const fn new() -> Self {
        ArrayView {
            raw: RawView::null(),
            _marker: PhantomData,
        }
    }

    /// Same as [`ArrayView::new`].
    #[inline]
    pub const fn null() -> Self {
        Self::new()
    }

    /// Creates a view of `len` elements without any data behind it.
    ///
    /// Sub-views of such a placeholder are null as well, only their length
    /// follows the requested range.
    #[inline]
    pub const fn null_sized(len: usize) -> Self {
        ArrayView {
            raw: RawView::new(std::ptr::null_mut(), len),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// A non-null `ptr` must be aligned and address `len` initialized
    /// elements that stay valid and unmodified for `'a`.
    /// A null `ptr` is allowed with any length.
    #[inline]
    pub const unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        ArrayView {
            raw: RawView::new(ptr as *mut T, len),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn from_slice(slice: &'a [T]) -> Self {
        ArrayView {
            raw: RawView::new(slice.as_ptr() as *mut T, slice.len()),
            _marker: PhantomData,
        }
    }

    /// View elements of `U` as elements of `T`, e.g. a color newtype as its
    /// underlying vector. [`LayoutCompatible`] carries the proof.
    #[inline]
    pub fn from_compatible<U: LayoutCompatible<T>>(view: ArrayView<'a, U>) -> Self {
        cast::assert_same_layout::<U, T>();
        ArrayView {
            raw: RawView::new(view.raw.ptr.cast(), view.raw.len),
            _marker: PhantomData,
        }
    }

    /// Convert a foreign view type.
    #[inline]
    pub fn from_external<F: ExternalView<'a, T>>(external: F) -> Self {
        external.to_array_view()
    }

    /// Convert into a foreign view type.
    #[inline]
    pub fn into_external<F: FromArrayView<'a, T>>(self) -> F {
        F::from_array_view(self)
    }

    #[inline]
    pub(crate) const fn from_raw(raw: RawView<T>) -> Self {
        ArrayView {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) const fn raw(&self) -> RawView<T> {
        self.raw
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.raw.ptr
    }

    #[inline]
    pub const fn data(&self) -> *const T {
        self.raw.ptr
    }

    /// Pointers to the first element and one past the last.
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.raw.ptr as *const T..self.raw.end() as *const T
    }

    /// Number of elements.
    #[doc(alias = "size")]
    #[inline]
    pub const fn len(&self) -> usize {
        self.raw.len
    }

    /// True when the length is zero, whatever the pointer.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.raw.ptr.is_null()
    }

    /// # Panics
    ///
    /// Panics on a null pointer with non-zero length.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: guaranteed by the constructors.
        unsafe { self.raw.as_slice() }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// # Safety
    ///
    /// `idx` must be less than the length and the pointer non-null.
    #[inline]
    pub unsafe fn get_unchecked(&self, idx: usize) -> &'a T {
        &*self.raw.ptr.add(idx)
    }

    #[inline]
    pub fn try_front(&self) -> Result<&'a T> {
        self.as_slice().first().ok_or(Error::EmptyView)
    }

    #[inline]
    pub fn try_back(&self) -> Result<&'a T> {
        self.as_slice().last().ok_or(Error::EmptyView)
    }

    /// First element, or `None` after reporting an empty view.
    #[inline]
    pub fn front(&self) -> Option<&'a T> {
        self.try_front()
            .map_err(|e| report("ArrayView::front", &e))
            .ok()
    }

    /// Last element, or `None` after reporting an empty view.
    #[inline]
    pub fn back(&self) -> Option<&'a T> {
        self.try_back()
            .map_err(|e| report("ArrayView::back", &e))
            .ok()
    }

    #[inline]
    pub fn try_slice(&self, begin: usize, end: usize) -> Result<Self> {
        self.raw.slice(begin, end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_slice_ptr(&self, begin: *const T, end: *const T) -> Result<Self> {
        self.raw.slice_ptr(begin, end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_prefix(&self, end: usize) -> Result<Self> {
        self.try_slice(0, end)
    }

    #[inline]
    pub fn try_suffix(&self, begin: usize) -> Result<Self> {
        self.try_slice(begin, self.raw.len)
    }

    #[inline]
    pub fn try_prefix_ptr(&self, end: *const T) -> Result<Self> {
        self.raw.prefix_ptr(end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_suffix_ptr(&self, begin: *const T) -> Result<Self> {
        self.raw.suffix_ptr(begin).map(Self::from_raw)
    }

    /// Elements `[begin, end)`.
    /// Out of range is reported and yields an empty view.
    #[inline]
    pub fn slice(&self, begin: usize, end: usize) -> Self {
        self.checked(self.try_slice(begin, end))
    }

    /// Elements between two pointers into this view.
    #[inline]
    pub fn slice_ptr(&self, begin: *const T, end: *const T) -> Self {
        self.checked(self.try_slice_ptr(begin, end))
    }

    /// First `end` elements.
    #[inline]
    pub fn prefix(&self, end: usize) -> Self {
        self.checked(self.try_prefix(end))
    }

    /// Elements from `begin` to the end.
    #[inline]
    pub fn suffix(&self, begin: usize) -> Self {
        self.checked(self.try_suffix(begin))
    }

    /// Elements up to `end`. A null `end` gives an empty view.
    #[inline]
    pub fn prefix_ptr(&self, end: *const T) -> Self {
        self.checked(self.try_prefix_ptr(end))
    }

    /// Elements from `begin` on. A null `begin` gives an empty view.
    #[inline]
    pub fn suffix_ptr(&self, begin: *const T) -> Self {
        self.checked(self.try_suffix_ptr(begin))
    }

    #[inline]
    fn checked(&self, res: Result<Self>) -> Self {
        res.unwrap_or_else(|e| {
            report("ArrayView::slice", &e);
            ArrayView::new()
        })
    }

    #[inline]
    pub fn try_slice_static<const N: usize>(&self, begin: usize) -> Result<StaticArrayView<'a, T, N>> {
        self.raw
            .slice_static::<N>(begin)
            // SAFETY: bounds checked above, validity inherited from self.
            .map(|ptr| unsafe { StaticArrayView::from_ptr(ptr) })
    }

    /// `N` elements starting at `begin`.
    #[inline]
    pub fn slice_static<const N: usize>(&self, begin: usize) -> Option<StaticArrayView<'a, T, N>> {
        self.try_slice_static::<N>(begin)
            .map_err(|e| report("ArrayView::slice", &e))
            .ok()
    }

    /// `N` elements starting at pointer `begin`.
    #[inline]
    pub fn slice_static_ptr<const N: usize>(
        &self,
        begin: *const T,
    ) -> Option<StaticArrayView<'a, T, N>> {
        self.raw
            .slice_static_ptr::<N>(begin)
            .map(|ptr| unsafe { StaticArrayView::from_ptr(ptr) })
            .map_err(|e| report("ArrayView::slice", &e))
            .ok()
    }

    /// First `N` elements.
    #[inline]
    pub fn prefix_static<const N: usize>(&self) -> Option<StaticArrayView<'a, T, N>> {
        self.slice_static::<N>(0)
    }

    /// Reinterpret as elements of `U`, see [`crate::array_cast`].
    #[inline]
    pub fn cast<U: AnyBitPattern>(self) -> ArrayView<'a, U>
    where
        T: NoUninit,
    {
        cast::try_array_cast(self).unwrap_or_else(|e| {
            report("ArrayView::cast", &e);
            ArrayView::new()
        })
    }

    #[inline]
    pub fn try_cast<U: AnyBitPattern>(self) -> Result<ArrayView<'a, U>>
    where
        T: NoUninit,
    {
        cast::try_array_cast(self)
    }
}

impl<'a, T> Clone for ArrayView<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for ArrayView<'a, T> {}

impl<'a, T> Default for ArrayView<'a, T> {
    #[inline]
    fn default() -> Self {
        ArrayView::new()
    }
}

impl<'a, T> fmt::Debug for ArrayView<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayView")
            .field("ptr", &self.raw.ptr)
            .field("len", &self.raw.len)
            .finish()
    }
}

impl<'a, T> Deref for ArrayView<'a, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> IntoIterator for ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b ArrayView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, 'b, T> PartialEq<ArrayView<'b, T>> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &ArrayView<'b, T>) -> bool {
        self.raw.ptr == other.raw.ptr
    }
}

impl<'a, T> Eq for ArrayView<'a, T> {}

impl<'a, T> PartialEq<*const T> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.raw.ptr as *const T == *other
    }
}

impl<'a, T> PartialEq<*mut T> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.raw.ptr == *other
    }
}

impl<'a, 'b, T> PartialEq<ArrayViewMut<'b, T>> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &ArrayViewMut<'b, T>) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<'a, 'b, T, const N: usize> PartialEq<StaticArrayView<'b, T, N>> for ArrayView<'a, T> {
    #[inline]
    fn eq(&self, other: &StaticArrayView<'b, T, N>) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<'a, T> From<&'a [T]> for ArrayView<'a, T> {
    #[inline]
    fn from(slice: &'a [T]) -> Self {
        ArrayView::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ArrayView<'a, T> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        ArrayView::from_slice(array)
    }
}

impl<'a, T> From<&'a Vec<T>> for ArrayView<'a, T> {
    #[inline]
    fn from(vec: &'a Vec<T>) -> Self {
        ArrayView::from_slice(vec)
    }
}

impl<'a, T, const N: usize> From<StaticArrayView<'a, T, N>> for ArrayView<'a, T> {
    #[inline]
    fn from(view: StaticArrayView<'a, T, N>) -> Self {
        ArrayView::from_raw(RawView::new(view.as_ptr() as *mut T, N))
    }
}

impl<'a, T, const N: usize> From<StaticArrayViewMut<'a, T, N>> for ArrayView<'a, T> {
    #[inline]
    fn from(view: StaticArrayViewMut<'a, T, N>) -> Self {
        ArrayView::from(view.into_view())
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for ArrayView<'a, T> {
    #[inline]
    fn from(view: ArrayViewMut<'a, T>) -> Self {
        view.into_view()
    }
}

impl<'a, T> From<ArrayView<'a, T>> for *const T {
    #[inline]
    fn from(view: ArrayView<'a, T>) -> Self {
        view.as_ptr()
    }
}
