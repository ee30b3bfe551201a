use crate::cast::{self, LayoutCompatible};
use crate::error::{Error, Result};
use crate::external::{ExternalViewMut, FromArrayViewMut};
use crate::fixed::{StaticArrayView, StaticArrayViewMut};
use crate::raw::RawView;
use crate::sink::report;
use crate::view::ArrayView;
use bytemuck::Pod;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Range};

/// ArrayViewMut is the mutable counterpart of [`ArrayView`].
///
/// Elements can be written through every accessor. The view itself is not
/// `Copy`: it behaves like `&mut [T]`, and the range operations consume it
/// so the result keeps the exclusive borrow. Call [`ArrayViewMut::reborrow`]
/// to slice without giving up the original view.
///
/// Converting into [`ArrayView`] is always allowed, the reverse never.
pub struct ArrayViewMut<'a, T> {
    raw: RawView<T>,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: ArrayViewMut behaves like &mut [T].
unsafe impl<'a, T: Send> Send for ArrayViewMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for ArrayViewMut<'a, T> {}

impl<'a, T> ArrayViewMut<'a, T> {
    #[inline]
    pub const fn new() -> Self {
        ArrayViewMut {
            raw: RawView::null(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn null() -> Self {
        Self::new()
    }

    /// View of `len` elements without any data behind it. Sub-views stay
    /// null, see [`ArrayView::null_sized`].
    #[inline]
    pub const fn null_sized(len: usize) -> Self {
        ArrayViewMut {
            raw: RawView::new(std::ptr::null_mut(), len),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// A non-null `ptr` must be aligned and address `len` initialized
    /// elements that nothing else accesses for `'a`.
    /// A null `ptr` is allowed with any length.
    #[inline]
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self {
        ArrayViewMut {
            raw: RawView::new(ptr, len),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn from_slice(slice: &'a mut [T]) -> Self {
        ArrayViewMut {
            raw: RawView::new(slice.as_mut_ptr(), slice.len()),
            _marker: PhantomData,
        }
    }

    /// Mutable flavour of [`ArrayView::from_compatible`].
    #[inline]
    pub fn from_compatible<U: LayoutCompatible<T>>(view: ArrayViewMut<'a, U>) -> Self {
        cast::assert_same_layout::<U, T>();
        let raw = view.raw;
        ArrayViewMut {
            raw: RawView::new(raw.ptr.cast(), raw.len),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn from_external<F: ExternalViewMut<'a, T>>(external: F) -> Self {
        external.to_array_view_mut()
    }

    /// Convert into a foreign view type. Foreign types that only accept a
    /// read-only view are reachable too, through [`ArrayView`].
    #[inline]
    pub fn into_external<F: FromArrayViewMut<'a, T>>(self) -> F {
        F::from_array_view_mut(self)
    }

    #[inline]
    pub(crate) fn from_raw(raw: RawView<T>) -> Self {
        ArrayViewMut {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn raw(&self) -> RawView<T> {
        self.raw
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.raw.ptr
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.ptr
    }

    #[inline]
    pub fn data(&self) -> *const T {
        self.raw.ptr
    }

    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.raw.ptr as *const T..self.raw.end() as *const T
    }

    #[inline]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        self.raw.ptr..self.raw.end()
    }

    #[doc(alias = "size")]
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len == 0
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.raw.ptr.is_null()
    }

    /// Read-only view borrowing from this one.
    #[inline]
    pub fn as_view(&self) -> ArrayView<'_, T> {
        ArrayView::from_raw(self.raw)
    }

    /// Give up mutability for the whole lifetime.
    #[inline]
    pub fn into_view(self) -> ArrayView<'a, T> {
        ArrayView::from_raw(self.raw)
    }

    /// Shorter-lived mutable view of the same elements.
    #[inline]
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut::from_raw(self.raw)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: guaranteed by the constructors.
        unsafe { self.raw.as_slice() }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: guaranteed by the constructors, &mut self is exclusive.
        unsafe { self.raw.as_mut_slice() }
    }

    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        unsafe { self.raw.as_mut_slice() }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// # Safety
    ///
    /// `idx` must be less than the length and the pointer non-null.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, idx: usize) -> &mut T {
        &mut *self.raw.ptr.add(idx)
    }

    #[inline]
    pub fn try_front(&self) -> Result<&T> {
        self.as_slice().first().ok_or(Error::EmptyView)
    }

    #[inline]
    pub fn try_back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Error::EmptyView)
    }

    #[inline]
    pub fn try_front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().first_mut().ok_or(Error::EmptyView)
    }

    #[inline]
    pub fn try_back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().last_mut().ok_or(Error::EmptyView)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.try_front()
            .map_err(|e| report("ArrayViewMut::front", &e))
            .ok()
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.try_back()
            .map_err(|e| report("ArrayViewMut::back", &e))
            .ok()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.try_front_mut()
            .map_err(|e| report("ArrayViewMut::front", &e))
            .ok()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.try_back_mut()
            .map_err(|e| report("ArrayViewMut::back", &e))
            .ok()
    }

    #[inline]
    pub fn try_slice(self, begin: usize, end: usize) -> Result<Self> {
        self.raw.slice(begin, end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_slice_ptr(self, begin: *const T, end: *const T) -> Result<Self> {
        self.raw.slice_ptr(begin, end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_prefix(self, end: usize) -> Result<Self> {
        self.try_slice(0, end)
    }

    #[inline]
    pub fn try_suffix(self, begin: usize) -> Result<Self> {
        let len = self.raw.len;
        self.try_slice(begin, len)
    }

    #[inline]
    pub fn try_prefix_ptr(self, end: *const T) -> Result<Self> {
        self.raw.prefix_ptr(end).map(Self::from_raw)
    }

    #[inline]
    pub fn try_suffix_ptr(self, begin: *const T) -> Result<Self> {
        self.raw.suffix_ptr(begin).map(Self::from_raw)
    }

    #[inline]
    pub fn slice(self, begin: usize, end: usize) -> Self {
        checked(self.try_slice(begin, end))
    }

    #[inline]
    pub fn slice_ptr(self, begin: *const T, end: *const T) -> Self {
        checked(self.try_slice_ptr(begin, end))
    }

    #[inline]
    pub fn prefix(self, end: usize) -> Self {
        checked(self.try_prefix(end))
    }

    #[inline]
    pub fn suffix(self, begin: usize) -> Self {
        checked(self.try_suffix(begin))
    }

    #[inline]
    pub fn prefix_ptr(self, end: *const T) -> Self {
        checked(self.try_prefix_ptr(end))
    }

    #[inline]
    pub fn suffix_ptr(self, begin: *const T) -> Self {
        checked(self.try_suffix_ptr(begin))
    }

    #[inline]
    pub fn try_slice_static<const N: usize>(
        self,
        begin: usize,
    ) -> Result<StaticArrayViewMut<'a, T, N>> {
        self.raw
            .slice_static::<N>(begin)
            // SAFETY: bounds checked above, exclusivity moved out of self.
            .map(|ptr| unsafe { StaticArrayViewMut::from_ptr(ptr) })
    }

    #[inline]
    pub fn slice_static<const N: usize>(self, begin: usize) -> Option<StaticArrayViewMut<'a, T, N>> {
        self.try_slice_static::<N>(begin)
            .map_err(|e| report("ArrayViewMut::slice", &e))
            .ok()
    }

    #[inline]
    pub fn slice_static_ptr<const N: usize>(
        self,
        begin: *const T,
    ) -> Option<StaticArrayViewMut<'a, T, N>> {
        self.raw
            .slice_static_ptr::<N>(begin)
            .map(|ptr| unsafe { StaticArrayViewMut::from_ptr(ptr) })
            .map_err(|e| report("ArrayViewMut::slice", &e))
            .ok()
    }

    #[inline]
    pub fn prefix_static<const N: usize>(self) -> Option<StaticArrayViewMut<'a, T, N>> {
        self.slice_static::<N>(0)
    }

    /// Reinterpret as elements of `U`, see [`crate::array_cast_mut`].
    #[inline]
    pub fn cast<U: Pod>(self) -> ArrayViewMut<'a, U>
    where
        T: Pod,
    {
        cast::try_array_cast_mut(self).unwrap_or_else(|e| {
            report("ArrayViewMut::cast", &e);
            ArrayViewMut::new()
        })
    }

    #[inline]
    pub fn try_cast<U: Pod>(self) -> Result<ArrayViewMut<'a, U>>
    where
        T: Pod,
    {
        cast::try_array_cast_mut(self)
    }
}

#[inline]
fn checked<T>(res: Result<ArrayViewMut<'_, T>>) -> ArrayViewMut<'_, T> {
    res.unwrap_or_else(|e| {
        report("ArrayViewMut::slice", &e);
        ArrayViewMut::new()
    })
}

impl<'a, T> Default for ArrayViewMut<'a, T> {
    #[inline]
    fn default() -> Self {
        ArrayViewMut::new()
    }
}

impl<'a, T> fmt::Debug for ArrayViewMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayViewMut")
            .field("ptr", &self.raw.ptr)
            .field("len", &self.raw.len)
            .finish()
    }
}

impl<'a, T> Deref for ArrayViewMut<'a, T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T> DerefMut for ArrayViewMut<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for ArrayViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<'a, 'b, T> IntoIterator for &'b ArrayViewMut<'a, T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut ArrayViewMut<'a, T> {
    type Item = &'b mut T;
    type IntoIter = std::slice::IterMut<'b, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, 'b, T> PartialEq<ArrayViewMut<'b, T>> for ArrayViewMut<'a, T> {
    #[inline]
    fn eq(&self, other: &ArrayViewMut<'b, T>) -> bool {
        self.raw.ptr == other.raw.ptr
    }
}

impl<'a, T> Eq for ArrayViewMut<'a, T> {}

impl<'a, 'b, T> PartialEq<ArrayView<'b, T>> for ArrayViewMut<'a, T> {
    #[inline]
    fn eq(&self, other: &ArrayView<'b, T>) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

impl<'a, T> PartialEq<*const T> for ArrayViewMut<'a, T> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.as_ptr() == *other
    }
}

impl<'a, T> PartialEq<*mut T> for ArrayViewMut<'a, T> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.raw.ptr == *other
    }
}

impl<'a, T> From<&'a mut [T]> for ArrayViewMut<'a, T> {
    #[inline]
    fn from(slice: &'a mut [T]) -> Self {
        ArrayViewMut::from_slice(slice)
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for ArrayViewMut<'a, T> {
    #[inline]
    fn from(array: &'a mut [T; N]) -> Self {
        ArrayViewMut::from_slice(array)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for ArrayViewMut<'a, T> {
    #[inline]
    fn from(vec: &'a mut Vec<T>) -> Self {
        ArrayViewMut::from_slice(vec)
    }
}

impl<'a, T, const N: usize> From<StaticArrayViewMut<'a, T, N>> for ArrayViewMut<'a, T> {
    #[inline]
    fn from(mut view: StaticArrayViewMut<'a, T, N>) -> Self {
        ArrayViewMut::from_raw(RawView::new(view.as_mut_ptr(), N))
    }
}

impl<'a, T> From<ArrayViewMut<'a, T>> for *mut T {
    #[inline]
    fn from(mut view: ArrayViewMut<'a, T>) -> Self {
        view.as_mut_ptr()
    }
}

impl<'a, 'b, T, const N: usize> PartialEq<StaticArrayView<'b, T, N>> for ArrayViewMut<'a, T> {
    #[inline]
    fn eq(&self, other: &StaticArrayView<'b, T, N>) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}
