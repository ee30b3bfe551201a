//! Views whose length is a compile-time constant.
//!
//! Only the pointer is stored. Bounds of `front`/`back` are checked when
//! the code is compiled, so they return plain references.
use crate::view::ArrayView;
use crate::view_mut::ArrayViewMut;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

struct NonEmpty<const N: usize>;

impl<const N: usize> NonEmpty<N> {
    const OK: () = assert!(N > 0, "fixed-length view is empty");
}

/// # Safety
///
/// A non-null `ptr` must address `N` elements valid for `'a`.
#[inline]
unsafe fn deref_array<'a, T, const N: usize>(ptr: *const T) -> &'a [T; N] {
    if ptr.is_null() {
        assert!(N == 0, "null view cannot be dereferenced");
        &*NonNull::<[T; N]>::dangling().as_ptr()
    } else {
        &*(ptr as *const [T; N])
    }
}

/// Read-only view of exactly `N` elements.
pub struct StaticArrayView<'a, T, const N: usize> {
    ptr: *const T,
    _marker: PhantomData<&'a [T; N]>,
}

unsafe impl<'a, T: Sync, const N: usize> Send for StaticArrayView<'a, T, N> {}
unsafe impl<'a, T: Sync, const N: usize> Sync for StaticArrayView<'a, T, N> {}

impl<'a, T, const N: usize> StaticArrayView<'a, T, N> {
    #[inline]
    pub const fn from_array(array: &'a [T; N]) -> Self {
        StaticArrayView {
            ptr: array.as_ptr(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `ptr` must address at least `N` initialized elements valid and
    /// unmodified for `'a`.
    #[inline]
    pub const unsafe fn from_ptr(ptr: *const T) -> Self {
        StaticArrayView {
            ptr,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub const fn data(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub fn as_array(&self) -> &'a [T; N] {
        // SAFETY: guaranteed by the constructors.
        unsafe { deref_array(self.ptr) }
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.as_array()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_array().iter()
    }

    #[inline]
    pub fn front(&self) -> &'a T {
        let () = NonEmpty::<N>::OK;
        &self.as_array()[0]
    }

    #[inline]
    pub fn back(&self) -> &'a T {
        let () = NonEmpty::<N>::OK;
        &self.as_array()[N - 1]
    }

    /// Drop the static length.
    #[inline]
    pub fn into_view(self) -> ArrayView<'a, T> {
        ArrayView::from(self)
    }
}

impl<'a, T, const N: usize> Clone for StaticArrayView<'a, T, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, const N: usize> Copy for StaticArrayView<'a, T, N> {}

impl<'a, T, const N: usize> fmt::Debug for StaticArrayView<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticArrayView")
            .field("ptr", &self.ptr)
            .field("len", &N)
            .finish()
    }
}

impl<'a, T, const N: usize> Deref for StaticArrayView<'a, T, N> {
    type Target = [T; N];

    #[inline]
    fn deref(&self) -> &[T; N] {
        self.as_array()
    }
}

impl<'a, T, const N: usize> IntoIterator for StaticArrayView<'a, T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_array().iter()
    }
}

impl<'a, 'b, T, const N: usize> PartialEq<StaticArrayView<'b, T, N>> for StaticArrayView<'a, T, N> {
    #[inline]
    fn eq(&self, other: &StaticArrayView<'b, T, N>) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a, T, const N: usize> PartialEq<*const T> for StaticArrayView<'a, T, N> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.ptr == *other
    }
}

impl<'a, 'b, T, const N: usize> PartialEq<ArrayView<'b, T>> for StaticArrayView<'a, T, N> {
    #[inline]
    fn eq(&self, other: &ArrayView<'b, T>) -> bool {
        self.ptr == other.as_ptr()
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for StaticArrayView<'a, T, N> {
    #[inline]
    fn from(array: &'a [T; N]) -> Self {
        StaticArrayView::from_array(array)
    }
}

impl<'a, T, const N: usize> From<StaticArrayViewMut<'a, T, N>> for StaticArrayView<'a, T, N> {
    #[inline]
    fn from(view: StaticArrayViewMut<'a, T, N>) -> Self {
        view.into_view()
    }
}

/// Mutable view of exactly `N` elements.
pub struct StaticArrayViewMut<'a, T, const N: usize> {
    ptr: *mut T,
    _marker: PhantomData<&'a mut [T; N]>,
}

unsafe impl<'a, T: Send, const N: usize> Send for StaticArrayViewMut<'a, T, N> {}
unsafe impl<'a, T: Sync, const N: usize> Sync for StaticArrayViewMut<'a, T, N> {}

impl<'a, T, const N: usize> StaticArrayViewMut<'a, T, N> {
    #[inline]
    pub fn from_array(array: &'a mut [T; N]) -> Self {
        StaticArrayViewMut {
            ptr: array.as_mut_ptr(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `ptr` must address at least `N` initialized elements that nothing
    /// else accesses for `'a`.
    #[inline]
    pub unsafe fn from_ptr(ptr: *mut T) -> Self {
        StaticArrayViewMut {
            ptr,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline]
    pub fn as_array(&self) -> &[T; N] {
        unsafe { deref_array(self.ptr) }
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        if self.ptr.is_null() {
            assert!(N == 0, "null view cannot be dereferenced");
            // SAFETY: zero-length arrays need no storage.
            unsafe { &mut *NonNull::<[T; N]>::dangling().as_ptr() }
        } else {
            // SAFETY: guaranteed by the constructors, &mut self is exclusive.
            unsafe { &mut *(self.ptr as *mut [T; N]) }
        }
    }

    #[inline]
    pub fn into_array(mut self) -> &'a mut [T; N] {
        let array: *mut [T; N] = self.as_mut_array();
        // SAFETY: the exclusive borrow for 'a moves out of self.
        unsafe { &mut *array }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_array().iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_array().iter_mut()
    }

    #[inline]
    pub fn front(&self) -> &T {
        let () = NonEmpty::<N>::OK;
        &self.as_array()[0]
    }

    #[inline]
    pub fn back(&self) -> &T {
        let () = NonEmpty::<N>::OK;
        &self.as_array()[N - 1]
    }

    #[inline]
    pub fn front_mut(&mut self) -> &mut T {
        let () = NonEmpty::<N>::OK;
        &mut self.as_mut_array()[0]
    }

    #[inline]
    pub fn back_mut(&mut self) -> &mut T {
        let () = NonEmpty::<N>::OK;
        &mut self.as_mut_array()[N - 1]
    }

    #[inline]
    pub fn reborrow(&mut self) -> StaticArrayViewMut<'_, T, N> {
        StaticArrayViewMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn into_view(self) -> StaticArrayView<'a, T, N> {
        StaticArrayView {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Drop the static length.
    #[inline]
    pub fn into_view_mut(self) -> ArrayViewMut<'a, T> {
        ArrayViewMut::from(self)
    }
}

impl<'a, T, const N: usize> fmt::Debug for StaticArrayViewMut<'a, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticArrayViewMut")
            .field("ptr", &self.ptr)
            .field("len", &N)
            .finish()
    }
}

impl<'a, T, const N: usize> Deref for StaticArrayViewMut<'a, T, N> {
    type Target = [T; N];

    #[inline]
    fn deref(&self) -> &[T; N] {
        self.as_array()
    }
}

impl<'a, T, const N: usize> DerefMut for StaticArrayViewMut<'a, T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T; N] {
        self.as_mut_array()
    }
}

impl<'a, T, const N: usize> IntoIterator for StaticArrayViewMut<'a, T, N> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into_array().iter_mut()
    }
}

impl<'a, T, const N: usize> PartialEq<*const T> for StaticArrayViewMut<'a, T, N> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.ptr as *const T == *other
    }
}

impl<'a, T, const N: usize> PartialEq<*mut T> for StaticArrayViewMut<'a, T, N> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.ptr == *other
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for StaticArrayViewMut<'a, T, N> {
    #[inline]
    fn from(array: &'a mut [T; N]) -> Self {
        StaticArrayViewMut::from_array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct() {
        let a = [1i32, 2, 3];
        let b = StaticArrayView::from_array(&a);
        assert!(b == a.as_ptr());
        assert_eq!(3, b.len());
        assert!(!b.is_empty());
        assert_eq!(&1, b.front());
        assert_eq!(&3, b.back());
        assert_eq!(2, b[1]);
        assert_eq!(6, b.iter().sum::<i32>());

        const ARRAY: [u8; 4] = [9, 8, 7, 6];
        const CB: StaticArrayView<'static, u8, 4> = StaticArrayView::from_array(&ARRAY);
        assert_eq!(&ARRAY, CB.as_array());
        let c = unsafe { StaticArrayView::<u8, 2>::from_ptr(ARRAY.as_ptr().add(2)) };
        assert_eq!(&[7, 6], c.as_array());
    }

    #[test]
    fn test_convert_to_view() {
        let a = [0i32; 13];
        let b = StaticArrayView::from(&a);
        let c: ArrayView<i32> = b.into();
        assert!(c == a.as_ptr());
        assert_eq!(13, c.len());
        assert!(b == c);
        assert_eq!(13, b.into_view().len());
    }

    #[test]
    fn test_mutable() {
        let mut a = [0i32; 4];
        let p = a.as_mut_ptr();
        {
            let mut b = StaticArrayViewMut::from(&mut a);
            assert!(b == p);
            *b.front_mut() = 1;
            *b.back_mut() = 4;
            b[1] = 2;
            if let Some(v) = b.iter_mut().nth(2) {
                *v = 3;
            }
            assert_eq!(&1, b.front());
            assert_eq!(&4, b.back());
            let mut c = b.reborrow().into_view_mut();
            assert_eq!(4, c.len());
            c[0] = 10;
        }
        assert_eq!([10, 2, 3, 4], a);

        let mut b = StaticArrayViewMut::from(&mut a);
        for v in b.reborrow() {
            *v *= 2;
        }
        let ro: StaticArrayView<i32, 4> = b.into();
        assert_eq!(&[20, 4, 6, 8], ro.as_array());
    }

    #[test]
    fn test_zero_length() {
        let a: [u64; 0] = [];
        let b = StaticArrayView::from(&a);
        assert!(b.is_empty());
        assert_eq!(0, b.iter().count());
        let null = unsafe { StaticArrayView::<u64, 0>::from_ptr(std::ptr::null()) };
        assert!(null.as_array().is_empty());
    }
}
