use crate::error::{Error, Result};
use std::mem::{align_of, size_of};
use std::ptr::{self, NonNull};

/// Pointer and element count shared by the typed views.
///
/// All arithmetic is wrapping and never dereferences, so it stays defined
/// for the null-but-sized placeholder. A null base stays null when sliced.
#[derive(Debug)]
pub(crate) struct RawView<T> {
    pub(crate) ptr: *mut T,
    pub(crate) len: usize,
}

impl<T> Clone for RawView<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawView<T> {}

impl<T> RawView<T> {
    #[inline]
    pub(crate) const fn null() -> Self {
        RawView {
            ptr: ptr::null_mut(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn new(ptr: *mut T, len: usize) -> Self {
        RawView { ptr, len }
    }

    /// One past the last element, by address even for a null base.
    #[inline]
    pub(crate) fn end(&self) -> *mut T {
        self.ptr.wrapping_add(self.len)
    }

    #[inline]
    fn advance(&self, n: usize) -> *mut T {
        if self.ptr.is_null() {
            self.ptr
        } else {
            self.ptr.wrapping_add(n)
        }
    }

    /// Signed element distance from the base to `p`.
    ///
    /// A `p` that is not on an element boundary gives `Err` holding the
    /// distance rounded down, so a pointer just before the base shows as `-1`.
    #[inline]
    pub(crate) fn offset_of(&self, p: *const T) -> std::result::Result<isize, isize> {
        let size = size_of::<T>().max(1) as isize;
        let bytes = (p as isize).wrapping_sub(self.ptr as isize);
        if bytes % size == 0 {
            Ok(bytes / size)
        } else {
            Err(bytes.div_euclid(size))
        }
    }

    #[inline]
    pub(crate) fn slice(self, begin: usize, end: usize) -> Result<Self> {
        if begin > end || end > self.len {
            return Err(Error::SliceOutOfRange {
                begin: begin as isize,
                end: end as isize,
                size: self.len,
            });
        }
        Ok(RawView::new(self.advance(begin), end - begin))
    }

    #[inline]
    pub(crate) fn slice_ptr(self, begin: *const T, end: *const T) -> Result<Self> {
        match (self.offset_of(begin), self.offset_of(end)) {
            (Ok(b), Ok(e)) if b >= 0 && b <= e && e as usize <= self.len => {
                Ok(RawView::new(self.advance(b as usize), (e - b) as usize))
            }
            (b, e) => Err(Error::SliceOutOfRange {
                begin: b.unwrap_or_else(|b| b),
                end: e.unwrap_or_else(|e| e),
                size: self.len,
            }),
        }
    }

    /// A null `end` selects nothing.
    #[inline]
    pub(crate) fn prefix_ptr(self, end: *const T) -> Result<Self> {
        if end.is_null() {
            return Ok(RawView::null());
        }
        self.slice_ptr(self.ptr, end)
    }

    /// A null `begin` selects nothing.
    #[inline]
    pub(crate) fn suffix_ptr(self, begin: *const T) -> Result<Self> {
        if begin.is_null() {
            return Ok(RawView::null());
        }
        self.slice_ptr(begin, self.end())
    }

    /// Start pointer of the `N` elements beginning at `begin`.
    #[inline]
    pub(crate) fn slice_static<const N: usize>(self, begin: usize) -> Result<*mut T> {
        match begin.checked_add(N) {
            Some(end) if end <= self.len => {
                let ptr = self.advance(begin);
                if ptr.is_null() && N == 0 {
                    return Ok(NonNull::dangling().as_ptr());
                }
                Ok(ptr)
            }
            _ => Err(Error::SliceOutOfRange {
                begin: begin as isize,
                end: begin.wrapping_add(N) as isize,
                size: self.len,
            }),
        }
    }

    #[inline]
    pub(crate) fn slice_static_ptr<const N: usize>(self, begin: *const T) -> Result<*mut T> {
        match self.offset_of(begin) {
            Ok(b) if b >= 0 => self.slice_static::<N>(b as usize),
            Ok(b) | Err(b) => Err(Error::SliceOutOfRange {
                begin: b,
                end: b.wrapping_add(N as isize),
                size: self.len,
            }),
        }
    }

    /// Reinterpret the bytes as elements of `U`.
    ///
    /// Fails if the byte length overflows `usize` or is not a multiple of
    /// `size_of::<U>()`, or if a non-null base is misaligned for `U`.
    #[inline]
    pub(crate) fn cast<U>(self) -> Result<RawView<U>> {
        let src_size = size_of::<T>();
        let dst_size = size_of::<U>();
        let bytes = match self.len.checked_mul(src_size) {
            Some(bytes) if dst_size != 0 && bytes % dst_size == 0 => bytes,
            _ => {
                return Err(Error::InvalidCast {
                    count: self.len,
                    src_size,
                    dst_size,
                })
            }
        };
        let addr = self.ptr as usize;
        if addr % align_of::<U>() != 0 {
            return Err(Error::Misaligned {
                addr,
                align: align_of::<U>(),
            });
        }
        Ok(RawView::new(self.ptr.cast(), bytes / dst_size))
    }

    /// # Safety
    ///
    /// A non-null base must address `len` initialized elements valid for `'a`.
    #[inline]
    pub(crate) unsafe fn as_slice<'a>(self) -> &'a [T] {
        if self.ptr.is_null() {
            // Crashing immediately is better than reading address zero.
            assert_eq!(self.len, 0, "null view cannot be dereferenced");
            &[]
        } else {
            std::slice::from_raw_parts(self.ptr, self.len)
        }
    }

    /// # Safety
    ///
    /// Same as [`RawView::as_slice`], plus exclusive access for `'a`.
    #[inline]
    pub(crate) unsafe fn as_mut_slice<'a>(self) -> &'a mut [T] {
        if self.ptr.is_null() {
            assert_eq!(self.len, 0, "null view cannot be dereferenced");
            &mut []
        } else {
            std::slice::from_raw_parts_mut(self.ptr, self.len)
        }
    }
}
