//! Conversions between views and foreign view-like types.
//!
//! A foreign type opts in by implementing one or both directions for the
//! element type it holds:
//!
//! | trait                  | direction                      |
//! |------------------------|--------------------------------|
//! | [`ExternalView`]       | foreign -> [`ArrayView`]       |
//! | [`ExternalViewMut`]    | foreign -> [`ArrayViewMut`]    |
//! | [`FromArrayView`]      | [`ArrayView`] -> foreign       |
//! | [`FromArrayViewMut`]   | [`ArrayViewMut`] -> foreign    |
//!
//! A mutable source also converts to a read-only view, and a foreign type
//! built from a read-only view can also be built from a mutable one.
//! Conversions to views of any other element type do not compile:
//!
//! ```compile_fail
//! use xview::{ArrayView, ExternalView};
//!
//! struct Ints<'a>(&'a [i32]);
//!
//! impl<'a> ExternalView<'a, i32> for Ints<'a> {
//!     fn to_array_view(self) -> ArrayView<'a, i32> {
//!         ArrayView::from(self.0)
//!     }
//! }
//!
//! let data = [1, 2, 3];
//! let v: ArrayView<f32> = ArrayView::from_external(Ints(&data));
//! ```
use crate::view::ArrayView;
use crate::view_mut::ArrayViewMut;

/// Foreign type convertible into a read-only view of `T`.
pub trait ExternalView<'a, T> {
    fn to_array_view(self) -> ArrayView<'a, T>;
}

/// Foreign type convertible into a mutable view of `T`.
pub trait ExternalViewMut<'a, T> {
    fn to_array_view_mut(self) -> ArrayViewMut<'a, T>;
}

/// Foreign type constructible from a read-only view of `T`.
pub trait FromArrayView<'a, T> {
    fn from_array_view(view: ArrayView<'a, T>) -> Self;
}

/// Foreign type constructible from a mutable view of `T`.
pub trait FromArrayViewMut<'a, T> {
    fn from_array_view_mut(view: ArrayViewMut<'a, T>) -> Self;
}

/// Registers the element type of a foreign view so it can be converted to
/// and from [`crate::ErasedView`].
///
/// ```
/// use xview::{ErasedExternalView, ErasedView, ExternalView, ArrayView};
///
/// struct Floats<'a>(&'a [f32]);
///
/// impl<'a> ExternalView<'a, f32> for Floats<'a> {
///     fn to_array_view(self) -> ArrayView<'a, f32> {
///         ArrayView::from(self.0)
///     }
/// }
///
/// impl<'a> ErasedExternalView<'a> for Floats<'a> {
///     type Element = f32;
/// }
///
/// let data = [0.5f32; 3];
/// assert_eq!(12, ErasedView::from_external(Floats(&data)).len());
/// ```
pub trait ErasedExternalView<'a> {
    type Element: 'a;
}

impl<'a, T, F: ExternalViewMut<'a, T>> ExternalView<'a, T> for F {
    #[inline]
    fn to_array_view(self) -> ArrayView<'a, T> {
        self.to_array_view_mut().into_view()
    }
}

impl<'a, T, F: FromArrayView<'a, T>> FromArrayViewMut<'a, T> for F {
    #[inline]
    fn from_array_view_mut(view: ArrayViewMut<'a, T>) -> Self {
        F::from_array_view(view.into_view())
    }
}

/// Read-only view of a foreign type, inferring the element type.
#[inline]
pub fn array_view<'a, T, F: ExternalView<'a, T>>(external: F) -> ArrayView<'a, T> {
    external.to_array_view()
}

/// Mutable view of a foreign type, inferring the element type.
#[inline]
pub fn array_view_mut<'a, T, F: ExternalViewMut<'a, T>>(external: F) -> ArrayViewMut<'a, T> {
    external.to_array_view_mut()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erased::ErasedView;
    use std::marker::PhantomData;

    /// Mutable foreign view.
    #[derive(Debug)]
    struct IntView<'a> {
        data: *mut i32,
        size: usize,
        _marker: PhantomData<&'a mut [i32]>,
    }

    impl<'a> IntView<'a> {
        fn new(data: &'a mut [i32]) -> Self {
            IntView {
                data: data.as_mut_ptr(),
                size: data.len(),
                _marker: PhantomData,
            }
        }
    }

    impl<'a> ExternalViewMut<'a, i32> for IntView<'a> {
        fn to_array_view_mut(self) -> ArrayViewMut<'a, i32> {
            unsafe { ArrayViewMut::from_raw_parts(self.data, self.size) }
        }
    }

    impl<'a> FromArrayViewMut<'a, i32> for IntView<'a> {
        fn from_array_view_mut(mut view: ArrayViewMut<'a, i32>) -> Self {
            IntView {
                data: view.as_mut_ptr(),
                size: view.len(),
                _marker: PhantomData,
            }
        }
    }

    impl<'a> ErasedExternalView<'a> for IntView<'a> {
        type Element = i32;
    }

    /// Read-only foreign view.
    #[derive(Debug, Clone, Copy)]
    struct ConstIntView<'a> {
        data: *const i32,
        size: usize,
        _marker: PhantomData<&'a [i32]>,
    }

    impl<'a> ExternalView<'a, i32> for ConstIntView<'a> {
        fn to_array_view(self) -> ArrayView<'a, i32> {
            unsafe { ArrayView::from_raw_parts(self.data, self.size) }
        }
    }

    impl<'a> FromArrayView<'a, i32> for ConstIntView<'a> {
        fn from_array_view(view: ArrayView<'a, i32>) -> Self {
            ConstIntView {
                data: view.as_ptr(),
                size: view.len(),
                _marker: PhantomData,
            }
        }
    }

    impl<'a> ErasedExternalView<'a> for ConstIntView<'a> {
        type Element = i32;
    }

    #[test]
    fn test_convert_from_external() {
        let mut data = [1, 2, 3, 4, 5];
        let p = data.as_ptr();
        {
            let mut b = ArrayViewMut::from_external(IntView::new(&mut data));
            assert!(b == p);
            assert_eq!(5, b.len());
            b[4] = 50;
        }
        let c = ArrayView::from_external(IntView::new(&mut data));
        assert!(c == p);
        assert_eq!(50, c[4]);
        let d = array_view_mut(IntView::new(&mut data));
        assert_eq!(5, d.len());
        let e = array_view(IntView::new(&mut data));
        assert_eq!(&[1, 2, 3, 4, 50], e.as_slice());
    }

    #[test]
    fn test_convert_to_external() {
        let mut data = [6, 7, 8];
        let p = data.as_mut_ptr();
        let a = ArrayViewMut::from(&mut data);
        let b: IntView = a.into_external();
        assert_eq!(p, b.data);
        assert_eq!(3, b.size);

        let c = ArrayView::from(&data);
        let d: ConstIntView = c.into_external();
        assert_eq!(p as *const i32, d.data);
        assert_eq!(3, d.size);
    }

    #[test]
    fn test_convert_const_composition() {
        let mut data = [1, 2, 3, 4];
        let p = data.as_ptr();
        // mutable view into a foreign type that only takes read-only views.
        let a = ArrayViewMut::from(&mut data).suffix(1);
        let b: ConstIntView = a.into_external();
        assert_eq!(p.wrapping_add(1), b.data);
        assert_eq!(3, b.size);

        let c = ArrayView::from_external(b);
        assert_eq!(&[2, 3, 4], c.as_slice());
        let d = array_view(b);
        assert!(c == d);
    }

    #[test]
    fn test_convert_erased() -> anyhow::Result<()> {
        let mut data = [1, 2, 3, 4, 5];
        let p = data.as_ptr();
        let a = ErasedView::from_external(IntView::new(&mut data));
        assert!(a == p);
        assert_eq!(20, a.len());

        let b: ConstIntView = unsafe { a.into_external() }?;
        assert_eq!(p, b.data);
        assert_eq!(5, b.size);
        let c = ErasedView::from_external(b);
        assert_eq!(20, c.len());
        Ok(())
    }
}
