use crate::erased::ErasedView;
use crate::fixed::{StaticArrayView, StaticArrayViewMut};
use crate::view::ArrayView;
use crate::view_mut::ArrayViewMut;

/// Uniform size query over arrays, slices and views.
///
/// Typed and fixed-length views count elements, erased views count bytes.
pub trait ArraySize {
    fn array_size(&self) -> usize;
}

impl<T, const N: usize> ArraySize for [T; N] {
    #[inline]
    fn array_size(&self) -> usize {
        N
    }
}

impl<T> ArraySize for [T] {
    #[inline]
    fn array_size(&self) -> usize {
        self.len()
    }
}

impl<T> ArraySize for Vec<T> {
    #[inline]
    fn array_size(&self) -> usize {
        self.len()
    }
}

impl<'a, T> ArraySize for ArrayView<'a, T> {
    #[inline]
    fn array_size(&self) -> usize {
        self.len()
    }
}

impl<'a, T> ArraySize for ArrayViewMut<'a, T> {
    #[inline]
    fn array_size(&self) -> usize {
        self.len()
    }
}

impl<'a, T, const N: usize> ArraySize for StaticArrayView<'a, T, N> {
    #[inline]
    fn array_size(&self) -> usize {
        N
    }
}

impl<'a, T, const N: usize> ArraySize for StaticArrayViewMut<'a, T, N> {
    #[inline]
    fn array_size(&self) -> usize {
        N
    }
}

impl<'a> ArraySize for ErasedView<'a> {
    #[inline]
    fn array_size(&self) -> usize {
        self.len()
    }
}

impl<A: ArraySize + ?Sized> ArraySize for &A {
    #[inline]
    fn array_size(&self) -> usize {
        (**self).array_size()
    }
}

/// Size of an array or view, see [`ArraySize`].
#[inline]
pub fn array_size<A: ArraySize + ?Sized>(a: &A) -> usize {
    a.array_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size() {
        let a = [0i32; 6];
        assert_eq!(6, array_size(&a));
        assert_eq!(4, array_size(&a[2..]));
        assert_eq!(3, array_size(&vec![1u8, 2, 3]));

        let b = unsafe { ArrayView::from_raw_parts(a.as_ptr(), 3) };
        assert_eq!(3, array_size(&b));
        let c = ErasedView::from(&a);
        assert_eq!(24, array_size(&c));
        assert_eq!(24, array_size(&&c));

        let d = StaticArrayView::from(&a);
        assert_eq!(6, array_size(&d));
        assert_eq!(0, array_size(&ArrayView::<u64>::new()));
        assert_eq!(5, array_size(&ArrayView::<u64>::null_sized(5)));
    }

    #[test]
    fn test_size_mut() {
        let mut a = [0u16; 4];
        let mut b = ArrayViewMut::from(&mut a);
        assert_eq!(4, array_size(&b));
        let c = b.reborrow().slice_static::<2>(1).unwrap();
        assert_eq!(2, array_size(&c));
        assert_eq!(4, array_size(&ErasedView::from(c)));
    }
}
