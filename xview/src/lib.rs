//! Non-owning views over contiguous memory.
//!
//! [`ArrayView`] and [`ArrayViewMut`] are a pointer plus an element count,
//! [`StaticArrayView`] and [`StaticArrayViewMut`] carry the count in the
//! type, and [`ErasedView`] keeps only the address and the byte size.
//! None of them owns or frees the memory it refers to.
//!
//! Misuse such as slicing out of range is reported to an [`ErrorSink`]
//! and the operation returns an empty view. Every checked operation also
//! has a `try_` form that returns [`Result`] instead.
//!
//! ```
//! use xview::ArrayView;
//!
//! let data = [1, 2, 3, 4, 5];
//! let v = ArrayView::from(&data);
//! assert_eq!(&[3, 4, 5], v.suffix(2).as_slice());
//! assert_eq!(Some(&2), v.slice(1, 3).front());
//! ```
pub mod cast;
pub mod config;
pub mod erased;
pub mod error;
pub mod external;
pub mod fixed;
mod raw;
pub mod sink;
pub mod size;
pub mod view;
pub mod view_mut;

pub use cast::{array_cast, array_cast_mut, try_array_cast, try_array_cast_mut, LayoutCompatible};
pub use config::{policy, set_policy, ReportPolicy};
pub use erased::ErasedView;
pub use error::{Error, Result};
pub use external::{
    array_view, array_view_mut, ErasedExternalView, ExternalView, ExternalViewMut, FromArrayView,
    FromArrayViewMut,
};
pub use fixed::{StaticArrayView, StaticArrayViewMut};
pub use sink::{
    reset_sink, set_sink, CollectSink, ErrorSink, LogSink, PanicSink, Redirect, SilentSink,
};
pub use size::{array_size, ArraySize};
pub use view::ArrayView;
pub use view_mut::ArrayViewMut;
