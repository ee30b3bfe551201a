use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Offsets are signed because the pointer forms can address
    /// memory before the start of the view.
    #[error("slice [{begin}:{end}] out of range for {size} elements")]
    SliceOutOfRange {
        begin: isize,
        end: isize,
        size: usize,
    },
    #[error("can't reinterpret {count} {src_size}-byte items into a {dst_size}-byte type")]
    InvalidCast {
        count: usize,
        src_size: usize,
        dst_size: usize,
    },
    #[error("address {addr:#x} is not aligned to {align} bytes")]
    Misaligned { addr: usize, align: usize },
    #[error("view is empty")]
    EmptyView,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
