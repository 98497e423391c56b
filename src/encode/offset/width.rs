//! Fixed-width id types for CSR buffers.

use core::fmt::Debug;

use num_traits::{PrimInt, Unsigned};

/// An unsigned integer type usable for node ids and edge offsets.
///
/// Narrow widths bound the addressable node and edge counts in exchange for
/// denser buffers.
pub trait EdgeIndex: PrimInt + Unsigned + Debug + Default + Send + Sync + 'static {
    /// Type name, used in diagnostics.
    const NAME: &'static str;

    /// Widens to `usize`. Lossless on every supported target.
    fn index(self) -> usize;

    /// Narrows from `usize`, or `None` if `value` does not fit.
    #[inline]
    fn from_index(value: usize) -> Option<Self> {
        num_traits::cast(value)
    }
}

macro_rules! impl_edge_index {
    ($($t:ty),* $(,)?) => {
        $(
            impl EdgeIndex for $t {
                const NAME: &'static str = stringify!($t);

                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_edge_index!(u16, u32, usize);
