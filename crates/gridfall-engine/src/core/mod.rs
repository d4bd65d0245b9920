pub use self::{block::*, cell::*, piece::*};

pub(crate) mod block;
pub(crate) mod cell;
pub(crate) mod piece;
