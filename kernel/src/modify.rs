mod member;
mod payment;

pub use self::{member::*, payment::*};
