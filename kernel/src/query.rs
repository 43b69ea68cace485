mod area;
mod member;
mod payment;

pub use self::{area::*, member::*, payment::*};
