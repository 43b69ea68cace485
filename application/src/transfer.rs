mod area;
mod collection;
mod member;
mod payment;
mod session;

pub use self::{area::*, collection::*, member::*, payment::*, session::*};
