mod account;
mod area;
mod common;
mod member;
mod payment;

pub use self::{account::*, area::*, common::*, member::*, payment::*};
