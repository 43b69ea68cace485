pub use crate::error::*;

mod cache;
mod clock;
mod database;
mod entity;
mod error;
mod modify;
mod query;
mod report;
mod search;
mod session;
mod subscribe;
mod validation;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod report {
        pub use crate::report::*;
    }
    pub mod search {
        pub use crate::search::*;
    }
    pub mod validation {
        pub use crate::validation::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod cache {
        pub use crate::cache::*;
    }
    pub mod clock {
        pub use crate::clock::*;
    }
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
    pub mod session {
        pub use crate::session::*;
    }
    pub mod subscribe {
        pub use crate::subscribe::*;
    }
}
