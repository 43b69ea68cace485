mod created_at;

pub use self::created_at::*;
