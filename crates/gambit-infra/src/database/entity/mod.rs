//! SeaORM entities mirroring the hosted database tables.

pub mod post;
pub mod tournament;
