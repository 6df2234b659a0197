//! Infrastructure adapters

pub mod composition;
pub mod ses;
