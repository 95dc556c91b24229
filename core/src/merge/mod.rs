pub(crate) mod aggregate;
pub(crate) mod error;
pub(crate) mod families;
pub(crate) mod normalize;
pub(crate) mod table;
