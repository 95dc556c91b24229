pub(crate) mod report;
pub(crate) mod stages;
