pub(crate) mod model;
pub(crate) mod parse;
pub(crate) mod project;
