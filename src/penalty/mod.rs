pub mod assessor;
pub mod model;
