mod consultation;
mod query;
mod view;

pub use consultation::*;
pub use query::*;
pub use view::*;
