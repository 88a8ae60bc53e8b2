mod consultation_widget;

pub use consultation_widget::*;
