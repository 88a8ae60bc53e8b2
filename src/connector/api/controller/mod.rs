pub mod consult_controller;

pub use consult_controller::ConsultController;
