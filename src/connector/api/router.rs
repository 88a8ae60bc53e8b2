use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::ConsultController;

pub struct Router<'a> {
    consult_controller: ConsultController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            consult_controller: ConsultController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { question, format } => {
                self.consult_controller.ask(question, format).await
            }
            Commands::Tui => unreachable!("TUI command is handled separately in main"),
        }
    }
}
