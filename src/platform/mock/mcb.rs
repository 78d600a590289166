//! Mock MCB link

use std::vec::Vec;

use strato_rats_core::mcb::{McbAsciiCommand, McbParamCommand};
use strato_rats_core::traits::{LinkError, McbLink};

/// Command recorded by [`MockMcb`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum McbCommand {
    Ascii(McbAsciiCommand),
    Param(McbParamCommand),
}

/// Mock MCB link
///
/// Records every command in send order. Failed sends are not recorded.
#[derive(Debug, Default)]
pub struct MockMcb {
    sent: Vec<McbCommand>,
    fail: bool,
}

impl MockMcb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail (or succeed again)
    pub fn set_fail(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Commands sent so far
    pub fn sent(&self) -> &[McbCommand] {
        &self.sent
    }

    /// Number of times `command` was sent
    pub fn ascii_count(&self, command: McbAsciiCommand) -> usize {
        self.sent
            .iter()
            .filter(|c| **c == McbCommand::Ascii(command))
            .count()
    }

    /// Parametrized commands sent so far
    pub fn params(&self) -> Vec<McbParamCommand> {
        self.sent
            .iter()
            .filter_map(|c| match c {
                McbCommand::Param(p) => Some(*p),
                McbCommand::Ascii(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl McbLink for MockMcb {
    fn send_ascii(&mut self, command: McbAsciiCommand) -> Result<(), LinkError> {
        if self.fail {
            return Err(LinkError::WriteFailed);
        }
        self.sent.push(McbCommand::Ascii(command));
        Ok(())
    }

    fn send_param(&mut self, command: &McbParamCommand) -> Result<(), LinkError> {
        if self.fail {
            return Err(LinkError::WriteFailed);
        }
        self.sent.push(McbCommand::Param(*command));
        Ok(())
    }
}
