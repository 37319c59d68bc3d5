//! Scripted bridge for unit tests.

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use crate::bridge::{BridgeCommand, BridgeError, BridgeResult, DeviceBridge};

/// Canned reply for one command name.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Exit zero with this stdout.
    Out(String),
    /// Exit non-zero.
    Fail { code: i32, stderr: String },
    /// The program does not exist.
    Missing,
    /// Exit zero and write these bytes to the pull destination.
    WriteLocal(Vec<u8>),
}

impl Reply {
    pub fn out(text: &str) -> Self {
        Reply::Out(text.to_string())
    }

    pub fn fail(code: i32, stderr: &str) -> Self {
        Reply::Fail {
            code,
            stderr: stderr.to_string(),
        }
    }
}

/// Records every call and answers from a script; unscripted commands succeed
/// with empty output.
#[derive(Default)]
pub struct ScriptedBridge {
    replies: HashMap<&'static str, Reply>,
    calls: Mutex<Vec<BridgeCommand>>,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, name: &'static str, reply: Reply) -> Self {
        self.replies.insert(name, reply);
        self
    }

    pub fn calls(&self) -> Vec<BridgeCommand> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(|c| c.name()).collect()
    }
}

impl DeviceBridge for ScriptedBridge {
    fn run(&self, command: &BridgeCommand) -> BridgeResult<String> {
        self.calls.lock().unwrap().push(command.clone());

        match self.replies.get(command.name()) {
            None => Ok(String::new()),
            Some(Reply::Out(text)) => Ok(text.clone()),
            Some(Reply::Fail { code, stderr }) => Err(BridgeError::command_failed(
                command.to_string(),
                *code,
                stderr.clone(),
            )),
            Some(Reply::Missing) => Err(BridgeError::ToolNotFound {
                program: "adb".to_string(),
            }),
            Some(Reply::WriteLocal(bytes)) => {
                if let BridgeCommand::Pull { local, .. } = command {
                    fs::write(local, bytes).unwrap();
                }
                Ok(String::new())
            }
        }
    }
}
