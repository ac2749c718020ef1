#![allow(dead_code)]

use async_trait::async_trait;
use dirclip::errors::DirClipError;
use dirclip::sink::{ClipboardBackend, HelperExit, OwnershipHelper, Sink};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Writer whose bytes can be read back after the sink drops its handle.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct FakeClipboard {
    pub available: bool,
    pub fail_with: Option<String>,
    pub written: Arc<Mutex<Option<String>>>,
}

impl FakeClipboard {
    pub fn working() -> Self {
        FakeClipboard {
            available: true,
            fail_with: None,
            written: Arc::default(),
        }
    }

    pub fn headless() -> Self {
        FakeClipboard {
            available: false,
            ..FakeClipboard::working()
        }
    }

    pub fn failing(message: &str) -> Self {
        FakeClipboard {
            fail_with: Some(message.to_owned()),
            ..FakeClipboard::working()
        }
    }
}

impl ClipboardBackend for FakeClipboard {
    fn is_available(&self) -> bool {
        self.available
    }

    fn set_text(&mut self, text: &str) -> Result<(), DirClipError> {
        if let Some(message) = &self.fail_with {
            return Err(DirClipError::ClipboardInitError(message.clone()));
        }
        *self.written.lock().unwrap() = Some(text.to_owned());
        Ok(())
    }
}

pub enum FakeHelperBehavior {
    Exit(i32),
    SpawnFailure,
}

pub struct FakeHelper {
    pub behavior: FakeHelperBehavior,
    pub received: Arc<Mutex<Option<String>>>,
}

impl FakeHelper {
    pub fn new(behavior: FakeHelperBehavior) -> Self {
        FakeHelper {
            behavior,
            received: Arc::default(),
        }
    }
}

#[async_trait]
impl OwnershipHelper for FakeHelper {
    fn name(&self) -> &str {
        "fake-helper"
    }

    async fn handshake(&self, text: &str) -> Result<HelperExit, DirClipError> {
        match self.behavior {
            FakeHelperBehavior::Exit(code) => {
                *self.received.lock().unwrap() = Some(text.to_owned());
                Ok(HelperExit { code: Some(code) })
            }
            FakeHelperBehavior::SpawnFailure => Err(DirClipError::HelperSpawnError(
                "fake-helper".to_owned(),
                "No such file or directory".to_owned(),
            )),
        }
    }
}

pub fn sink_with(
    clipboard: FakeClipboard,
    helper: Option<FakeHelper>,
    console: &SharedBuffer,
) -> Sink {
    Sink::new(
        Box::new(clipboard),
        helper.map(|h| Box::new(h) as Box<dyn OwnershipHelper>),
        Box::new(console.clone()),
    )
}
