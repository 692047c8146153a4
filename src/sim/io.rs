//! IO collaborators for the emulator.
//!
//! The read instruction blocks on an [`InputSource`] for one integer,
//! and the write instruction hands one integer to an [`OutputSink`].
//! Sinks also accept *notes*, short out-of-band messages the emulator
//! produces when it rejects an input value.
//!
//! Three implementations are provided:
//! - [`EmptyIo`]: no input, discards output;
//! - [`BufferedIo`]: buffer-backed IO, for tests and programmatic use;
//! - [`ChannelIo`]: a threaded/channel implementation, with a
//!   [`ChannelIo::stdio`] constructor for console use.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::thread::JoinHandle;

use crossbeam_channel as cbc;

/// A source of input values for the read instruction.
pub trait InputSource {
    /// Produces the next input value, blocking until one is ready, or
    /// `None` if the input is exhausted.
    fn read_value(&mut self) -> Option<i64>;
}

/// A destination for output values from the write instruction.
pub trait OutputSink {
    /// Accepts one output value.
    fn write_value(&mut self, value: i64);

    /// Accepts an out-of-band message. The default implementation
    /// discards it.
    fn write_note(&mut self, note: &str) {
        let _ = note;
    }
}

/// No IO. Reads are always exhausted and writes are discarded.
pub struct EmptyIo;
impl InputSource for EmptyIo {
    fn read_value(&mut self) -> Option<i64> {
        None
    }
}
impl OutputSink for EmptyIo {
    fn write_value(&mut self, _value: i64) {}
}

/// IO that reads from an input buffer and writes to an output buffer.
///
/// Cloning shares the buffers, so one `BufferedIo` can serve as both the
/// emulator's input and output while the test (or caller) keeps its own
/// handle to inspect the results.
#[derive(Clone)]
pub struct BufferedIo {
    input: Arc<RwLock<VecDeque<i64>>>,
    output: Arc<RwLock<Vec<i64>>>,
    notes: Arc<RwLock<Vec<String>>>,
}

impl BufferedIo {
    /// Creates a new BufferedIo with empty buffers.
    pub fn new() -> Self {
        Self {
            input: Default::default(),
            output: Default::default(),
            notes: Default::default(),
        }
    }

    /// Creates a new BufferedIo whose input buffer holds the given
    /// values.
    pub fn with_input(values: impl IntoIterator<Item = i64>) -> Self {
        let io = Self::new();
        io.input
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(values);
        io
    }

    /// Gets a reference to the input buffer.
    pub fn get_input(&self) -> &Arc<RwLock<VecDeque<i64>>> {
        &self.input
    }
    /// Gets a reference to the output buffer.
    pub fn get_output(&self) -> &Arc<RwLock<Vec<i64>>> {
        &self.output
    }
    /// Gets a reference to the note buffer.
    pub fn get_notes(&self) -> &Arc<RwLock<Vec<String>>> {
        &self.notes
    }

    fn input_mut(&self) -> RwLockWriteGuard<'_, VecDeque<i64>> {
        self.input.write().unwrap_or_else(|e| e.into_inner())
    }
}
impl Default for BufferedIo {
    fn default() -> Self {
        Self::new()
    }
}
impl InputSource for BufferedIo {
    fn read_value(&mut self) -> Option<i64> {
        self.input_mut().pop_front()
    }
}
impl OutputSink for BufferedIo {
    fn write_value(&mut self, value: i64) {
        self.output
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(value);
    }

    fn write_note(&mut self, note: &str) {
        self.notes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(note.to_string());
    }
}

/// A helper struct for [`ChannelIo::new`],
/// indicating the channel is closed and no more reads/writes will come
/// from it.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stop;

/// What flows out through a [`ChannelIo`] writer: a program output
/// value, or a note from the emulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoEvent {
    /// A value produced by the write instruction.
    Value(i64),
    /// An out-of-band message.
    Note(String),
}

/// An IO that reads from one channel and writes to another, each served
/// by its own thread.
///
/// The reader function is called whenever the input channel has room for
/// another value; it should block until a value is ready, or return
/// [`Stop`] when there are no more. The writer function is called once
/// per outgoing [`IoEvent`].
///
/// The threads keep polling even while the emulator is not running, so
/// care should be taken to not feed the reader while the emulator is
/// idle.
pub struct ChannelIo {
    read_data: cbc::Receiver<i64>,
    #[allow(unused)]
    read_handler: JoinHandle<()>,

    write_data: cbc::Sender<IoEvent>,
    write_handler: JoinHandle<()>,
}

impl ChannelIo {
    /// Creates a new channel IO device with the given reader and writer.
    pub fn new(
        mut reader: impl FnMut() -> Result<i64, Stop> + Send + 'static,
        mut writer: impl FnMut(IoEvent) -> Result<(), Stop> + Send + 'static,
    ) -> Self {
        let (read_tx, read_rx) = cbc::bounded(1);
        let (write_tx, write_rx) = cbc::bounded(1);

        // Reader thread:
        let read_handler = std::thread::spawn(move || loop {
            let Ok(value) = reader() else { return };
            let Ok(()) = read_tx.send(value) else { return };
        });

        // Writer thread:
        let write_handler = std::thread::spawn(move || {
            for event in write_rx {
                let Ok(()) = writer(event) else { return };
            }
        });

        Self {
            read_data: read_rx,
            read_handler,
            write_data: write_tx,
            write_handler,
        }
    }

    /// Creates a channel IO device over the console: input values are
    /// parsed from stdin lines (lines that do not parse as an integer
    /// are skipped), and output values and notes are printed to stdout,
    /// one per line.
    pub fn stdio() -> Self {
        use std::io::{self, BufRead};

        Self::new(
            || {
                let stdin = io::stdin();
                let mut line = String::new();
                loop {
                    line.clear();
                    match stdin.lock().read_line(&mut line) {
                        Ok(0) | Err(_) => return Err(Stop),
                        Ok(_) => {
                            if let Ok(value) = line.trim().parse() {
                                return Ok(value);
                            }
                        }
                    }
                }
            },
            |event| {
                match event {
                    IoEvent::Value(v) => println!("{v}"),
                    IoEvent::Note(n) => println!("{n}"),
                }
                Ok(())
            },
        )
    }

    /// Closes this IO device: the writer is flushed and joined.
    ///
    /// The reader thread is not waited for, because it can hang on
    /// reading, which prevents it from seeing the channel disconnect.
    pub fn close(self) {
        let Self {
            read_data,
            read_handler: _,
            write_data,
            write_handler,
        } = self;

        std::mem::drop(read_data);
        std::mem::drop(write_data);

        let _ = write_handler.join();
    }
}
impl InputSource for ChannelIo {
    fn read_value(&mut self) -> Option<i64> {
        self.read_data.recv().ok()
    }
}
impl OutputSink for ChannelIo {
    fn write_value(&mut self, value: i64) {
        let _ = self.write_data.send(IoEvent::Value(value));
    }

    fn write_note(&mut self, note: &str) {
        let _ = self.write_data.send(IoEvent::Note(note.to_string()));
    }
}
