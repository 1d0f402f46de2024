use std::io::Write;

/// The process environment commands talk to, replaceable in tests.
pub trait Host: Send + Sync {
    /// Stream for regular output
    fn output(&mut self) -> impl Write;

    /// Stream for diagnostics
    fn error(&mut self) -> impl Write;

    /// End the process with the given status code
    fn exit(&mut self, code: i32);
}

/// Host that keeps everything in memory and records the exit code instead of exiting.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_str(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}
