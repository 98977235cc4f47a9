//! Calling thread pattern

use crate::core::{LoggerError, Record, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThreadDisplay {
    /// Thread name, or the id for unnamed threads
    #[default]
    Name,
    Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadPattern {
    display: ThreadDisplay,
}

impl ThreadPattern {
    pub fn from_options(options: Option<&str>) -> Result<Self> {
        let display = match options.map(str::to_lowercase).as_deref() {
            None | Some("name") => ThreadDisplay::Name,
            Some("id") => ThreadDisplay::Id,
            Some(other) => {
                return Err(LoggerError::config(
                    "thread",
                    format!("unknown thread display option '{}'", other),
                ));
            }
        };
        Ok(Self { display })
    }

    pub fn display(&self) -> ThreadDisplay {
        self.display
    }

    pub fn render(&self, record: &Record, out: &mut String) -> Result<()> {
        let thread = record
            .caller_thread()
            .ok_or_else(|| LoggerError::formatter("thread", "caller thread was not captured"))?;
        match self.display {
            ThreadDisplay::Name => out.push_str(thread.display_name()),
            ThreadDisplay::Id => out.push_str(&thread.id),
        }
        Ok(())
    }
}
