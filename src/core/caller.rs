//! Caller context captured on the logging thread
//!
//! - `CallSite`: compile-time location of a log statement, produced by the
//!   [`call_site!`](crate::call_site) macro
//! - `StackFrame`: the resolved caller frame (class, method, file, line)
//! - `ThreadInfo`: name and identity of the calling thread

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::panic::Location;

/// Name of the marker function the `call_site!` macro declares.
pub const CALL_SITE_MARKER: &str = "__log_call_site";

/// Method name reported for calls made without a captured call site.
pub const UNKNOWN_METHOD: &str = "<unknown>";

thread_local! {
    static THREAD_INFO_CACHE: RefCell<Option<ThreadInfo>> = const { RefCell::new(None) };
}

/// Source location of a log statement, captured where the statement is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    module_path: &'static str,
    function_path: &'static str,
    file: &'static str,
    line: u32,
}

impl CallSite {
    pub const fn new(
        module_path: &'static str,
        function_path: &'static str,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            module_path,
            function_path,
            file,
            line,
        }
    }

    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    pub fn function_path(&self) -> &'static str {
        self.function_path
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

/// A resolved caller frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub class_name: String,
    pub method_name: String,
    pub file_name: String,
    pub line_number: u32,
}

impl StackFrame {
    /// Resolve the first application frame of a log call.
    ///
    /// The function path recorded by `call_site!` is walked from the innermost
    /// segment outwards: the macro's own marker and any closure or constant
    /// scopes are skipped, and the first named function found is the caller.
    pub fn resolve(call_site: Option<&CallSite>) -> Result<Self> {
        let site = call_site.ok_or_else(|| {
            LoggerError::caller_resolution("no call site was captured for this log call")
        })?;

        if site.module_path.is_empty() {
            return Err(LoggerError::caller_resolution(format!(
                "call site at {}:{} has no module path",
                site.file, site.line
            )));
        }

        let method_name = site
            .function_path
            .rsplit("::")
            .find(|segment| !Self::is_internal_segment(segment))
            .ok_or_else(|| {
                LoggerError::caller_resolution(format!(
                    "no application frame in '{}'",
                    site.function_path
                ))
            })?;

        Ok(Self {
            class_name: site.module_path.to_string(),
            method_name: method_name.to_string(),
            file_name: site.file.to_string(),
            line_number: site.line,
        })
    }

    /// Frame for a plain method call, located by `#[track_caller]`.
    ///
    /// The enclosing function is not known there, so the logger name stands
    /// in for the class and the method is [`UNKNOWN_METHOD`].
    pub fn at_location(class_name: &str, location: &Location<'_>) -> Self {
        Self {
            class_name: class_name.to_string(),
            method_name: UNKNOWN_METHOD.to_string(),
            file_name: location.file().to_string(),
            line_number: location.line(),
        }
    }

    fn is_internal_segment(segment: &str) -> bool {
        segment.is_empty() || segment == CALL_SITE_MARKER || segment.starts_with("{{")
    }
}

/// Identity of the thread a log call was made on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub id: String,
}

impl ThreadInfo {
    /// Capture the current thread, caching the result per thread.
    ///
    /// Must run on the calling thread; a worker thread would report itself.
    pub fn current() -> Self {
        THREAD_INFO_CACHE.with(|cache| {
            cache
                .borrow_mut()
                .get_or_insert_with(|| {
                    let thread = std::thread::current();
                    ThreadInfo {
                        name: thread.name().map(String::from),
                        id: format!("{:?}", thread.id()),
                    }
                })
                .clone()
        })
    }

    /// The thread name, or its id for unnamed threads
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_call_site() {
        let err = StackFrame::resolve(None).unwrap_err();
        assert!(matches!(err, LoggerError::CallerResolution { .. }));
    }

    #[test]
    fn test_resolve_skips_marker_and_closures() {
        let site = CallSite::new(
            "app::server",
            "app::server::handle::{{closure}}::{{closure}}::__log_call_site",
            "src/server.rs",
            42,
        );
        let frame = StackFrame::resolve(Some(&site)).unwrap();
        assert_eq!(frame.class_name, "app::server");
        assert_eq!(frame.method_name, "handle");
        assert_eq!(frame.file_name, "src/server.rs");
        assert_eq!(frame.line_number, 42);
    }

    #[test]
    fn test_resolve_fails_without_named_frame() {
        let site = CallSite::new("app", "{{closure}}::__log_call_site", "src/lib.rs", 1);
        assert!(StackFrame::resolve(Some(&site)).is_err());

        let site = CallSite::new("", "app::run::__log_call_site", "src/lib.rs", 1);
        assert!(StackFrame::resolve(Some(&site)).is_err());
    }

    #[test]
    fn test_at_location_uses_logger_name_as_class() {
        let location = Location::caller();
        let frame = StackFrame::at_location("app::db", location);
        assert_eq!(frame.class_name, "app::db");
        assert_eq!(frame.method_name, UNKNOWN_METHOD);
        assert_eq!(frame.file_name, file!());
        assert_eq!(frame.line_number, location.line());
    }

    #[test]
    fn test_thread_info_reflects_calling_thread() {
        let handle = std::thread::Builder::new()
            .name("capture-thread".to_string())
            .spawn(ThreadInfo::current)
            .unwrap();
        let info = handle.join().unwrap();
        assert_eq!(info.name.as_deref(), Some("capture-thread"));
        assert_eq!(info.display_name(), "capture-thread");
        assert_ne!(info, ThreadInfo::current());
    }
}
