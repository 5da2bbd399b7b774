//! Call-site resolution
//!
//! Walks the stack from inside the logger and reports the first frame that
//! belongs to the code that asked for the event, formatted as
//! `"<basename>:<line>"`. Two lookups are available:
//!
//! - [`CallerLookup::SkipLibrary`] (default): skip a few innermost frames,
//!   then every frame whose function lives in this library, and report the
//!   next one. Free functions and level methods are skipped automatically.
//! - [`CallerLookup::FixedDepth`]: ascend a constant number of frames from
//!   the resolver. [`DEFAULT_CALLER_DEPTH`] reaches the caller of a
//!   `Logger` level method.
//!
//! Either lookup can be pushed out by wrapper layers: each helper function
//! a caller puts between its code and the logger needs one more frame,
//! which [`CallSiteConfig::wrapped`] adds.
//!
//! The default lookup without wrappers does not walk the stack at all: the
//! level methods and free functions are `#[track_caller]`, so the caller's
//! location arrives with the call and works in every build profile. Stack
//! walks need symbol names and line tables; anything they cannot attribute
//! is reported as [`UNKNOWN_CALL_SITE`].

use super::error::{LoggerError, Result};
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Reported when no qualifying frame is found
pub const UNKNOWN_CALL_SITE: &str = "?:0";

/// Innermost frames skipped by [`CallerLookup::SkipLibrary`] before the scan
/// starts: the resolver and the event dispatcher.
pub const DEFAULT_MIN_SKIP: usize = 2;

/// Maximum number of stack frames captured per event
pub const DEFAULT_MAX_DEPTH: usize = 25;

/// Frames between the resolver and the caller of a `Logger` level method.
///
/// Add one per extra layer of indirection, e.g. `DEFAULT_CALLER_DEPTH + 1`
/// for the crate's free functions or for a user helper wrapping a `Logger`.
pub const DEFAULT_CALLER_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerLookup {
    /// Skip frames that belong to this library
    SkipLibrary,
    /// Ascend exactly this many frames from the resolver
    FixedDepth(usize),
}

/// How a logger attributes events to source locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSiteConfig {
    pub lookup: CallerLookup,
    /// Frames skipped before [`CallerLookup::SkipLibrary`] starts matching
    pub min_skip: usize,
    /// Stack frames captured; deeper call sites resolve to `"?:0"`
    pub max_depth: usize,
    /// Caller-owned wrapper layers between the call site and the logger
    pub wrapper_frames: usize,
}

impl Default for CallSiteConfig {
    fn default() -> Self {
        Self::skip_library()
    }
}

impl CallSiteConfig {
    #[must_use]
    pub fn skip_library() -> Self {
        Self {
            lookup: CallerLookup::SkipLibrary,
            min_skip: DEFAULT_MIN_SKIP,
            max_depth: DEFAULT_MAX_DEPTH,
            wrapper_frames: 0,
        }
    }

    #[must_use]
    pub fn fixed(depth: usize) -> Self {
        Self {
            lookup: CallerLookup::FixedDepth(depth),
            min_skip: DEFAULT_MIN_SKIP,
            max_depth: DEFAULT_MAX_DEPTH,
            wrapper_frames: 0,
        }
    }

    /// Account for one more wrapper function around the logger
    ///
    /// # Example
    ///
    /// ```
    /// use rust_json_logger::prelude::*;
    ///
    /// fn audit(logger: &Logger, msg: &str) {
    ///     logger.info(msg);
    /// }
    ///
    /// let logger = Logger::builder()
    ///     .sink(MemorySink::new())
    ///     .call_site(CallSiteConfig::default().wrapped())
    ///     .build();
    ///
    /// // Attributed to this line, not to the body of `audit`.
    /// audit(&logger, "user deleted");
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn wrapped(mut self) -> Self {
        self.wrapper_frames += 1;
        self
    }

    /// Adjust for calls that arrive through the crate's free functions.
    ///
    /// Free functions are library frames, so a [`CallerLookup::SkipLibrary`]
    /// config is unchanged; a fixed depth grows by one.
    #[must_use = "builder methods return a new value"]
    pub fn through_free_functions(mut self) -> Self {
        if let CallerLookup::FixedDepth(depth) = self.lookup {
            self.lookup = CallerLookup::FixedDepth(depth + 1);
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_min_skip(mut self, min_skip: usize) -> Self {
        self.min_skip = min_skip;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(LoggerError::config(
                "CallSiteConfig",
                "max_depth must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether the call site comes from `#[track_caller]` instead of a
    /// stack walk.
    ///
    /// True for [`CallerLookup::SkipLibrary`] without wrapper layers. Every
    /// level method and free function propagates the caller's location, so
    /// this path needs no debug info and ignores `min_skip` and `max_depth`.
    pub fn tracks_caller(&self) -> bool {
        self.lookup == CallerLookup::SkipLibrary && self.wrapper_frames == 0
    }

    /// Resolve the current call site as `"<basename>:<line>"`.
    ///
    /// `caller` is the location propagated through `#[track_caller]`; it is
    /// reported directly when [`tracks_caller`](Self::tracks_caller) holds.
    /// Otherwise the stack is walked, with `scope` (from [`library_scope`])
    /// marking library frames. This function is the anchor frame that
    /// depths are counted from, so it must keep its own frame.
    #[inline(never)]
    pub(crate) fn locate(&self, scope: &str, caller: &Location<'_>) -> String {
        if self.tracks_caller() {
            return location_call_site(caller);
        }
        if self.max_depth == 0 {
            return UNKNOWN_CALL_SITE.to_string();
        }

        // Walked here rather than in a helper so this frame stays the anchor.
        let mut raw = Vec::with_capacity(self.max_depth);
        backtrace::trace(|frame| {
            raw.push(frame.clone());
            raw.len() < self.max_depth
        });

        select(raw.iter().flat_map(resolve), self, scope)
            .and_then(|frame| frame.call_site())
            .unwrap_or_else(|| UNKNOWN_CALL_SITE.to_string())
    }
}

fn location_call_site(location: &Location<'_>) -> String {
    let file = Path::new(location.file())
        .file_name()
        .map_or_else(|| location.file().into(), |name| name.to_string_lossy());
    format!("{}:{}", file, location.line())
}

/// Path prefix shared by every function of this library.
///
/// Taken from the module that resolves call sites, with its own name
/// removed, so it covers the logger, its free functions and the resolver.
pub fn library_scope() -> String {
    enclosing_scope(module_path!()).to_string()
}

/// Drop the last `::` segment of a path
pub fn enclosing_scope(path: &str) -> &str {
    path.rsplit_once("::").map_or(path, |(parent, _)| parent)
}

/// Whether a demangled function name sits inside `scope`.
///
/// Handles impl paths such as `<crate::Type as Trait>::method`.
pub fn is_in_scope(function: &str, scope: &str) -> bool {
    function
        .trim_start_matches(&['<', '&'][..])
        .strip_prefix(scope)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// One logical frame; inlined functions get their own entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResolvedFrame {
    pub function: Option<String>,
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
}

impl ResolvedFrame {
    fn in_scope(&self, scope: &str) -> bool {
        self.function
            .as_deref()
            .is_some_and(|function| is_in_scope(function, scope))
    }

    fn call_site(&self) -> Option<String> {
        let file = self.file.as_deref().and_then(Path::file_name)?;
        let line = self.line?;
        Some(format!("{}:{}", file.to_string_lossy(), line))
    }
}

/// Logical frames of one physical frame, innermost inlined function first
fn resolve(frame: &backtrace::Frame) -> Vec<ResolvedFrame> {
    let mut frames = Vec::new();
    backtrace::resolve_frame(frame, |symbol| {
        frames.push(ResolvedFrame {
            function: symbol.name().map(|name| format!("{:#}", name)),
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        });
    });
    if frames.is_empty() {
        frames.push(ResolvedFrame::default());
    }
    frames
}

/// Pick the caller's frame out of `frames`, innermost first.
///
/// Counting starts at the first frame inside `scope`, which is the
/// resolver itself. `frames` is consumed lazily and nothing past the
/// selected frame is pulled. A frame without a symbol name between the
/// anchor and the caller makes the result unknown, since it cannot be
/// told apart from library code.
pub(crate) fn select<I>(frames: I, config: &CallSiteConfig, scope: &str) -> Option<ResolvedFrame>
where
    I: IntoIterator<Item = ResolvedFrame>,
{
    let mut above = frames
        .into_iter()
        .skip_while(|frame| !frame.in_scope(scope))
        .map_while(|frame| frame.function.is_some().then_some(frame));

    match config.lookup {
        CallerLookup::FixedDepth(depth) => above.nth(depth.checked_add(config.wrapper_frames)?),
        CallerLookup::SkipLibrary => {
            let mut rest = above.skip(config.min_skip).skip_while(|frame| frame.in_scope(scope));
            rest.nth(config.wrapper_frames)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOPE: &str = "rust_json_logger::core";

    fn frame(function: &str, file: &str, line: u32) -> ResolvedFrame {
        ResolvedFrame {
            function: Some(function.to_string()),
            file: Some(PathBuf::from(file)),
            line: Some(line),
        }
    }

    fn stack() -> Vec<ResolvedFrame> {
        vec![
            frame("backtrace::backtrace::trace", "/cargo/backtrace/mod.rs", 53),
            frame("rust_json_logger::core::caller::CallSiteConfig::locate", "/src/core/caller.rs", 140),
            frame("rust_json_logger::core::logger::Logger::dispatch", "/src/core/logger.rs", 300),
            frame("rust_json_logger::core::logger::Logger::info", "/src/core/logger.rs", 120),
            frame("rust_json_logger::core::global::info", "/src/core/global.rs", 60),
            frame("app::handlers::audit", "/app/src/handlers.rs", 17),
            frame("app::main", "/app/src/main.rs", 8),
            frame("std::rt::lang_start", "/rustc/library/std/src/rt.rs", 195),
        ]
    }

    fn site(config: &CallSiteConfig) -> Option<String> {
        select(stack(), config, SCOPE).and_then(|frame| frame.call_site())
    }

    #[test]
    fn test_skip_library_reports_first_external_frame() {
        assert_eq!(site(&CallSiteConfig::skip_library()).as_deref(), Some("handlers.rs:17"));
    }

    #[test]
    fn test_wrapped_skips_one_more_frame() {
        let config = CallSiteConfig::skip_library().wrapped();
        assert_eq!(site(&config).as_deref(), Some("main.rs:8"));
    }

    #[test]
    fn test_fixed_depth_counts_from_resolver() {
        let config = CallSiteConfig::fixed(DEFAULT_CALLER_DEPTH);
        assert_eq!(site(&config).as_deref(), Some("global.rs:60"));

        let config = CallSiteConfig::fixed(DEFAULT_CALLER_DEPTH).through_free_functions();
        assert_eq!(site(&config).as_deref(), Some("handlers.rs:17"));
    }

    #[test]
    fn test_depth_beyond_stack_is_unknown() {
        assert_eq!(site(&CallSiteConfig::fixed(500)), None);

        let config = CallSiteConfig::skip_library().wrapped().wrapped().wrapped();
        assert_eq!(site(&config), None);
    }

    #[test]
    fn test_stack_without_library_frames_is_unknown() {
        let frames = vec![frame("app::main", "/app/src/main.rs", 8)];
        assert!(select(frames, &CallSiteConfig::default(), SCOPE).is_none());
    }

    #[test]
    fn test_unnamed_frame_before_caller_is_unknown() {
        let mut frames = stack();
        frames[4].function = None;
        assert_eq!(select(frames.clone(), &CallSiteConfig::skip_library(), SCOPE), None);
        assert_eq!(select(frames, &CallSiteConfig::fixed(DEFAULT_CALLER_DEPTH), SCOPE), None);

        // Unnamed frames below the anchor do not matter.
        let mut frames = stack();
        frames[0].function = None;
        let found = select(frames, &CallSiteConfig::skip_library(), SCOPE);
        assert_eq!(found.and_then(|frame| frame.call_site()).as_deref(), Some("handlers.rs:17"));
    }

    #[test]
    fn test_selection_stops_at_caller() {
        let mut pulled = 0;
        let frames = stack().into_iter().inspect(|_| pulled += 1);
        let found = select(frames, &CallSiteConfig::skip_library(), SCOPE);

        assert_eq!(found.and_then(|frame| frame.call_site()).as_deref(), Some("handlers.rs:17"));
        assert_eq!(pulled, 6);
    }

    #[test]
    fn test_unresolved_frame_has_no_call_site() {
        assert_eq!(ResolvedFrame::default().call_site(), None);
    }

    #[test]
    fn test_scope_matching() {
        assert!(is_in_scope("rust_json_logger::core::logger::Logger::info", SCOPE));
        assert!(is_in_scope(
            "<rust_json_logger::core::logger::Logger as core::default::Default>::default",
            SCOPE
        ));
        assert!(!is_in_scope("rust_json_logger::corelib::thing", SCOPE));
        assert!(!is_in_scope("rust_json_logger::appenders::MemorySink::lines", SCOPE));
        assert!(!is_in_scope("core::ops::function::FnOnce::call_once", SCOPE));
    }

    #[test]
    fn test_library_scope_is_parent_module() {
        assert_eq!(enclosing_scope("a::b::c"), "a::b");
        assert_eq!(enclosing_scope("a"), "a");
        assert!(library_scope().ends_with("::core"));
    }

    #[test]
    fn test_zero_max_depth_is_rejected() {
        assert!(CallSiteConfig::default().with_max_depth(0).validate().is_err());
        assert!(CallSiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tiny_max_depth_resolves_to_placeholder() {
        let config = CallSiteConfig::default().wrapped().with_max_depth(1);
        assert_eq!(config.locate(&library_scope(), Location::caller()), UNKNOWN_CALL_SITE);
    }

    #[test]
    fn test_tracked_caller_needs_no_stack() {
        let config = CallSiteConfig::default().with_max_depth(1);
        assert!(config.tracks_caller());
        assert!(!CallSiteConfig::default().wrapped().tracks_caller());
        assert!(!CallSiteConfig::fixed(DEFAULT_CALLER_DEPTH).tracks_caller());

        let (line, site) = (line!(), config.locate(&library_scope(), Location::caller()));
        assert_eq!(site, format!("caller.rs:{}", line));
    }
}
