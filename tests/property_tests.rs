//! Property-based tests for rust_pattern_logger using proptest

use proptest::prelude::*;
use rust_pattern_logger::patterns::{ClassPattern, JsonPattern, Pattern};
use rust_pattern_logger::arguments;
use rust_pattern_logger::prelude::*;
use serde_json::Value;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

fn record_with_class(class_name: &str) -> Record {
    Record::new(LogLevel::Info, "fallback", "msg").with_caller_frame(StackFrame {
        class_name: class_name.to_string(),
        method_name: "run".to_string(),
        file_name: "src/lib.rs".to_string(),
        line_number: 7,
    })
}

fn record_at(level: LogLevel, message: String, class_name: &str) -> Record {
    Record::new(level, "app", message).with_caller_frame(StackFrame {
        class_name: class_name.to_string(),
        method_name: "handle".to_string(),
        file_name: "src/svc.rs".to_string(),
        line_number: 42,
    })
}

fn render_class(mode: ClassDisplayMode, record: &Record) -> String {
    let mut out = String::new();
    ClassPattern::new(mode).render(record, &mut out).unwrap();
    out
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level ordering follows the discriminant
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
    }
}

// ============================================================================
// Class Name Tests
// ============================================================================

proptest! {
    /// Compressed names keep the last segment and the initial of every other one
    #[test]
    fn test_compressed_dotted_names(
        segments in prop::collection::vec("[a-z][a-z0-9]{0,8}", 1..6),
        last in "[A-Z][A-Za-z0-9]{0,10}",
    ) {
        let full = format!("{}.{}", segments.join("."), last);
        let expected: String = segments
            .iter()
            .map(|s| format!("{}.", &s[..1]))
            .collect::<String>() + &last;

        prop_assert_eq!(render_class(ClassDisplayMode::Compressed, &record_with_class(&full)), expected);
    }

    /// The same holds for module paths
    #[test]
    fn test_compressed_module_paths(segments in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 2..6)) {
        let full = segments.join("::");
        let (last, init) = segments.split_last().unwrap();
        let expected: String = init
            .iter()
            .map(|s| format!("{}::", &s[..1]))
            .collect::<String>() + last;

        prop_assert_eq!(render_class(ClassDisplayMode::Compressed, &record_with_class(&full)), expected);
    }

    /// Full mode is the identity, simple mode is the last segment
    #[test]
    fn test_full_and_simple_modes(segments in prop::collection::vec("[a-z][a-z0-9]{0,8}", 1..6)) {
        let full = segments.join("::");
        let record = record_with_class(&full);

        prop_assert_eq!(render_class(ClassDisplayMode::Full, &record), full.clone());
        prop_assert_eq!(
            render_class(ClassDisplayMode::Simple, &record),
            segments.last().unwrap().clone()
        );
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

proptest! {
    /// Rendering the same record twice gives the same text
    #[test]
    fn test_render_is_idempotent(
        message in "[a-z {}]{0,40}",
        args in prop::collection::vec(any::<i64>(), 0..4),
        level in any_level(),
    ) {
        let sink = Sink::parse("{timestamp} {level(5)} {class(compressed)} - {message}").unwrap();
        let arguments: Vec<Argument> = args.into_iter().map(|a| Box::new(a) as Argument).collect();
        let record = Record::new(level, "app::prop", message).with_arguments(arguments);

        let first = sink.render(&record).unwrap();
        let second = sink.render(&record).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Placeholders consume arguments in order; extras on either side are left alone
    #[test]
    fn test_placeholder_substitution(
        placeholders in 0usize..5,
        args in prop::collection::vec(0u32..1000, 0..5),
    ) {
        let template = vec!["{}"; placeholders].join("|");
        let arguments: Vec<Argument> = args.iter().map(|a| Box::new(*a) as Argument).collect();
        let record = Record::new(LogLevel::Info, "app", template).with_arguments(arguments);

        let expected: Vec<String> = (0..placeholders)
            .map(|idx| args.get(idx).map_or_else(|| "{}".to_string(), |a| a.to_string()))
            .collect();
        prop_assert_eq!(record.resolved_message().unwrap(), expected.join("|"));
    }

    /// Minified and pretty JSON carry the same document
    #[test]
    fn test_json_minify_equivalence(
        message in "\\PC{0,40}",
        level in any_level(),
        caller_detail in any::<bool>(),
    ) {
        let record = record_at(level, message, "app::svc");

        let mut pretty = String::new();
        JsonPattern::new(false, caller_detail, false).render(&record, &mut pretty).unwrap();
        let mut minified = String::new();
        JsonPattern::new(false, caller_detail, true).render(&record, &mut minified).unwrap();

        prop_assert!(!minified.contains('\n'));
        let pretty: Value = serde_json::from_str(&pretty).unwrap();
        let minified: Value = serde_json::from_str(&minified).unwrap();
        prop_assert_eq!(pretty, minified);
    }

    /// Text without braces parses to a single verbatim pattern that renders unchanged
    #[test]
    fn test_verbatim_lines(text in "[^{}]{1,60}") {
        let sink = Sink::parse(&text).unwrap();
        prop_assert_eq!(sink.patterns().len(), 1);
        prop_assert!(matches!(sink.patterns()[0], Pattern::Verbatim(_)));
        prop_assert!(!sink.needs_caller_detail());
        prop_assert!(!sink.needs_caller_thread());

        let record = Record::new(LogLevel::Info, "app", "ignored").with_arguments(arguments![1]);
        prop_assert_eq!(sink.render(&record).unwrap(), text);
    }
}
