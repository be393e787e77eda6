use rotolog::color;
use rotolog::{Body, Caller, Flags, Level, Record};

fn rendered(record: &Record) -> String {
    String::from_utf8_lossy(record.render()).into_owned()
}

#[test]
fn render_returns_the_same_bytes_every_time() {
    let record = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["once".to_string()]),
        Flags::empty(),
    );
    let first = record.render().to_vec();
    let second = record.render().to_vec();
    assert_eq!(first, second);
}

#[test]
fn concat_body_joins_without_separator() {
    let record = Record::new(
        0,
        None,
        Body::Concat(vec!["a".to_string(), "b".to_string()]),
        Flags::empty(),
    );
    assert_eq!(rendered(&record), "ab\n");
}

#[test]
fn line_body_joins_with_spaces() {
    let record = Record::new(
        0,
        None,
        Body::Line(vec!["a".to_string(), "b".to_string()]),
        Flags::empty(),
    );
    assert_eq!(rendered(&record), "a b\n");
}

#[test]
fn format_body_substitutes_placeholders() {
    let record = Record::new(
        0,
        None,
        Body::Format("x={} y={}".to_string(), vec!["1".to_string(), "2".to_string()]),
        Flags::empty(),
    );
    assert_eq!(rendered(&record), "x=1 y=2\n");
}

#[test]
fn header_orders_sequence_before_level_tag() {
    let record = Record::new(
        7,
        Some(Level::Warn),
        Body::Concat(vec!["msg".to_string()]),
        Flags::SEQUENCE,
    );
    assert_eq!(rendered(&record), "[7] [WARN] msg\n");
}

#[test]
fn prefix_precedes_every_other_field() {
    let record = Record::new(
        3,
        Some(Level::Error),
        Body::Concat(vec!["boom".to_string()]),
        Flags::SEQUENCE,
    )
    .with_prefix(">> ");
    assert_eq!(rendered(&record), ">> [3] [ERROR] boom\n");
}

#[test]
fn module_field_requires_the_flag() {
    let with_flag = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::MODULE,
    )
    .with_module("svc");
    assert_eq!(rendered(&with_flag), "[INFO] svc m\n");

    let without_flag = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::empty(),
    )
    .with_module("svc");
    assert_eq!(rendered(&without_flag), "[INFO] m\n");
}

#[test]
fn short_file_strips_the_directory() {
    let record = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::SHORT_FILE,
    )
    .with_caller(Caller {
        file: "src/deep/place.rs",
        line: 42,
        function: None,
    });
    assert_eq!(rendered(&record), "[INFO] place.rs:42: m\n");
}

#[test]
fn long_file_keeps_the_full_path() {
    let record = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::LONG_FILE,
    )
    .with_caller(Caller {
        file: "src/deep/place.rs",
        line: 42,
        function: None,
    });
    assert_eq!(rendered(&record), "[INFO] src/deep/place.rs:42: m\n");
}

#[test]
fn short_function_strips_the_module_path() {
    let record = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::SHORT_FILE | Flags::SHORT_FUNCTION,
    )
    .with_caller(Caller {
        file: "src/deep/place.rs",
        line: 42,
        function: Some("app::worker::run"),
    });
    assert_eq!(rendered(&record), "[INFO] place.rs:42:run: m\n");
}

#[test]
fn date_and_time_render_in_slash_format() {
    let record = Record::new(
        0,
        Some(Level::Info),
        Body::Concat(vec!["m".to_string()]),
        Flags::STD,
    );
    let line = rendered(&record);
    // "YYYY/MM/DD HH:MM:SS [INFO] m\n"
    let mut fields = line.split(' ');
    let date = fields.next().unwrap();
    let time = fields.next().unwrap();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "/");
    assert_eq!(time.len(), 8);
    assert_eq!(&time[2..3], ":");
    assert_eq!(fields.next(), Some("[INFO]"));
}

#[test]
fn microseconds_extend_the_time_field() {
    let record = Record::new(
        0,
        None,
        Body::Concat(vec!["m".to_string()]),
        Flags::TIME | Flags::MICROSECONDS,
    );
    let line = rendered(&record);
    let time = line.split(' ').next().unwrap();
    // "HH:MM:SS.uuuuuu"
    assert_eq!(time.len(), 15);
    assert_eq!(&time[8..9], ".");
}

#[test]
fn color_set_before_render_wraps_the_line() {
    let mut record = Record::new(
        0,
        Some(Level::Error),
        Body::Concat(vec!["red".to_string()]),
        Flags::empty(),
    );
    record.set_color(color::sequence(Some(Level::Error), false));
    let line = rendered(&record);
    assert!(line.starts_with("\x1b[31m"));
    assert!(line.ends_with(color::RESET));
}

#[test]
fn color_set_after_render_has_no_effect() {
    let mut record = Record::new(
        0,
        Some(Level::Error),
        Body::Concat(vec!["plain".to_string()]),
        Flags::empty(),
    );
    let before = record.render().to_vec();
    record.set_color(color::sequence(Some(Level::Error), false));
    assert_eq!(record.render(), &before[..]);
}

#[test]
fn level_less_record_has_no_tag() {
    let record = Record::new(
        5,
        None,
        Body::Concat(vec!["plain".to_string()]),
        Flags::SEQUENCE,
    );
    assert_eq!(rendered(&record), "[5] plain\n");
}

#[test]
fn line_body_does_not_double_the_newline() {
    let record = Record::new(
        0,
        None,
        Body::Line(vec!["one".to_string()]),
        Flags::empty(),
    );
    assert_eq!(rendered(&record), "one\n");
}
