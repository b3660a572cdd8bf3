//! Pipes between file, string and pushback streams.

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{ARTICLE, ARTICLE_LINE_1, ARTICLE_LINE_3, MockOutput, SampleDir};
use iostream::{
    Closable, Endpoint, ErrorKind, FileInputStream, FileOutputStream, InputStream, OutputStream,
    Pipe, PushBackInputStream, PushBackStream, ReadOutcome, Seekable, StreamError,
    StringInputStream, StringOutputStream, UnixConfig, WindowsConfig, WriteMode,
};

#[test]
fn test_file_to_file_lines() {
    let dir = SampleDir::new();
    let mut input: FileInputStream = FileInputStream::open(dir.article()).unwrap();
    let mut output: FileOutputStream<WindowsConfig> =
        FileOutputStream::create(dir.path("copy.txt"), WriteMode::Truncate).unwrap();

    let lines = {
        let mut pipe = Pipe::connect(&mut input, &mut output);
        pipe.process_lines(10).unwrap().data().unwrap()
    };
    output.close().unwrap();

    assert_eq!(lines, [ARTICLE_LINE_1, "", ARTICLE_LINE_3]);
    assert_eq!(
        dir.read("copy.txt"),
        format!("{ARTICLE_LINE_1}\r\n\r\n{ARTICLE_LINE_3}\r\n")
    );
    assert!(!input.is_closed());
}

#[test]
fn test_file_to_string_chars() {
    let dir = SampleDir::new();
    let mut input: FileInputStream = FileInputStream::open(dir.article()).unwrap();
    let mut output = StringOutputStream::<UnixConfig>::new();

    {
        let mut pipe = Pipe::connect(&mut input, &mut output);
        assert_eq!(pipe.process_chars(50).unwrap().data().unwrap().chars().count(), 50);
        assert_eq!(pipe.process_chars(1000).unwrap().data().unwrap().chars().count(), 158);
        assert!(pipe.process_chars(1).unwrap().is_end());
    }

    assert_eq!(output.contents(), ARTICLE);
    assert_eq!(input.tell().unwrap(), 208);
}

#[test]
fn test_pushback_source() {
    let mut input: PushBackStream<_> = PushBackStream::new(StringInputStream::new(", World!"));
    input.unread("Hello").unwrap();
    let mut output = StringOutputStream::<UnixConfig>::new();

    {
        let mut pipe = Pipe::connect(&mut input, &mut output);
        while !pipe.process_char().unwrap().is_end() {}
    }

    assert_eq!(output.contents(), "Hello, World!");
    assert_eq!(input.pending(), 0);
}

#[test]
fn test_swap_input_midway() {
    let mut first = StringInputStream::new("Foo\nBar\n");
    let mut second = StringInputStream::new("Baz\n");
    let mut output = StringOutputStream::<UnixConfig>::new();

    {
        let mut pipe = Pipe::new();
        pipe.attach(&mut first, &mut output);
        assert_eq!(pipe.process_line().unwrap().data().unwrap(), "Foo");

        pipe.attach_input(&mut second);
        assert_eq!(pipe.process_lines(3).unwrap().data().unwrap(), ["Baz"]);
        assert!(pipe.process_line().unwrap().is_end());
    }

    assert_eq!(output.contents(), "Foo\nBaz\n");
    assert_eq!(first.read_line(None).unwrap().data().unwrap(), "Bar");
}

#[test]
fn test_detached_pipe() {
    let mut output = MockOutput::new();
    let mut pipe = Pipe::new();
    pipe.attach_output(&mut output);

    let err = pipe.process_chars(4).unwrap_err();
    assert!(matches!(err, StreamError::Detached(Endpoint::Input)));
    assert_eq!(err.kind(), ErrorKind::Usage);
}

#[test]
fn test_output_failure_mid_transfer() {
    let mut input = StringInputStream::new("a\nb\nc\n");
    let mut output = MockOutput::failing_after(3);

    {
        let mut pipe = Pipe::connect(&mut input, &mut output);
        let err = pipe.process_lines(3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Medium);
    }

    // "a" + ending + "b" made it; the line whose ending failed is consumed
    assert_eq!(output.output(), "a\nb");
    assert_eq!(input.read_line(None).unwrap(), ReadOutcome::Data("c".to_string()));
}

#[test]
fn test_write_lines_keeps_partial_output() {
    let mut output = MockOutput::failing_after(2);

    let err = output.write_lines(["one", "two"]).unwrap_err();
    assert!(!err.is_usage());
    assert_eq!(output.output(), "one\n");
}

#[test]
fn test_closed_output_is_usage_error() {
    let mut input = StringInputStream::new("abc");
    let mut output = MockOutput::new();
    output.close().unwrap();

    let mut pipe = Pipe::connect(&mut input, &mut output);
    assert!(pipe.process_char().unwrap_err().is_usage());
    assert!(pipe.input().is_some_and(|is| is.is_readable()));
}
