use super::*;

#[test]
fn buffer_handler_println_captures_with_newline() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    assert_eq!(handler.get_output(), "hello\n");
}

#[test]
fn buffer_handler_print_captures_without_newline() {
    let handler = BufferPrintHandler::new();
    handler.print("hello");
    handler.print(" ");
    handler.println("world");
    assert_eq!(handler.get_output(), "hello world\n");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn scripted_input_is_served_in_order() {
    let handler = scripted_handler(["first", "second"]);
    assert_eq!(handler.read_line().as_deref(), Some("first"));
    assert_eq!(handler.read_line().as_deref(), Some("second"));
    assert_eq!(handler.read_line(), None);
}

#[test]
fn buffer_handler_without_input_reports_end() {
    assert_eq!(buffer_handler().read_line(), None);
}

#[test]
fn silent_handler_discards_output() {
    let handler = silent_handler();
    handler.println("hello");
    handler.print("world");
    assert_eq!(handler.get_output(), "");
    assert_eq!(handler.read_line(), None);
}

#[test]
fn stdout_handler_get_output_returns_empty() {
    let handler = StdoutPrintHandler;
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn strip_newline_handles_crlf() {
    assert_eq!(strip_newline("abc\r\n".to_string()), "abc");
    assert_eq!(strip_newline("abc\n".to_string()), "abc");
    assert_eq!(strip_newline("abc".to_string()), "abc");
}
