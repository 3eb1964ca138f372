//! JSON-lines reader for scanner result events.

use jira_api::ResultEvent;
use std::io::BufRead;

/// One non-blank input line, parsed or not.
#[derive(Debug)]
pub struct EventLine {
    pub line_number: usize,
    pub event: Result<ResultEvent, String>,
}

/// Streams result events from `reader`, one line at a time.
pub fn read_events<R: BufRead>(reader: R) -> EventReader<R> {
    EventReader {
        reader,
        line_number: 0,
        buffer: Vec::new(),
        finished: false,
    }
}

/// Iterator over the non-blank lines of a JSON-lines stream. Lines that are
/// not UTF-8 or not a valid event come out as errors for that line only. A
/// failing read yields one last error and ends the stream.
pub struct EventReader<R> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = EventLine;

    fn next(&mut self) -> Option<EventLine> {
        while !self.finished {
            self.buffer.clear();
            let read = match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(read) => read,
                Err(err) => {
                    self.finished = true;
                    return Some(EventLine {
                        line_number: self.line_number + 1,
                        event: Err(format!("Failed to read events: {err}")),
                    });
                }
            };
            if read == 0 {
                self.finished = true;
                break;
            }
            self.line_number += 1;

            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line.trim(),
                Err(err) => {
                    return Some(EventLine {
                        line_number: self.line_number,
                        event: Err(format!(
                            "Invalid result event on line {}: {err}",
                            self.line_number
                        )),
                    });
                }
            };
            if line.is_empty() {
                continue;
            }

            let event = serde_json::from_str::<ResultEvent>(line).map_err(|err| {
                format!("Invalid result event on line {}: {err}", self.line_number)
            });
            return Some(EventLine {
                line_number: self.line_number,
                event,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::read_events;
    use std::io::Cursor;

    const VALID: &str = r#"{"template-id":"git-config","type":"http","host":"https://example.com","timestamp":"2021-06-01T10:15:30Z"}"#;

    #[test]
    fn skips_blank_lines_and_keeps_line_numbers() {
        let input = format!("\n{VALID}\n   \n{VALID}");
        let events: Vec<_> = read_events(Cursor::new(input)).collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].line_number, 2);
        assert_eq!(events[1].line_number, 4);
        assert!(events.iter().all(|line| line.event.is_ok()));
    }

    #[test]
    fn malformed_lines_are_reported_not_fatal() {
        let input = format!("{{not json}}\n{VALID}\n");
        let events: Vec<_> = read_events(Cursor::new(input)).collect();

        assert_eq!(events.len(), 2);
        let err = events[0].event.as_ref().unwrap_err();
        assert!(err.starts_with("Invalid result event on line 1"));
        assert_eq!(
            events[1].event.as_ref().map(|event| event.template_id.as_str()),
            Ok("git-config")
        );
    }

    #[test]
    fn non_utf8_line_only_fails_that_line() {
        let mut input = Vec::new();
        input.extend_from_slice(VALID.as_bytes());
        input.extend_from_slice(b"\n\xff\xfe garbage\n");
        input.extend_from_slice(VALID.as_bytes());
        input.push(b'\n');

        let events: Vec<_> = read_events(Cursor::new(input)).collect();

        assert_eq!(events.len(), 3);
        assert!(events[0].event.is_ok());
        let err = events[1].event.as_ref().unwrap_err();
        assert!(err.starts_with("Invalid result event on line 2"));
        assert!(events[2].event.is_ok());
        assert_eq!(events[2].line_number, 3);
    }

    #[test]
    fn yields_lines_before_reaching_end_of_input() {
        let input = format!("{VALID}\n{VALID}\n");
        let mut events = read_events(Cursor::new(input));

        let first = events.next().expect("first line");
        assert_eq!(first.line_number, 1);
        assert!(first.event.is_ok());
    }
}
