use logstream::error::{StreamError, StreamResult};
use logstream::stream::{from_generator, from_iter, Merge, Stream, StreamExt};
use std::io;

#[test]
fn test_io_error_conversion() {
    let err: StreamError = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
    assert_eq!(err, StreamError::IO("no such file".to_string()));
}

#[test]
fn test_error_messages() {
    assert_eq!(StreamError::NoBookmark.to_string(), "No bookmark set");
    assert_eq!(
        StreamError::MissingArgument("files".to_string()).to_string(),
        "Missing argument: files"
    );
    assert_eq!(
        StreamError::EmptyArgument("files".to_string()).to_string(),
        "Empty argument: files"
    );
    assert_eq!(
        StreamError::InvalidArgument("arity".to_string()).to_string(),
        "Invalid argument: arity"
    );
    assert_eq!(StreamError::IO("eof".to_string()).to_string(), "IO error: eof");
}

#[test]
fn test_error_travels_through_decorator_chain() {
    let mut n = 0;
    let source = from_generator(move || -> StreamResult<Option<i32>> {
        n += 1;
        if n <= 3 {
            Ok(Some(n))
        } else {
            Err(StreamError::IO("read failed".to_string()))
        }
    });
    let mut pipeline = source
        .filter(|x| x % 2 == 1)
        .map(|x| x * 100)
        .rewindable();

    assert_eq!(pipeline.get().unwrap(), Some(100));
    assert_eq!(pipeline.get().unwrap(), Some(300));
    assert_eq!(pipeline.get(), Err(StreamError::IO("read failed".to_string())));
    assert_eq!(pipeline.get(), Ok(None));
}

#[test]
fn test_merge_reports_error_of_first_input() {
    let broken = from_generator(|| -> StreamResult<Option<&'static str>> {
        Err(StreamError::IO("unreadable".to_string()))
    });
    let fine = from_iter(vec!["x"]);
    let merged = Merge::round_robin(vec![broken.boxed(), fine.boxed()]).unwrap();
    // The broken input is first in line, so the merge fails on its first pull
    assert!(merged.head().is_err());
}
