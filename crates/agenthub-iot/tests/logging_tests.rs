//! Logging bootstrap test. Kept in its own binary: the subscriber is global.

use agenthub_iot::{init_logging, DEFAULT_LOG_FILTER};

#[test]
fn test_init_logging_once() {
    let _ = init_logging(DEFAULT_LOG_FILTER);
    assert!(init_logging(DEFAULT_LOG_FILTER).is_err());
}
