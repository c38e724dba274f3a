pub mod helpers;
pub mod mock_http;
pub mod mock_ledger;

pub use helpers::*;
pub use mock_http::{unreachable_url, MockResponse, MockServer, RecordedRequest};
pub use mock_ledger::{MockLedger, StakeRecord};
