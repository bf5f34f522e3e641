pub mod envelope;
pub mod http;
pub mod loader;
pub mod routes;
pub mod traits;

pub use http::HttpBoardService;
pub use loader::fetch_board_snapshot;
pub use traits::*;
