//! # Network Observation
//!
//! Read-only network monitoring: requests, responses, failures, and timing,
//! fed by `Network.requestWillBeSent` / `responseReceived` / `loadingFailed`
//! / `loadingFinished` events.
//!
//! Request/response rewriting (interception, mocking, HAR record/replay,
//! WebSocket frame inspection) has no counterpart in the step schema and is
//! out of scope here. What remains is exactly what the `networkidle`
//! quiescence heuristic in [`crate::wait`] and the network-observing step
//! actions need.
//!
//! ## Wait for a response
//!
//! ```ignore
//! use viewpoint_core::Browser;
//!
//! # async fn example() -> Result<(), viewpoint_core::CoreError> {
//! # let browser = Browser::launch().headless(true).launch().await?;
//! # let context = browser.new_context().await?;
//! # let page = context.new_page().await?;
//! let response = page.wait_for_response("**/api/data").wait().await?;
//! println!("status: {}", response.status());
//! # Ok(())
//! # }
//! ```

pub mod events;
mod request;
mod response;
mod types;

pub use events::{
    NetworkEvent, NetworkEventListener, RequestEvent, RequestFailedEvent, RequestFinishedEvent,
    ResponseEvent, WaitForRequestBuilder, WaitForResponseBuilder,
};
pub use request::{Request, RequestSizes, RequestTiming};
pub use response::{RemoteAddress, Response, SecurityDetails};
pub use types::{ResourceType, UrlMatcher, UrlPattern};

// Re-export CDP types used directly.
pub use viewpoint_cdp::protocol::fetch::HeaderEntry;
