//! Shared setup for runtime integration tests: a real headless browser with
//! one attached page, matching the pattern used throughout `viewpoint-core`'s
//! own integration suite.

use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

use viewpoint_core::{Browser, BrowserContext, Page};
use viewpoint_runtime::{InMemoryTabRegistry, Runner, RunnerConfig, TabRegistry};

static TRACING_INIT: Once = Once::new();

pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Launch a headless browser, one context, and one page registered as
/// `tab-0` in the returned tab map, plus a fresh [`Runner`] wired to an
/// in-memory tab registry.
pub async fn launch_runner() -> (Browser, BrowserContext, HashMap<String, Page>, Runner<InMemoryTabRegistry>) {
    init_tracing();
    let browser = Browser::launch()
        .headless(true)
        .timeout(Duration::from_secs(30))
        .launch()
        .await
        .expect("failed to launch browser");
    let context = browser.new_context().await.expect("failed to create context");
    let page = context.new_page().await.expect("failed to create page");

    let registry = InMemoryTabRegistry::new();
    registry
        .add(
            Some("tab-0".to_string()),
            viewpoint_runtime::TabEntry {
                target_id: page.target_id().to_string(),
                host: "localhost".to_string(),
                port: 0,
            },
        )
        .expect("register initial tab");

    let mut tabs = HashMap::new();
    tabs.insert("tab-0".to_string(), page);

    let runner = Runner::new(RunnerConfig::default(), registry, "tab-0");
    (browser, context, tabs, runner)
}

pub fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencode(html))
}

fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
