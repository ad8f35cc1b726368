//! In-process height source for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use url::Url;

use crate::config::EndpointConfig;
use crate::health::endpoints::EndpointSet;
use crate::rpc::{HeightSource, SENTINEL_HEIGHT};

#[derive(Debug, Clone)]
enum Reply {
    Height(u64, Duration),
    Panic,
}

/// Answers by endpoint name; the URL host is `<name>.test`.
#[derive(Debug, Default)]
pub struct StubSource {
    replies: Mutex<HashMap<String, Reply>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(self, name: &str, height: u64) -> Self {
        self.delayed(name, height, Duration::ZERO)
    }

    pub fn delayed(self, name: &str, height: u64, delay: Duration) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), Reply::Height(height, delay));
        self
    }

    pub fn panics(self, name: &str) -> Self {
        self.replies.lock().unwrap().insert(name.to_string(), Reply::Panic);
        self
    }

    pub fn set(&self, name: &str, height: u64) {
        self.replies
            .lock()
            .unwrap()
            .insert(name.to_string(), Reply::Height(height, Duration::ZERO));
    }
}

impl HeightSource for StubSource {
    async fn fetch_height(&self, url: &Url) -> u64 {
        let name = url
            .host_str()
            .unwrap_or_default()
            .trim_end_matches(".test")
            .to_string();
        let reply = self.replies.lock().unwrap().get(&name).cloned();

        match reply {
            Some(Reply::Height(height, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                height
            }
            Some(Reply::Panic) => panic!("stub failure for {name}"),
            None => SENTINEL_HEIGHT,
        }
    }
}

/// Endpoint set where the first name is local.
pub fn endpoint_set(names: &[&str]) -> Arc<EndpointSet> {
    let configs: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| EndpointConfig {
            name: name.to_string(),
            url: format!("http://{name}.test/"),
            local: i == 0,
        })
        .collect();
    Arc::new(EndpointSet::from_config(&configs).unwrap())
}
