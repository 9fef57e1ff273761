//! Async HTTP client for the two upstream sources.

use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};

/// Async HTTP client wrapping both source endpoints.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. No retry
/// or backoff: a transport failure or non-2xx status propagates and aborts
/// the refresh.
#[derive(Clone)]
pub struct SourceClient {
  http: reqwest::Client,
}

impl SourceClient {
  pub fn new() -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { http })
  }

  /// GET a page and return its body as text.
  pub async fn fetch_page(&self, url: &str) -> Result<String> {
    let resp = self.http.get(url).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        url:    url.to_string(),
        status: resp.status().as_u16(),
      });
    }
    Ok(resp.text().await?)
  }

  /// GET the statistics endpoint and return the parsed JSON body.
  ///
  /// The API authenticates via `x-rapidapi-key`/`x-rapidapi-host` headers;
  /// `country` narrows the response scope when set.
  pub async fn fetch_stats(
    &self,
    url: &str,
    api_key: &str,
    country: Option<&str>,
  ) -> Result<Value> {
    let mut req = self.http.get(url).header("x-rapidapi-key", api_key);
    if let Some(host) = host_of(url) {
      req = req.header("x-rapidapi-host", host);
    }
    if let Some(country) = country {
      req = req.query(&[("country", country)]);
    }

    let resp = req.send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        url:    url.to_string(),
        status: resp.status().as_u16(),
      });
    }
    Ok(resp.json().await?)
  }
}

/// Host portion of a URL, without scheme, path, or query.
fn host_of(url: &str) -> Option<&str> {
  let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
  let host = rest.split(['/', '?']).next()?;
  (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
  use super::host_of;

  #[test]
  fn host_of_strips_scheme_and_path() {
    assert_eq!(
      host_of("https://covid-193.p.rapidapi.com/statistics"),
      Some("covid-193.p.rapidapi.com")
    );
    assert_eq!(host_of("https://example.com"), Some("example.com"));
    assert_eq!(host_of("example.com?x=1"), Some("example.com"));
    assert_eq!(host_of("https://"), None);
  }
}
