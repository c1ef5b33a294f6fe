//! Sitemap generation and search engine pings.
//!
//! The sitemap lists the site root followed by one page URL per fact, in
//! sorted language then identifier order. It is rebuilt from the store on
//! every request; the store is small and read-only.

use factios_store::FactSource;
use serde::Serialize;
use tracing::warn;

/// XML namespace of the sitemap protocol.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Result of pinging one search engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingOutcome {
    /// The ping endpoint that was called.
    pub endpoint: String,
    /// HTTP status returned by the endpoint, if the request completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Why the request did not complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Public URL of the sitemap document.
pub fn sitemap_location(base_url: &str) -> String {
    format!("{base_url}/sitemap.xml")
}

/// Every page URL of the site: the root, then one per fact.
///
/// Enumeration failures are logged and skipped; the root URL is always
/// present.
pub fn sitemap_urls(store: &dyn FactSource, base_url: &str) -> Vec<String> {
    let mut urls = vec![format!("{base_url}/")];

    let languages = match store.languages() {
        Ok(languages) => languages,
        Err(e) => {
            warn!(error = %e, "sitemap: cannot enumerate languages");
            return urls;
        }
    };

    for language in languages {
        match store.identifiers(&language) {
            Ok(shorts) => {
                urls.extend(
                    shorts
                        .iter()
                        .map(|short| format!("{base_url}/f/{language}/{short}")),
                );
            }
            Err(e) => warn!(language = %language, error = %e, "sitemap: cannot enumerate facts"),
        }
    }

    urls
}

/// Render a `urlset` sitemap document.
pub fn render_sitemap(urls: &[String]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");
    for url in urls {
        xml.push_str("  <url><loc>");
        xml.push_str(&escape_xml(url));
        xml.push_str("</loc></url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Notify each endpoint that the sitemap at `sitemap_url` changed.
///
/// Sends `GET {endpoint}?sitemap={sitemap_url}` to every endpoint in turn.
/// A failing endpoint is recorded in its outcome and does not stop the
/// others.
pub async fn ping_search_engines(
    client: &reqwest::Client,
    endpoints: &[String],
    sitemap_url: &str,
) -> Vec<PingOutcome> {
    let mut outcomes = Vec::with_capacity(endpoints.len());

    for endpoint in endpoints {
        let url = match reqwest::Url::parse_with_params(endpoint, &[("sitemap", sitemap_url)]) {
            Ok(url) => url,
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "sitemap ping: invalid endpoint");
                outcomes.push(PingOutcome {
                    endpoint: endpoint.clone(),
                    status: None,
                    error: Some(format!("invalid endpoint: {e}")),
                });
                continue;
            }
        };

        let outcome = match client.get(url).send().await {
            Ok(response) => PingOutcome {
                endpoint: endpoint.clone(),
                status: Some(response.status().as_u16()),
                error: None,
            },
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "sitemap ping failed");
                PingOutcome {
                    endpoint: endpoint.clone(),
                    status: None,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    outcomes
}

/// Escape the five XML special characters.
fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
