pub(crate) mod live;
pub(crate) mod matches;
pub(crate) mod news;
pub(crate) mod rankings;
pub(crate) mod results;
pub(crate) mod stats;
pub(crate) mod streams;

use itertools::Itertools;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};

pub(crate) const BASE_URL: &str = "https://www.vlr.gg";

// vlr.gg serves reduced markup to clients it does not recognize.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36 Edg/121.0.0.0";

/// Fetch a URL and parse the response body as an HTML document.
///
/// Non-success statuses are returned alongside the document rather than
/// failing here; callers run extraction first and then [`assert_success`],
/// so an error page still reports its real status.
pub(crate) async fn get_document(
    client: &reqwest::Client,
    url: &str,
) -> Result<(Html, StatusCode)> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|e| VlrError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| VlrError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok((Html::parse_document(&body), status))
}

/// Fail with the upstream status when it is anything but 200.
pub(crate) fn assert_success(url: &str, status: StatusCode) -> Result<()> {
    if status != StatusCode::OK {
        return Err(VlrError::Upstream {
            url: url.to_owned(),
            status,
        });
    }
    Ok(())
}

/// First element matching `selector` inside `element`, or an extraction
/// error naming the missing field and the item it belongs to.
pub(crate) fn require_first<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    field: &'static str,
    index: usize,
) -> Result<ElementRef<'a>> {
    element
        .select(selector)
        .next()
        .ok_or(VlrError::Extraction { field, index })
}

/// Attribute value of an element, or an extraction error.
pub(crate) fn require_attr(
    element: ElementRef,
    attr: &str,
    field: &'static str,
    index: usize,
) -> Result<String> {
    element
        .value()
        .attr(attr)
        .map(str::to_owned)
        .ok_or(VlrError::Extraction { field, index })
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}

/// Full concatenated text of an element, untouched.
pub(crate) fn full_text(element: &ElementRef) -> String {
    element.text().collect()
}

/// Element text with the uniform normalization applied: tabs and newlines
/// stripped, surrounding whitespace trimmed.
pub(crate) fn node_text(element: &ElementRef) -> String {
    full_text(element).replace(['\n', '\t'], "").trim().to_string()
}

/// Text with tabs and newlines collapsed to single spaces, then trimmed.
pub(crate) fn clean_text(text: &str) -> String {
    text.replace(['\t', '\n'], " ").trim().to_string()
}

/// Normalize a potentially protocol-relative or site-relative image URL to
/// an absolute vlr.gg URL.
pub(crate) fn normalize_img_url(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{BASE_URL}{src}")
    } else {
        src.to_string()
    }
}

/// Relative-time states other than `LIVE` get the direction suffix
/// appended (`2d 5h` becomes `2d 5h from now`).
pub(crate) fn format_eta(raw: &str, suffix: &str) -> String {
    let eta = raw.replace('\t', "").replace('\n', " ").trim().to_string();
    if eta == "LIVE" {
        eta
    } else {
        format!("{eta}{suffix}")
    }
}

/// Derive a platform name from a stream URL: single-label hosts map to
/// themselves, multi-label hosts take the second-from-end label
/// (`www.twitch.tv` becomes `twitch`).
pub(crate) fn infer_platform(href: &str) -> String {
    let Some(host) = reqwest::Url::parse(href)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
    else {
        return String::new();
    };
    let labels = host.split('.').collect_vec();
    match labels.len() {
        0 | 1 => host,
        n => labels[n - 2].to_string(),
    }
}

/// Flag identifier for list pages: each ` mod-` marker in the class
/// attribute is folded into an underscore (`flag mod-us` becomes `flag_us`).
pub(crate) fn flag_key(class_attr: &str) -> String {
    class_attr.replace(" mod-", "_")
}

/// Flag identifier for the home-page live module: `mod-` markers dropped
/// and the `16` sizing variant folded into the separator
/// (`flag mod-16 mod-us` becomes `flag_us`).
pub(crate) fn home_flag_key(class_attr: &str) -> String {
    class_attr.replace(" mod-", "").replace("16", "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_multi_label_host() {
        assert_eq!(infer_platform("https://www.twitch.tv/valorant"), "twitch");
        assert_eq!(infer_platform("https://youtube.com/watch?v=abc"), "youtube");
    }

    #[test]
    fn platform_from_single_label_host() {
        assert_eq!(infer_platform("https://localhost/stream"), "localhost");
    }

    #[test]
    fn platform_from_unparsable_href() {
        assert_eq!(infer_platform(""), "");
        assert_eq!(infer_platform("/123/some-match"), "");
    }

    #[test]
    fn flag_key_folds_modifiers() {
        assert_eq!(flag_key("flag mod-us"), "flag_us");
        assert_eq!(flag_key("flag mod-eu mod-dark"), "flag_eu_dark");
    }

    #[test]
    fn home_flag_key_drops_sizing_variant() {
        assert_eq!(home_flag_key("flag mod-16 mod-us"), "flag_us");
        assert_eq!(home_flag_key("flag mod-16 mod-kr"), "flag_kr");
    }

    #[test]
    fn img_url_normalization() {
        assert_eq!(
            normalize_img_url("//owcdn.net/img/event.png"),
            "https://owcdn.net/img/event.png"
        );
        assert_eq!(
            normalize_img_url("/img/vlr/logo.png"),
            "https://www.vlr.gg/img/vlr/logo.png"
        );
        assert_eq!(
            normalize_img_url("https://owcdn.net/img/event.png"),
            "https://owcdn.net/img/event.png"
        );
    }

    #[test]
    fn eta_suffix_skips_live() {
        assert_eq!(format_eta("LIVE", " from now"), "LIVE");
        assert_eq!(format_eta("\n\t2d 5h\n", " from now"), "2d 5h from now");
    }

    #[test]
    fn text_cleanup() {
        assert_eq!(clean_text("\tGroup A \u{2013} Bo3\n"), "Group A \u{2013} Bo3");
    }
}
