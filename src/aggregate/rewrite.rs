//! Text rewrites applied to every page body before concatenation.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::error::Result;

/// Maximum ATX heading depth.
const MAX_HEADING: usize = 6;

/// Rewrites site-generator shortcodes, root-relative links and heading depth.
#[derive(Debug, Clone)]
pub struct Rewriter {
    site_url: String,
    heading_shift: usize,
    img: Regex,
    anchor: Regex,
    pr: Regex,
    attribute: Regex,
    root_link: Regex,
    heading: Regex,
}

impl Rewriter {
    /// Create a rewriter for a site URL and heading shift.
    pub fn new(site_url: &str, heading_shift: usize) -> Result<Self> {
        Ok(Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            heading_shift,
            img: Regex::new(r"\{\{<\s*img\s+([^>]+)>\}\}")?,
            anchor: Regex::new(r"\{\{<\s*anchor\s+[^>]+?>\}\}")?,
            pr: Regex::new(r"\{\{<\s*pr\s+([^>]+)>\}\}")?,
            attribute: Regex::new(r#"(\w+)\s*=\s*"([^"]*)""#)?,
            root_link: Regex::new(r"\]\((/[^)]+)\)")?,
            heading: Regex::new(r"(?m)^(#{1,6})\s")?,
        })
    }

    /// Apply shortcodes, then links, then heading demotion.
    pub fn rewrite(&self, body: &str) -> String {
        let text = self.replace_shortcodes(body);
        let text = self.absolutize_links(&text);
        self.demote_headings(&text)
    }

    fn attributes(&self, text: &str) -> HashMap<String, String> {
        self.attribute
            .captures_iter(text)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect()
    }

    /// Replace `img`, `anchor` and `pr` shortcodes.
    pub fn replace_shortcodes(&self, text: &str) -> String {
        let text = self.img.replace_all(text, |caps: &Captures| {
            let attrs = self.attributes(&caps[1]);
            let src = attrs.get("src").map(String::as_str).unwrap_or("");
            if src.is_empty() {
                return String::new();
            }
            let alt = attrs
                .get("alt")
                .filter(|alt| !alt.is_empty())
                .or_else(|| attrs.get("title"))
                .map(String::as_str)
                .unwrap_or("");
            let url = if src.starts_with('/') {
                format!("{}{}", self.site_url, src)
            } else {
                src.to_string()
            };
            format!("![{}]({})", alt, url)
        });

        let text = self.anchor.replace_all(&text, "");

        let text = self.pr.replace_all(&text, |caps: &Captures| {
            let attrs = self.attributes(&caps[1]);
            match attrs.get("number").filter(|n| !n.is_empty()) {
                Some(number) => {
                    let repo = attrs.get("repo").map(String::as_str).unwrap_or("esphome");
                    format!("(PR #{} \u{b7} {})", number, repo)
                }
                None => String::new(),
            }
        });

        text.into_owned()
    }

    /// Point `](/path)` links at the site.
    pub fn absolutize_links(&self, text: &str) -> String {
        self.root_link
            .replace_all(text, |caps: &Captures| format!("]({}{})", self.site_url, &caps[1]))
            .into_owned()
    }

    /// Push every ATX heading down by the shift, capped at level 6.
    pub fn demote_headings(&self, text: &str) -> String {
        if self.heading_shift == 0 {
            return text.to_string();
        }
        self.heading
            .replace_all(text, |caps: &Captures| {
                let level = (caps[1].len() + self.heading_shift).min(MAX_HEADING);
                format!("{} ", "#".repeat(level))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewriter() -> Rewriter {
        Rewriter::new("https://esphome.io", 1).unwrap()
    }

    #[test]
    fn test_img_shortcode() {
        let r = rewriter();
        assert_eq!(
            r.replace_shortcodes(r#"{{< img src="/images/dht.jpg" alt="DHT22" >}}"#),
            "![DHT22](https://esphome.io/images/dht.jpg)"
        );
        assert_eq!(
            r.replace_shortcodes(r#"{{< img src="https://x.org/a.png" title="Board" >}}"#),
            "![Board](https://x.org/a.png)"
        );
        assert_eq!(r.replace_shortcodes(r#"a{{< img alt="none" >}}b"#), "ab");
    }

    #[test]
    fn test_anchor_shortcode_removed() {
        assert_eq!(
            rewriter().replace_shortcodes(r#"{{< anchor "config-sensor" >}}Text"#),
            "Text"
        );
    }

    #[test]
    fn test_pr_shortcode() {
        let r = rewriter();
        assert_eq!(
            r.replace_shortcodes(r#"Fixed {{< pr number="1234" >}}."#),
            "Fixed (PR #1234 \u{b7} esphome)."
        );
        assert_eq!(
            r.replace_shortcodes(r#"{{< pr number="7" repo="esphome-docs" >}}"#),
            "(PR #7 \u{b7} esphome-docs)"
        );
        assert_eq!(r.replace_shortcodes(r#"{{< pr repo="x" >}}"#), "");
    }

    #[test]
    fn test_root_relative_links() {
        let r = rewriter();
        assert_eq!(
            r.absolutize_links("See [WiFi](/components/wifi/) and [ext](https://a.b/c)."),
            "See [WiFi](https://esphome.io/components/wifi/) and [ext](https://a.b/c)."
        );
    }

    #[test]
    fn test_trailing_slash_in_site_url() {
        let r = Rewriter::new("https://example.org/", 0).unwrap();
        assert_eq!(r.absolutize_links("[a](/b)"), "[a](https://example.org/b)");
    }

    #[test]
    fn test_demote_headings() {
        let r = rewriter();
        assert_eq!(
            r.demote_headings("# One\n## Two\n###### Six\n#hashtag\n    # code"),
            "## One\n### Two\n###### Six\n#hashtag\n    # code"
        );
        let r = Rewriter::new("https://esphome.io", 2).unwrap();
        assert_eq!(r.demote_headings("##### Five"), "###### Five");
    }

    #[test]
    fn test_rewrite_order() {
        let text = "# Title\n{{< img src=\"/a.png\" alt=\"A\" >}}\n[x](/y)";
        assert_eq!(
            rewriter().rewrite(text),
            "## Title\n![A](https://esphome.io/a.png)\n[x](https://esphome.io/y)"
        );
    }
}
