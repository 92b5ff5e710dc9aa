//! CSS stylesheets.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::natural::{natural_cmp, natural_cmp_opt};
use super::{FromUri, trim_to_none};

/// Text direction a stylesheet is written for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Primary language subtags written right-to-left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "ji", "ks", "ku", "ps", "sd", "syr", "ug", "ur",
    "yi",
];

impl Direction {
    /// Expected direction for a BCP 47 / POSIX style language tag such as
    /// `"en-US"`, `"ar_EG"` or `"he"`.
    pub fn for_language(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if RTL_LANGUAGES.contains(&primary.as_str()) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => f.write_str("LTR"),
            Direction::Rtl => f.write_str("RTL"),
        }
    }
}

/// A stylesheet identified by URI plus the attributes that change how it
/// applies.
///
/// Natural order, chosen so common layouts need few explicit constraints
/// (`global.css` before `global-print.css[media="print"]`):
/// 1. media condition, `None` first
/// 2. direction, `None` first
/// 3. URI
///
/// The crossorigin policy and the disabled flag only break remaining ties.
/// String comparisons use [`natural_cmp`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StyleFields")]
pub struct Style {
    uri: String,
    media: Option<String>,
    direction: Option<Direction>,
    crossorigin: Option<String>,
    disabled: bool,
}

/// Wire form of [`Style`]; normalized the same way as [`StyleBuilder`].
#[derive(Deserialize)]
struct StyleFields {
    uri: String,
    #[serde(default)]
    media: Option<String>,
    #[serde(default)]
    direction: Option<Direction>,
    #[serde(default)]
    crossorigin: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl From<StyleFields> for Style {
    fn from(fields: StyleFields) -> Self {
        Style {
            uri: fields.uri,
            media: fields.media.and_then(trim_to_none),
            direction: fields.direction,
            crossorigin: fields.crossorigin.and_then(trim_to_none),
            disabled: fields.disabled,
        }
    }
}

impl Style {
    /// A style with only a URI.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            uri: href.into(),
            media: None,
            direction: None,
            crossorigin: None,
            disabled: false,
        }
    }

    pub fn builder(href: impl Into<String>) -> StyleBuilder {
        StyleBuilder { style: Style::new(href) }
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Optional media condition, trimmed and never empty.
    #[inline]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// Direction the style is written for; matched against the response
    /// language to include the style selectively.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    pub fn crossorigin(&self) -> Option<&str> {
        self.crossorigin.as_deref()
    }

    /// A disabled style may be enabled later from script.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl FromUri for Style {
    fn from_uri(uri: &str) -> Self {
        Style::new(uri)
    }
}

impl Ord for Style {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp_opt(self.media.as_deref(), other.media.as_deref())
            .then_with(|| self.direction.cmp(&other.direction))
            .then_with(|| natural_cmp(&self.uri, &other.uri))
            .then_with(|| natural_cmp_opt(self.crossorigin.as_deref(), other.crossorigin.as_deref()))
            .then_with(|| self.disabled.cmp(&other.disabled))
    }
}

impl PartialOrd for Style {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)?;
        let mut attrs = Vec::new();
        if let Some(media) = &self.media {
            attrs.push(format!("media=\"{media}\""));
        }
        if let Some(direction) = self.direction {
            attrs.push(format!("direction={direction}"));
        }
        if let Some(crossorigin) = &self.crossorigin {
            attrs.push(format!("crossorigin=\"{crossorigin}\""));
        }
        if self.disabled {
            attrs.push("disabled".to_string());
        }
        if !attrs.is_empty() {
            write!(f, "[{}]", attrs.join(", "))?;
        }
        Ok(())
    }
}

/// Builder for [`Style`].
#[derive(Clone, Debug)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    /// Media condition; blank values mean "no condition".
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.style.media = trim_to_none(media.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.style.direction = Some(direction);
        self
    }

    /// Crossorigin policy; blank values mean "no policy".
    pub fn crossorigin(mut self, crossorigin: impl Into<String>) -> Self {
        self.style.crossorigin = trim_to_none(crossorigin.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.style.disabled = disabled;
        self
    }

    pub fn build(self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconditional_styles_sort_before_media_styles() {
        let global = Style::new("/global.css");
        let print = Style::builder("/global-print.css").media("print").build();
        let rtl = Style::builder("/global-rtl.css").direction(Direction::Rtl).build();
        let mut v = vec![print.clone(), rtl.clone(), global.clone()];
        v.sort();
        assert_eq!(v, vec![global, rtl, print]);
    }

    #[test]
    fn blank_attributes_are_absent() {
        let s = Style::builder("/a.css").media("  ").crossorigin(" anonymous ").build();
        assert_eq!(s.media(), None);
        assert_eq!(s.crossorigin(), Some("anonymous"));
        assert_eq!(s.to_string(), "/a.css[crossorigin=\"anonymous\"]");
    }

    #[test]
    fn order_is_consistent_with_equality() {
        let a = Style::new("/a.css");
        let b = Style::builder("/a.css").disabled(true).build();
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn deserialized_style_matches_builder() {
        let json = r#"{"uri":"/a.css","media":"  ","direction":"rtl","crossorigin":" anonymous ","disabled":false}"#;
        let style: Style = serde_json::from_str(json).unwrap();
        let built = Style::builder("/a.css")
            .media("  ")
            .direction(Direction::Rtl)
            .crossorigin(" anonymous ")
            .build();
        assert_eq!(style.media(), None);
        assert_eq!(style.crossorigin(), Some("anonymous"));
        assert_eq!(style, built);

        let back: Style = serde_json::from_str(&serde_json::to_string(&built).unwrap()).unwrap();
        assert_eq!(back, built);
        let bare: Style = serde_json::from_str(r#"{"uri":"/b.css"}"#).unwrap();
        assert_eq!(bare, Style::new("/b.css"));
    }

    #[test]
    fn direction_from_language() {
        assert_eq!(Direction::for_language("ar_EG"), Direction::Rtl);
        assert_eq!(Direction::for_language("HE"), Direction::Rtl);
        assert_eq!(Direction::for_language("en-US"), Direction::Ltr);
        assert_eq!(Direction::for_language(""), Direction::Ltr);
    }
}
