//! Scripts and the position rule that constrains their ordering.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::natural::{natural_cmp, natural_cmp_opt};
use super::{FromUri, trim_to_none};
use crate::ordering::ConstraintCheck;
use crate::registry_error::RegistryError;

/// Where in the page a script is emitted, in document order.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Start of `<head>`, before any styles.
    HeadStart,
    /// End of `<head>`, after styles.
    #[default]
    HeadEnd,
    /// Start of `<body>`.
    BodyStart,
    /// End of `<body>`.
    BodyEnd,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::HeadStart => "HEAD_START",
            Position::HeadEnd => "HEAD_END",
            Position::BodyStart => "BODY_START",
            Position::BodyEnd => "BODY_END",
        })
    }
}

/// A script identified by URI plus its loading attributes.
///
/// Natural order: `async` scripts first, then `defer` scripts, then by URI
/// ([`natural_cmp`]). Position and crossorigin only break remaining ties;
/// cross-position ordering is the job of [`PositionOrder`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ScriptFields")]
pub struct Script {
    uri: String,
    position: Position,
    is_async: bool,
    defer: bool,
    crossorigin: Option<String>,
}

/// Wire form of [`Script`]; normalized the same way as [`ScriptBuilder`].
#[derive(Deserialize)]
struct ScriptFields {
    uri: String,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    is_async: bool,
    #[serde(default)]
    defer: bool,
    #[serde(default)]
    crossorigin: Option<String>,
}

impl From<ScriptFields> for Script {
    fn from(fields: ScriptFields) -> Self {
        Script {
            uri: fields.uri,
            position: fields.position,
            is_async: fields.is_async,
            defer: fields.defer,
            crossorigin: fields.crossorigin.and_then(trim_to_none),
        }
    }
}

impl Script {
    /// A script at the default position with no loading attributes.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            uri: src.into(),
            position: Position::default(),
            is_async: false,
            defer: false,
            crossorigin: None,
        }
    }

    pub fn builder(src: impl Into<String>) -> ScriptBuilder {
        ScriptBuilder { script: Script::new(src) }
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn is_async(&self) -> bool {
        self.is_async
    }

    #[inline]
    pub fn is_defer(&self) -> bool {
        self.defer
    }

    #[inline]
    pub fn crossorigin(&self) -> Option<&str> {
        self.crossorigin.as_deref()
    }
}

impl FromUri for Script {
    fn from_uri(uri: &str) -> Self {
        Script::new(uri)
    }
}

impl Ord for Script {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_async
            .cmp(&self.is_async)
            .then_with(|| other.defer.cmp(&self.defer))
            .then_with(|| natural_cmp(&self.uri, &other.uri))
            .then_with(|| self.position.cmp(&other.position))
            .then_with(|| natural_cmp_opt(self.crossorigin.as_deref(), other.crossorigin.as_deref()))
    }
}

impl PartialOrd for Script {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}", self.uri, self.position)?;
        if self.is_async {
            f.write_str(", async")?;
        }
        if self.defer {
            f.write_str(", defer")?;
        }
        if let Some(crossorigin) = &self.crossorigin {
            write!(f, ", crossorigin=\"{crossorigin}\"")?;
        }
        f.write_str("]")
    }
}

/// Builder for [`Script`].
#[derive(Clone, Debug)]
pub struct ScriptBuilder {
    script: Script,
}

impl ScriptBuilder {
    pub fn position(mut self, position: Position) -> Self {
        self.script.position = position;
        self
    }

    pub fn is_async(mut self, is_async: bool) -> Self {
        self.script.is_async = is_async;
        self
    }

    pub fn defer(mut self, defer: bool) -> Self {
        self.script.defer = defer;
        self
    }

    /// Crossorigin policy; blank values mean "no policy".
    pub fn crossorigin(mut self, crossorigin: impl Into<String>) -> Self {
        self.script.crossorigin = trim_to_none(crossorigin.into());
        self
    }

    pub fn build(self) -> Script {
        self.script
    }
}

/// Scripts may only be ordered within or toward later positions:
/// `before.position <= after.position`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionOrder;

impl ConstraintCheck<Script> for PositionOrder {
    fn check(&self, before: &Script, after: &Script) -> Result<(), RegistryError> {
        if before.position > after.position {
            return Err(RegistryError::IllegalConstraint(format!(
                "before.position > after.position: {before} > {after}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn async_then_defer_then_uri() {
        let plain = Script::new("/a.js");
        let deferred = Script::builder("/z.js").defer(true).build();
        let asynchronous = Script::builder("/y.js").is_async(true).build();
        let mut v = vec![plain.clone(), deferred.clone(), asynchronous.clone()];
        v.sort();
        assert_eq!(v, vec![asynchronous, deferred, plain]);
    }

    #[test]
    fn position_order_rejects_backwards_pairs() {
        let head = Script::builder("/h.js").position(Position::HeadStart).build();
        let body = Script::builder("/b.js").position(Position::BodyEnd).build();
        assert!(PositionOrder.check(&head, &body).is_ok());
        assert!(PositionOrder.check(&head, &head).is_ok());
        let err = PositionOrder.check(&body, &head).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Illegal ordering constraint: before.position > after.position: \
             /b.js[BODY_END] > /h.js[HEAD_START]"
        );
    }

    #[test]
    fn deserialized_script_matches_builder() {
        let json = r#"{"uri":"/app.js","position":"body_end","is_async":true,"defer":false,"crossorigin":"\t"}"#;
        let script: Script = serde_json::from_str(json).unwrap();
        let built = Script::builder("/app.js")
            .position(Position::BodyEnd)
            .is_async(true)
            .crossorigin("\t")
            .build();
        assert_eq!(script.crossorigin(), None);
        assert_eq!(script, built);

        let back: Script = serde_json::from_str(&serde_json::to_string(&built).unwrap()).unwrap();
        assert_eq!(back, built);
        let bare: Script = serde_json::from_str(r#"{"uri":"/b.js"}"#).unwrap();
        assert_eq!(bare, Script::new("/b.js"));
    }

    #[test]
    fn display_lists_attributes() {
        let s = Script::builder("/app.js").defer(true).crossorigin("anonymous").build();
        assert_eq!(s.to_string(), "/app.js[HEAD_END, defer, crossorigin=\"anonymous\"]");
    }
}
