// src/intent.rs
//! Codec for the textual URI-intent encoding used by app-link feeds:
//! `[<data-uri>|intent:]#Intent;key=value;...;end`.
//!
//! Encoding is canonical: fields are written in a fixed order with a fixed
//! escape set, so encoding the same logical intent always yields the same
//! string and decode(encode(x)) round-trips.

use std::fmt::Write as _;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntentUriError {
    #[error("missing '#Intent;' fragment in `{0}`")]
    MissingFragment(String),
    #[error("fragment does not terminate with 'end' in `{0}`")]
    MissingEnd(String),
    #[error("malformed segment `{0}`")]
    BadSegment(String),
    #[error("malformed component `{0}`")]
    BadComponent(String),
    #[error("malformed launch flags `{0}`")]
    BadLaunchFlags(String),
    #[error("malformed percent escape in `{0}`")]
    BadEscape(String),
    #[error("unknown extra type tag `{0}`")]
    UnknownExtraType(String),
}

/// A flattenable (package, class) component reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentName {
    pub package: String,
    /// Fully qualified class name.
    pub class: String,
}

impl ComponentName {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }

    /// Parse the `pkg/cls` wire form; a class starting with `.` is relative
    /// to the package.
    pub fn unflatten(s: &str) -> Result<Self, IntentUriError> {
        let (package, class) = s
            .split_once('/')
            .ok_or_else(|| IntentUriError::BadComponent(s.to_string()))?;
        if package.is_empty() || class.is_empty() {
            return Err(IntentUriError::BadComponent(s.to_string()));
        }
        let class = if let Some(rel) = class.strip_prefix('.') {
            format!("{package}.{rel}")
        } else {
            class.to_string()
        };
        Ok(Self {
            package: package.to_string(),
            class,
        })
    }

    /// Short wire form: the class is abbreviated to `.Rest` when it lives
    /// inside the package, e.g. `com.example.tv/.RichActivity`.
    pub fn flatten(&self) -> String {
        match self.class.strip_prefix(&self.package) {
            Some(rest) if rest.starts_with('.') => format!("{}/{}", self.package, rest),
            _ => format!("{}/{}", self.package, self.class),
        }
    }
}

/// One typed extra carried in the fragment, kept as its wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extra {
    /// Type tag from the encoding (`S` string, `B` bool, `i` int, ...).
    pub tag: char,
    pub key: String,
    pub value: String,
}

const EXTRA_TAGS: &[char] = &['S', 'B', 'b', 'c', 'd', 'f', 'i', 'l', 's'];

/// Structured form of a URI-encoded intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentUri {
    /// Full data URI, scheme included. `None` encodes the bare `intent:` form.
    pub data: Option<String>,
    pub action: Option<String>,
    pub categories: Vec<String>,
    pub launch_flags: Option<u32>,
    pub package: Option<String>,
    pub component: Option<ComponentName>,
    /// Extras in their original order.
    pub extras: Vec<Extra>,
}

impl IntentUri {
    /// Retarget the intent, overwriting any previously encoded component.
    pub fn set_component(&mut self, component: ComponentName) {
        self.component = Some(component);
    }

    /// Decode a URI-intent string. Total over any string produced by
    /// [`IntentUri::encode`]; anything without the `#Intent;...;end`
    /// envelope is rejected as malformed.
    pub fn decode(uri: &str) -> Result<Self, IntentUriError> {
        let (prefix, fragment) = uri
            .split_once("#Intent;")
            .ok_or_else(|| IntentUriError::MissingFragment(uri.to_string()))?;

        let mut out = IntentUri::default();
        let mut scheme: Option<String> = None;
        let mut terminated = false;

        for segment in fragment.split(';') {
            if segment == "end" {
                terminated = true;
                break;
            }
            if segment.is_empty() {
                continue;
            }
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| IntentUriError::BadSegment(segment.to_string()))?;
            let value = unescape(value)?;
            match key {
                "action" => out.action = Some(value),
                "category" => out.categories.push(value),
                "launchFlags" => out.launch_flags = Some(parse_flags(&value)?),
                "package" => out.package = Some(value),
                "component" => out.component = Some(ComponentName::unflatten(&value)?),
                "scheme" => scheme = Some(value),
                _ => {
                    let (tag, name) = key
                        .split_once('.')
                        .ok_or_else(|| IntentUriError::BadSegment(segment.to_string()))?;
                    let mut chars = tag.chars();
                    let tag = match (chars.next(), chars.next()) {
                        (Some(c), None) if EXTRA_TAGS.contains(&c) => c,
                        _ => return Err(IntentUriError::UnknownExtraType(tag.to_string())),
                    };
                    out.extras.push(Extra {
                        tag,
                        key: unescape(name)?,
                        value,
                    });
                }
            }
        }
        if !terminated {
            return Err(IntentUriError::MissingEnd(uri.to_string()));
        }

        // The bare form carries the data URI without its scheme; the scheme
        // parameter, when present, restores it.
        out.data = match prefix.strip_prefix("intent:") {
            Some("") => None,
            Some(rest) => Some(match scheme {
                Some(s) => format!("{s}:{rest}"),
                None => rest.to_string(),
            }),
            None if prefix.is_empty() => None,
            None => Some(prefix.to_string()),
        };
        Ok(out)
    }

    /// Encode back to the textual form. Field order is fixed, so the output
    /// is stable for a given logical intent.
    pub fn encode(&self) -> String {
        let mut uri = String::new();
        match &self.data {
            Some(data) => uri.push_str(data),
            None => uri.push_str("intent:"),
        }
        uri.push_str("#Intent;");
        if let Some(action) = &self.action {
            let _ = write!(uri, "action={};", escape(action, ""));
        }
        for category in &self.categories {
            let _ = write!(uri, "category={};", escape(category, ""));
        }
        if let Some(flags) = self.launch_flags {
            let _ = write!(uri, "launchFlags=0x{flags:x};");
        }
        if let Some(package) = &self.package {
            let _ = write!(uri, "package={};", escape(package, ""));
        }
        if let Some(component) = &self.component {
            let _ = write!(uri, "component={};", escape(&component.flatten(), "/"));
        }
        for extra in &self.extras {
            let _ = write!(
                uri,
                "{}.{}={};",
                extra.tag,
                escape(&extra.key, ""),
                escape(&extra.value, "")
            );
        }
        uri.push_str("end");
        uri
    }
}

fn parse_flags(value: &str) -> Result<u32, IntentUriError> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| IntentUriError::BadLaunchFlags(value.to_string()))
}

/// Bytes outside the unreserved set (and `allow`) become `%XX`.
fn escape(s: &str, allow: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &b in s.as_bytes() {
        let c = b as char;
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '~') || allow.contains(c) {
            out.push(c);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

fn unescape(s: &str) -> Result<String, IntentUriError> {
    if !s.contains('%') {
        return Ok(s.to_string());
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| IntentUriError::BadEscape(s.to_string()))?;
            out.push(hex);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| IntentUriError::BadEscape(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bare_intent_form() {
        let uri = "intent:#Intent;action=android.intent.action.VIEW;\
                   component=com.other/.OldActivity;S.display-number=1-1;end";
        let intent = IntentUri::decode(uri).unwrap();
        assert_eq!(intent.data, None);
        assert_eq!(intent.action.as_deref(), Some("android.intent.action.VIEW"));
        let c = intent.component.unwrap();
        assert_eq!(c.package, "com.other");
        assert_eq!(c.class, "com.other.OldActivity");
        assert_eq!(intent.extras.len(), 1);
        assert_eq!(intent.extras[0].tag, 'S');
        assert_eq!(intent.extras[0].key, "display-number");
        assert_eq!(intent.extras[0].value, "1-1");
    }

    #[test]
    fn scheme_param_restores_data_scheme() {
        let intent = IntentUri::decode("intent://scan/#Intent;scheme=zxing;package=com.zx;end")
            .unwrap();
        assert_eq!(intent.data.as_deref(), Some("zxing://scan/"));
        assert_eq!(intent.package.as_deref(), Some("com.zx"));
    }

    #[test]
    fn encode_is_stable_under_redecode() {
        let uri = "https://example.test/watch#Intent;action=VIEW;launchFlags=0x10000000;\
                   component=com.other/.OldActivity;S.k=a%20b;end";
        let once = IntentUri::decode(uri).unwrap().encode();
        let twice = IntentUri::decode(&once).unwrap().encode();
        assert_eq!(once, twice);
    }

    #[test]
    fn component_flatten_abbreviates_inside_package() {
        let c = ComponentName::new("com.example.tv", "com.example.tv.RichActivity");
        assert_eq!(c.flatten(), "com.example.tv/.RichActivity");
        let c = ComponentName::new("com.example.tv", "org.other.Player");
        assert_eq!(c.flatten(), "com.example.tv/org.other.Player");
    }

    #[test]
    fn rejects_missing_fragment_and_missing_end() {
        assert!(matches!(
            IntentUri::decode("https://example.test/watch"),
            Err(IntentUriError::MissingFragment(_))
        ));
        assert!(matches!(
            IntentUri::decode("intent:#Intent;action=VIEW;"),
            Err(IntentUriError::MissingEnd(_))
        ));
    }

    #[test]
    fn rejects_bad_flags_escape_and_extra_tag() {
        assert!(matches!(
            IntentUri::decode("intent:#Intent;launchFlags=0xZZ;end"),
            Err(IntentUriError::BadLaunchFlags(_))
        ));
        assert!(matches!(
            IntentUri::decode("intent:#Intent;S.k=%G1;end"),
            Err(IntentUriError::BadEscape(_))
        ));
        assert!(matches!(
            IntentUri::decode("intent:#Intent;Q.k=v;end"),
            Err(IntentUriError::UnknownExtraType(_))
        ));
    }

    #[test]
    fn escapes_round_trip() {
        let mut intent = IntentUri::default();
        intent.action = Some("android.intent.action.VIEW".into());
        intent.extras.push(Extra {
            tag: 'S',
            key: "title".into(),
            value: "50% off; tonight=yes".into(),
        });
        let decoded = IntentUri::decode(&intent.encode()).unwrap();
        assert_eq!(decoded, intent);
    }
}
