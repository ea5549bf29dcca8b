use serde::{Deserialize, Serialize};

/// UI locales bundled with the widget.
///
/// The set is closed: hosts pass a tag and anything outside it resolves to
/// the default locale (or a hard error under strict validation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
    Nl,
    Fr,
    De,
}

impl Locale {
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Ar, Locale::Nl, Locale::Fr, Locale::De];

    /// Resolves a host-supplied tag, tolerating case and a region suffix
    /// (`en-US` and `EN` both resolve to `En`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or("");
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            "nl" => Some(Locale::Nl),
            "fr" => Some(Locale::Fr),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    /// Lowercase tag used in host configs and locale bundle names.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Nl => "nl",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    /// Right-to-left scripts need a mirrored widget layout.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_tags() {
        assert_eq!(Locale::from_tag("fr"), Some(Locale::Fr));
        assert_eq!(Locale::from_tag("AR"), Some(Locale::Ar));
    }

    #[test]
    fn resolves_region_suffixes() {
        assert_eq!(Locale::from_tag("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_tag("nl_BE"), Some(Locale::Nl));
    }

    #[test]
    fn unknown_tags_do_not_resolve() {
        assert_eq!(Locale::from_tag("tlh"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn arabic_is_the_only_rtl_locale() {
        assert!(Locale::Ar.is_rtl());
        for locale in Locale::ALL {
            if locale != Locale::Ar {
                assert!(!locale.is_rtl());
            }
        }
    }

    #[test]
    fn tags_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_tag(locale.tag()), Some(locale));
        }
    }
}
