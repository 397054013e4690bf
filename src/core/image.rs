/// Image reference normalization
///
/// Applied identically to deck items, detail views and recommendation
/// results. `None` and empty references stay `None`; references carrying a
/// scheme (`https:`, `data:`, ...) pass through unchanged; anything else is
/// appended to the configured base origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNormalizer {
    base_url: String,
}

impl ImageNormalizer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn normalize(&self, image_url: Option<&str>) -> Option<String> {
        let image_url = image_url.map(str::trim).filter(|url| !url.is_empty())?;

        if has_scheme(image_url) {
            return Some(image_url.to_string());
        }

        Some(format!("{}{}", self.base_url, image_url))
    }

    pub fn normalize_in_place(&self, image_url: &mut Option<String>) {
        *image_url = self.normalize(image_url.as_deref());
    }
}

/// `scheme ":"` where scheme is ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
