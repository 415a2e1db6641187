//! Placeholder substitution for the dashboard template.

/// Replaced by the stylesheet text.
pub const INLINE_CSS: &str = "{{INLINE_CSS}}";

/// Replaced by the script text.
pub const INLINE_JS: &str = "{{INLINE_JS}}";

/// An ordered table of placeholder tokens and their replacement text.
///
/// Applied in a single left-to-right pass. Replacement text is never rescanned, so a token
/// that appears inside inserted CSS or JS stays as written.
#[derive(Debug, Clone, Default)]
pub struct Substitutions<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Substitutions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token. Earlier entries win when two tokens start at the same offset.
    pub fn with(mut self, token: &'a str, replacement: &'a str) -> Self {
        self.entries.push((token, replacement));
        self
    }

    /// Replace every non-overlapping token occurrence in `template`.
    pub fn apply(&self, template: &str) -> String {
        let extra: usize = self.entries.iter().map(|(_, r)| r.len()).sum();
        let mut out = String::with_capacity(template.len() + extra);
        let mut rest = template;

        loop {
            let next = self
                .entries
                .iter()
                .filter(|(token, _)| !token.is_empty())
                .filter_map(|&(token, replacement)| {
                    rest.find(token).map(|pos| (pos, token, replacement))
                })
                .min_by_key(|&(pos, _, _)| pos);

            let Some((pos, token, replacement)) = next else {
                out.push_str(rest);
                return out;
            };

            out.push_str(&rest[..pos]);
            out.push_str(replacement);
            rest = &rest[pos + token.len()..];
        }
    }
}

/// Inline `css` and `js` into `template`.
///
/// Templates without placeholders come back unchanged.
pub fn compose(template: &str, css: &str, js: &str) -> String {
    Substitutions::new()
        .with(INLINE_CSS, css)
        .with(INLINE_JS, js)
        .apply(template)
}
