use relative_path::RelativePath;

/// Scheme the notes app registers for navigation links
pub const NAVIGATION_SCHEME: &str = "obsidian";

/// Builds the navigation URL a wiki-link target should point at.
///
/// Implemented for plain closures so callers can inject link construction
/// without a vault.
pub trait LinkResolver {
    fn navigation_url(&self, target: &str) -> String;
}

impl<F> LinkResolver for F
where
    F: Fn(&str) -> String,
{
    fn navigation_url(&self, target: &str) -> String {
        self(target)
    }
}

/// Characters `urlencoding` escapes that a URI component leaves alone
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a URL component.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as they are and escapes every other
/// byte of the UTF-8 encoding.
pub fn encode_component(value: &str) -> String {
    COMPONENT_SAFE
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |encoded, (escape, c)| {
            encoded.replace(escape, c)
        })
}

/// `obsidian://open?vault=<vault>&file=<file>`, both parts percent-encoded
pub fn navigation_url(vault: &str, file: &str) -> String {
    format!(
        "{NAVIGATION_SCHEME}://open?vault={}&file={}",
        encode_component(vault),
        encode_component(file)
    )
}

/// Resolves links against one named vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLinks {
    vault: String,
}

impl VaultLinks {
    pub fn new(vault: impl Into<String>) -> Self {
        Self {
            vault: vault.into(),
        }
    }

    pub fn vault(&self) -> &str {
        &self.vault
    }

    /// Navigation URL for a file inside the vault
    pub fn file_url(&self, path: &RelativePath) -> String {
        navigation_url(&self.vault, path.as_str())
    }

    /// Map a wiki-link target to the note file it names.
    ///
    /// Heading (`#`) and block (`^`) references are dropped and `.md` is added
    /// unless already present.
    fn target_file(target: &str) -> String {
        let page = target
            .split(['#', '^'])
            .next()
            .unwrap_or(target)
            .trim();
        if page.ends_with(".md") {
            page.to_string()
        } else {
            format!("{page}.md")
        }
    }
}

impl LinkResolver for VaultLinks {
    fn navigation_url(&self, target: &str) -> String {
        navigation_url(&self.vault, &Self::target_file(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_navigation_url_encodes_both_parts() {
        assert_eq!(
            navigation_url("My Vault", "daily/2025 03 01.md"),
            "obsidian://open?vault=My%20Vault&file=daily%2F2025%2003%2001.md"
        );
    }

    #[rstest]
    #[case("Recipes", "obsidian://open?vault=Notes&file=Recipes.md")]
    #[case("Recipes.md", "obsidian://open?vault=Notes&file=Recipes.md")]
    #[case("Recipes#Dinner", "obsidian://open?vault=Notes&file=Recipes.md")]
    #[case("Recipes^abc123", "obsidian://open?vault=Notes&file=Recipes.md")]
    #[case("Areas/Home", "obsidian://open?vault=Notes&file=Areas%2FHome.md")]
    fn test_vault_links_resolve_targets(#[case] target: &str, #[case] expected: &str) {
        let links = VaultLinks::new("Notes");
        assert_eq!(links.navigation_url(target), expected);
    }

    #[test]
    fn test_file_url_uses_path_verbatim() {
        let links = VaultLinks::new("Notes");
        assert_eq!(
            links.file_url(RelativePath::new("inbox/today.md")),
            "obsidian://open?vault=Notes&file=inbox%2Ftoday.md"
        );
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |target: &str| format!("nav:{target}");
        assert_eq!(resolver.navigation_url("Page"), "nav:Page");
    }
}
