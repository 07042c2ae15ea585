//! Quick prompts: canned messages the user can send with one command

/// A predefined prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub id: &'static str,
    /// Short label shown in listings
    pub title: &'static str,
    /// Text sent as the user message
    pub prompt: &'static str,
}

/// Built-in quick prompts
pub const PROMPT_TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        id: "1",
        title: "Tell me a joke",
        prompt: "Tell me a funny joke to brighten my day!",
    },
    PromptTemplate {
        id: "2",
        title: "Random fact",
        prompt: "Share an interesting random fact with me.",
    },
    PromptTemplate {
        id: "3",
        title: "Creative story",
        prompt: "Write a short creative story about a magical adventure.",
    },
    PromptTemplate {
        id: "4",
        title: "Life advice",
        prompt: "Give me some inspirational life advice.",
    },
    PromptTemplate {
        id: "5",
        title: "Explain AI",
        prompt: "Explain artificial intelligence in simple terms.",
    },
    PromptTemplate {
        id: "6",
        title: "Recipe idea",
        prompt: "Suggest a quick and easy recipe I can make today.",
    },
];

/// Find a template by id or case-insensitive title
///
/// # Examples
///
/// ```
/// use chatterbox::templates::find_template;
///
/// assert_eq!(find_template("1").unwrap().title, "Tell me a joke");
/// assert_eq!(find_template("random FACT").unwrap().id, "2");
/// assert!(find_template("nope").is_none());
/// ```
pub fn find_template(key: &str) -> Option<&'static PromptTemplate> {
    let key = key.trim();
    PROMPT_TEMPLATES
        .iter()
        .find(|t| t.id == key || t.title.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_six_templates_with_unique_ids() {
        assert_eq!(PROMPT_TEMPLATES.len(), 6);
        let ids: HashSet<_> = PROMPT_TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_find_by_id_and_title() {
        assert_eq!(find_template("6").unwrap().title, "Recipe idea");
        assert_eq!(find_template("  explain ai ").unwrap().id, "5");
    }

    #[test]
    fn test_find_unknown() {
        assert!(find_template("7").is_none());
        assert!(find_template("").is_none());
    }
}
