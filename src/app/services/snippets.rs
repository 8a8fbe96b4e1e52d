//! Markdown components that can be inserted from the toolbar or the
//! Edit menu, and the rules for placing them around the cursor.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownComponent {
    Heading1,
    Heading2,
    Heading3,
    Bold,
    Italic,
    Strikethrough,
    BulletList,
    NumberedList,
    Link,
    Image,
    CodeBlock,
    Quote,
    HorizontalRule,
}

impl MarkdownComponent {
    pub const ALL: [MarkdownComponent; 13] = [
        MarkdownComponent::Heading1,
        MarkdownComponent::Heading2,
        MarkdownComponent::Heading3,
        MarkdownComponent::Bold,
        MarkdownComponent::Italic,
        MarkdownComponent::Strikethrough,
        MarkdownComponent::BulletList,
        MarkdownComponent::NumberedList,
        MarkdownComponent::Link,
        MarkdownComponent::Image,
        MarkdownComponent::CodeBlock,
        MarkdownComponent::Quote,
        MarkdownComponent::HorizontalRule,
    ];

    /// Short label used on toolbar buttons.
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Heading3 => "H3",
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Strikethrough => "S",
            Self::BulletList => "UL",
            Self::NumberedList => "OL",
            Self::Link => "Link",
            Self::Image => "Img",
            Self::CodeBlock => "Code",
            Self::Quote => "Quote",
            Self::HorizontalRule => "HR",
        }
    }

    /// Descriptive name used for tooltips and menu entries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Heading1 => "Heading 1",
            Self::Heading2 => "Heading 2",
            Self::Heading3 => "Heading 3",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Strikethrough => "Strikethrough",
            Self::BulletList => "Bullet List",
            Self::NumberedList => "Numbered List",
            Self::Link => "Link",
            Self::Image => "Image",
            Self::CodeBlock => "Code Block",
            Self::Quote => "Quote",
            Self::HorizontalRule => "Horizontal Rule",
        }
    }

    pub fn snippet(&self) -> &'static str {
        match self {
            Self::Heading1 => "# ",
            Self::Heading2 => "## ",
            Self::Heading3 => "### ",
            Self::Bold => "**",
            Self::Italic => "*",
            Self::Strikethrough => "~~",
            Self::BulletList => "- ",
            Self::NumberedList => "1. ",
            Self::Link => "[link text](URL)",
            Self::Image => "![image description](URL)",
            Self::CodeBlock => "```\ncode\n```",
            Self::Quote => "> ",
            Self::HorizontalRule => "---",
        }
    }

    /// Inline markers wrap the current selection instead of replacing it.
    pub fn wraps_selection(&self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Strikethrough)
    }

    /// Toolbar separators are drawn after these components.
    pub fn ends_toolbar_group(&self) -> bool {
        matches!(
            self,
            Self::Heading3 | Self::Strikethrough | Self::NumberedList | Self::Image
        )
    }
}

/// Text to insert and where the cursor lands afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub text: String,
    /// Byte offset of the cursor, relative to the start of `text`.
    pub cursor: usize,
}

/// Work out what inserting `component` produces, given the selected text
/// (if any) that the insertion replaces.
pub fn plan_insertion(component: MarkdownComponent, selection: Option<&str>) -> Insertion {
    let snippet = component.snippet();

    if component.wraps_selection() {
        return match selection.filter(|s| !s.is_empty()) {
            Some(selected) => {
                let text = format!("{snippet}{selected}{snippet}");
                let cursor = text.len();
                Insertion { text, cursor }
            }
            None => Insertion {
                text: format!("{snippet}{snippet}"),
                cursor: snippet.len(),
            },
        };
    }

    let cursor = snippet.find('\n').unwrap_or(snippet.len());
    Insertion {
        text: snippet.to_string(),
        cursor,
    }
}
