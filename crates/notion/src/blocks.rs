//! Block translation between the wire format and display lines.
//!
//! Decode maps an ordered sequence of content blocks to markdown-like
//! display lines. Encode builds wire payload blocks from content intents
//! (paragraph, to-do, heading).

use crate::models::{
    BlockObject, CodePayload, NewBlock, NewCodePayload, NewRichText, NewTextPayload,
    NewTodoPayload, RichTextItem, TextPayload, TodoPayload,
};

/// A plain-text fragment of a block, formatting discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun(pub String);

/// Concatenate runs in order. Zero runs yield the empty string.
fn concat(runs: &[TextRun]) -> String {
    runs.iter().map(|run| run.0.as_str()).collect()
}

fn runs_from_wire(rich_text: &[RichTextItem]) -> Vec<TextRun> {
    rich_text
        .iter()
        .map(|item| TextRun(item.plain_text.clone()))
        .collect()
}

fn runs_to_wire(runs: &[TextRun]) -> Vec<NewRichText> {
    runs.iter()
        .map(|run| NewRichText::plain(run.0.clone()))
        .collect()
}

/// A content block in its domain form.
///
/// Closed over the block types the translator understands; anything else
/// the API returns lands in the explicit `Unsupported` arm and decodes
/// to no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Level-1 heading.
    Heading1(Vec<TextRun>),
    /// Level-2 heading.
    Heading2(Vec<TextRun>),
    /// Level-3 heading.
    Heading3(Vec<TextRun>),
    /// Plain paragraph.
    Paragraph(Vec<TextRun>),
    /// Bulleted list item.
    BulletedItem(Vec<TextRun>),
    /// Numbered list item.
    NumberedItem(Vec<TextRun>),
    /// To-do item with its checkbox state.
    Todo {
        /// Item text.
        runs: Vec<TextRun>,
        /// Whether the checkbox is ticked.
        checked: bool,
    },
    /// Horizontal divider.
    Divider,
    /// Fenced code block.
    Code {
        /// Code text.
        runs: Vec<TextRun>,
        /// Fence language annotation.
        language: Option<String>,
    },
    /// A block type the translator does not render.
    Unsupported,
}

impl ContentBlock {
    /// Encode a paragraph intent.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(vec![TextRun(text.into())])
    }

    /// Encode a to-do intent.
    pub fn todo(text: impl Into<String>, checked: bool) -> Self {
        Self::Todo {
            runs: vec![TextRun(text.into())],
            checked,
        }
    }

    /// Encode a heading intent. The level is clamped into 1..=3.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let runs = vec![TextRun(text.into())];
        match level {
            0 | 1 => Self::Heading1(runs),
            2 => Self::Heading2(runs),
            _ => Self::Heading3(runs),
        }
    }

    /// Convert a wire block to its domain form.
    ///
    /// A tag without its matching payload sub-object is treated the same
    /// as an unknown tag.
    pub fn from_wire(block: &BlockObject) -> Self {
        fn text(payload: Option<&TextPayload>) -> Option<Vec<TextRun>> {
            payload.map(|p| runs_from_wire(&p.rich_text))
        }

        let converted = match block.block_type.as_str() {
            "heading_1" => text(block.heading_1.as_ref()).map(Self::Heading1),
            "heading_2" => text(block.heading_2.as_ref()).map(Self::Heading2),
            "heading_3" => text(block.heading_3.as_ref()).map(Self::Heading3),
            "paragraph" => text(block.paragraph.as_ref()).map(Self::Paragraph),
            "bulleted_list_item" => text(block.bulleted_list_item.as_ref()).map(Self::BulletedItem),
            "numbered_list_item" => text(block.numbered_list_item.as_ref()).map(Self::NumberedItem),
            "to_do" => block.to_do.as_ref().map(|p: &TodoPayload| Self::Todo {
                runs: runs_from_wire(&p.rich_text),
                checked: p.checked,
            }),
            "divider" => Some(Self::Divider),
            "code" => block.code.as_ref().map(|p: &CodePayload| Self::Code {
                runs: runs_from_wire(&p.rich_text),
                language: p.language.clone(),
            }),
            _ => None,
        };
        converted.unwrap_or(Self::Unsupported)
    }

    /// Convert to a wire payload block.
    ///
    /// Returns `None` for `Unsupported`, which has no wire form. The
    /// produced block always carries both the type tag and the payload
    /// sub-object keyed by that tag.
    pub fn to_wire(&self) -> Option<NewBlock> {
        fn text_block(
            tag: &'static str,
            runs: &[TextRun],
            set: impl FnOnce(&mut NewBlock, NewTextPayload),
        ) -> NewBlock {
            let mut block = NewBlock::tagged(tag);
            set(
                &mut block,
                NewTextPayload {
                    rich_text: runs_to_wire(runs),
                },
            );
            block
        }

        let block = match self {
            Self::Heading1(runs) => text_block("heading_1", runs, |b, p| b.heading_1 = Some(p)),
            Self::Heading2(runs) => text_block("heading_2", runs, |b, p| b.heading_2 = Some(p)),
            Self::Heading3(runs) => text_block("heading_3", runs, |b, p| b.heading_3 = Some(p)),
            Self::Paragraph(runs) => text_block("paragraph", runs, |b, p| b.paragraph = Some(p)),
            Self::BulletedItem(runs) => {
                text_block("bulleted_list_item", runs, |b, p| {
                    b.bulleted_list_item = Some(p);
                })
            }
            Self::NumberedItem(runs) => {
                text_block("numbered_list_item", runs, |b, p| {
                    b.numbered_list_item = Some(p);
                })
            }
            Self::Todo { runs, checked } => {
                let mut block = NewBlock::tagged("to_do");
                block.to_do = Some(NewTodoPayload {
                    rich_text: runs_to_wire(runs),
                    checked: *checked,
                });
                block
            }
            Self::Divider => {
                let mut block = NewBlock::tagged("divider");
                block.divider = Some(crate::models::EmptyPayload {});
                block
            }
            Self::Code { runs, language } => {
                let mut block = NewBlock::tagged("code");
                block.code = Some(NewCodePayload {
                    rich_text: runs_to_wire(runs),
                    language: language.clone(),
                });
                block
            }
            Self::Unsupported => return None,
        };
        Some(block)
    }

    /// Display lines for this block, in order. Most blocks render to a
    /// single line; empty paragraphs and unsupported blocks render to
    /// none, code blocks to three.
    fn render(&self) -> Vec<String> {
        match self {
            Self::Heading1(runs) => vec![format!("# {}", concat(runs))],
            Self::Heading2(runs) => vec![format!("## {}", concat(runs))],
            Self::Heading3(runs) => vec![format!("### {}", concat(runs))],
            Self::Paragraph(runs) => {
                let text = concat(runs);
                if text.is_empty() {
                    vec![]
                } else {
                    vec![text]
                }
            }
            Self::BulletedItem(runs) => vec![format!("* {}", concat(runs))],
            // Ordinals are not tracked; every item renders as "1.".
            Self::NumberedItem(runs) => vec![format!("1. {}", concat(runs))],
            Self::Todo { runs, checked } => {
                let checkbox = if *checked { "[x]" } else { "[ ]" };
                vec![format!("{checkbox} {}", concat(runs))]
            }
            Self::Divider => vec!["---".to_string()],
            Self::Code { runs, language } => vec![
                format!("```{}", language.as_deref().unwrap_or("")),
                concat(runs),
                "```".to_string(),
            ],
            Self::Unsupported => vec![],
        }
    }
}

/// Decode blocks into display lines, lazily.
pub fn decode<'a, I>(blocks: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = &'a ContentBlock>,
    I::IntoIter: 'a,
{
    blocks.into_iter().flat_map(|block| block.render())
}
