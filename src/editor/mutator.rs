use crate::editor::errors::EditError;
use crate::editor::walker::label_text;
use hcl_edit::structure::{Block, BlockLabel};
use hcl_edit::{Decorate, Decorated, Ident};

/// Replace a block's header tokens in place: the type identifier and the
/// label literals, adding or removing label tokens as needed. Existing
/// tokens keep their decor, so every byte outside the header survives
/// untouched, and a header rewritten to its current value changes nothing.
pub fn rewrite_header(
    block: &mut Block,
    new_type: &str,
    new_labels: &[String],
) -> Result<(), EditError> {
    if !is_valid_block_type(new_type) {
        return Err(EditError::MalformedAddress {
            input: new_type.to_string(),
            message: "block type must be an identifier".to_string(),
        });
    }

    if block.ident.as_str() != new_type {
        let decor = block.ident.decor().clone();
        let mut ident = Decorated::new(Ident::new(new_type));
        *ident.decor_mut() = decor;
        block.ident = ident;
    }

    let old_len = block.labels.len();
    let unchanged = old_len == new_labels.len()
        && block
            .labels
            .iter()
            .zip(new_labels)
            .all(|(old, new)| label_text(old) == new);
    if unchanged {
        return Ok(());
    }

    // Whatever trivia sat between the last header token and the open brace
    // has to survive a change in token count.
    let trailing = match block.labels.last() {
        Some(last) => last.decor().suffix().cloned(),
        None => block.ident.decor().suffix().cloned(),
    };

    let mut labels: Vec<BlockLabel> = Vec::with_capacity(new_labels.len());
    for (index, text) in new_labels.iter().enumerate() {
        match block.labels.get(index) {
            Some(old) if label_text(old) == text => labels.push(old.clone()),
            Some(old) => {
                let mut label = Decorated::new(text.clone());
                *label.decor_mut() = old.decor().clone();
                labels.push(BlockLabel::String(label));
            }
            None => {
                let mut label = Decorated::new(text.clone());
                label.decor_mut().set_prefix(" ");
                labels.push(BlockLabel::String(label));
            }
        }
    }

    if new_labels.len() != old_len {
        if old_len > 0 && new_labels.len() > old_len {
            // The old final label is no longer final; its pre-brace trivia
            // belongs to the new final token now.
            labels[old_len - 1].decor_mut().set_suffix("");
        }
        if let Some(suffix) = trailing {
            match labels.last_mut() {
                Some(last) => last.decor_mut().set_suffix(suffix),
                None => block.ident.decor_mut().set_suffix(suffix),
            }
        }
        if old_len == 0 && !labels.is_empty() {
            block.ident.decor_mut().set_suffix("");
        }
    }

    block.labels = labels;
    Ok(())
}

pub(crate) fn is_valid_block_type(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}
