//! Document queries.
//!
//! Tree walks over the parent array. Siblings are ordered by creation, so a
//! preorder walk yields document order even after indices are recycled.

use crate::engine::arrays::{attrs, core, interaction, text};
use crate::engine::get_allocated_indices;
use crate::types::{ElementKind, FormSubmission, InputType};

// =============================================================================
// Tree Walks
// =============================================================================

/// Direct children of `index`.
pub fn children(index: usize) -> Vec<usize> {
    get_allocated_indices()
        .into_iter()
        .filter(|&child| core::peek_parent_index(child) == Some(index))
        .collect()
}

/// Elements without a parent.
pub fn roots() -> Vec<usize> {
    get_allocated_indices()
        .into_iter()
        .filter(|&index| core::peek_parent_index(index).is_none())
        .collect()
}

/// All descendants of `index` in document order (excluding `index`).
pub fn descendants(index: usize) -> Vec<usize> {
    let mut out = Vec::new();
    collect_descendants(index, &mut out);
    out
}

fn collect_descendants(index: usize, out: &mut Vec<usize>) {
    for child in children(index) {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// `index` followed by its ancestors up to the root.
pub fn ancestors_inclusive(index: usize) -> Vec<usize> {
    let mut chain = vec![index];
    let mut current = index;
    while let Some(parent) = core::peek_parent_index(current) {
        // Guard against a malformed parent cycle
        if chain.contains(&parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Nearest element, starting at `index` itself, that satisfies `pred`.
pub fn closest(index: usize, pred: impl Fn(usize) -> bool) -> Option<usize> {
    ancestors_inclusive(index).into_iter().find(|&i| pred(i))
}

/// Whether `index` is `ancestor` or lies inside it.
pub fn is_within(index: usize, ancestor: usize) -> bool {
    ancestors_inclusive(index).contains(&ancestor)
}

/// All elements matching `pred` under `root` (or the whole document).
pub fn query_all(root: Option<usize>, pred: impl Fn(usize) -> bool) -> Vec<usize> {
    let scope = match root {
        Some(root) => descendants(root),
        None => roots()
            .into_iter()
            .flat_map(|r| std::iter::once(r).chain(descendants(r)))
            .collect(),
    };
    scope.into_iter().filter(|&i| pred(i)).collect()
}

/// First element matching `pred` under `root` (or the whole document).
pub fn query_first(root: Option<usize>, pred: impl Fn(usize) -> bool) -> Option<usize> {
    query_all(root, pred).into_iter().next()
}

/// All elements with `class` under `root` (or the whole document).
pub fn by_class(root: Option<usize>, class: &str) -> Vec<usize> {
    query_all(root, |i| core::has_class(i, class))
}

// =============================================================================
// Element Accessors
// =============================================================================

pub fn kind(index: usize) -> ElementKind {
    core::get_kind(index)
}

pub fn has_class(index: usize, class: &str) -> bool {
    core::has_class(index, class)
}

pub fn attr(index: usize, name: &str) -> Option<String> {
    attrs::get_attr(index, name)
}

pub fn text_content(index: usize) -> String {
    text::get_text_content(index)
}

pub fn value(index: usize) -> String {
    text::get_value(index)
}

pub fn is_disabled(index: usize) -> bool {
    interaction::get_disabled(index)
}

// =============================================================================
// Forms
// =============================================================================

/// The form that owns `index`, if any.
pub fn enclosing_form(index: usize) -> Option<usize> {
    closest(index, |i| core::get_kind(i) == ElementKind::Form)
}

/// Whether activating `index` submits its form.
pub fn is_submit_button(index: usize) -> bool {
    match core::get_kind(index) {
        ElementKind::Input(InputType::Submit) => true,
        // <button> defaults to type=submit
        ElementKind::Button => attrs::get_attr(index, "type")
            .map(|t| t.eq_ignore_ascii_case("submit"))
            .unwrap_or(true),
        _ => false,
    }
}

/// First submit control inside `form`.
pub fn submit_control(form: usize) -> Option<usize> {
    query_first(Some(form), is_submit_button)
}

/// Name/value pairs the browser would send for `form`.
///
/// Skips unnamed and disabled controls, unchecked checkboxes/radios and
/// buttons. A checked box without a value sends `on`.
pub fn form_fields(form: usize) -> Vec<(String, String)> {
    descendants(form)
        .into_iter()
        .filter(|&i| core::get_kind(i).is_form_control())
        .filter(|&i| !interaction::get_disabled(i))
        .filter_map(|i| {
            let name = attrs::get_attr(i, "name").filter(|n| !n.is_empty())?;
            match core::get_kind(i) {
                ElementKind::Input(t) if matches!(t, InputType::Submit | InputType::Button | InputType::File) => None,
                ElementKind::Input(t) if t.is_checkable() => {
                    if !interaction::get_checked(i) {
                        return None;
                    }
                    let value = text::get_value(i);
                    Some((name, if value.is_empty() { "on".to_string() } else { value }))
                }
                _ => Some((name, text::get_value(i))),
            }
        })
        .collect()
}

/// Snapshot `form` as a submission.
pub fn form_submission(form: usize) -> FormSubmission {
    FormSubmission {
        form,
        action: attrs::get_attr(form, "action").unwrap_or_default(),
        method: attrs::get_attr(form, "method")
            .map(|m| m.to_ascii_uppercase())
            .unwrap_or_else(|| "GET".to_string()),
        fields: form_fields(form),
    }
}
