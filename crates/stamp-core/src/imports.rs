//! Import list recomputation.

use stamp_parser::UsingDirective;

/// The unit's new using list: `existing` (triggers already removed) plus a
/// plain directive for every `required` namespace not imported yet.
///
/// Exact duplicates are dropped. `global using` directives sort first, then
/// everything is ordered by target text. Comments that led the first
/// directive stay at the top of the block.
pub fn merge_imports<'a>(
    existing: &[UsingDirective],
    required: impl IntoIterator<Item = &'a str>,
) -> Vec<UsingDirective> {
    let mut merged: Vec<UsingDirective> = Vec::with_capacity(existing.len());
    for using in existing {
        if !merged.iter().any(|kept| same_directive(kept, using)) {
            merged.push(using.clone());
        }
    }
    for namespace in required {
        if !merged.iter().any(|using| imports_namespace(using, namespace)) {
            merged.push(UsingDirective::namespace(namespace));
        }
    }

    let header = merged
        .first_mut()
        .map(|first| std::mem::take(&mut first.leading_trivia))
        .unwrap_or_default();
    merged.sort_by_cached_key(|using| (!using.is_global, using.target_text()));
    if let Some(first) = merged.first_mut() {
        let own = std::mem::replace(&mut first.leading_trivia, header);
        first.leading_trivia.extend(own);
    }
    merged
}

fn imports_namespace(using: &UsingDirective, namespace: &str) -> bool {
    using.is_plain() && using.target_text() == namespace
}

fn same_directive(a: &UsingDirective, b: &UsingDirective) -> bool {
    a.is_global == b.is_global
        && a.is_static == b.is_static
        && a.alias == b.alias
        && a.target == b.target
}
