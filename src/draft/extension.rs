//! Extension lookup by TypeName
//!
//! Every patch follows the same shape: find the extensions whose `TypeName`
//! child carries a marker, then descend a fixed path of child element names
//! below each one. Both steps visit every match, in document order.

use crate::draft::constants::tags;
use crate::draft::document::Element;

/// Counts gathered while visiting extensions and descent targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lookup {
    /// Extensions whose TypeName matched
    pub extensions: usize,
    /// Nodes reached at the end of the descent path
    pub targets: usize,
}

/// Whether `element` is an extension carrying the given TypeName marker
pub fn is_extension(element: &Element, type_name: &str) -> bool {
    element
        .child_elements()
        .any(|child| child.name() == tags::TYPE_NAME && child.text() == Some(type_name))
}

/// Collect every extension in the subtree with the given TypeName
pub fn find_extensions<'e>(root: &'e Element, type_name: &str) -> Vec<&'e Element> {
    let mut found = Vec::new();
    collect_extensions(root, type_name, &mut found);
    found
}

fn collect_extensions<'e>(element: &'e Element, type_name: &str, found: &mut Vec<&'e Element>) {
    if is_extension(element, type_name) {
        found.push(element);
    }
    for child in element.child_elements() {
        collect_extensions(child, type_name, found);
    }
}

/// Collect the nodes reached by following `path` below `element`
///
/// Every child matching a path segment is followed, not only the first.
pub fn descend<'e>(element: &'e Element, path: &[&str]) -> Vec<&'e Element> {
    match path.split_first() {
        None => vec![element],
        Some((segment, rest)) => element
            .child_elements()
            .filter(|child| child.name() == *segment)
            .flat_map(|child| descend(child, rest))
            .collect(),
    }
}

/// Visit every extension with the given TypeName
///
/// # Returns
/// The number of extensions visited
pub fn for_each_extension<F>(root: &mut Element, type_name: &str, mut visit: F) -> usize
where
    F: FnMut(&mut Element),
{
    visit_extensions(root, type_name, &mut visit)
}

fn visit_extensions<F>(element: &mut Element, type_name: &str, visit: &mut F) -> usize
where
    F: FnMut(&mut Element),
{
    let mut count = 0;
    if is_extension(element, type_name) {
        visit(element);
        count += 1;
    }
    for child in element.child_elements_mut() {
        count += visit_extensions(child, type_name, visit);
    }
    count
}

/// Visit every node reached by following `path` below `element`
///
/// # Returns
/// The number of nodes visited
pub fn descend_mut<F>(element: &mut Element, path: &[&str], visit: &mut F) -> usize
where
    F: FnMut(&mut Element),
{
    match path.split_first() {
        None => {
            visit(element);
            1
        }
        Some((segment, rest)) => element
            .child_elements_mut()
            .filter(|child| child.name() == *segment)
            .map(|child| descend_mut(child, rest, &mut *visit))
            .sum(),
    }
}

/// Locate extensions by TypeName, then apply `visit` at the end of `path`
pub fn locate_mut<F>(root: &mut Element, type_name: &str, path: &[&str], mut visit: F) -> Lookup
where
    F: FnMut(&mut Element),
{
    let mut targets = 0;
    let extensions = for_each_extension(root, type_name, |extension| {
        targets += descend_mut(extension, path, &mut visit);
    });

    Lookup { extensions, targets }
}
