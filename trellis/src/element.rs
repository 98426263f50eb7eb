//! Elements: immutable descriptions of desired UI content.
//!
//! An element produces an [`ElementContent`] (how it measures and which
//! children it has) and optionally a [`ViewDescription`] for a backing view.
//! Elements carry no identity of their own; an element is identified by its
//! kind and its index among same-kind siblings.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::LayoutError;
use crate::layout::ElementContent;
use crate::view::{ViewDescription, ViewDescriptionContext};

/// Deepest element nesting any traversal or layout pass will follow.
pub const MAX_ELEMENT_DEPTH: usize = 512;

/// Shared handle to an element.
pub type ElementRef = Rc<dyn Element>;

/// Capability contract every element implements.
pub trait Element: fmt::Debug + 'static {
    /// Measurement function and ordered children.
    fn content(&self) -> ElementContent;

    /// Description of this element's backing view, if it wants one.
    ///
    /// Returning `None` makes the element transparent: its children attach
    /// to the nearest view-backed ancestor.
    fn backing_view_description(&self, context: &ViewDescriptionContext) -> Option<ViewDescription>;

    /// Structural kind used for identity. Defaults to the type name.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Convenience conversion into a shared [`ElementRef`].
pub trait ElementExt: Element + Sized {
    fn into_ref(self) -> ElementRef {
        Rc::new(self)
    }
}

impl<E: Element> ElementExt for E {}

/// Structural identity of an element among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementIdentifier {
    pub kind: &'static str,
    /// Number of preceding siblings with the same kind.
    pub index: usize,
}

impl ElementIdentifier {
    pub fn new(kind: &'static str, index: usize) -> Self {
        Self { kind, index }
    }

    /// Identifiers for an ordered list of siblings.
    pub fn for_siblings(children: &[ElementRef]) -> Vec<ElementIdentifier> {
        let mut seen: HashMap<&'static str, usize> = HashMap::new();
        children
            .iter()
            .map(|child| {
                let kind = child.kind();
                let count = seen.entry(kind).or_insert(0);
                let identifier = ElementIdentifier::new(kind, *count);
                *count += 1;
                identifier
            })
            .collect()
    }
}

impl fmt::Display for ElementIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.kind.rsplit("::").next().unwrap_or(self.kind);
        write!(f, "{}.{}", short, self.index)
    }
}

/// Identifiers from the nearest view-backed ancestor down to an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementPath(Vec<ElementIdentifier>);

impl ElementPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of this path with `identifier` appended.
    pub fn appending(&self, identifier: ElementIdentifier) -> Self {
        let mut components = self.0.clone();
        components.push(identifier);
        Self(components)
    }

    pub fn components(&self) -> &[ElementIdentifier] {
        &self.0
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{identifier}")?;
        }
        Ok(())
    }
}

/// An element paired with its depth in the element tree.
#[derive(Debug, Clone)]
pub struct RecursedElement {
    pub element: ElementRef,
    pub depth: usize,
}

/// Every element of the tree rooted at `root`, depth-first pre-order.
///
/// The root is at depth 0 and each child at its parent's depth + 1. View-backed
/// and transparent elements alike appear exactly once.
pub fn recursive_element_list(root: &ElementRef) -> Result<Vec<RecursedElement>, LayoutError> {
    let mut out = Vec::new();
    let mut stack = vec![(root.clone(), 0usize)];

    while let Some((element, depth)) = stack.pop() {
        if depth > MAX_ELEMENT_DEPTH {
            return Err(LayoutError::DepthExceeded {
                depth,
                limit: MAX_ELEMENT_DEPTH,
            });
        }
        let content = element.content();
        // Reversed so the first child is popped first.
        for child in content.children().iter().rev() {
            stack.push((child.clone(), depth + 1));
        }
        out.push(RecursedElement { element, depth });
    }

    Ok(out)
}

/// Deepest nesting below `root`, walked without recursion.
///
/// Fails as soon as an element sits deeper than [`MAX_ELEMENT_DEPTH`]. Only
/// `content()` is consulted, so nothing is measured.
pub fn element_tree_depth(root: &ElementRef) -> Result<usize, LayoutError> {
    let mut deepest = 0;
    let mut stack = vec![(root.clone(), 0usize)];

    while let Some((element, depth)) = stack.pop() {
        if depth > MAX_ELEMENT_DEPTH {
            return Err(LayoutError::DepthExceeded {
                depth,
                limit: MAX_ELEMENT_DEPTH,
            });
        }
        deepest = deepest.max(depth);
        stack.extend(element.content().children().iter().map(|child| (child.clone(), depth + 1)));
    }

    Ok(deepest)
}
