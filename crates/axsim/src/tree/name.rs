/*!
Accessible name and description computation.

The same precedence algorithm serves both: name through label-type sources,
description through describedby-type sources. First non-empty result wins:

1. labelledby references (each target's name, space-joined)
2. direct label (`aria-label`)
3. native labeling (label elements, alt, caption/legend/figcaption)
4. content text, for roles that name from content
5. title
6. empty

Reference chains can cycle; every computation carries its own visited set
and a revisited id contributes an empty branch instead of recursing.
*/

use super::node::AccessibilityNode;
use crate::types::NodeId;
use std::collections::{HashMap, HashSet};

/// Raw naming inputs kept aside per node during the build.
#[derive(Debug, Default, Clone)]
pub(crate) struct NameSources {
  pub(crate) tag: String,
  pub(crate) aria_label: Option<String>,
  pub(crate) aria_description: Option<String>,
  pub(crate) title: Option<String>,
  pub(crate) alt: Option<String>,
}

/// Shared lookups for one build's naming pass.
pub(crate) struct NameCtx<'a> {
  pub(crate) nodes: &'a HashMap<NodeId, AccessibilityNode>,
  pub(crate) sources: &'a HashMap<NodeId, NameSources>,
  /// Target node -> label elements naming it (document order).
  pub(crate) labels: &'a HashMap<NodeId, Vec<NodeId>>,
}

/// Collapse internal whitespace runs and trim.
pub(crate) fn collapse_ws(s: &str) -> String {
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Computed name plus whether the title attribute supplied it (a title
/// consumed as the name is not reused as the description).
pub(crate) struct ComputedName {
  pub(crate) name: String,
  pub(crate) from_title: bool,
}

/// Compute a node's accessible name.
///
/// `as_reference` is true while resolving a labelledby/describedby target:
/// in that mode content text applies to any role, not only the
/// names-from-content ones.
pub(crate) fn compute_name(
  ctx: &NameCtx<'_>,
  id: NodeId,
  visited: &mut HashSet<NodeId>,
  as_reference: bool,
) -> ComputedName {
  if !visited.insert(id) {
    return ComputedName {
      name: String::new(),
      from_title: false,
    };
  }

  let Some(node) = ctx.nodes.get(&id) else {
    return ComputedName {
      name: String::new(),
      from_title: false,
    };
  };

  // 1. labelledby references.
  let referenced = node
    .relationships
    .labelled_by
    .iter()
    .map(|&target| compute_name(ctx, target, visited, true).name)
    .filter(|name| !name.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
  let referenced = collapse_ws(&referenced);
  if !referenced.is_empty() {
    return ComputedName {
      name: referenced,
      from_title: false,
    };
  }

  let sources = ctx.sources.get(&id);

  // 2. Direct label.
  if let Some(label) = sources.and_then(|s| s.aria_label.as_deref()) {
    let label = collapse_ws(label);
    if !label.is_empty() {
      return ComputedName {
        name: label,
        from_title: false,
      };
    }
  }

  // 3. Native labeling: label elements, alt text, caption/legend/figcaption.
  if let Some(labels) = ctx.labels.get(&id) {
    let labelled = labels
      .iter()
      .map(|&label| content_text(ctx, label))
      .filter(|text| !text.is_empty())
      .collect::<Vec<_>>()
      .join(" ");
    let labelled = collapse_ws(&labelled);
    if !labelled.is_empty() {
      return ComputedName {
        name: labelled,
        from_title: false,
      };
    }
  }
  if let Some(alt) = sources.and_then(|s| s.alt.as_deref()) {
    let alt = collapse_ws(alt);
    if !alt.is_empty() {
      return ComputedName {
        name: alt,
        from_title: false,
      };
    }
  }
  if let Some(caption) = caption_text(ctx, id) {
    if !caption.is_empty() {
      return ComputedName {
        name: caption,
        from_title: false,
      };
    }
  }

  // 4. Content text for roles that name from content, and for any
  // referenced target.
  if node.role.names_from_content() || as_reference {
    let content = content_text(ctx, id);
    if !content.is_empty() {
      return ComputedName {
        name: content,
        from_title: false,
      };
    }
  }

  // 5. Title attribute.
  if let Some(title) = sources.and_then(|s| s.title.as_deref()) {
    let title = collapse_ws(title);
    if !title.is_empty() {
      return ComputedName {
        name: title,
        from_title: true,
      };
    }
  }

  ComputedName {
    name: String::new(),
    from_title: false,
  }
}

pub(crate) fn compute_description(ctx: &NameCtx<'_>, id: NodeId, name_from_title: bool) -> String {
  let Some(node) = ctx.nodes.get(&id) else {
    return String::new();
  };

  let mut visited = HashSet::new();
  visited.insert(id);
  let referenced = node
    .relationships
    .described_by
    .iter()
    .map(|&target| compute_name(ctx, target, &mut visited, true).name)
    .filter(|name| !name.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
  let referenced = collapse_ws(&referenced);
  if !referenced.is_empty() {
    return referenced;
  }

  let sources = ctx.sources.get(&id);
  if let Some(description) = sources.and_then(|s| s.aria_description.as_deref()) {
    let description = collapse_ws(description);
    if !description.is_empty() {
      return description;
    }
  }

  // Title doubles as description only when it was not consumed as the name.
  if !name_from_title {
    if let Some(title) = sources.and_then(|s| s.title.as_deref()) {
      return collapse_ws(title);
    }
  }

  String::new()
}

/// Visible subtree text of a node: own text runs plus visible descendants',
/// document order. Hidden descendants contribute nothing; a hidden node
/// reads as empty even when referenced directly.
pub(crate) fn content_text(ctx: &NameCtx<'_>, id: NodeId) -> String {
  let mut parts: Vec<&str> = Vec::new();
  let mut stack = vec![(id, true)];
  while let Some((current, is_target)) = stack.pop() {
    let Some(node) = ctx.nodes.get(&current) else {
      continue;
    };
    if node.hidden {
      if is_target {
        return String::new();
      }
      continue;
    }
    if !node.text.is_empty() {
      parts.push(&node.text);
    }
    for &child in node.children.iter().rev() {
      stack.push((child, false));
    }
  }
  collapse_ws(&parts.join(" "))
}

/// Caption-style native label: `caption` for tables, `legend` for
/// fieldset-derived groups, `figcaption` for figures.
fn caption_text(ctx: &NameCtx<'_>, id: NodeId) -> Option<String> {
  let node = ctx.nodes.get(&id)?;
  let tag = ctx.sources.get(&id).map(|s| s.tag.as_str())?;
  let caption_tag = match tag {
    "table" => "caption",
    "fieldset" => "legend",
    "figure" => "figcaption",
    _ => return None,
  };
  node
    .children
    .iter()
    .find(|child| {
      ctx
        .sources
        .get(child)
        .is_some_and(|s| s.tag == caption_tag)
    })
    .map(|&caption| content_text(ctx, caption))
}
