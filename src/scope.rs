use crate::dom::{DomQuery, NodeId};
use crate::params::Params;

/// How a trigger's scope declaration selects candidate inputs.
///
/// The source mechanism evolved between these two policies, so both remain
/// supported; hosts pick one explicitly rather than the resolver guessing
/// from the attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScopeMode {
    /// Whitespace-separated tag sets, included on a shared tag or when the
    /// candidate declares no tags of its own.
    #[default]
    Tags,
    /// The declaration is a CSS selector evaluated against the search root.
    Selector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConfig {
    pub mode: ScopeMode,
    /// Scope declaration attribute, on the trigger and on candidates.
    pub scope_attr: String,
    /// Parameter name attribute on candidates.
    pub name_attr: String,
    /// Fallback value attribute for unchecked checkboxes.
    pub unchecked_attr: String,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            mode: ScopeMode::Tags,
            scope_attr: "hx-scope".to_string(),
            name_attr: "hx-name".to_string(),
            unchecked_attr: "hx-unchecked-value".to_string(),
        }
    }
}

impl ScopeConfig {
    pub fn with_mode(mode: ScopeMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlKind {
    Checkbox,
    Radio,
    Other,
}

/// Merges scoped input parameters into `params` for one outgoing request.
///
/// A trigger without the scope attribute leaves the mapping untouched. The
/// resolver only reads from the document; its single side effect is writing
/// matched entries into `params`, later candidates winning on duplicate
/// names.
pub fn resolve<D: DomQuery + ?Sized>(
    dom: &D,
    trigger: NodeId,
    params: &mut Params,
    config: &ScopeConfig,
) {
    let Some(scope_decl) = dom.attr(trigger, &config.scope_attr) else {
        return;
    };

    let root = search_root(dom, trigger);
    let candidates = match config.mode {
        ScopeMode::Tags => tag_candidates(dom, root, scope_decl, config),
        ScopeMode::Selector => match dom.query_all(root, scope_decl) {
            Ok(matched) => matched,
            Err(err) => {
                tracing::warn!(
                    "scope selector {scope_decl:?} did not parse, contributing no parameters: {err}"
                );
                return;
            }
        },
    };

    for candidate in candidates {
        let Some(name) = dom.attr(candidate, &config.name_attr) else {
            continue;
        };

        let kind = control_kind(dom, candidate);
        let value = match kind {
            ControlKind::Checkbox => {
                if dom.is_checked(candidate) {
                    dom.attr(candidate, "value").unwrap_or("on").to_string()
                } else {
                    dom.attr(candidate, &config.unchecked_attr)
                        .unwrap_or_default()
                        .to_string()
                }
            }
            ControlKind::Radio => {
                if dom.is_checked(candidate) {
                    dom.attr(candidate, "value").unwrap_or("on").to_string()
                } else {
                    String::new()
                }
            }
            ControlKind::Other => dom.current_value(candidate).unwrap_or_default(),
        };

        // Checked-state controls omit empty values instead of sending them.
        if value.is_empty() && kind != ControlKind::Other {
            continue;
        }
        params.insert(name, value);
    }
}

/// Nearest enclosing form (the trigger itself counts), else the trigger's
/// parent element, else the document root.
fn search_root<D: DomQuery + ?Sized>(dom: &D, trigger: NodeId) -> NodeId {
    let mut cursor = Some(trigger);
    while let Some(node) = cursor {
        if dom
            .tag_name(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
        {
            return node;
        }
        cursor = dom.parent(node);
    }
    match dom.parent(trigger) {
        Some(parent) if parent != dom.root() => parent,
        _ => dom.root(),
    }
}

fn tag_candidates<D: DomQuery + ?Sized>(
    dom: &D,
    root: NodeId,
    scope_decl: &str,
    config: &ScopeConfig,
) -> Vec<NodeId> {
    let trigger_tags: Vec<&str> = scope_decl.split_whitespace().collect();

    dom.element_descendants(root)
        .into_iter()
        .filter(|node| is_form_control(dom, *node))
        .filter(|node| dom.attr(*node, &config.name_attr).is_some())
        .filter(|node| match dom.attr(*node, &config.scope_attr) {
            // No scope set of its own: always included.
            None => true,
            Some(own) => own
                .split_whitespace()
                .any(|tag| trigger_tags.contains(&tag)),
        })
        .collect()
}

fn is_form_control<D: DomQuery + ?Sized>(dom: &D, node: NodeId) -> bool {
    dom.tag_name(node).is_some_and(|tag| {
        tag.eq_ignore_ascii_case("input")
            || tag.eq_ignore_ascii_case("select")
            || tag.eq_ignore_ascii_case("textarea")
    })
}

fn control_kind<D: DomQuery + ?Sized>(dom: &D, node: NodeId) -> ControlKind {
    let is_input = dom
        .tag_name(node)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("input"));
    if !is_input {
        return ControlKind::Other;
    }
    match dom.attr(node, "type") {
        Some(kind) if kind.eq_ignore_ascii_case("checkbox") => ControlKind::Checkbox,
        Some(kind) if kind.eq_ignore_ascii_case("radio") => ControlKind::Radio,
        _ => ControlKind::Other,
    }
}
