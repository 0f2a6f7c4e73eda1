use super::*;

mod control_values_and_merge;

fn trigger_id(dom: &Document, id: &str) -> Result<NodeId> {
    dom.by_id(id)
        .ok_or_else(|| Error::InvalidNode(format!("no element with id {id}")))
}

fn run_with(html: &str, trigger: &str, config: &ScopeConfig) -> Result<Params> {
    let dom = Document::from_html(html)?;
    let trigger = trigger_id(&dom, trigger)?;
    let mut params = Params::new();
    resolve(&dom, trigger, &mut params, config);
    Ok(params)
}

fn run_tags(html: &str, trigger: &str) -> Result<Params> {
    run_with(html, trigger, &ScopeConfig::default())
}

fn run_selector(html: &str, trigger: &str) -> Result<Params> {
    run_with(html, trigger, &ScopeConfig::with_mode(ScopeMode::Selector))
}
