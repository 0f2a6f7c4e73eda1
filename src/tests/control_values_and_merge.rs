use super::*;

#[test]
fn checked_checkbox_without_value_sends_on() -> Result<()> {
    let html = r#"
        <form>
          <input type='checkbox' hx-name='subscribe' hx-scope='s' checked>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("subscribe"), Some("on"));
    Ok(())
}

#[test]
fn checked_checkbox_with_value_sends_declared_value() -> Result<()> {
    let html = r#"
        <form>
          <input type='checkbox' hx-name='plan' hx-scope='s' value='premium' checked>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("plan"), Some("premium"));
    Ok(())
}

#[test]
fn unchecked_checkbox_is_omitted() -> Result<()> {
    let html = r#"
        <form>
          <input type='checkbox' hx-name='subscribe' hx-scope='s' value='yes'>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert!(params.is_empty());
    Ok(())
}

#[test]
fn unchecked_checkbox_with_fallback_sends_fallback() -> Result<()> {
    let html = r#"
        <form>
          <input type='checkbox' hx-name='subscribe' hx-scope='s' value='yes'
                 hx-unchecked-value='no'>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("subscribe"), Some("no"));
    Ok(())
}

#[test]
fn radio_group_sends_only_the_checked_value() -> Result<()> {
    let html = r#"
        <form>
          <input type='radio' hx-name='size' hx-scope='s' value='small'>
          <input type='radio' hx-name='size' hx-scope='s' value='large' checked>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.len(), 1);
    assert_eq!(params.get("size"), Some("large"));
    Ok(())
}

#[test]
fn fully_unchecked_radio_group_is_omitted() -> Result<()> {
    let html = r#"
        <form>
          <input type='radio' hx-name='size' hx-scope='s' value='small'>
          <input type='radio' hx-name='size' hx-scope='s' value='large'>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert!(params.is_empty());
    Ok(())
}

#[test]
fn checked_before_unchecked_radio_survives_merge() -> Result<()> {
    // The unchecked later sibling computes empty and must not erase the
    // checked sibling's entry.
    let html = r#"
        <form>
          <input type='radio' hx-name='size' hx-scope='s' value='small' checked>
          <input type='radio' hx-name='size' hx-scope='s' value='large'>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("size"), Some("small"));
    Ok(())
}

#[test]
fn empty_text_input_still_sends_empty_string() -> Result<()> {
    let html = r#"
        <form>
          <input type='text' hx-name='nickname' hx-scope='s' value=''>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.len(), 1);
    assert_eq!(params.get("nickname"), Some(""));
    Ok(())
}

#[test]
fn select_sends_selected_option_value() -> Result<()> {
    let html = r#"
        <form>
          <select hx-name='country' hx-scope='s'>
            <option value='us'>United States</option>
            <option value='jp' selected>Japan</option>
          </select>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("country"), Some("jp"));
    Ok(())
}

#[test]
fn select_defaults_to_first_option() -> Result<()> {
    let html = r#"
        <form>
          <select hx-name='country' hx-scope='s'>
            <option value='us'>United States</option>
            <option value='jp'>Japan</option>
          </select>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("country"), Some("us"));
    Ok(())
}

#[test]
fn option_without_value_uses_its_text() -> Result<()> {
    let html = r#"
        <form>
          <select hx-name='color' hx-scope='s'>
            <option selected>red</option>
            <option>blue</option>
          </select>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("color"), Some("red"));
    Ok(())
}

#[test]
fn textarea_sends_its_text_content() -> Result<()> {
    let html = r#"
        <form>
          <textarea hx-name='bio' hx-scope='s'>hello world</textarea>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let params = run_tags(html, "go")?;

    assert_eq!(params.get("bio"), Some("hello world"));
    Ok(())
}

#[test]
fn host_edits_are_visible_to_the_resolver() -> Result<()> {
    let html = r#"
        <form>
          <input id='name' hx-name='name' hx-scope='s' value='old'>
          <input id='agree' type='checkbox' hx-name='agree' hx-scope='s'>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let mut dom = Document::from_html(html)?;
    let name = trigger_id(&dom, "name")?;
    let agree = trigger_id(&dom, "agree")?;
    dom.set_value(name, "new")?;
    dom.set_checked(agree, true)?;

    let trigger = trigger_id(&dom, "go")?;
    let mut params = Params::new();
    resolve(&dom, trigger, &mut params, &ScopeConfig::default());

    assert_eq!(params.get("name"), Some("new"));
    assert_eq!(params.get("agree"), Some("on"));
    Ok(())
}

#[test]
fn resolver_is_idempotent_for_fixed_dom_state() -> Result<()> {
    let html = r#"
        <form>
          <input hx-name='a' hx-scope='s' value='1'>
          <input type='checkbox' hx-name='b' hx-scope='s' checked>
          <select hx-name='c' hx-scope='s'><option value='x'>X</option></select>
          <button id='go' hx-scope='s'>Send</button>
        </form>
        "#;
    let dom = Document::from_html(html)?;
    let trigger = trigger_id(&dom, "go")?;
    let config = ScopeConfig::default();

    let mut first = Params::new();
    resolve(&dom, trigger, &mut first, &config);
    let mut second = Params::new();
    resolve(&dom, trigger, &mut second, &config);
    assert_eq!(first, second);

    // Re-running into an already-populated mapping only rewrites the same
    // entries.
    let mut repeated = first.clone();
    resolve(&dom, trigger, &mut repeated, &config);
    assert_eq!(repeated, first);
    Ok(())
}
