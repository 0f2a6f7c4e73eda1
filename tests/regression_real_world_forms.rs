use scoped_inputs::{
    CONFIG_REQUEST, Document, ExtensionRegistry, Params, RequestEvent, ScopeConfig, ScopeMode,
    ScopedInputs, resolve,
};

fn dispatch(dom: &Document, trigger: &str, target: &str, mode: ScopeMode) -> Params {
    let mut registry = ExtensionRegistry::new();
    registry.define("scoped-inputs", Box::new(ScopedInputs::new(mode)));

    let mut params = Params::new();
    let mut event = RequestEvent {
        trigger: dom.by_id(trigger).expect("trigger exists"),
        target: dom.by_id(target).expect("target exists"),
        params: &mut params,
    };
    registry.dispatch(CONFIG_REQUEST, dom, &mut event);
    params
}

#[test]
fn two_forms_on_one_page_stay_isolated() {
    let html = r#"
    <h1>Account settings</h1>
    <form id="user">
      <input type="text" hx-name="username" hx-scope="user-form" value="john">
      <input type="text" hx-name="email" hx-scope="user-form" value="john@example.com">
      <input type="hidden" hx-name="csrf" value="token-1">
      <button id="save-user" hx-scope="user-form">Save User</button>
      <div id="user-result"></div>
    </form>
    <form id="admin">
      <textarea hx-name="admin-note" hx-scope="admin-form">internal note</textarea>
      <button id="save-admin" hx-scope="admin-form">Save Note</button>
      <div id="admin-result"></div>
    </form>
    "#;
    let dom = Document::from_html(html).expect("page parses");

    let user = dispatch(&dom, "save-user", "user-result", ScopeMode::Tags);
    assert_eq!(user.len(), 3);
    assert_eq!(user.get("username"), Some("john"));
    assert_eq!(user.get("email"), Some("john@example.com"));
    assert_eq!(user.get("csrf"), Some("token-1"));
    assert_eq!(user.get("admin-note"), None);

    let admin = dispatch(&dom, "save-admin", "admin-result", ScopeMode::Tags);
    assert_eq!(admin.len(), 1);
    assert_eq!(admin.get("admin-note"), Some("internal note"));
}

#[test]
fn per_row_scopes_isolate_line_item_calculations() {
    // Shape of the original demo page: one form, one recalculate button per
    // line item, row-scoped quantity/price fields plus shared unscoped ones.
    let html = r#"
    <form id="order">
      <input type="hidden" hx-name="order_id" value="ord-7">
      <table>
        <tr id="row-1">
          <td><input type="hidden" hx-name="item_id" hx-scope="row-1" value="1"></td>
          <td><input type="number" hx-name="quantity" hx-scope="row-1" value="2"></td>
          <td><input type="number" hx-name="price" hx-scope="row-1" value="9.99"></td>
          <td><button id="calc-1" hx-scope="row-1">Recalculate</button></td>
        </tr>
        <tr id="row-2">
          <td><input type="hidden" hx-name="item_id" hx-scope="row-2" value="2"></td>
          <td><input type="number" hx-name="quantity" hx-scope="row-2" value="5"></td>
          <td><input type="number" hx-name="price" hx-scope="row-2" value="1.50"></td>
          <td><button id="calc-2" hx-scope="row-2">Recalculate</button></td>
        </tr>
      </table>
      <div id="totals"></div>
    </form>
    "#;
    let dom = Document::from_html(html).expect("page parses");

    let row1 = dispatch(&dom, "calc-1", "totals", ScopeMode::Tags);
    assert_eq!(row1.get("order_id"), Some("ord-7"));
    assert_eq!(row1.get("item_id"), Some("1"));
    assert_eq!(row1.get("quantity"), Some("2"));
    assert_eq!(row1.get("price"), Some("9.99"));

    let row2 = dispatch(&dom, "calc-2", "totals", ScopeMode::Tags);
    assert_eq!(row2.get("item_id"), Some("2"));
    assert_eq!(row2.get("quantity"), Some("5"));
    assert_eq!(row2.get("price"), Some("1.50"));
}

#[test]
fn preference_panel_mixes_control_kinds() {
    let html = r#"
    <form id="prefs">
      <input type="checkbox" hx-name="newsletter" hx-scope="prefs" checked>
      <input type="checkbox" hx-name="tracking" hx-scope="prefs"
             hx-unchecked-value="declined">
      <input type="checkbox" hx-name="beta" hx-scope="prefs">
      <input type="radio" hx-name="theme" hx-scope="prefs" value="light">
      <input type="radio" hx-name="theme" hx-scope="prefs" value="dark" checked>
      <select hx-name="language" hx-scope="prefs">
        <option value="en">English</option>
        <option value="fr" selected>French</option>
      </select>
      <button id="apply" hx-scope="prefs">Apply</button>
      <div id="result"></div>
    </form>
    "#;
    let dom = Document::from_html(html).expect("page parses");

    let params = dispatch(&dom, "apply", "result", ScopeMode::Tags);
    assert_eq!(params.get("newsletter"), Some("on"));
    assert_eq!(params.get("tracking"), Some("declined"));
    assert_eq!(params.get("beta"), None);
    assert_eq!(params.get("theme"), Some("dark"));
    assert_eq!(params.get("language"), Some("fr"));
}

#[test]
fn selector_mode_collects_a_fieldset_by_css() {
    let html = r##"
    <form id="checkout">
      <fieldset id="billing">
        <input type="text" hx-name="card" value="4242">
        <input type="text" hx-name="cvv" value="123">
      </fieldset>
      <fieldset id="shipping">
        <input type="text" hx-name="address" value="1 Main St">
      </fieldset>
      <button id="pay" hx-scope="#billing input[hx-name]">Pay</button>
      <div id="result"></div>
    </form>
    "##;
    let dom = Document::from_html(html).expect("page parses");

    let params = dispatch(&dom, "pay", "result", ScopeMode::Selector);
    assert_eq!(params.len(), 2);
    assert_eq!(params.get("card"), Some("4242"));
    assert_eq!(params.get("cvv"), Some("123"));
    assert_eq!(params.get("address"), None);
}

#[test]
fn broken_selector_degrades_to_an_unchanged_request() {
    let html = r#"
    <form>
      <input type="text" hx-name="username" value="john">
      <button id="go" hx-scope=":::bad">Send</button>
      <div id="result"></div>
    </form>
    "#;
    let dom = Document::from_html(html).expect("page parses");
    let trigger = dom.by_id("go").expect("trigger exists");

    let mut params = Params::new();
    params.insert("page", "1");
    resolve(
        &dom,
        trigger,
        &mut params,
        &ScopeConfig::with_mode(ScopeMode::Selector),
    );

    assert_eq!(params.len(), 1);
    assert_eq!(params.get("page"), Some("1"));
}
