//! The `com.canonical.dbusmenu` object.
//!
//! Layout reads take a [`MenuSnapshot`] so the revision and the tree a host
//! receives always belong together.

use std::collections::HashMap;
use std::sync::Arc;

use linkhub_menu::{EventSender, ItemProps, MenuSnapshot, MenuStore, PropValue, ids};
use linkhub_protocol::constants::DBUSMENU_VERSION;
use zbus::zvariant::{OwnedValue, Value};
use zbus::object_server::SignalEmitter;
use zbus::{fdo, interface};

/// One layout node: `(id, properties, children)`.
///
/// Children are variants wrapping nodes of the same shape.
pub type LayoutItem = (i32, HashMap<String, Value<'static>>, Vec<Value<'static>>);

/// Event id sent by hosts when a row is clicked.
const CLICKED: &str = "clicked";

fn to_value(value: PropValue) -> Value<'static> {
    match value {
        PropValue::Str(s) => Value::from(s),
        PropValue::Bool(b) => Value::from(b),
    }
}

/// Property map of one row, limited to `names` unless `names` is empty.
fn properties(props: &ItemProps, names: &[String]) -> HashMap<String, Value<'static>> {
    props
        .properties()
        .into_iter()
        .filter(|(name, _)| names.is_empty() || names.iter().any(|n| n == name))
        .map(|(name, value)| (name.to_string(), to_value(value)))
        .collect()
}

fn root_properties(names: &[String]) -> HashMap<String, Value<'static>> {
    let mut props = HashMap::new();
    if names.is_empty() || names.iter().any(|n| n == "children-display") {
        props.insert("children-display".to_string(), Value::from("submenu"));
    }
    props
}

/// Builds the layout rooted at `parent_id`.
///
/// The tree is one level deep: the root lists every row, rows have no
/// children. A `recursion_depth` of 0 returns the root alone.
fn layout(
    snapshot: &MenuSnapshot,
    parent_id: i32,
    recursion_depth: i32,
    names: &[String],
) -> fdo::Result<LayoutItem> {
    if parent_id == ids::ROOT {
        let children = if recursion_depth == 0 {
            Vec::new()
        } else {
            snapshot
                .iter()
                .map(|(id, props)| {
                    let node: LayoutItem = (id, properties(props, names), Vec::new());
                    Value::from(node)
                })
                .collect()
        };
        return Ok((ids::ROOT, root_properties(names), children));
    }

    snapshot
        .get(parent_id)
        .map(|props| (parent_id, properties(props, names), Vec::new()))
        .ok_or_else(|| fdo::Error::InvalidArgs(format!("unknown menu item {parent_id}")))
}

/// Menu object serving the shared [`MenuStore`].
pub struct DbusMenu {
    store: Arc<MenuStore>,
    events: EventSender,
}

impl DbusMenu {
    pub fn new(store: Arc<MenuStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    fn dispatch(&self, id: i32, event_id: &str) {
        if event_id != CLICKED {
            return;
        }
        match self.events.activate(id) {
            Some(event) => tracing::info!(id, ?event, "menu item activated"),
            None => tracing::debug!(id, "inert menu item clicked"),
        }
    }
}

#[interface(name = "com.canonical.dbusmenu")]
impl DbusMenu {
    #[zbus(out_args("revision", "layout"))]
    fn get_layout(
        &self,
        parent_id: i32,
        recursion_depth: i32,
        property_names: Vec<String>,
    ) -> fdo::Result<(u32, LayoutItem)> {
        let snapshot = self.store.snapshot();
        let node = layout(&snapshot, parent_id, recursion_depth, &property_names)?;
        Ok((snapshot.revision(), node))
    }

    fn get_group_properties(
        &self,
        item_ids: Vec<i32>,
        property_names: Vec<String>,
    ) -> Vec<(i32, HashMap<String, Value<'static>>)> {
        let snapshot = self.store.snapshot();
        if item_ids.is_empty() {
            return snapshot
                .iter()
                .map(|(id, props)| (id, properties(props, &property_names)))
                .collect();
        }
        item_ids
            .into_iter()
            .filter_map(|id| {
                snapshot
                    .get(id)
                    .map(|props| (id, properties(props, &property_names)))
            })
            .collect()
    }

    fn get_property(&self, id: i32, name: String) -> fdo::Result<Value<'static>> {
        let snapshot = self.store.snapshot();
        let props = snapshot
            .get(id)
            .ok_or_else(|| fdo::Error::InvalidArgs(format!("unknown menu item {id}")))?;
        properties(props, std::slice::from_ref(&name))
            .remove(&name)
            .ok_or_else(|| fdo::Error::InvalidArgs(format!("menu item {id} has no property {name}")))
    }

    fn event(&self, id: i32, event_id: String, _data: OwnedValue, _timestamp: u32) {
        self.dispatch(id, &event_id);
    }

    /// Dispatches each event; returns the ids that do not exist.
    fn event_group(&self, events: Vec<(i32, String, OwnedValue, u32)>) -> Vec<i32> {
        let snapshot = self.store.snapshot();
        let mut id_errors = Vec::new();
        for (id, event_id, _data, _timestamp) in events {
            if id != ids::ROOT && !snapshot.contains(id) {
                id_errors.push(id);
                continue;
            }
            self.dispatch(id, &event_id);
        }
        id_errors
    }

    fn about_to_show(&self, _id: i32) -> bool {
        false
    }

    #[zbus(out_args("updates_needed", "id_errors"))]
    fn about_to_show_group(&self, item_ids: Vec<i32>) -> (Vec<i32>, Vec<i32>) {
        let snapshot = self.store.snapshot();
        let id_errors = item_ids
            .into_iter()
            .filter(|&id| id != ids::ROOT && !snapshot.contains(id))
            .collect();
        (Vec::new(), id_errors)
    }

    #[zbus(property)]
    fn version(&self) -> u32 {
        DBUSMENU_VERSION
    }

    #[zbus(property)]
    fn status(&self) -> String {
        "normal".into()
    }

    #[zbus(property)]
    fn text_direction(&self) -> String {
        "ltr".into()
    }

    #[zbus(property)]
    fn icon_theme_path(&self) -> Vec<String> {
        Vec::new()
    }

    #[zbus(signal)]
    pub async fn layout_updated(
        emitter: &SignalEmitter<'_>,
        revision: u32,
        parent: i32,
    ) -> zbus::Result<()>;
}

#[cfg(test)]
mod tests {
    use futures_util::FutureExt;
    use linkhub_menu::{TrayEvent, TrayHandle, populate_static};

    use super::*;

    fn next_event(handle: &mut TrayHandle) -> Option<TrayEvent> {
        handle.recv().now_or_never().flatten()
    }

    fn no_data() -> OwnedValue {
        Value::from(0i32).try_to_owned().unwrap()
    }

    fn menu() -> (DbusMenu, TrayHandle) {
        let store = Arc::new(MenuStore::new());
        populate_static(&store);
        let (handle, events) = TrayHandle::new();
        (DbusMenu::new(store, events), handle)
    }

    fn child_id(child: &Value<'_>) -> i32 {
        match child {
            Value::Structure(s) => match s.fields().first() {
                Some(Value::I32(id)) => *id,
                other => panic!("unexpected id field: {other:?}"),
            },
            other => panic!("child is not a structure: {other:?}"),
        }
    }

    #[test]
    fn layout_lists_static_rows() {
        let (menu, _handle) = menu();
        let (revision, (id, props, children)) = menu.get_layout(0, -1, Vec::new()).unwrap();

        assert_eq!(revision, 6);
        assert_eq!(id, 0);
        assert_eq!(props.get("children-display"), Some(&Value::from("submenu")));
        let ids: Vec<i32> = children.iter().map(child_id).collect();
        assert_eq!(ids, vec![1, 2, 100, 101, 102, 103]);
    }

    #[test]
    fn layout_tracks_store_revision() {
        let (menu, _handle) = menu();
        menu.store
            .insert_after_anchor(1000, ItemProps::labeled("[50 %] K70"), ids::HEADER_ANCHOR);

        let (revision, (_, _, children)) = menu.get_layout(0, -1, Vec::new()).unwrap();
        assert_eq!(revision, 7);
        assert_eq!(child_id(&children[2]), 1000);
    }

    #[test]
    fn zero_depth_omits_children() {
        let (menu, _handle) = menu();
        let (_, (_, _, children)) = menu.get_layout(0, 0, Vec::new()).unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn leaf_parent_returns_item_alone() {
        let (menu, _handle) = menu();
        let (_, (id, props, children)) = menu.get_layout(103, -1, Vec::new()).unwrap();

        assert_eq!(id, 103);
        assert_eq!(props.get("label"), Some(&Value::from("Quit")));
        assert!(children.is_empty());
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let (menu, _handle) = menu();
        let err = menu.get_layout(4242, -1, Vec::new()).unwrap_err();
        assert!(matches!(err, fdo::Error::InvalidArgs(_)));
    }

    #[test]
    fn property_filter_applies() {
        let (menu, _handle) = menu();
        let (_, (_, props, _)) = menu.get_layout(103, -1, vec!["label".into()]).unwrap();
        assert_eq!(props.len(), 1);
        assert!(props.contains_key("label"));

        let (_, (_, root_props, _)) = menu.get_layout(0, -1, vec!["label".into()]).unwrap();
        assert!(root_props.is_empty());
    }

    #[test]
    fn header_is_disabled_on_the_wire() {
        let props = properties(&linkhub_menu::static_items()[0].props, &[]);
        assert_eq!(props.get("enabled"), Some(&Value::from(false)));
        assert_eq!(props.get("icon-name"), Some(&Value::from("battery-good")));
        assert_eq!(props.get("type"), Some(&Value::from("standard")));
    }

    #[test]
    fn group_properties() {
        let (menu, _handle) = menu();

        let all = menu.get_group_properties(Vec::new(), Vec::new());
        assert_eq!(all.len(), 6);

        let some = menu.get_group_properties(vec![101, 9999], vec!["label".into()]);
        assert_eq!(some.len(), 1);
        assert_eq!(some[0].0, 101);
        assert_eq!(some[0].1.get("label"), Some(&Value::from("Open Dashboard")));
    }

    #[test]
    fn single_property() {
        let (menu, _handle) = menu();
        assert_eq!(
            menu.get_property(101, "label".into()).unwrap(),
            Value::from("Open Dashboard")
        );
        assert!(menu.get_property(2, "label".into()).is_err());
        assert!(menu.get_property(9999, "label".into()).is_err());
    }

    #[test]
    fn click_on_quit_requests_exit() {
        let (menu, mut handle) = menu();
        menu.event(ids::QUIT, "clicked".into(), no_data(), 0);
        assert_eq!(next_event(&mut handle), Some(TrayEvent::QuitRequested));
    }

    #[test]
    fn click_on_dashboard_opens_it() {
        let (menu, mut handle) = menu();
        menu.event(ids::OPEN_DASHBOARD, "clicked".into(), no_data(), 0);
        assert_eq!(next_event(&mut handle), Some(TrayEvent::OpenDashboard));
    }

    #[test]
    fn hover_is_ignored() {
        let (menu, mut handle) = menu();
        menu.event(ids::QUIT, "hovered".into(), no_data(), 0);
        assert!(next_event(&mut handle).is_none());
    }

    #[test]
    fn click_on_battery_row_is_inert() {
        let (menu, mut handle) = menu();
        menu.store
            .insert_after_anchor(1000, ItemProps::labeled("[50 %] K70"), ids::HEADER_ANCHOR);
        let before = menu.store.snapshot();

        menu.event(1000, "clicked".into(), no_data(), 0);

        assert!(next_event(&mut handle).is_none());
        assert_eq!(menu.store.snapshot(), before);
    }

    #[test]
    fn event_group_reports_unknown_ids() {
        let (menu, mut handle) = menu();
        let errors = menu.event_group(vec![
            (4242, "clicked".into(), no_data(), 0),
            (ids::OPEN_DASHBOARD, "clicked".into(), no_data(), 0),
        ]);

        assert_eq!(errors, vec![4242]);
        assert_eq!(next_event(&mut handle), Some(TrayEvent::OpenDashboard));
    }

    #[test]
    fn about_to_show_needs_no_update() {
        let (menu, _handle) = menu();
        assert!(!menu.about_to_show(0));

        let (updates, errors) = menu.about_to_show_group(vec![0, 101, 4242]);
        assert!(updates.is_empty());
        assert_eq!(errors, vec![4242]);
    }

    #[test]
    fn interface_name() {
        use linkhub_protocol::constants::MENU_INTERFACE;
        use zbus::object_server::Interface;
        assert_eq!(DbusMenu::name().as_str(), MENU_INTERFACE);
    }

    #[test]
    fn constant_properties() {
        let (menu, _handle) = menu();
        assert_eq!(menu.version(), 3);
        assert_eq!(menu.status(), "normal");
        assert_eq!(menu.text_direction(), "ltr");
        assert!(menu.icon_theme_path().is_empty());
    }
}
