//! Ordering guarantees of the two-phase refresh

use std::cell::RefCell;
use std::rc::Rc;

use uipanel::panel::{self, Geometry, Panel, Widget};

type Log = Rc<RefCell<Vec<String>>>;

/// Records every measure/apply and checks apply sees its own measurement
struct Recorder {
    panel: Panel,
    name: &'static str,
    log: Log,
    measured: Option<f64>,
    applied_width: Option<f64>,
}

impl Recorder {
    fn new(name: &'static str, log: &Log, width: f64) -> Self {
        let mut panel = Panel::new();
        panel.element_mut().set_geometry(Geometry::sized(width, 10.0));
        Recorder {
            panel,
            name,
            log: log.clone(),
            measured: None,
            applied_width: None,
        }
    }
}

impl Widget for Recorder {
    uipanel::impl_widget_base!(panel);

    fn measure(&mut self) {
        self.log.borrow_mut().push(format!("measure {}", self.name));
        self.measured = Some(self.panel.element().geometry().client_width);
        self.panel.measure_children();
    }

    fn apply(&mut self) {
        self.panel.apply_children();
        self.log.borrow_mut().push(format!("apply {}", self.name));
        self.applied_width = self.measured.take();
        // writing geometry here must not leak into any other node's measure
        self.panel.element_mut().set_geometry(Geometry::sized(0.0, 0.0));
    }
}

fn tree(log: &Log) -> Recorder {
    let mut a = Recorder::new("a", log, 20.0);
    a.panel_mut().append_child(Recorder::new("a1", log, 30.0));

    // a plain panel in the middle only recurses
    let mut plain = Panel::new();
    plain.append_child(Recorder::new("b", log, 40.0));

    let mut root = Recorder::new("root", log, 10.0);
    root.panel_mut().append_child(a);
    root.panel_mut().append_child(plain);
    root
}

#[test]
fn every_measure_precedes_every_apply() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut root = tree(&log);
    panel::refresh(&mut root);

    let entries = log.borrow();
    assert_eq!(
        *entries,
        vec![
            "measure root",
            "measure a",
            "measure a1",
            "measure b",
            "apply a1",
            "apply a",
            "apply b",
            "apply root",
        ]
    );
}

#[test]
fn apply_uses_values_captured_before_any_write() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut root = tree(&log);
    panel::refresh(&mut root);

    assert_eq!(root.applied_width, Some(10.0));
    let a_id = root.panel().child_ids()[0];
    let a = root.panel().child_as::<Recorder>(a_id).unwrap();
    assert_eq!(a.applied_width, Some(20.0));

    let a1_id = a.panel().child_ids()[0];
    let a1 = root.panel().find(a1_id).unwrap();
    let a1 = a1.as_any().downcast_ref::<Recorder>().unwrap();
    assert_eq!(a1.applied_width, Some(30.0));
}

#[test]
fn removed_subtrees_leave_the_refresh() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut root = tree(&log);
    let plain_id = root.panel().child_ids()[1];

    let detached = root.panel_mut().remove_child(plain_id);
    assert!(detached.is_some());
    assert!(root.panel_mut().remove_child(plain_id).is_none());

    panel::refresh(&mut root);
    assert!(!log.borrow().iter().any(|e| e.ends_with(" b")));
}

#[test]
fn remove_all_is_idempotent() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let mut root = tree(&log);
    assert_eq!(root.panel().subtree_len(), 4);

    root.panel_mut().remove_all();
    root.panel_mut().remove_all();
    assert!(root.panel().is_empty());

    panel::refresh(&mut root);
    assert_eq!(*log.borrow(), vec!["measure root", "apply root"]);
}

#[test]
fn highlight_alternate_marks_odd_children() {
    let mut list = Panel::new();
    let ids: Vec<_> = (0..4).map(|_| list.append_child(Panel::new())).collect();
    list.set_highlight_alternate(true);
    let shaded: Vec<bool> = ids
        .iter()
        .map(|id| list.child(*id).unwrap().panel().has_class("alt-shade"))
        .collect();
    assert_eq!(shaded, vec![false, true, false, true]);

    list.set_highlight_alternate(false);
    assert!(list.children().all(|c| !c.panel().has_class("alt-shade")));
}
