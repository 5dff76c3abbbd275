//! Documented rendering scenarios.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use reprobate::{render, render_with, Counter, DefaultMap, Fields, Inspect, Object, Policy, Shape};

fn user() -> BTreeMap<&'static str, Box<dyn Inspect>> {
    let mut user: BTreeMap<&'static str, Box<dyn Inspect>> = BTreeMap::new();
    user.insert("name", Box::new("alice"));
    user.insert("scores", Box::new(vec![98, 87, 95, 72, 88]));
    user
}

struct Node {
    name: &'static str,
    next: RefCell<Option<Rc<Node>>>,
}

impl Node {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            next: RefCell::new(None),
        })
    }
}

impl Inspect for Node {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(Fields::new().field("name", &self.name).field("next", &self.next))
    }
}

#[test]
fn test_full_rendering_when_budget_allows() {
    assert_eq!(
        render(&user(), 60),
        "{'name': 'alice', 'scores': [98, 87, 95, 72, 88]}"
    );
}

#[test]
fn test_mapping_degrades_to_count() {
    assert_eq!(render(&user(), 30), "{'name': 'alice', ...1 more}");
}

#[test]
fn test_long_list_collapses_with_exact_count() {
    let big: Vec<u32> = (0..1000).collect();
    assert_eq!(render(&big, 40), "[0, 1, 2, 3, ...996 more]");
}

#[test]
fn test_long_list_shows_last_item_when_roomy() {
    let big: Vec<u32> = (0..1000).collect();
    assert_eq!(render(&big, 80), "[0, 1, 2, 3, 4, 5, 6, ...992 more, 999]");
}

#[test]
fn test_mutual_references_render_one_cycle_marker() {
    let a = Node::new("a");
    let b = Node::new("b");
    *a.next.borrow_mut() = Some(Rc::clone(&b));
    *b.next.borrow_mut() = Some(Rc::clone(&a));

    let out = render(&a, 200);
    assert_eq!(out, "Node(name='a', next=Node(name='b', next=<...>))");
    assert_eq!(out.matches("<...>").count(), 1);

    a.next.borrow_mut().take();
}

#[test]
fn test_shared_reference_is_not_a_cycle() {
    let shared = Rc::new(vec![1, 2]);
    let pair = vec![Rc::clone(&shared), Rc::clone(&shared)];
    assert_eq!(render(&pair, 100), "[[1, 2], [1, 2]]");
}

#[test]
fn test_tiny_budgets_never_fail() {
    let values: Vec<Box<dyn Inspect>> = vec![
        Box::new(user()),
        Box::new((0..1000).collect::<Vec<u32>>()),
        Box::new("a string that is long"),
        Box::new(3.25),
        Box::new(()),
    ];
    for value in &values {
        assert_eq!(render(value.as_ref(), 0), "");
        assert!(render(value.as_ref(), 1).chars().count() <= 1);
    }
}

#[test]
fn test_even_policy_spreads_detail() {
    let words = vec!["x".repeat(30); 3];
    let cut = format!("'{}...'", "x".repeat(13));

    assert_eq!(
        render_with(&words, 60, Policy::Greedy),
        format!("['{}', ...2 more]", "x".repeat(30))
    );
    assert_eq!(
        render_with(&words, 60, Policy::Even),
        format!("[{cut}, {cut}, {cut}]")
    );
}

#[test]
fn test_wrapper_types() {
    let counter: Counter<&str> = ["a", "b", "a"].into_iter().collect();
    assert_eq!(render(&counter, 100), "Counter({'a': 2, 'b': 1})");

    let mut groups: DefaultMap<&str, Vec<i32>> = DefaultMap::new();
    groups.entry("k").push(1);
    assert_eq!(render(&groups, 100), "DefaultMap(Vec, {'k': [1]})");

    let user = Object::new("User").with("name", "alice").with("age", 30);
    assert_eq!(render(&user, 100), "User(name='alice', age=30)");
}

#[test]
fn test_scalars_and_text() {
    assert_eq!(render(&true, 10), "true");
    assert_eq!(render(&None::<i32>, 10), "None");
    assert_eq!(render(&Some(5), 10), "5");
    assert_eq!(render(&"it's\n", 20), "\"it's\\n\"");
    assert_eq!(render(&(1, "a"), 20), "(1, 'a')");
    assert_eq!(render(&(7,), 20), "(7,)");
}

#[cfg(feature = "json")]
#[test]
fn test_json_document() {
    let doc = serde_json::json!({"name": "alice", "tags": ["a", "b"], "admin": false});
    assert_eq!(
        render(&doc, 100),
        "{'admin': false, 'name': 'alice', 'tags': ['a', 'b']}"
    );
}
