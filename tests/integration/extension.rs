//! Budget hooks, registered renderers and capability renderers.
//!
//! The registry is process-wide, so every test here registers against a
//! type that no other test renders.

use std::any::Any;
use std::io;
use std::sync::{Arc, Mutex};

use reprobate::{
    is_registered, register, register_capability, registered_types, render, render_attrs,
    render_child, unregister, BudgetRepr, Capability, Inspect, Items, RenderError, RenderResult,
    SeqKind, Shape,
};

struct Celsius(f64);

impl Inspect for Celsius {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(self.0)
    }
}

#[test]
fn test_register_and_unregister_exact_type() {
    assert_eq!(render(&Celsius(21.5), 20), "21.5");

    register::<Celsius, _>(|c: &Celsius, _budget: usize| Ok(format!("{}°C", c.0)));
    assert!(is_registered::<Celsius>());
    assert!(registered_types().iter().any(|name| name.ends_with("Celsius")));
    assert_eq!(render(&Celsius(21.5), 20), "21.5°C");
    assert_eq!(render(&vec![Celsius(1.0), Celsius(2.0)], 40), "[1°C, 2°C]");

    assert!(unregister::<Celsius>());
    assert!(!unregister::<Celsius>());
    assert!(!is_registered::<Celsius>());
    assert_eq!(render(&Celsius(21.5), 20), "21.5");
}

struct Matrix {
    rows: Vec<Vec<i32>>,
}

impl BudgetRepr for Matrix {
    fn budget_repr(&self, budget: usize) -> RenderResult<String> {
        let label = format!("Matrix {}x{} ", self.rows.len(), self.rows[0].len());
        let room = budget.saturating_sub(label.len());
        Ok(format!("{label}{}", render_child(&self.rows, room)?))
    }
}

impl Inspect for Matrix {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(None)
    }

    fn as_budget_repr(&self) -> Option<&dyn BudgetRepr> {
        Some(self)
    }
}

#[test]
fn test_budget_hook_recurses_through_render_child() {
    let m = Matrix {
        rows: vec![vec![1, 2], vec![3, 4]],
    };
    assert_eq!(render(&m, 100), "Matrix 2x2 [[1, 2], [3, 4]]");

    let out = render(&m, 25);
    assert!(out.starts_with("Matrix 2x2 "), "{out}");
    assert!(out.chars().count() <= 25);
}

struct Endpoint {
    host: String,
    port: u16,
    secret: String,
}

impl BudgetRepr for Endpoint {
    fn budget_repr(&self, budget: usize) -> RenderResult<String> {
        render_attrs(
            &[("host", &self.host as &dyn Inspect), ("port", &self.port)],
            "Endpoint",
            budget,
        )
    }
}

impl Inspect for Endpoint {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(&self.secret)
    }

    fn as_budget_repr(&self) -> Option<&dyn BudgetRepr> {
        Some(self)
    }
}

#[test]
fn test_budget_hook_wins_over_shape() {
    let endpoint = Endpoint {
        host: "db.local".into(),
        port: 5432,
        secret: "hunter2".into(),
    };
    assert_eq!(render(&endpoint, 100), "Endpoint(host='db.local', port=5432)");
    assert!(!render(&endpoint, 12).contains("hunter2"));
}

struct Exploding;

impl BudgetRepr for Exploding {
    fn budget_repr(&self, _budget: usize) -> RenderResult<String> {
        panic!("boom");
    }
}

impl Inspect for Exploding {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(None)
    }

    fn as_budget_repr(&self) -> Option<&dyn BudgetRepr> {
        Some(self)
    }
}

#[test]
fn test_panicking_hook_falls_back_to_type_name() {
    assert_eq!(render(&Exploding, 50), "<Exploding>");
    assert_eq!(render(&vec![Exploding], 50), "[<Exploding>]");
}

struct Refusing;

impl Inspect for Refusing {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(None)
    }
}

#[test]
fn test_failing_renderer_falls_back_to_type_name() {
    register::<Refusing, _>(|_: &Refusing, _: usize| Err(RenderError::failed("not today")));
    assert_eq!(render(&Refusing, 50), "<Refusing>");
    assert_eq!(render(&Refusing, 8), "<Refusin");
}

struct Chatty;

impl Inspect for Chatty {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(None)
    }
}

/// Log sink shared between a test and its subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_overflowing_renderer_is_clamped() {
    register::<Chatty, _>(|_: &Chatty, _: usize| Ok("blah ".repeat(50)));

    let logs = Captured::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        for budget in [0, 1, 10, 100] {
            assert!(render(&Chatty, budget).chars().count() <= budget);
        }
    });
    assert!(logs.text().contains("renderer exceeded its budget"));
}

struct Secret(&'static str);

impl Inspect for Secret {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(Some(self.0.into()))
    }
}

#[test]
fn test_capability_renderer() {
    register_capability(
        Capability::matching("secret", |value: &dyn Inspect| {
            let any: &dyn Any = value;
            any.is::<Secret>()
        }),
        |_: &dyn Inspect, budget: usize| Ok("<redacted>".chars().take(budget).collect()),
    );
    assert_eq!(render(&Secret("p4ss"), 50), "<redacted>");
    assert_eq!(render(&vec![Secret("a"), Secret("b")], 50), "[<redacted>, <redacted>]");
}

struct Envelope {
    inner: Vec<u8>,
}

impl Inspect for Envelope {
    fn shape(&self) -> Shape<'_> {
        Shape::Opaque(None)
    }
}

#[test]
fn test_nested_top_level_render_inside_renderer() {
    register::<Envelope, _>(|e: &Envelope, budget: usize| {
        let body = render(&e.inner, budget.saturating_sub(10));
        Ok(format!("Envelope {body}"))
    });
    let out = render(&Envelope { inner: vec![1, 2, 3] }, 40);
    assert_eq!(out, "Envelope [1, 2, 3]");
    assert!(matches!(render_child(&1, 5), Err(RenderError::NoActiveRender)));
}

#[test]
fn test_capability_debug_uses_name() {
    assert_eq!(format!("{:?}", Capability::Mapping), "Capability(mapping)");
    let custom = Capability::matching("always", |_: &dyn Inspect| true);
    assert_eq!(custom.name(), "always");
}

struct Route(Vec<&'static str>);

impl Inspect for Route {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(SeqKind::List, Items::of(self.0.iter()))
    }
}

#[test]
fn test_capability_renderer_takes_over_sequence_shape() {
    let route = Route(vec!["a", "b", "c"]);
    assert_eq!(render(&route, 50), "['a', 'b', 'c']");

    register_capability(
        Capability::matching("route", |value: &dyn Inspect| {
            let any: &dyn Any = value;
            any.is::<Route>()
        }),
        |value: &dyn Inspect, _: usize| {
            let any: &dyn Any = value;
            let hops = any.downcast_ref::<Route>().map_or(0, |r| r.0.len());
            Ok(format!("route({hops} hops)"))
        },
    );
    assert_eq!(render(&route, 50), "route(3 hops)");
    assert_eq!(render(&vec![route], 50), "[route(3 hops)]");
    assert_eq!(render(&vec!["a", "b"], 50), "['a', 'b']");
}
